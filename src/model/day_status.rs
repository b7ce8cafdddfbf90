use crate::model::attendance::AttendanceRecord;
use crate::model::shift::Shift;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

const TIME_PLACEHOLDER: &str = "-";

/// Per-shift display summary derived from at most one attendance row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShiftSummary {
    #[schema(example = 1, value_type = u8)]
    pub shift: Shift,
    #[schema(example = "08:00–12:00")]
    pub window: String,
    /// "HH:MM" in UTC, or "-" when not clocked in.
    #[schema(example = "08:03")]
    pub clock_in: String,
    #[schema(example = "-")]
    pub clock_out: String,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub clock_in_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub clock_out_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

/// Shift-state view of one user's day: which actions the selected
/// shift currently permits, plus display summaries for both shifts.
///
/// Pure function of the row set and the selection; re-derived after
/// every successful clock action and on selection change.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayStatus {
    #[schema(example = "2025-08-25", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = 1, value_type = u8)]
    pub selected_shift: Shift,
    pub can_clock_in: bool,
    pub can_clock_out: bool,
    pub shift_one: ShiftSummary,
    pub shift_two: ShiftSummary,
}

impl DayStatus {
    /// A missing row and a row with null timestamps are the same thing
    /// as far as permissions go.
    pub fn derive(date: NaiveDate, rows: &[AttendanceRecord], selected: Shift) -> Self {
        let row_for = |shift: Shift| rows.iter().find(|r| r.shift == shift);

        let current = row_for(selected);
        let clock_in_at = current.and_then(|r| r.clock_in_at);
        let clock_out_at = current.and_then(|r| r.clock_out_at);

        DayStatus {
            date,
            selected_shift: selected,
            can_clock_in: clock_in_at.is_none(),
            can_clock_out: clock_in_at.is_some() && clock_out_at.is_none(),
            shift_one: summarize(Shift::One, row_for(Shift::One)),
            shift_two: summarize(Shift::Two, row_for(Shift::Two)),
        }
    }
}

fn summarize(shift: Shift, row: Option<&AttendanceRecord>) -> ShiftSummary {
    let clock_in_at = row.and_then(|r| r.clock_in_at);
    let clock_out_at = row.and_then(|r| r.clock_out_at);
    ShiftSummary {
        shift,
        window: shift.window().to_string(),
        clock_in: display_time(clock_in_at),
        clock_out: display_time(clock_out_at),
        clock_in_at,
        clock_out_at,
        notes: row.and_then(|r| r.notes.clone()),
        photo_url: row.and_then(|r| r.photo_url.clone()),
    }
}

fn display_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%H:%M").to_string(),
        None => TIME_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 25).unwrap()
    }

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 25, h, m, 0).unwrap()
    }

    fn row(
        shift: Shift,
        clock_in_at: Option<DateTime<Utc>>,
        clock_out_at: Option<DateTime<Utc>>,
    ) -> AttendanceRecord {
        AttendanceRecord {
            user_id: Uuid::new_v4(),
            a_date: date(),
            shift,
            clock_in_at,
            clock_out_at,
            notes: None,
            photo_url: None,
        }
    }

    #[test]
    fn empty_day_permits_clock_in_only() {
        let status = DayStatus::derive(date(), &[], Shift::One);
        assert!(status.can_clock_in);
        assert!(!status.can_clock_out);
        assert_eq!(status.shift_one.clock_in, "-");
        assert_eq!(status.shift_two.clock_out, "-");
    }

    #[test]
    fn row_with_null_timestamps_behaves_like_no_row() {
        let rows = [row(Shift::One, None, None)];
        let status = DayStatus::derive(date(), &rows, Shift::One);
        assert!(status.can_clock_in);
        assert!(!status.can_clock_out);
    }

    #[test]
    fn open_clock_in_disables_in_and_enables_out() {
        // State right after a successful clock-in for shift 1.
        let rows = [row(Shift::One, Some(ts(8, 3)), None)];
        let status = DayStatus::derive(date(), &rows, Shift::One);
        assert!(!status.can_clock_in);
        assert!(status.can_clock_out);
        assert_eq!(status.shift_one.clock_in, "08:03");
        assert_eq!(status.shift_one.clock_out, "-");
    }

    #[test]
    fn completed_shift_permits_neither_action() {
        let rows = [row(Shift::One, Some(ts(8, 0)), Some(ts(12, 1)))];
        let status = DayStatus::derive(date(), &rows, Shift::One);
        assert!(!status.can_clock_in);
        assert!(!status.can_clock_out);
        assert_eq!(status.shift_one.clock_out, "12:01");
    }

    #[test]
    fn permissions_follow_the_selected_shift_only() {
        let rows = [row(Shift::One, Some(ts(8, 0)), Some(ts(12, 0)))];
        let status = DayStatus::derive(date(), &rows, Shift::Two);
        assert!(status.can_clock_in);
        assert!(!status.can_clock_out);
        // Shift one's summary is still rendered.
        assert_eq!(status.shift_one.clock_in, "08:00");
    }

    #[test]
    fn summaries_carry_notes_and_photo() {
        let mut r = row(Shift::Two, Some(ts(13, 5)), None);
        r.notes = Some("lembur".to_string());
        r.photo_url = Some("https://example.test/p.jpg".to_string());
        let status = DayStatus::derive(date(), &[r], Shift::Two);
        assert_eq!(status.shift_two.notes.as_deref(), Some("lembur"));
        assert_eq!(
            status.shift_two.photo_url.as_deref(),
            Some("https://example.test/p.jpg")
        );
        assert_eq!(status.shift_two.window, "13:00–16:45");
    }
}
