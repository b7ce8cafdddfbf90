//! Delimited-text export of the monthly recap. One header row, then
//! one row per record; commas in notes become semicolons to dodge the
//! delimiter, nothing else is escaped.

use crate::model::attendance::AttendanceRecord;
use chrono::{DateTime, SecondsFormat, Utc};

pub const RECAP_FILE_NAME: &str = "rekap_bulan_ini.csv";

const HEADER: [&str; 7] = [
    "user_id",
    "a_date",
    "shift",
    "clock_in",
    "clock_out",
    "notes",
    "photo_url",
];

pub fn render_recap(rows: &[AttendanceRecord]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADER.join(","));
    for row in rows {
        lines.push(
            [
                row.user_id.to_string(),
                row.a_date.to_string(),
                row.shift.to_string(),
                timestamp_field(row.clock_in_at),
                timestamp_field(row.clock_out_at),
                row.notes.clone().unwrap_or_default().replace(',', ";"),
                row.photo_url.clone().unwrap_or_default(),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

fn timestamp_field(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::shift::Shift;
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    fn row(notes: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            user_id: Uuid::parse_str("5f0c9f2e-6b5d-4e6a-9e12-7a9d2c8b1a34").unwrap(),
            a_date: NaiveDate::from_ymd_opt(2025, 8, 25).unwrap(),
            shift: Shift::One,
            clock_in_at: Some(Utc.with_ymd_and_hms(2025, 8, 25, 8, 3, 0).unwrap()),
            clock_out_at: None,
            notes: notes.map(str::to_owned),
            photo_url: None,
        }
    }

    #[test]
    fn header_then_one_line_per_row() {
        let csv = render_recap(&[row(None), row(Some("ok"))]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "user_id,a_date,shift,clock_in,clock_out,notes,photo_url"
        );
    }

    #[test]
    fn every_line_has_exactly_seven_fields() {
        let csv = render_recap(&[row(Some("a,b")), row(None), row(Some("x"))]);
        for line in csv.lines() {
            assert_eq!(line.split(',').count(), 7, "line: {}", line);
        }
    }

    #[test]
    fn commas_in_notes_become_semicolons() {
        let csv = render_recap(&[row(Some("a,b"))]);
        let data_line = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = data_line.split(',').collect();
        assert_eq!(fields[5], "a;b");
    }

    #[test]
    fn timestamps_use_utc_millis_and_absent_means_empty() {
        let csv = render_recap(&[row(None)]);
        let fields: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(fields[3], "2025-08-25T08:03:00.000Z");
        assert_eq!(fields[4], "");
        assert_eq!(fields[6], "");
    }
}
