use crate::model::shift::Shift;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of the backend-owned `attendance` table. Rows are written
/// only by the backend's clock-in/clock-out procedures; this service
/// never mutates these fields directly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: Uuid,
    #[schema(example = "2025-08-25", format = "date", value_type = String)]
    pub a_date: NaiveDate,
    #[schema(example = 1, value_type = u8)]
    pub shift: Shift,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub clock_in_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub clock_out_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

/// Columns selected from `attendance` everywhere this service reads it.
pub const ATTENDANCE_COLUMNS: &str =
    "user_id, a_date, shift, clock_in_at, clock_out_at, notes, photo_url";
