use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A free-form submission from the attendance form, keyed by a
/// generated id rather than user/date/shift. Rows are inserted by the
/// submission flow and later edited (name/note only) by the edit flow;
/// nothing here deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaRecord {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub note: Option<String>,
    pub photo_url: Option<String>,
}

pub const MEDIA_TABLE: &str = "attendancesmultimedia";

pub const MEDIA_COLUMNS: &str = "id, created_at, user_id, name, note, photo_url";

/// Insert shape for a new media row. The id and created_at come from
/// the backend's column defaults.
#[derive(Debug, Serialize)]
pub struct NewMediaRecord {
    pub user_id: Uuid,
    pub name: String,
    pub note: Option<String>,
    pub photo_url: Option<String>,
}
