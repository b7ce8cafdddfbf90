use crate::api::attendance::{ClockInRequest, ClockOutRequest, TodayQuery};
use crate::api::media::{SubmitMediaRequest, UpdateMediaRequest};
use crate::model::attendance::AttendanceRecord;
use crate::model::day_status::{DayStatus, ShiftSummary};
use crate::model::media::MediaRecord;
use crate::models::LoginReqDto;
use crate::utils::photo::PhotoUpload;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Absensi API",
        version = "1.0.0",
        description = r#"
## Absensi — shift attendance tracker

Presentation layer over a managed backend: users clock in/out per
shift with an optional note and photo, and administrators export a
monthly CSV recap.

### 🔹 Key Features
- **Attendance**
  - Per-shift clock-in/clock-out with derived day status
- **History**
  - Current-month attendance per user
- **Admin Recap**
  - Month-wide table and CSV download (RLS allow-list decides access)
- **Media**
  - Free-form submissions with photo, editable name/note

### 🔐 Security
Endpoints under the API prefix require a backend-issued **JWT Bearer**
token; the token is forwarded on every backend call so row-level
policies apply to the real caller.

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::me,

        crate::api::attendance::today,
        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,

        crate::api::history::month_history,

        crate::api::recap::month_recap,
        crate::api::recap::month_recap_csv,

        crate::api::media::submit,
        crate::api::media::get_record,
        crate::api::media::update_record
    ),
    components(
        schemas(
            AttendanceRecord,
            MediaRecord,
            DayStatus,
            ShiftSummary,
            TodayQuery,
            ClockInRequest,
            ClockOutRequest,
            SubmitMediaRequest,
            UpdateMediaRequest,
            PhotoUpload,
            LoginReqDto
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Magic-link login and session APIs"),
        (name = "Attendance", description = "Clock-in/out and history APIs"),
        (name = "Admin", description = "Monthly recap APIs"),
        (name = "Media", description = "Attendance form submission APIs"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
