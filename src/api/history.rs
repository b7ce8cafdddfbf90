use crate::api::attendance::ATTENDANCE_TABLE;
use crate::auth::auth::AuthUser;
use crate::backend::Backend;
use crate::model::attendance::{ATTENDANCE_COLUMNS, AttendanceRecord};
use crate::utils::dates::month_bounds;
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use tracing::error;

/// Caller's attendance for the current calendar month
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Rows ordered by date then shift", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn month_history(
    auth: AuthUser,
    backend: web::Data<Backend>,
) -> actix_web::Result<impl Responder> {
    let (from, to) = month_bounds(Utc::now().date_naive());

    let result = backend
        .table(ATTENDANCE_TABLE)
        .select(ATTENDANCE_COLUMNS)
        .eq("user_id", auth.user_id)
        .gte("a_date", from)
        .lte("a_date", to)
        .order_asc("a_date")
        .order_asc("shift")
        .fetch::<AttendanceRecord>(&auth.token)
        .await;

    match result {
        Ok(rows) => Ok(HttpResponse::Ok().json(rows)),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Failed to fetch history");
            Ok(super::backend_failure(&e))
        }
    }
}
