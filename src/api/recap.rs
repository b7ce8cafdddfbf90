use crate::api::attendance::ATTENDANCE_TABLE;
use crate::auth::auth::AuthUser;
use crate::backend::{Backend, BackendError};
use crate::model::attendance::{ATTENDANCE_COLUMNS, AttendanceRecord};
use crate::utils::csv::{RECAP_FILE_NAME, render_recap};
use crate::utils::dates::month_bounds;
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use tracing::error;

/// All users' rows for the current month. Who may actually see them is
/// the backend's row-level allow-list; a denied caller gets an empty
/// set, indistinguishable from a month with no data.
async fn fetch_month(backend: &Backend, token: &str) -> Result<Vec<AttendanceRecord>, BackendError> {
    let (from, to) = month_bounds(Utc::now().date_naive());
    backend
        .table(ATTENDANCE_TABLE)
        .select(ATTENDANCE_COLUMNS)
        .gte("a_date", from)
        .lte("a_date", to)
        .order_asc("user_id")
        .order_asc("a_date")
        .order_asc("shift")
        .fetch(token)
        .await
}

/// Admin recap for the current month
#[utoipa::path(
    get,
    path = "/api/admin/recap",
    responses(
        (status = 200, description = "Rows ordered by user, date, shift", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn month_recap(
    auth: AuthUser,
    backend: web::Data<Backend>,
) -> actix_web::Result<impl Responder> {
    match fetch_month(backend.get_ref(), &auth.token).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(rows)),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Failed to fetch recap");
            Ok(super::backend_failure(&e))
        }
    }
}

/// Recap as a CSV download
#[utoipa::path(
    get,
    path = "/api/admin/recap/csv",
    responses(
        (status = 200, description = "CSV export of the currently visible rows"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn month_recap_csv(
    auth: AuthUser,
    backend: web::Data<Backend>,
) -> actix_web::Result<impl Responder> {
    match fetch_month(backend.get_ref(), &auth.token).await {
        Ok(rows) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", RECAP_FILE_NAME),
            ))
            .body(render_recap(&rows))),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Failed to export recap");
            Ok(super::backend_failure(&e))
        }
    }
}
