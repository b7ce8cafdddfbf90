use crate::auth::auth::AuthUser;
use crate::backend::{Backend, BackendError};
use crate::config::Config;
use crate::model::attendance::{ATTENDANCE_COLUMNS, AttendanceRecord};
use crate::model::day_status::DayStatus;
use crate::model::shift::Shift;
use crate::utils::photo::{self, PhotoUpload};
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

pub const ATTENDANCE_TABLE: &str = "attendance";

pub const RPC_CLOCK_IN: &str = "clock_in_shift";
pub const RPC_CLOCK_OUT: &str = "clock_out_shift";

#[derive(Debug, Deserialize, ToSchema)]
pub struct TodayQuery {
    /// Selected shift, defaults to 1.
    pub shift: Option<u8>,
}

#[derive(Deserialize, ToSchema)]
pub struct ClockInRequest {
    #[schema(example = 1)]
    pub shift: u8,
    pub notes: Option<String>,
    pub photo: Option<PhotoUpload>,
}

#[derive(Deserialize, ToSchema)]
pub struct ClockOutRequest {
    #[schema(example = 1)]
    pub shift: u8,
}

/// Argument payload of the clock-in procedure.
#[derive(Serialize)]
struct ClockInArgs<'a> {
    p_shift: u8,
    p_notes: Option<&'a str>,
    p_photo_url: Option<&'a str>,
}

#[derive(Serialize)]
struct ClockOutArgs {
    p_shift: u8,
}

async fn fetch_today(
    backend: &Backend,
    auth: &AuthUser,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, BackendError> {
    backend
        .table(ATTENDANCE_TABLE)
        .select(ATTENDANCE_COLUMNS)
        .eq("user_id", auth.user_id)
        .eq("a_date", date)
        .order_asc("shift")
        .fetch(&auth.token)
        .await
}

/// Today's shift state for the caller
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(
        ("shift", Query, description = "Selected shift (1 or 2), defaults to 1")
    ),
    responses(
        (status = 200, description = "Derived day status", body = DayStatus),
        (status = 400, description = "Invalid shift"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn today(
    auth: AuthUser,
    backend: web::Data<Backend>,
    query: web::Query<TodayQuery>,
) -> actix_web::Result<impl Responder> {
    let selected = match Shift::from_id(query.shift.unwrap_or(1)) {
        Some(s) => s,
        None => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": "Shift harus 1 atau 2"
            })));
        }
    };

    let today = Utc::now().date_naive();
    match fetch_today(backend.get_ref(), &auth, today).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(DayStatus::derive(today, &rows, selected))),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Failed to fetch today's attendance");
            Ok(super::backend_failure(&e))
        }
    }
}

/// Clock-in endpoint
///
/// Optional photo is validated and uploaded first; the clock-in
/// procedure then records the row. If the procedure fails after the
/// upload, the photo stays in storage (no rollback).
#[utoipa::path(
    post,
    path = "/api/attendance/clock-in",
    request_body = ClockInRequest,
    responses(
        (status = 200, description = "Clocked in, refreshed day status", body = DayStatus),
        (status = 400, description = "Invalid shift or rejected photo", body = Object, example = json!({
            "error": "File harus JPG/PNG/WEBP"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn clock_in(
    auth: AuthUser,
    backend: web::Data<Backend>,
    config: web::Data<Config>,
    payload: web::Json<ClockInRequest>,
) -> actix_web::Result<impl Responder> {
    let shift = match Shift::from_id(payload.shift) {
        Some(s) => s,
        None => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": "Shift harus 1 atau 2"
            })));
        }
    };

    let today = Utc::now().date_naive();

    // Photo first: validation happens before any network call.
    let photo_url = match &payload.photo {
        Some(upload) => {
            let photo = match photo::validate(upload) {
                Ok(p) => p,
                Err(msg) => {
                    return Ok(HttpResponse::BadRequest().json(json!({ "error": msg })));
                }
            };
            // One slot per user/date/shift, retries overwrite.
            let path = photo::shift_photo_path(&auth.user_id, today, shift, &photo.ext);
            match backend
                .upload_object(
                    &config.attendance_bucket,
                    &path,
                    photo.bytes,
                    &photo.content_type,
                    true,
                    &auth.token,
                )
                .await
            {
                Ok(url) => Some(url),
                Err(e) => {
                    error!(error = %e, user_id = %auth.user_id, path = %path, "Photo upload failed");
                    return Ok(super::backend_failure(&e));
                }
            }
        }
        None => None,
    };

    let notes = payload
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let args = ClockInArgs {
        p_shift: shift.id(),
        p_notes: notes,
        p_photo_url: photo_url.as_deref(),
    };

    if let Err(e) = backend.rpc(RPC_CLOCK_IN, &args, &auth.token).await {
        error!(error = %e, user_id = %auth.user_id, shift = shift.id(), "Clock-in failed");
        return Ok(super::backend_failure(&e));
    }

    // Refresh only after the action settled.
    match fetch_today(backend.get_ref(), &auth, today).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(DayStatus::derive(today, &rows, shift))),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Refresh after clock-in failed");
            Ok(super::backend_failure(&e))
        }
    }
}

/// Clock-out endpoint
#[utoipa::path(
    put,
    path = "/api/attendance/clock-out",
    request_body = ClockOutRequest,
    responses(
        (status = 200, description = "Clocked out, refreshed day status", body = DayStatus),
        (status = 400, description = "Invalid shift or no open clock-in"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn clock_out(
    auth: AuthUser,
    backend: web::Data<Backend>,
    payload: web::Json<ClockOutRequest>,
) -> actix_web::Result<impl Responder> {
    let shift = match Shift::from_id(payload.shift) {
        Some(s) => s,
        None => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": "Shift harus 1 atau 2"
            })));
        }
    };

    let args = ClockOutArgs { p_shift: shift.id() };
    if let Err(e) = backend.rpc(RPC_CLOCK_OUT, &args, &auth.token).await {
        error!(error = %e, user_id = %auth.user_id, shift = shift.id(), "Clock-out failed");
        return Ok(super::backend_failure(&e));
    }

    let today = Utc::now().date_naive();
    match fetch_today(backend.get_ref(), &auth, today).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(DayStatus::derive(today, &rows, shift))),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Refresh after clock-out failed");
            Ok(super::backend_failure(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    // The handler side of a clock-in body: if deserialization got this
    // far the framework's payload cap did not eat the request.
    async fn accept(payload: web::Json<ClockInRequest>) -> HttpResponse {
        let upload = payload.photo.as_ref().unwrap();
        assert!(photo::validate(upload).is_ok());
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn json_limit_admits_a_full_size_photo() {
        let app = test::init_service(
            App::new()
                .app_data(crate::routes::json_payload_config())
                .route("/clock-in", web::post().to(accept)),
        )
        .await;

        // 3 MiB of file bytes, well under the 5 MiB ceiling but past
        // the framework's default 2 MB JSON cap once base64-encoded.
        let body = serde_json::json!({
            "shift": 1,
            "photo": {
                "file_name": "selfie.jpg",
                "content_type": "image/jpeg",
                "data_base64": BASE64.encode(vec![0u8; 3 * 1024 * 1024]),
            }
        });

        let req = test::TestRequest::post()
            .uri("/clock-in")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(
            resp.status().is_success(),
            "valid photo rejected: status {}",
            resp.status()
        );
    }

    #[::core::prelude::v1::test]
    fn json_limit_covers_the_encoded_ceiling() {
        // Exactly 5 MiB of file bytes must still fit inside the
        // configured JSON limit after encoding plus envelope.
        let encoded = BASE64.encode(vec![0u8; crate::utils::photo::MAX_SIZE_MB * 1024 * 1024]);
        assert!(encoded.len() + 1024 < crate::routes::JSON_PAYLOAD_LIMIT);
    }
}
