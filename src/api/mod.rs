pub mod attendance;
pub mod history;
pub mod media;
pub mod recap;

use crate::backend::BackendError;
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;

/// Surface a backend failure to the caller. Status failures keep the
/// backend's own code and message (the contract is "raw error, no
/// translation"); transport and decode failures become 502.
pub(crate) fn backend_failure(err: &BackendError) -> HttpResponse {
    match err {
        BackendError::Status { status, message } => {
            let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(code).json(json!({ "error": message }))
        }
        other => HttpResponse::BadGateway().json(json!({ "error": other.to_string() })),
    }
}
