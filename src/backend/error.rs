use derive_more::Display;
use reqwest::StatusCode;

/// Failure taxonomy for the managed-backend binding. Messages are kept
/// verbatim where the backend supplies one; handlers surface them to
/// the caller without translation.
#[derive(Debug, Display)]
pub enum BackendError {
    #[display(fmt = "backend request failed: {}", _0)]
    Transport(String),
    #[display(fmt = "{}", message)]
    Status { status: u16, message: String },
    #[display(fmt = "invalid backend response: {}", _0)]
    Decode(String),
}

impl std::error::Error for BackendError {}

pub(crate) fn transport_error(error: reqwest::Error) -> BackendError {
    BackendError::Transport(error.to_string())
}

/// Pull the human-readable message out of a non-2xx body. The backend
/// answers with JSON whose message key differs per subsystem (PostgREST
/// uses `message`, auth uses `msg` or `error_description`, storage uses
/// `error`), so all are tried before falling back to the raw body.
pub(crate) fn status_error(status: StatusCode, body: &[u8]) -> BackendError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|m| m.as_str()).map(str::to_owned))
        })
        .unwrap_or_else(|| {
            let raw = String::from_utf8_lossy(body).trim().to_string();
            if raw.is_empty() {
                format!("status {}", status.as_u16())
            } else {
                raw
            }
        });

    BackendError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_postgrest_message() {
        let err = status_error(
            StatusCode::CONFLICT,
            br#"{"code":"23505","message":"duplicate key value"}"#,
        );
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "duplicate key value");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn extracts_auth_and_storage_messages() {
        let auth = status_error(StatusCode::BAD_REQUEST, br#"{"msg":"otp disabled"}"#);
        assert_eq!(auth.to_string(), "otp disabled");

        let storage = status_error(
            StatusCode::BAD_REQUEST,
            br#"{"error":"Duplicate","statusCode":"409"}"#,
        );
        assert_eq!(storage.to_string(), "Duplicate");
    }

    #[test]
    fn falls_back_to_raw_body_then_status() {
        let raw = status_error(StatusCode::BAD_GATEWAY, b"upstream exploded");
        assert_eq!(raw.to_string(), "upstream exploded");

        let empty = status_error(StatusCode::BAD_GATEWAY, b"");
        assert_eq!(empty.to_string(), "status 502");
    }
}
