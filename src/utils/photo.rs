//! Photo screening before anything touches the network, plus the
//! deterministic storage paths used by the two upload call sites.

use crate::model::shift::Shift;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];
pub const MAX_SIZE_MB: usize = 5;

/// A photo as it crosses the API: metadata plus base64 file bytes.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PhotoUpload {
    #[schema(example = "selfie.jpg")]
    pub file_name: String,
    #[schema(example = "image/jpeg")]
    pub content_type: String,
    /// Standard base64 of the raw file bytes.
    pub data_base64: String,
}

#[derive(Debug)]
pub struct ValidatedPhoto {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub ext: String,
}

/// Reject unsupported formats and oversized files. Runs entirely
/// in-process; a rejected photo never causes a storage call.
pub fn validate(upload: &PhotoUpload) -> Result<ValidatedPhoto, String> {
    if !ALLOWED_TYPES.contains(&upload.content_type.as_str()) {
        return Err("File harus JPG/PNG/WEBP".to_string());
    }

    let bytes = BASE64
        .decode(upload.data_base64.as_bytes())
        .map_err(|_| "File tidak valid".to_string())?;

    if bytes.len() > MAX_SIZE_MB * 1024 * 1024 {
        return Err(format!("Maksimal {}MB", MAX_SIZE_MB));
    }

    Ok(ValidatedPhoto {
        bytes,
        content_type: upload.content_type.clone(),
        ext: extension(&upload.file_name),
    })
}

fn extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "jpg".to_string())
}

/// Clock-in photos live at one slot per user/date/shift, so a retry
/// overwrites rather than piling up objects.
pub fn shift_photo_path(user_id: &Uuid, date: NaiveDate, shift: Shift, ext: &str) -> String {
    format!("{}/{}-s{}.{}", user_id, date, shift, ext)
}

/// Form submissions keep every upload, keyed by generation time.
pub fn media_photo_path(user_id: &Uuid, uploaded_at: DateTime<Utc>, ext: &str) -> String {
    format!("{}/{}.{}", user_id, uploaded_at.timestamp_millis(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn upload(content_type: &str, bytes: &[u8]) -> PhotoUpload {
        PhotoUpload {
            file_name: "Foto.JPG".to_string(),
            content_type: content_type.to_string(),
            data_base64: BASE64.encode(bytes),
        }
    }

    #[test]
    fn accepts_an_ordinary_image() {
        let photo = validate(&upload("image/webp", b"riff-bytes")).unwrap();
        assert_eq!(photo.bytes, b"riff-bytes");
        assert_eq!(photo.content_type, "image/webp");
        assert_eq!(photo.ext, "jpg");
    }

    #[test]
    fn rejects_non_image_content_types() {
        let err = validate(&upload("application/pdf", b"%PDF-")).unwrap_err();
        assert_eq!(err, "File harus JPG/PNG/WEBP");
    }

    #[test]
    fn rejects_files_over_the_size_ceiling() {
        let big = vec![0u8; MAX_SIZE_MB * 1024 * 1024 + 1];
        let err = validate(&upload("image/png", &big)).unwrap_err();
        assert_eq!(err, "Maksimal 5MB");
    }

    #[test]
    fn exactly_at_the_ceiling_is_allowed() {
        let exact = vec![0u8; MAX_SIZE_MB * 1024 * 1024];
        assert!(validate(&upload("image/png", &exact)).is_ok());
    }

    #[test]
    fn rejects_garbage_base64() {
        let mut bad = upload("image/jpeg", b"x");
        bad.data_base64 = "@@not-base64@@".to_string();
        assert!(validate(&bad).is_err());
    }

    #[test]
    fn extension_is_lowercased_and_defaults_to_jpg() {
        assert_eq!(extension("Foto.JPG"), "jpg");
        assert_eq!(extension("scan.webp"), "webp");
        assert_eq!(extension("noext"), "jpg");
        assert_eq!(extension("trailingdot."), "jpg");
    }

    #[test]
    fn storage_paths_match_both_call_sites() {
        let user = Uuid::parse_str("5f0c9f2e-6b5d-4e6a-9e12-7a9d2c8b1a34").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 8, 25).unwrap();
        assert_eq!(
            shift_photo_path(&user, date, Shift::One, "png"),
            "5f0c9f2e-6b5d-4e6a-9e12-7a9d2c8b1a34/2025-08-25-s1.png"
        );

        let at = Utc.with_ymd_and_hms(2025, 8, 25, 9, 30, 0).unwrap();
        assert_eq!(
            media_photo_path(&user, at, "jpg"),
            format!("{}/{}.jpg", user, at.timestamp_millis())
        );
    }
}
