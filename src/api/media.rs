use crate::auth::auth::AuthUser;
use crate::backend::Backend;
use crate::config::Config;
use crate::model::media::{MEDIA_COLUMNS, MEDIA_TABLE, MediaRecord, NewMediaRecord};
use crate::utils::photo::{self, PhotoUpload};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct SubmitMediaRequest {
    #[schema(example = "Budi")]
    pub name: String,
    pub note: Option<String>,
    pub photo: Option<PhotoUpload>,
}

/// Edit payload: the two free-text fields. Absent fields are left
/// untouched by the update.
#[derive(Deserialize, ToSchema)]
pub struct UpdateMediaRequest {
    pub name: Option<String>,
    pub note: Option<String>,
}

#[derive(Serialize)]
struct MediaPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

/// Submit an attendance form entry
#[utoipa::path(
    post,
    path = "/api/media",
    request_body = SubmitMediaRequest,
    responses(
        (status = 201, description = "Saved", body = Object, example = json!({
            "message": "Absen tersimpan"
        })),
        (status = 400, description = "Missing name or rejected photo"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Media"
)]
pub async fn submit(
    auth: AuthUser,
    backend: web::Data<Backend>,
    config: web::Data<Config>,
    payload: web::Json<SubmitMediaRequest>,
) -> actix_web::Result<impl Responder> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Nama wajib diisi"
        })));
    }

    let photo_url = match &payload.photo {
        Some(upload) => {
            let photo = match photo::validate(upload) {
                Ok(p) => p,
                Err(msg) => {
                    return Ok(HttpResponse::BadRequest().json(json!({ "error": msg })));
                }
            };
            // Timestamp-keyed path, no overwrite: a collision is a
            // backend error surfaced to the caller.
            let path = photo::media_photo_path(&auth.user_id, Utc::now(), &photo.ext);
            match backend
                .upload_object(
                    &config.media_bucket,
                    &path,
                    photo.bytes,
                    &photo.content_type,
                    false,
                    &auth.token,
                )
                .await
            {
                Ok(url) => Some(url),
                Err(e) => {
                    error!(error = %e, user_id = %auth.user_id, path = %path, "Media upload failed");
                    return Ok(super::backend_failure(&e));
                }
            }
        }
        None => None,
    };

    let row = NewMediaRecord {
        user_id: auth.user_id,
        name: name.to_string(),
        note: payload.note.clone().filter(|n| !n.trim().is_empty()),
        photo_url,
    };

    match backend.insert(MEDIA_TABLE, &[row], &auth.token).await {
        Ok(_) => Ok(HttpResponse::Created().json(json!({
            "message": "Absen tersimpan"
        }))),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Media insert failed");
            Ok(super::backend_failure(&e))
        }
    }
}

/// Load one record for the edit view
#[utoipa::path(
    get,
    path = "/api/media/{id}",
    params(
        ("id", Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record found", body = MediaRecord),
        (status = 404, description = "Record not found", body = Object, example = json!({
            "error": "Record not found"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Media"
)]
pub async fn get_record(
    auth: AuthUser,
    backend: web::Data<Backend>,
    path: web::Path<Uuid>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    let result = backend
        .table(MEDIA_TABLE)
        .select(MEDIA_COLUMNS)
        .eq("id", id)
        .single::<MediaRecord>(&auth.token)
        .await;

    // A row hidden by the row-level policy looks the same as a missing
    // one; both are a 404 here, never a silent stall.
    match result {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(record)),
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({
            "error": "Record not found"
        }))),
        Err(e) => {
            error!(error = %e, %id, "Failed to load media record");
            Ok(super::backend_failure(&e))
        }
    }
}

/// Update the two editable fields
#[utoipa::path(
    put,
    path = "/api/media/{id}",
    params(
        ("id", Path, description = "Record id")
    ),
    request_body = UpdateMediaRequest,
    responses(
        (status = 200, description = "Saved", body = Object, example = json!({
            "message": "Tersimpan"
        })),
        (status = 400, description = "No fields provided"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend unreachable")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Media"
)]
pub async fn update_record(
    auth: AuthUser,
    backend: web::Data<Backend>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateMediaRequest>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();

    if payload.name.is_none() && payload.note.is_none() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "No fields provided for update"
        })));
    }

    let patch = MediaPatch {
        name: payload.name.as_deref(),
        note: payload.note.as_deref(),
    };

    match backend.update(MEDIA_TABLE, &id, &patch, &auth.token).await {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "message": "Tersimpan"
        }))),
        Err(e) => {
            error!(error = %e, %id, "Media update failed");
            Ok(super::backend_failure(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_omits_absent_fields() {
        let patch = MediaPatch {
            name: None,
            note: Some("catatan baru"),
        };
        let body = serde_json::to_value(&patch).unwrap();
        // Only the note is written; the stored name stays untouched.
        assert_eq!(body, serde_json::json!({ "note": "catatan baru" }));
    }

    #[test]
    fn patch_with_both_fields_writes_both() {
        let patch = MediaPatch {
            name: Some("Budi"),
            note: Some("ok"),
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Budi", "note": "ok" }));
    }
}
