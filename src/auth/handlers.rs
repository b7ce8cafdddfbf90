use crate::{api::backend_failure, auth::auth::AuthUser, backend::Backend, models::LoginReqDto};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde_json::json;
use tracing::{error, info, instrument};

/// Magic-link login: the backend emails the token, nothing secret is
/// handled here.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Magic link sent", body = Object, example = json!({
            "message": "Magic link terkirim, cek inbox/spam"
        })),
        (status = 400, description = "Empty email"),
        (status = 502, description = "Backend unreachable")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(backend, user), fields(email = %user.email))]
pub async fn login(user: web::Json<LoginReqDto>, backend: web::Data<Backend>) -> impl Responder {
    let email = user.email.trim();

    if email.is_empty() {
        info!("Validation failed: empty email");
        return HttpResponse::BadRequest().json(json!({
            "error": "Email wajib diisi"
        }));
    }

    match backend.send_magic_link(email).await {
        Ok(_) => {
            info!("Magic link requested");
            HttpResponse::Ok().json(json!({
                "message": "Magic link terkirim, cek inbox/spam"
            }))
        }
        Err(e) => {
            error!(error = %e, "Magic link request failed");
            backend_failure(&e)
        }
    }
}

/// Sign-out is idempotent: the response is 204 whether or not a valid
/// session was presented.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Signed out")
    ),
    tag = "Auth"
)]
pub async fn logout(req: HttpRequest, backend: web::Data<Backend>) -> impl Responder {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        if let Err(e) = backend.sign_out(token).await {
            // The local session is gone either way.
            error!(error = %e, "Backend sign-out failed");
        }
    }

    HttpResponse::NoContent().finish()
}

/// Identity probe for the protected scope.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = Object, example = json!({
            "user_id": "5f0c9f2e-6b5d-4e6a-9e12-7a9d2c8b1a34",
            "email": "budi@example.com"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn me(auth: AuthUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "user_id": auth.user_id,
        "email": auth.email
    }))
}
