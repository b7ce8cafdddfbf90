use crate::{
    api::{attendance, history, media, recap},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

/// Photo bytes cross the API as base64 inside JSON: the 5 MiB file
/// ceiling is ~6.8 MiB encoded, so actix-web's default 2 MB JSON cap
/// would reject a valid photo before validation ever saw it.
pub const JSON_PAYLOAD_LIMIT: usize = 8 * 1024 * 1024;

pub fn json_payload_config() -> web::JsonConfig {
    web::JsonConfig::default().limit(JSON_PAYLOAD_LIMIT)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes: everything here requires a verified bearer
    // token; the token is then forwarded to the backend so row-level
    // policies decide what each caller can actually read or write.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(web::resource("/me").route(web::get().to(handlers::me)))
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::get().to(attendance::today)))
                    // /attendance/clock-in
                    .service(
                        web::resource("/clock-in").route(web::post().to(attendance::clock_in)),
                    )
                    // /attendance/clock-out
                    .service(
                        web::resource("/clock-out").route(web::put().to(attendance::clock_out)),
                    ),
            )
            .service(web::resource("/history").route(web::get().to(history::month_history)))
            .service(
                web::scope("/admin")
                    // /admin/recap
                    .service(web::resource("/recap").route(web::get().to(recap::month_recap)))
                    // /admin/recap/csv
                    .service(
                        web::resource("/recap/csv").route(web::get().to(recap::month_recap_csv)),
                    ),
            )
            .service(
                web::scope("/media")
                    // /media
                    .service(web::resource("").route(web::post().to(media::submit)))
                    // /media/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(media::get_record))
                            .route(web::put().to(media::update_record)),
                    ),
            ),
    );
}
