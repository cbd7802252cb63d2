use crate::{
    api::{analytics, chat, leave_request},
    config::Config,
    error::AppError,
    session::handlers,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let burst = requests_per_min.max(1);
    let per_ms = 60_000 / burst as u64;
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("limiter period and burst are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let session_limiter = Arc::new(build_limiter(config.rate_session_per_min));
    let chat_limiter = Arc::new(build_limiter(config.rate_chat_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Malformed bodies and query strings get the same JSON error shape
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    // Session routes
    cfg.service(
        web::scope("/session")
            .wrap(session_limiter)
            .service(web::resource("").route(web::get().to(handlers::current)))
            .service(web::resource("/login").route(web::post().to(handlers::login)))
            .service(web::resource("/logout").route(web::post().to(handlers::logout))),
    );

    // Employee and admin routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // /leave/mine, registered before /{id}
                    .service(
                        web::resource("/mine").route(web::get().to(leave_request::my_leaves)),
                    )
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave)))
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(leave_request::reject_leave)),
                    ),
            )
            .service(
                web::scope("/analytics")
                    .service(web::resource("/summary").route(web::get().to(analytics::summary))),
            )
            .service(
                web::scope("/chat")
                    .service(
                        web::resource("")
                            .wrap(chat_limiter)
                            .route(web::post().to(chat::send_message)),
                    )
                    .service(web::resource("/welcome").route(web::get().to(chat::welcome))),
            ),
    );
}
