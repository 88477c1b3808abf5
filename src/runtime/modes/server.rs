//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{
    App, HttpServer,
    error::InternalError,
    http::StatusCode,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::constants;
use crate::api::middleware::RequireAuth;
use crate::api::services::admin::{ErrorCode, error_response};
use crate::api::services::{
    AppStartTime, admin_v1_routes, health_routes, onboarding_routes, public_routes,
    redirect_routes,
};
use crate::config::AuthConfig;
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::StartupContext;

/// JSON 请求体上限
const JSON_LIMIT_BYTES: usize = 64 * 1024;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let message = err.to_string();
            let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
            InternalError::from_response(err, response).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
        InternalError::from_response(err, response).into()
    })
}

/// Register shared state and every route
///
/// The public `/{username}` resource is registered last so it never
/// shadows the fixed prefixes.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    ctx: &StartupContext,
    auth: &AuthConfig,
    app_start_time: &AppStartTime,
) {
    let require_auth = RequireAuth::from_config(ctx.jwt.clone(), auth);

    cfg.app_data(web::Data::new(ctx.stores.clone()))
        .app_data(web::Data::new(ctx.sessions.clone()))
        .app_data(web::Data::new(ctx.redirects.clone()))
        .app_data(web::Data::new(ctx.pages.clone()))
        .app_data(web::Data::new(ctx.usernames.clone()))
        .app_data(web::Data::new(ctx.analytics.clone()))
        .app_data(web::Data::new(app_start_time.clone()))
        .app_data(json_config())
        .app_data(query_config())
        .service(web::scope("/health").service(health_routes()))
        .service(redirect_routes())
        .service(
            web::scope(constants::ADMIN_PREFIX)
                .wrap(require_auth.clone())
                .service(admin_v1_routes()),
        )
        .service(
            web::scope(constants::ONBOARDING_PREFIX)
                .wrap(require_auth)
                .service(onboarding_routes()),
        )
        .service(public_routes());
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    // Record application start time
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let config = crate::config::get_config();
    let auth_config = config.auth.clone();
    let sessions = startup.sessions.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000"))
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(|cfg| configure_app(cfg, &startup, &auth_config, &app_start_time))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    if let Some(public_url) = &config.server.public_base_url {
        warn!("Public pages served as {}/<username>", public_url.trim_end_matches('/'));
    }
    let server = server.bind(bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(sessions) => {
            warn!("Graceful shutdown");
        }
    }

    Ok(())
}
