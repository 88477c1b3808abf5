use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{info, trace};

use crate::api::jwt::{AuthContext, JwtService};
use crate::api::services::admin::{ApiResponse, ErrorCode};
use crate::config::AuthConfig;

/// Owner authentication middleware
///
/// Accepts a Bearer token or the access-token cookie. On success the
/// `AuthContext` is placed in request extensions; otherwise a 401 envelope
/// carries a redirect hint to the sign-in page.
#[derive(Clone)]
pub struct RequireAuth {
    jwt: Arc<JwtService>,
    sign_in_path: String,
    cookie_name: String,
}

impl RequireAuth {
    pub fn new(
        jwt: Arc<JwtService>,
        sign_in_path: impl Into<String>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            jwt,
            sign_in_path: sign_in_path.into(),
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(jwt: Arc<JwtService>, config: &AuthConfig) -> Self {
        Self::new(jwt, &config.sign_in_path, &config.access_cookie_name)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            settings: Rc::new(self.clone()),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    settings: Rc<RequireAuth>,
}

impl<S, B> RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn handle_unauthorized(req: ServiceRequest, sign_in_path: &str) -> ServiceResponse<EitherBody<B>> {
        info!("Owner authentication failed - invalid or missing token");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: sign in to continue".to_string(),
                    data: None,
                    redirect: Some(sign_in_path.to_string()),
                })
                .map_into_right_body(),
        )
    }

    /// 从 Authorization header 提取 Bearer token
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn extract_cookie_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
        req.cookie(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|s| !s.is_empty())
    }

    fn authenticate(req: &ServiceRequest, settings: &RequireAuth) -> Option<AuthContext> {
        let token = Self::extract_bearer_token(req)
            .or_else(|| Self::extract_cookie_token(req, &settings.cookie_name))?;

        match settings.jwt.authenticate(&token) {
            Ok(ctx) => {
                trace!("Token validation successful for {}", ctx.owner_id);
                Some(ctx)
            }
            Err(e) => {
                info!("Token validation failed: {}", e.message());
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let settings = self.settings.clone();

        Box::pin(async move {
            match Self::authenticate(&req, &settings) {
                Some(ctx) => {
                    req.extensions_mut().insert(ctx);
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                None => Ok(Self::handle_unauthorized(req, &settings.sign_in_path)),
            }
        })
    }
}
