//! Username claim endpoints for signed-in owners without a profile

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::info;

use crate::api::jwt::AuthContext;
use crate::api::services::admin::{
    AvailabilityQuery, ClaimRequest, ErrorCode, error_with_code, success_response,
};
use crate::errors::OpenLinkError;
use crate::services::UsernameService;

/// GET /onboarding/availability?username=
pub async fn check_availability(
    query: web::Query<AvailabilityQuery>,
    usernames: web::Data<Arc<UsernameService>>,
) -> HttpResponse {
    match usernames.availability(&query.username).await {
        Ok(availability) => success_response(availability),
        Err(e) => error_with_code(&e, ErrorCode::from(&e)),
    }
}

/// POST /onboarding/claim
pub async fn claim_username(
    body: web::Json<ClaimRequest>,
    auth: web::ReqData<AuthContext>,
    usernames: web::Data<Arc<UsernameService>>,
) -> HttpResponse {
    match usernames.claim(auth.as_claim_identity(), &body.username).await {
        Ok(profile) => {
            info!(
                "Owner {} claimed {}",
                auth.owner_id,
                profile.username.as_deref().unwrap_or_default()
            );
            success_response(profile)
        }
        Err(e) => {
            let code = match &e {
                OpenLinkError::Validation(_) => ErrorCode::UsernameInvalid,
                OpenLinkError::Conflict(_) => ErrorCode::UsernameTaken,
                other => ErrorCode::from(other),
            };
            error_with_code(&e, code)
        }
    }
}

/// 引导路由 `/onboarding`
pub fn onboarding_routes() -> actix_web::Scope {
    web::scope("")
        .route("/availability", web::get().to(check_availability))
        .route("/claim", web::post().to(claim_username))
}
