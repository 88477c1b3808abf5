//! Profile appearance endpoint

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::info;

use crate::api::jwt::AuthContext;
use crate::errors::OpenLinkError;
use crate::services::{AppearanceUpdate, SessionRegistry};

use super::error_code::ErrorCode;
use super::helpers::{error_with_code, owner_session, success_response};
use super::types::AppearanceResponse;

/// PATCH /profile - 修改显示名、简介、头像与主题
pub async fn update_appearance(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
    body: web::Json<AppearanceUpdate>,
) -> HttpResponse {
    let session = match owner_session(&registry, &auth).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let mut session = session.lock().await;

    match session.update_appearance(body.into_inner()).await {
        Ok(changed) => {
            if changed {
                info!("Appearance updated for {}", auth.owner_id);
            }
            success_response(AppearanceResponse {
                changed,
                session: session.snapshot(),
            })
        }
        Err(e) => {
            let code = match &e {
                OpenLinkError::Validation(_) => ErrorCode::AppearanceInvalid,
                OpenLinkError::Persistence(_) => ErrorCode::AppearanceSaveFailed,
                other => ErrorCode::from(other),
            };
            error_with_code(&e, code)
        }
    }
}
