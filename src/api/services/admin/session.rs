//! Admin session endpoints

use actix_web::{HttpResponse, web};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::jwt::AuthContext;
use crate::services::SessionRegistry;

use super::helpers::{owner_session, session_error, success_response};

/// GET /session - 当前会话快照
pub async fn get_session(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
) -> HttpResponse {
    let session = match owner_session(&registry, &auth).await {
        Ok(session) => session,
        Err(resp) => return resp,
    };
    let session = session.lock().await;
    success_response(session.snapshot())
}

/// POST /session/reload - 丢弃内存状态，从存储重新加载
pub async fn reload_session(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
) -> HttpResponse {
    match registry.reload(&auth.owner_id).await {
        Ok(session) => {
            let session = session.lock().await;
            success_response(session.snapshot())
        }
        Err(e) => session_error(e),
    }
}

/// DELETE /session
pub async fn close_session(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
) -> HttpResponse {
    registry.close(&auth.owner_id).await;
    info!("Admin session closed by {}", auth.owner_id);
    success_response(json!({ "closed": true }))
}
