//! Link list endpoints
//!
//! Every handler works on the caller's in-memory session; store writes
//! happen inside the controller.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::jwt::AuthContext;
use crate::errors::OpenLinkError;
use crate::links::gesture::{from_drag, from_keyboard};
use crate::links::{LinkField, ReorderIntent};
use crate::services::SessionRegistry;

use super::error_code::ErrorCode;
use super::helpers::{error_with_code, json_response, owner_session, success_response};
use super::types::{
    CommitResponse, DeleteResponse, EditLinkRequest, ReorderRequest, ReorderResponse,
    SetActiveRequest, ToggleResponse,
};

fn link_error(err: &OpenLinkError) -> HttpResponse {
    let code = match err {
        OpenLinkError::NotFound(_) => ErrorCode::LinkNotFound,
        OpenLinkError::Creation(_) => ErrorCode::LinkCreationFailed,
        OpenLinkError::Persistence(_) => ErrorCode::LinkPersistFailed,
        other => ErrorCode::from(other),
    };
    error_with_code(err, code)
}

macro_rules! session_or_return {
    ($registry:expr, $auth:expr) => {
        match owner_session(&$registry, &$auth).await {
            Ok(session) => session,
            Err(resp) => return resp,
        }
    };
}

/// POST /links - 在列表最前面新建一个空链接
pub async fn add_link(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
) -> HttpResponse {
    let session = session_or_return!(registry, auth);
    let mut session = session.lock().await;

    match session.links_mut().add().await {
        Ok(link) => {
            let view = session.link_view(&link.id);
            json_response(StatusCode::CREATED, ErrorCode::Success, "Created", view, None)
        }
        Err(e) => link_error(&e),
    }
}

/// PATCH /links/{id} - 仅修改内存中的标题/地址
pub async fn edit_link(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
    path: web::Path<String>,
    body: web::Json<EditLinkRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    let body = body.into_inner();
    let session = session_or_return!(registry, auth);
    let mut session = session.lock().await;

    let edits = [
        (LinkField::Title, body.title),
        (LinkField::TargetUrl, body.target_url),
    ];
    for (field, value) in edits {
        if let Some(value) = value
            && let Err(e) = session.links_mut().edit(&id, field, value)
        {
            return link_error(&e);
        }
    }

    success_response(session.link_view(&id))
}

/// POST /links/{id}/commit - 持久化已编辑的字段
pub async fn commit_link(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    let session = session_or_return!(registry, auth);
    let mut session = session.lock().await;

    match session.links_mut().commit(&id).await {
        Ok(written) => success_response(CommitResponse {
            written,
            link: session.link_view(&id),
        }),
        Err(e) => link_error(&e),
    }
}

/// PUT /links/{id}/active
pub async fn set_link_active(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
    path: web::Path<String>,
    body: web::Json<SetActiveRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    let is_active = body.is_active;
    let session = session_or_return!(registry, auth);
    let mut session = session.lock().await;

    match session.links_mut().set_active(&id, is_active).await {
        Ok(()) => success_response(ToggleResponse {
            is_active,
            link: session.link_view(&id),
        }),
        Err(e) => link_error(&e),
    }
}

/// DELETE /links/{id}
pub async fn delete_link(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    let session = session_or_return!(registry, auth);
    let mut session = session.lock().await;

    match session.links_mut().delete(&id).await {
        Ok(()) => success_response(DeleteResponse {
            id,
            unreconciled_deletes: session.links().unreconciled_deletes().to_vec(),
        }),
        Err(e) => link_error(&e),
    }
}

/// POST /links/reorder - 意图、拖拽或键盘三种请求体
pub async fn reorder_links(
    registry: web::Data<Arc<SessionRegistry>>,
    auth: web::ReqData<AuthContext>,
    body: web::Json<ReorderRequest>,
) -> HttpResponse {
    let session = session_or_return!(registry, auth);
    let mut session = session.lock().await;

    let ids = session.links().ids();
    let intent: Option<ReorderIntent> = match body.into_inner() {
        ReorderRequest::Intent(intent) => Some(intent),
        ReorderRequest::Drag { active_id, over_id } => {
            from_drag(ids.as_slice(), &active_id, over_id.as_deref())
        }
        ReorderRequest::Keyboard { id, direction } => from_keyboard(ids.as_slice(), &id, direction),
    };

    let Some(intent) = intent else {
        return success_response(ReorderResponse {
            applied: false,
            written: Vec::new(),
            failed: Vec::new(),
            session: session.snapshot(),
        });
    };

    match session.links_mut().reorder(&intent).await {
        Ok(outcome) => {
            let code = if outcome.is_complete() {
                ErrorCode::Success
            } else {
                warn!(
                    "Reorder for {} partially applied: {} writes failed",
                    auth.owner_id,
                    outcome.failed.len()
                );
                ErrorCode::ReorderPartial
            };
            info!(
                "Link {} moved {} -> {} by {}",
                intent.moved_id, intent.from_index, intent.to_index, auth.owner_id
            );
            json_response(
                StatusCode::OK,
                code,
                if outcome.is_complete() { "OK" } else { "Partially applied" },
                Some(ReorderResponse {
                    applied: true,
                    written: outcome.written,
                    failed: outcome.failed,
                    session: session.snapshot(),
                }),
                None,
            )
        }
        Err(e @ OpenLinkError::Validation(_)) => error_with_code(&e, ErrorCode::ReorderInvalid),
        Err(e) => link_error(&e),
    }
}
