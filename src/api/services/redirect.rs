use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::{error, trace};

use crate::api::constants;
use crate::api::services::admin::ClickQuery;
use crate::errors::OpenLinkError;
use crate::services::{RedirectService, classify_device};

/// GET /api/click?linkId= - 记录一次点击并跳转
pub async fn handle_click(
    req: HttpRequest,
    query: web::Query<ClickQuery>,
    redirects: web::Data<Arc<RedirectService>>,
) -> HttpResponse {
    let Some(link_id) = query
        .into_inner()
        .link_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
    else {
        trace!("Click without linkId rejected");
        return plain_response(StatusCode::BAD_REQUEST, "Missing linkId");
    };

    let headers = req.headers();
    let client_hint = headers
        .get(constants::MOBILE_HINT_HEADER)
        .and_then(|h| h.to_str().ok());
    let user_agent = headers.get("User-Agent").and_then(|h| h.to_str().ok());
    let device = classify_device(client_hint, user_agent);

    match redirects.follow(&link_id, device).await {
        Ok(target) => HttpResponse::TemporaryRedirect()
            .insert_header(("Location", target))
            .insert_header(("Cache-Control", "no-store"))
            .finish(),
        Err(OpenLinkError::NotFound(msg)) => {
            trace!("Click not followed: {}", msg);
            plain_response(StatusCode::NOT_FOUND, "Link not found")
        }
        Err(e) => {
            error!("Click redirect failed for {}: {}", link_id, e);
            plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

#[inline]
fn plain_response(status: StatusCode, body: &'static str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(("Content-Type", "text/plain; charset=utf-8"))
        .body(body)
}

/// 点击跳转路由
pub fn redirect_routes() -> actix_web::Resource {
    web::resource(constants::CLICK_PATH).route(web::get().to(handle_click))
}
