use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::trace;

use crate::api::services::admin::api_result;
use crate::services::PublicPageService;

/// GET /{username} - 公开页面数据（仅启用的链接）
pub async fn get_public_page(
    path: web::Path<String>,
    pages: web::Data<Arc<PublicPageService>>,
) -> HttpResponse {
    let username = path.into_inner();
    trace!("Public page requested: {}", username);
    api_result(pages.load(&username).await)
}

/// 公开页面路由，必须最后注册
pub fn public_routes() -> actix_web::Resource {
    web::resource("/{username}").route(web::get().to(get_public_page))
}
