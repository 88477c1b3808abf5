//! Admin API 路由配置

use actix_web::web;

use super::analytics::get_analytics;
use super::appearance::update_appearance;
use super::links::{
    add_link, commit_link, delete_link, edit_link, reorder_links, set_link_active,
};
use super::session::{close_session, get_session, reload_session};

/// 链接管理路由 `/links`
///
/// - POST /links - 新建链接（列表最前）
/// - POST /links/reorder - 重新排序（必须在 /{id} 之前）
/// - PATCH /links/{id} - 本地编辑
/// - POST /links/{id}/commit - 提交编辑
/// - PUT /links/{id}/active - 启用/停用
/// - DELETE /links/{id} - 删除
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::post().to(add_link))
        .route("/reorder", web::post().to(reorder_links))
        .route("/{id}/commit", web::post().to(commit_link))
        .route("/{id}/active", web::put().to(set_link_active))
        .route("/{id}", web::patch().to(edit_link))
        .route("/{id}", web::delete().to(delete_link))
}

/// 会话路由 `/session`
pub fn session_routes() -> actix_web::Scope {
    web::scope("/session")
        .route("", web::get().to(get_session))
        .route("", web::delete().to(close_session))
        .route("/reload", web::post().to(reload_session))
}

/// Admin API v1 路由
pub fn admin_v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(links_routes())
        .service(session_routes())
        .route("/profile", web::patch().to(update_appearance))
        .route("/analytics", web::get().to(get_analytics))
}
