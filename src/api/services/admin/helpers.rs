//! Admin API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::api::jwt::AuthContext;
use crate::config::get_config;
use crate::errors::OpenLinkError;
use crate::services::{SessionRegistry, SharedSession};

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
    redirect: Option<String>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
            redirect,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data), None)
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None, None)
}

/// 从 OpenLinkError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_openlink(err: &OpenLinkError) -> HttpResponse {
    error_with_code(err, ErrorCode::from(err))
}

/// Same status mapping, domain-specific code
pub fn error_with_code(err: &OpenLinkError, code: ErrorCode) -> HttpResponse {
    if !err.is_user_facing() {
        error!("Request failed: {}", err);
    }
    let redirect = match err {
        OpenLinkError::Authorization(_) => Some(get_config().auth.sign_in_path.clone()),
        _ => None,
    };
    json_response::<()>(err.http_status(), code, err.message(), None, redirect)
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<OpenLinkError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_openlink(&e.into()),
    }
}

/// Session lookup failures; owners without a profile are sent to onboarding
pub fn session_error(err: OpenLinkError) -> HttpResponse {
    match err {
        OpenLinkError::NotFound(msg) => json_response::<()>(
            StatusCode::NOT_FOUND,
            ErrorCode::OnboardingRequired,
            msg,
            None,
            Some(get_config().auth.onboarding_path.clone()),
        ),
        other => error_from_openlink(&other),
    }
}

/// The caller's admin session, opened on first use
pub async fn owner_session(
    registry: &SessionRegistry,
    auth: &AuthContext,
) -> Result<SharedSession, HttpResponse> {
    registry.session(&auth.owner_id).await.map_err(session_error)
}
