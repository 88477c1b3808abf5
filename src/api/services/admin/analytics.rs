//! Analytics API 端点

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::api::jwt::AuthContext;
use crate::errors::OpenLinkError;
use crate::services::AnalyticsService;

use super::error_code::ErrorCode;
use super::helpers::{error_with_code, session_error, success_response};

/// GET /analytics - 总点击、设备分布与按链接排行
pub async fn get_analytics(
    analytics: web::Data<Arc<AnalyticsService>>,
    auth: web::ReqData<AuthContext>,
) -> HttpResponse {
    match analytics.summary(&auth.owner_id).await {
        Ok(summary) => success_response(summary),
        Err(e @ OpenLinkError::NotFound(_)) => session_error(e),
        Err(e) => error_with_code(&e, ErrorCode::AnalyticsQueryFailed),
    }
}
