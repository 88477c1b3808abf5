//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::OpenLinkError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证与用户名
/// - 3000-3099: 链接
/// - 4000-4099: 外观
/// - 6000-6099: 统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    Unprocessable = 1022,
    ServiceUnavailable = 1030,

    // 认证与用户名 2000-2099
    OnboardingRequired = 2000,
    UsernameInvalid = 2001,
    UsernameTaken = 2002,

    // 链接 3000-3099
    LinkNotFound = 3000,
    LinkCreationFailed = 3001,
    LinkPersistFailed = 3002,
    ReorderInvalid = 3003,
    ReorderPartial = 3004,

    // 外观 4000-4099
    AppearanceInvalid = 4000,
    AppearanceSaveFailed = 4001,

    // 统计 6000-6099
    AnalyticsQueryFailed = 6000,
}

impl From<&OpenLinkError> for ErrorCode {
    fn from(err: &OpenLinkError) -> Self {
        match err {
            OpenLinkError::Validation(_) => ErrorCode::BadRequest,
            OpenLinkError::Conflict(_) => ErrorCode::Conflict,
            OpenLinkError::NotFound(_) => ErrorCode::NotFound,
            OpenLinkError::Authorization(_) => ErrorCode::Unauthorized,
            OpenLinkError::Creation(_) => ErrorCode::Unprocessable,
            OpenLinkError::Persistence(_)
            | OpenLinkError::DatabaseConfig(_)
            | OpenLinkError::DatabaseConnection(_)
            | OpenLinkError::Serialization(_)
            | OpenLinkError::Configuration(_) => ErrorCode::InternalServerError,
        }
    }
}
