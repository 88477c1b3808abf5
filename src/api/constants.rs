//! API 模块常量定义

/// Access Token Cookie 名称（托管认证后端写入）
pub const ACCESS_COOKIE_NAME: &str = "sb-access-token";

/// 点击跳转路径
pub const CLICK_PATH: &str = "/api/click";

/// 管理 API 前缀
pub const ADMIN_PREFIX: &str = "/admin";

/// 引导（认领用户名）前缀
pub const ONBOARDING_PREFIX: &str = "/onboarding";

/// Client hint header for mobile devices
pub const MOBILE_HINT_HEADER: &str = "Sec-CH-UA-Mobile";
