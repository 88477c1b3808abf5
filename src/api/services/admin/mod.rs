//! Admin API 服务模块
//!
//! 登录后的所有者操作：会话、链接列表、外观与统计。

mod analytics;
mod appearance;
pub mod error_code;
mod helpers;
mod links;
pub mod routes;
mod session;
mod types;

pub use types::*;

pub use helpers::{
    api_result, error_from_openlink, error_response, error_with_code, json_response,
    session_error, success_response,
};

pub use error_code::ErrorCode;

pub use routes::admin_v1_routes;
