use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenLinkError {
    Validation(String),
    Conflict(String),
    NotFound(String),
    Persistence(String),
    Authorization(String),
    Creation(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    Serialization(String),
    Configuration(String),
}

impl OpenLinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            OpenLinkError::Validation(_) => "E001",
            OpenLinkError::Conflict(_) => "E002",
            OpenLinkError::NotFound(_) => "E003",
            OpenLinkError::Persistence(_) => "E004",
            OpenLinkError::Authorization(_) => "E005",
            OpenLinkError::Creation(_) => "E006",
            OpenLinkError::DatabaseConfig(_) => "E007",
            OpenLinkError::DatabaseConnection(_) => "E008",
            OpenLinkError::Serialization(_) => "E009",
            OpenLinkError::Configuration(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            OpenLinkError::Validation(_) => "Validation Error",
            OpenLinkError::Conflict(_) => "Conflict",
            OpenLinkError::NotFound(_) => "Resource Not Found",
            OpenLinkError::Persistence(_) => "Persistence Error",
            OpenLinkError::Authorization(_) => "Authorization Error",
            OpenLinkError::Creation(_) => "Creation Error",
            OpenLinkError::DatabaseConfig(_) => "Database Configuration Error",
            OpenLinkError::DatabaseConnection(_) => "Database Connection Error",
            OpenLinkError::Serialization(_) => "Serialization Error",
            OpenLinkError::Configuration(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            OpenLinkError::Validation(msg)
            | OpenLinkError::Conflict(msg)
            | OpenLinkError::NotFound(msg)
            | OpenLinkError::Persistence(msg)
            | OpenLinkError::Authorization(msg)
            | OpenLinkError::Creation(msg)
            | OpenLinkError::DatabaseConfig(msg)
            | OpenLinkError::DatabaseConnection(msg)
            | OpenLinkError::Serialization(msg)
            | OpenLinkError::Configuration(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    #[cfg(feature = "server")]
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            OpenLinkError::Validation(_) => StatusCode::BAD_REQUEST,
            OpenLinkError::Conflict(_) => StatusCode::CONFLICT,
            OpenLinkError::NotFound(_) => StatusCode::NOT_FOUND,
            OpenLinkError::Authorization(_) => StatusCode::UNAUTHORIZED,
            OpenLinkError::Creation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            OpenLinkError::Persistence(_)
            | OpenLinkError::DatabaseConfig(_)
            | OpenLinkError::DatabaseConnection(_)
            | OpenLinkError::Serialization(_)
            | OpenLinkError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Errors the user can act on (wrong input, taken name, missing record)
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            OpenLinkError::Validation(_)
                | OpenLinkError::Conflict(_)
                | OpenLinkError::NotFound(_)
                | OpenLinkError::Authorization(_)
                | OpenLinkError::Creation(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for OpenLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for OpenLinkError {}

// 便捷的构造函数
impl OpenLinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::Conflict(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::NotFound(msg.into())
    }

    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::Persistence(msg.into())
    }

    pub fn authorization<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::Authorization(msg.into())
    }

    pub fn creation<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::Creation(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::DatabaseConnection(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::Serialization(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        OpenLinkError::Configuration(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for OpenLinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        OpenLinkError::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for OpenLinkError {
    fn from(err: std::io::Error) -> Self {
        OpenLinkError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for OpenLinkError {
    fn from(err: serde_json::Error) -> Self {
        OpenLinkError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for OpenLinkError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        OpenLinkError::Authorization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpenLinkError>;
