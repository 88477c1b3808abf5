use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - database: 存储后端连接
/// - auth: 访问令牌校验
/// - session: 管理会话的空闲淘汰
/// - profile: 用户名保留字
/// - logging: 日志输出
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：OL，分隔符：__
    /// 示例：OL__SERVER__PORT=9000
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("OL")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> crate::errors::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::errors::OpenLinkError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// Public base URL used when rendering absolute links (optional)
    #[serde(default)]
    pub public_base_url: Option<String>,
}

/// 数据库连接配置
///
/// `database_url` 支持 `sqlite://`、`postgres://`、`mysql://` 以及 `memory://`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 访问令牌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 shared secret of the managed auth backend
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `aud` claim; unchecked when empty
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
    #[serde(default = "default_access_cookie")]
    pub access_cookie_name: String,
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
    #[serde(default = "default_onboarding_path")]
    pub onboarding_path: String,
    #[serde(default = "default_issued_token_minutes")]
    pub issued_token_minutes: u64,
}

/// 管理会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_idle_secs")]
    pub idle_secs: u64,
    #[serde(default = "default_session_capacity")]
    pub max_sessions: u64,
}

/// 个人主页配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Extra reserved usernames on top of the built-in list
    #[serde(default = "default_extra_reserved")]
    pub extra_reserved_usernames: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://openlink.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

/// Sample secret shipped in generated configs
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_access_cookie() -> String {
    crate::api::constants::ACCESS_COOKIE_NAME.to_string()
}

fn default_sign_in_path() -> String {
    "/login".to_string()
}

fn default_onboarding_path() -> String {
    "/onboarding".to_string()
}

fn default_issued_token_minutes() -> u64 {
    60
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

fn default_session_capacity() -> u64 {
    10_000
}

fn default_extra_reserved() -> Vec<String> {
    vec!["health".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            public_base_url: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            audience: default_jwt_audience(),
            access_cookie_name: default_access_cookie(),
            sign_in_path: default_sign_in_path(),
            onboarding_path: default_onboarding_path(),
            issued_token_minutes: default_issued_token_minutes(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_secs: default_session_idle_secs(),
            max_sessions: default_session_capacity(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            extra_reserved_usernames: default_extra_reserved(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
