//! URL 验证模块
//!
//! Link destinations are normalized before a redirect is issued: a bare host
//! gets `https://`, and only http, https, mailto and tel are followed.

use url::Url;

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(f, "Unsupported protocol: {}", proto),
            Self::DangerousProtocol(proto) => write!(f, "Dangerous protocol blocked: {}", proto),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

const ALLOWED_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:"];

/// Turn a stored link destination into a followable URL
pub fn normalize_target_url(raw: &str) -> Result<String, UrlValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let lower = raw.to_lowercase();
    for proto in DANGEROUS_PROTOCOLS {
        if lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    let candidate = if ALLOWED_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        raw.to_string()
    } else if let Some((scheme, _)) = lower.split_once("://") {
        return Err(UrlValidationError::InvalidProtocol(format!("{}:", scheme)));
    } else {
        format!("https://{}", raw)
    };

    // Parsed only to validate; the redirect keeps the stored spelling
    let parsed =
        Url::parse(&candidate).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat("missing host".to_string()));
    }
    Ok(candidate)
}

/// Absolute http(s) URL check, used for avatar links
pub fn validate_http_url(raw: &str) -> Result<(), UrlValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let parsed = Url::parse(raw).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(()),
        "http" | "https" => Err(UrlValidationError::InvalidFormat("missing host".to_string())),
        other => Err(UrlValidationError::InvalidProtocol(format!("{}:", other))),
    }
}
