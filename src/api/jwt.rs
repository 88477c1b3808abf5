use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AuthConfig;
use crate::errors::{OpenLinkError, Result};
use crate::services::ClaimIdentity;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Access token claims as minted by the managed auth backend
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated owner, inserted into request extensions by `RequireAuth`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub owner_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl AuthContext {
    pub fn as_claim_identity(&self) -> ClaimIdentity<'_> {
        ClaimIdentity {
            owner_id: &self.owner_id,
            email: self.email.as_deref(),
            full_name: self.full_name.as_deref(),
        }
    }
}

impl From<AccessClaims> for AuthContext {
    fn from(claims: AccessClaims) -> Self {
        Self {
            owner_id: claims.sub,
            email: claims.email.filter(|e| !e.is_empty()),
            full_name: claims.user_metadata.full_name.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Parameters for a locally minted token (development and tests)
#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub owner_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub ttl_minutes: u64,
}

/// HS256 token validation against the shared backend secret
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    audience: Option<String>,
}

impl JwtService {
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience: audience.filter(|a| !a.is_empty()).map(str::to_string),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        if config.jwt_secret == crate::config::DEFAULT_JWT_SECRET {
            warn!("auth.jwt_secret is still the sample value; set OL__AUTH__JWT_SECRET");
        }
        Self::new(&config.jwt_secret, Some(config.audience.as_str()))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation
    }

    pub fn issue(&self, request: &TokenRequest) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: request.owner_id.clone(),
            email: request.email.clone(),
            user_metadata: UserMetadata {
                full_name: request.full_name.clone(),
            },
            aud: self.audience.clone(),
            role: Some("authenticated".to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(request.ttl_minutes as i64)).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn validate(&self, token: &str) -> Result<AccessClaims> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation())?;
        if data.claims.sub.trim().is_empty() {
            return Err(OpenLinkError::authorization("Token has no subject"));
        }
        Ok(data.claims)
    }

    pub fn authenticate(&self, token: &str) -> Result<AuthContext> {
        self.validate(token).map(AuthContext::from)
    }
}
