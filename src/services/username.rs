//! Username claim: Unclaimed → Claimed, exactly once per profile

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ProfileConfig;
use crate::errors::{OpenLinkError, Result};
use crate::storage::{NewProfile, Profile, ProfileStore, ProfileUpdate};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;

const BUILTIN_RESERVED: &[&str] = &[
    "admin",
    "login",
    "onboarding",
    "api",
    "auth",
    "settings",
    "help",
    "support",
    "about",
];

const MSG_FORMAT: &str =
    "Username can only contain lowercase letters, numbers, hyphens, and underscores.";
const MSG_TAKEN: &str = "This username is already taken.";
const MSG_LOOKUP_FAILED: &str = "Could not check username. Please try again.";

/// Format, length and reserved-word rules
#[derive(Debug, Clone)]
pub struct UsernamePolicy {
    reserved: HashSet<String>,
}

impl Default for UsernamePolicy {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl UsernamePolicy {
    pub fn new(extra_reserved: &[String]) -> Self {
        let reserved = BUILTIN_RESERVED
            .iter()
            .map(|w| w.to_string())
            .chain(extra_reserved.iter().map(|w| w.trim().to_lowercase()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { reserved }
    }

    pub fn from_config(config: &ProfileConfig) -> Self {
        Self::new(&config.extra_reserved_usernames)
    }

    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    pub fn is_reserved(&self, username: &str) -> bool {
        self.reserved.contains(username)
    }

    /// Normalize and check, returning the canonical username
    pub fn validate(&self, raw: &str) -> Result<String> {
        let username = Self::normalize(raw);

        if !username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(OpenLinkError::validation(MSG_FORMAT));
        }
        // 只含 ASCII，字节数即字符数
        if username.len() < USERNAME_MIN_LEN {
            return Err(OpenLinkError::validation(format!(
                "Username must be at least {} characters.",
                USERNAME_MIN_LEN
            )));
        }
        if username.len() > USERNAME_MAX_LEN {
            return Err(OpenLinkError::validation(format!(
                "Username must be {} characters or less.",
                USERNAME_MAX_LEN
            )));
        }
        if self.is_reserved(&username) {
            return Err(OpenLinkError::validation("This username is reserved."));
        }

        Ok(username)
    }
}

/// Who is claiming, as known from the access token
#[derive(Debug, Clone, Copy)]
pub struct ClaimIdentity<'a> {
    pub owner_id: &'a str,
    pub email: Option<&'a str>,
    pub full_name: Option<&'a str>,
}

impl ClaimIdentity<'_> {
    /// Full name, else the e-mail local part, else the username
    pub fn display_name_for(&self, username: &str) -> String {
        if let Some(name) = self.full_name.map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(local) = self
            .email
            .and_then(|e| e.split('@').next())
            .filter(|l| !l.is_empty())
        {
            return local.to_string();
        }
        username.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub username: String,
    pub available: bool,
    pub error: Option<String>,
}

pub struct UsernameService {
    profiles: Arc<dyn ProfileStore>,
    policy: UsernamePolicy,
}

impl UsernameService {
    pub fn new(profiles: Arc<dyn ProfileStore>, config: &ProfileConfig) -> Self {
        Self::with_policy(profiles, UsernamePolicy::from_config(config))
    }

    pub fn with_policy(profiles: Arc<dyn ProfileStore>, policy: UsernamePolicy) -> Self {
        Self { profiles, policy }
    }

    pub fn policy(&self) -> &UsernamePolicy {
        &self.policy
    }

    /// Run the whole validation chain without claiming
    pub async fn availability(&self, raw: &str) -> Result<Availability> {
        let normalized = UsernamePolicy::normalize(raw);
        let unavailable = |error: String| Availability {
            username: normalized.clone(),
            available: false,
            error: Some(error),
        };

        let username = match self.policy.validate(raw) {
            Ok(username) => username,
            Err(e) => return Ok(unavailable(e.message().to_string())),
        };

        match self.profiles.find_by_username(&username).await {
            Ok(Some(_)) => Ok(unavailable(MSG_TAKEN.to_string())),
            Ok(None) => Ok(Availability {
                username,
                available: true,
                error: None,
            }),
            Err(e) => {
                warn!("Username lookup for '{}' failed: {}", username, e);
                Ok(unavailable(MSG_LOOKUP_FAILED.to_string()))
            }
        }
    }

    /// Claim `raw` for the identity, creating the profile row if needed
    pub async fn claim(&self, identity: ClaimIdentity<'_>, raw: &str) -> Result<Profile> {
        let username = self.policy.validate(raw)?;

        let existing = self.profiles.get(identity.owner_id).await?;
        if let Some(ref profile) = existing
            && profile.is_claimed()
        {
            return Err(OpenLinkError::conflict(format!(
                "Profile already has the username '{}'.",
                profile.username.as_deref().unwrap_or_default()
            )));
        }

        if self.profiles.find_by_username(&username).await?.is_some() {
            return Err(OpenLinkError::conflict(MSG_TAKEN));
        }

        let display_name = identity.display_name_for(&username);
        let profile = match existing {
            Some(profile) => {
                self.fill_unclaimed(profile, identity.owner_id, &username, display_name)
                    .await?
            }
            None => {
                let created = self
                    .profiles
                    .create(NewProfile {
                        id: identity.owner_id.to_string(),
                        username: Some(username.clone()),
                        display_name: Some(display_name.clone()),
                    })
                    .await;
                match created {
                    Ok(profile) => profile,
                    Err(OpenLinkError::Conflict(_)) => {
                        self.after_create_conflict(identity.owner_id, &username, display_name)
                            .await?
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        info!("Username '{}' claimed by {}", username, identity.owner_id);
        Ok(profile)
    }

    /// Create lost against either the signup trigger's row or another owner's username
    async fn after_create_conflict(
        &self,
        owner_id: &str,
        username: &str,
        display_name: String,
    ) -> Result<Profile> {
        match self.profiles.get(owner_id).await? {
            Some(profile) if !profile.is_claimed() => {
                debug!("Profile of {} appeared during claim, updating it", owner_id);
                self.fill_unclaimed(profile, owner_id, username, display_name)
                    .await
            }
            Some(profile) => Err(OpenLinkError::conflict(format!(
                "Profile already has the username '{}'.",
                profile.username.as_deref().unwrap_or_default()
            ))),
            None => Err(OpenLinkError::conflict(MSG_TAKEN)),
        }
    }

    async fn fill_unclaimed(
        &self,
        mut profile: Profile,
        owner_id: &str,
        username: &str,
        display_name: String,
    ) -> Result<Profile> {
        let update = ProfileUpdate {
            username: Some(username.to_string()),
            display_name: Some(display_name),
            ..Default::default()
        };
        self.profiles
            .update(owner_id, update.clone())
            .await
            .map_err(taken_on_conflict)?;
        update.apply_to(&mut profile);
        Ok(profile)
    }
}

/// A unique-index race lost at the store
fn taken_on_conflict(err: OpenLinkError) -> OpenLinkError {
    match err {
        OpenLinkError::Conflict(_) => OpenLinkError::conflict(MSG_TAKEN),
        other => other,
    }
}
