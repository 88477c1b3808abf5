//! Profile appearance edits (name, bio, avatar, theme)

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::errors::{OpenLinkError, Result};
use crate::storage::{ButtonStyle, Profile, ProfileStore, ProfileUpdate};
use crate::utils::{is_hex_color, validate_http_url};

pub const BIO_MAX_CHARS: usize = 150;
pub const DISPLAY_NAME_MAX_CHARS: usize = 80;

/// Appearance fields sent by the editor; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceUpdate {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Empty string clears the avatar
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub button_style: Option<ButtonStyle>,
}

impl AppearanceUpdate {
    /// Trim text fields and lowercase colors
    fn normalized(self) -> Self {
        Self {
            display_name: self.display_name.map(|v| v.trim().to_string()),
            bio: self.bio.map(|v| v.trim().to_string()),
            avatar_url: self.avatar_url.map(|v| v.trim().to_string()),
            background_color: self.background_color.map(|v| v.trim().to_lowercase()),
            accent_color: self.accent_color.map(|v| v.trim().to_lowercase()),
            button_style: self.button_style,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.display_name
            && name.chars().count() > DISPLAY_NAME_MAX_CHARS
        {
            return Err(OpenLinkError::validation(format!(
                "Display name must be {} characters or less.",
                DISPLAY_NAME_MAX_CHARS
            )));
        }
        if let Some(ref bio) = self.bio
            && bio.chars().count() > BIO_MAX_CHARS
        {
            return Err(OpenLinkError::validation(format!(
                "Bio must be {} characters or less.",
                BIO_MAX_CHARS
            )));
        }
        if let Some(ref avatar) = self.avatar_url
            && !avatar.is_empty()
        {
            validate_http_url(avatar)
                .map_err(|e| OpenLinkError::validation(format!("Avatar URL: {}", e)))?;
        }
        for (label, color) in [
            ("Background color", &self.background_color),
            ("Accent color", &self.accent_color),
        ] {
            if let Some(color) = color
                && !is_hex_color(color)
            {
                return Err(OpenLinkError::validation(format!(
                    "{} must be a hex color like #rrggbb, got '{}'.",
                    label, color
                )));
            }
        }
        Ok(())
    }

    /// Keep only the fields that differ from `profile`
    pub fn changes_against(&self, profile: &Profile) -> ProfileUpdate {
        fn changed(new: &Option<String>, current: &Option<String>) -> Option<String> {
            new.as_ref()
                .filter(|v| current.as_deref().unwrap_or_default() != v.as_str())
                .cloned()
        }

        ProfileUpdate {
            username: None,
            display_name: changed(&self.display_name, &profile.display_name),
            bio: changed(&self.bio, &profile.bio),
            avatar_url: changed(&self.avatar_url, &profile.avatar_url),
            background_color: changed(&self.background_color, &profile.background_color),
            accent_color: changed(&self.accent_color, &profile.accent_color),
            button_style: self
                .button_style
                .filter(|style| profile.button_style != Some(*style)),
        }
    }
}

/// Validate, apply in memory, then persist; returns `false` if nothing changed
///
/// A failed write keeps the in-memory values.
pub async fn apply_appearance(
    profile: &mut Profile,
    store: &dyn ProfileStore,
    update: AppearanceUpdate,
) -> Result<bool> {
    let update = update.normalized();
    update.validate()?;

    let changes = update.changes_against(profile);
    if changes.is_empty() {
        debug!("Appearance update for {} changed nothing", profile.id);
        return Ok(false);
    }

    changes.apply_to(profile);
    store.update(&profile.id, changes).await.map_err(|e| {
        error!("Failed to persist appearance of {}: {}", profile.id, e);
        e
    })?;
    Ok(true)
}
