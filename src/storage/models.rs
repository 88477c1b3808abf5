use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Placeholder shown for links without a title
pub const UNTITLED_LINK: &str = "Untitled Link";

pub const DEFAULT_BACKGROUND_COLOR: &str = "#f3f4f6";
pub const DEFAULT_ACCENT_COLOR: &str = "#09090b";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub owner_id: String,
    pub title: Option<String>,
    pub target_url: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Title or the placeholder when empty/absent
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => UNTITLED_LINK,
        }
    }
}

/// Display order: `order` ascending, then `created_at`, then `id`
pub fn sort_links_by_position(links: &mut [Link]) {
    links.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Fields of a link to be created; `id` and `created_at` are assigned by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLink {
    pub title: Option<String>,
    pub target_url: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

/// Partial link update, `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkUpdate {
    pub title: Option<String>,
    pub target_url: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

impl LinkUpdate {
    pub fn order(order: i32) -> Self {
        Self {
            order: Some(order),
            ..Default::default()
        }
    }

    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.target_url.is_none()
            && self.order.is_none()
            && self.is_active.is_none()
    }
}

/// 链接过滤条件
///
/// Results are always ordered by `order`, then `created_at`, then `id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkFilter {
    /// 只返回启用的链接
    pub only_active: bool,
}

impl LinkFilter {
    pub fn active() -> Self {
        Self { only_active: true }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ButtonStyle {
    #[default]
    Solid,
    Outline,
    Rounded,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub background_color: Option<String>,
    pub accent_color: Option<String>,
    pub button_style: Option<ButtonStyle>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_claimed(&self) -> bool {
        self.username.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Theme attributes with defaults filled in
    pub fn theme(&self) -> Theme {
        Theme {
            background_color: non_empty_or(&self.background_color, DEFAULT_BACKGROUND_COLOR),
            accent_color: non_empty_or(&self.accent_color, DEFAULT_ACCENT_COLOR),
            button_style: self.button_style.unwrap_or_default(),
        }
    }
}

fn non_empty_or(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background_color: String,
    pub accent_color: String,
    pub button_style: ButtonStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            button_style: ButtonStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub id: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// Partial profile update, `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_style: Option<ButtonStyle>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.display_name.is_none()
            && self.bio.is_none()
            && self.avatar_url.is_none()
            && self.background_color.is_none()
            && self.accent_color.is_none()
            && self.button_style.is_none()
    }

    /// Apply the set fields onto an in-memory profile
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(ref username) = self.username {
            profile.username = Some(username.clone());
        }
        if let Some(ref display_name) = self.display_name {
            profile.display_name = Some(display_name.clone());
        }
        if let Some(ref bio) = self.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(ref avatar_url) = self.avatar_url {
            profile.avatar_url = Some(avatar_url.clone());
        }
        if let Some(ref background_color) = self.background_color {
            profile.background_color = Some(background_color.clone());
        }
        if let Some(ref accent_color) = self.accent_color {
            profile.accent_color = Some(accent_color.clone());
        }
        if let Some(button_style) = self.button_style {
            profile.button_style = Some(button_style);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_id: String,
    pub device_class: DeviceClass,
}

/// Raw click counts for one link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickCounts {
    pub total: u64,
    pub mobile: u64,
    pub desktop: u64,
}

impl ClickCounts {
    pub fn record(&mut self, device: DeviceClass, count: u64) {
        self.total += count;
        match device {
            DeviceClass::Mobile => self.mobile += count,
            DeviceClass::Desktop => self.desktop += count,
        }
    }
}
