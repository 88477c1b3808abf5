//! Public profile page read path

use std::sync::Arc;

use serde::Serialize;

use crate::errors::{OpenLinkError, Result};
use crate::storage::{LinkFilter, LinkStore, ProfileStore, Theme};
use crate::utils::contrast_text_color;

const SITE_NAME: &str = "OpenLink";

/// Href of the click-tracking redirect for a link
pub fn click_href(link_id: &str) -> String {
    format!("/api/click?linkId={}", urlencoding::encode(link_id))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicLink {
    pub id: String,
    pub title: String,
    /// Always the click redirect, never the destination itself
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicPage {
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Theme,
    /// Readable text color for `theme.background_color`
    pub text_color: String,
    pub links: Vec<PublicLink>,
    pub meta: PageMeta,
}

pub struct PublicPageService {
    profiles: Arc<dyn ProfileStore>,
    links: Arc<dyn LinkStore>,
}

impl PublicPageService {
    pub fn new(profiles: Arc<dyn ProfileStore>, links: Arc<dyn LinkStore>) -> Self {
        Self { profiles, links }
    }

    pub async fn load(&self, username: &str) -> Result<PublicPage> {
        let username = username.trim().to_lowercase();
        let profile = self
            .profiles
            .find_by_username(&username)
            .await?
            .ok_or_else(|| OpenLinkError::not_found(format!("No page for '{}'", username)))?;

        let links = self
            .links
            .list(&profile.id, LinkFilter::active())
            .await?
            .into_iter()
            .map(|link| PublicLink {
                href: click_href(&link.id),
                title: link.display_title().to_string(),
                id: link.id,
            })
            .collect();

        let display_name = profile
            .display_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| username.clone());
        let bio = profile.bio.clone().filter(|b| !b.is_empty());
        let avatar_url = profile.avatar_url.clone().filter(|a| !a.is_empty());
        let theme = profile.theme();

        let meta = PageMeta {
            title: format!("{} | {}", display_name, SITE_NAME),
            description: bio.clone().unwrap_or_else(|| {
                format!("Check out {}'s links on {}.", display_name, SITE_NAME)
            }),
            image: avatar_url.clone(),
        };

        Ok(PublicPage {
            text_color: contrast_text_color(&theme.background_color).to_string(),
            username,
            display_name,
            bio,
            avatar_url,
            theme,
            links,
            meta,
        })
    }
}
