//! Raw click aggregation for the owner's analytics view

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::errors::{OpenLinkError, Result};
use crate::storage::{ClickStore, LinkFilter, LinkStore, ProfileStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkClicks {
    pub id: String,
    pub title: String,
    pub target_url: Option<String>,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_clicks: u64,
    pub mobile_clicks: u64,
    pub desktop_clicks: u64,
    /// Most clicked first; newer links first among equals
    pub links: Vec<LinkClicks>,
}

pub struct AnalyticsService {
    profiles: Arc<dyn ProfileStore>,
    links: Arc<dyn LinkStore>,
    clicks: Arc<dyn ClickStore>,
}

impl AnalyticsService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        links: Arc<dyn LinkStore>,
        clicks: Arc<dyn ClickStore>,
    ) -> Self {
        Self {
            profiles,
            links,
            clicks,
        }
    }

    /// A missing profile is `NotFound` (the caller sends the user to onboarding)
    pub async fn summary(&self, owner_id: &str) -> Result<AnalyticsSummary> {
        if self.profiles.get(owner_id).await?.is_none() {
            return Err(OpenLinkError::not_found(format!(
                "No profile for owner {}",
                owner_id
            )));
        }

        let mut links = self.links.list(owner_id, LinkFilter::default()).await?;
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let ids: Vec<String> = links.iter().map(|l| l.id.clone()).collect();
        let counts = self.clicks.count_by_link(&ids).await?;

        let mut summary = AnalyticsSummary {
            total_clicks: 0,
            mobile_clicks: 0,
            desktop_clicks: 0,
            links: Vec::with_capacity(links.len()),
        };
        for link in links {
            let link_counts = counts.get(&link.id).copied().unwrap_or_default();
            summary.total_clicks += link_counts.total;
            summary.mobile_clicks += link_counts.mobile;
            summary.desktop_clicks += link_counts.desktop;
            summary.links.push(LinkClicks {
                title: link.display_title().to_string(),
                id: link.id,
                target_url: link.target_url,
                clicks: link_counts.total,
            });
        }
        // stable: newest-first survives among equal counts
        summary.links.sort_by(|a, b| b.clicks.cmp(&a.clicks));

        debug!(
            "Analytics for {}: {} clicks over {} links",
            owner_id,
            summary.total_clicks,
            summary.links.len()
        );
        Ok(summary)
    }
}
