//! Click redirection: resolve a link id, record one click, hand back the target

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{OpenLinkError, Result};
use crate::storage::{ClickStore, DeviceClass, LinkStore, NewClick};
use crate::utils::normalize_target_url;

pub struct RedirectService {
    links: Arc<dyn LinkStore>,
    clicks: Arc<dyn ClickStore>,
}

impl RedirectService {
    pub fn new(links: Arc<dyn LinkStore>, clicks: Arc<dyn ClickStore>) -> Self {
        Self { links, clicks }
    }

    /// Resolve `link_id` to its followable destination
    ///
    /// Missing links and dead or unusable targets are `NotFound` and record
    /// nothing. A failed click insert is logged and does not stop the
    /// redirect.
    pub async fn follow(&self, link_id: &str, device: DeviceClass) -> Result<String> {
        let link = self
            .links
            .get(link_id)
            .await?
            .ok_or_else(|| OpenLinkError::not_found(format!("Link not found: {}", link_id)))?;

        let raw_target = link.target_url.as_deref().unwrap_or_default();
        let target = normalize_target_url(raw_target).map_err(|e| {
            debug!("Link {} has no usable target: {}", link_id, e);
            OpenLinkError::not_found(format!("Link has no usable destination: {}", link_id))
        })?;

        if let Err(e) = self
            .clicks
            .append(NewClick {
                link_id: link.id.clone(),
                device_class: device,
            })
            .await
        {
            warn!("Failed to record click for {}: {}", link.id, e);
        }

        debug!("Redirecting {} ({}) to {}", link.id, device, target);
        Ok(target)
    }
}
