//! Owner-scoped admin sessions
//!
//! An `AdminSession` holds one owner's profile and link list. The registry
//! only maps owner id → session; each session sits behind an async mutex so
//! mutations of one owner are serialized while different owners never share
//! state. Idle sessions are evicted.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::appearance::{AppearanceUpdate, apply_appearance};
use crate::config::SessionConfig;
use crate::errors::{OpenLinkError, Result};
use crate::links::{LinkEntry, LinkListController, SyncState};
use crate::storage::{Link, Profile, ProfileStore, Stores};

pub type SharedSession = Arc<Mutex<AdminSession>>;

pub struct AdminSession {
    profile: Profile,
    profiles: Arc<dyn ProfileStore>,
    links: LinkListController,
    opened_at: DateTime<Utc>,
}

impl AdminSession {
    /// Load the owner's profile and links
    ///
    /// Owners without a claimed username get `NotFound`; they belong in
    /// onboarding.
    pub async fn open(owner_id: &str, stores: &Stores) -> Result<Self> {
        let profile = stores
            .profiles
            .get(owner_id)
            .await?
            .filter(Profile::is_claimed)
            .ok_or_else(|| {
                OpenLinkError::not_found(format!("Owner {} has not finished onboarding", owner_id))
            })?;

        let links =
            LinkListController::load(owner_id, stores.links.clone(), stores.profiles.clone())
                .await?;

        Ok(Self {
            profile,
            profiles: stores.profiles.clone(),
            links,
            opened_at: Utc::now(),
        })
    }

    pub fn owner_id(&self) -> &str {
        &self.profile.id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn links(&self) -> &LinkListController {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut LinkListController {
        &mut self.links
    }

    /// Returns `false` when every field already had the requested value
    pub async fn update_appearance(&mut self, update: AppearanceUpdate) -> Result<bool> {
        apply_appearance(&mut self.profile, self.profiles.as_ref(), update).await
    }

    pub fn link_view(&self, id: &str) -> Option<LinkView> {
        self.links.get(id).map(LinkView::of)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            profile: self.profile.clone(),
            theme: self.profile.theme(),
            links: self.links.entries().iter().map(LinkView::of).collect(),
            unreconciled_deletes: self.links.unreconciled_deletes().to_vec(),
            opened_at: self.opened_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkView {
    #[serde(flatten)]
    pub link: Link,
    /// Title as rendered, with the placeholder for empty titles
    pub title_placeholder: String,
    pub sync: SyncState,
}

impl LinkView {
    fn of(entry: &LinkEntry) -> Self {
        Self {
            title_placeholder: entry.link.display_title().to_string(),
            link: entry.link.clone(),
            sync: entry.sync,
        }
    }
}

/// What the admin client renders
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub profile: Profile,
    pub theme: crate::storage::Theme,
    pub links: Vec<LinkView>,
    pub unreconciled_deletes: Vec<String>,
    pub opened_at: DateTime<Utc>,
}

pub struct SessionRegistry {
    stores: Stores,
    sessions: Cache<String, SharedSession>,
}

impl SessionRegistry {
    pub fn new(stores: Stores, config: &SessionConfig) -> Self {
        let sessions = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(Duration::from_secs(config.idle_secs.max(1)))
            .build();
        Self { stores, sessions }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// The owner's session, opened from the store on first use
    pub async fn session(&self, owner_id: &str) -> Result<SharedSession> {
        let stores = self.stores.clone();
        let owner = owner_id.to_string();
        self.sessions
            .try_get_with(owner_id.to_string(), async move {
                let session = AdminSession::open(&owner, &stores).await?;
                debug!("Admin session opened for {}", owner);
                Ok::<_, OpenLinkError>(Arc::new(Mutex::new(session)))
            })
            .await
            .map_err(|e: Arc<OpenLinkError>| (*e).clone())
    }

    /// Drop in-memory state and reopen from the store
    pub async fn reload(&self, owner_id: &str) -> Result<SharedSession> {
        self.sessions.invalidate(owner_id).await;
        info!("Admin session reloaded for {}", owner_id);
        self.session(owner_id).await
    }

    pub async fn close(&self, owner_id: &str) {
        self.sessions.invalidate(owner_id).await;
        debug!("Admin session closed for {}", owner_id);
    }

    /// Approximate number of cached sessions
    pub fn open_sessions(&self) -> u64 {
        self.sessions.entry_count()
    }
}
