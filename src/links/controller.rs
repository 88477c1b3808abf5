//! In-memory link list of one owner with optimistic persistence
//!
//! Every mutation is applied to the in-memory list first, then the matching
//! store call is issued. Failed writes are never rolled back: the entry is
//! marked `Failed` (or, for deletes, the id is kept as unreconciled) and the
//! error is logged and returned. Reloading the session is the way back to
//! the stored state.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::gesture::ReorderIntent;
use super::ordering::{InsertPlan, OrderAssignment, ReorderPlan, plan_insert, plan_reorder};
use crate::errors::{OpenLinkError, Result};
use crate::storage::{
    Link, LinkFilter, LinkStore, LinkUpdate, NewLink, ProfileStore, sort_links_by_position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    Synced,
    /// Local edits not committed yet
    Dirty,
    /// The last write for this entry failed
    Failed,
}

/// Editable text fields of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Title,
    TargetUrl,
}

/// Last values known to be in the store
#[derive(Debug, Clone, PartialEq, Eq)]
struct Persisted {
    title: Option<String>,
    target_url: Option<String>,
    order: i32,
    is_active: bool,
}

impl Persisted {
    fn of(link: &Link) -> Self {
        Self {
            title: link.title.clone(),
            target_url: link.target_url.clone(),
            order: link.order,
            is_active: link.is_active,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinkEntry {
    pub link: Link,
    pub sync: SyncState,
    persisted: Persisted,
}

impl LinkEntry {
    fn synced(link: Link) -> Self {
        Self {
            persisted: Persisted::of(&link),
            link,
            sync: SyncState::Synced,
        }
    }

    fn has_uncommitted_edits(&self) -> bool {
        self.link.title != self.persisted.title || self.link.target_url != self.persisted.target_url
    }

    fn has_unwritten_state(&self) -> bool {
        self.link.order != self.persisted.order || self.link.is_active != self.persisted.is_active
    }

    /// Recompute the sync state after a successful write
    fn settle(&mut self) {
        self.sync = if self.has_uncommitted_edits() {
            SyncState::Dirty
        } else if self.has_unwritten_state() {
            SyncState::Failed
        } else {
            SyncState::Synced
        };
    }

    pub fn persisted_target_url(&self) -> Option<&str> {
        self.persisted.target_url.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderFailure {
    pub id: String,
    pub message: String,
}

/// Result of a best-effort reorder batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReorderOutcome {
    /// Ids whose new order value was written
    pub written: Vec<String>,
    pub failed: Vec<ReorderFailure>,
}

impl ReorderOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct LinkListController {
    owner_id: String,
    links: Arc<dyn LinkStore>,
    profiles: Arc<dyn ProfileStore>,
    entries: Vec<LinkEntry>,
    unreconciled_deletes: Vec<String>,
}

impl LinkListController {
    /// Start from a snapshot handed over by the loader
    pub fn from_snapshot(
        owner_id: impl Into<String>,
        links: Arc<dyn LinkStore>,
        profiles: Arc<dyn ProfileStore>,
        mut snapshot: Vec<Link>,
    ) -> Self {
        sort_links_by_position(&mut snapshot);
        Self {
            owner_id: owner_id.into(),
            links,
            profiles,
            entries: snapshot.into_iter().map(LinkEntry::synced).collect(),
            unreconciled_deletes: Vec::new(),
        }
    }

    /// Load the owner's links from the store
    pub async fn load(
        owner_id: impl Into<String>,
        links: Arc<dyn LinkStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Result<Self> {
        let owner_id = owner_id.into();
        let snapshot = links.list(&owner_id, LinkFilter::default()).await?;
        debug!("Loaded {} links for {}", snapshot.len(), owner_id);
        Ok(Self::from_snapshot(owner_id, links, profiles, snapshot))
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LinkEntry> {
        self.entries.iter().find(|e| e.link.id == id)
    }

    /// Ids in display order
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.link.id.clone()).collect()
    }

    /// Ids whose deletion could not be persisted
    pub fn unreconciled_deletes(&self) -> &[String] {
        &self.unreconciled_deletes
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.link.id == id)
            .ok_or_else(|| OpenLinkError::not_found(format!("Link not found: {}", id)))
    }

    fn order_snapshot(&self) -> Vec<(String, i32)> {
        self.entries
            .iter()
            .map(|e| (e.link.id.clone(), e.link.order))
            .collect()
    }

    /// Display order paired with the last order value written to the store
    fn persisted_order_snapshot(&self) -> Vec<(String, i32)> {
        self.entries
            .iter()
            .map(|e| (e.link.id.clone(), e.persisted.order))
            .collect()
    }

    /// Write new order values, one call per link; failures are collected
    async fn persist_orders(&mut self, assignments: &[OrderAssignment]) -> ReorderOutcome {
        let mut outcome = ReorderOutcome::default();
        for assignment in assignments {
            let result = self
                .links
                .update(&assignment.id, LinkUpdate::order(assignment.order))
                .await;

            let entry = self.entries.iter_mut().find(|e| e.link.id == assignment.id);
            match result {
                Ok(()) => {
                    if let Some(entry) = entry {
                        entry.persisted.order = assignment.order;
                        entry.settle();
                    }
                    outcome.written.push(assignment.id.clone());
                }
                Err(e) => {
                    error!(
                        "Failed to persist order {} for link {}: {}",
                        assignment.order, assignment.id, e
                    );
                    if let Some(entry) = entry {
                        entry.sync = SyncState::Failed;
                    }
                    outcome.failed.push(ReorderFailure {
                        id: assignment.id.clone(),
                        message: e.message().to_string(),
                    });
                }
            }
        }
        outcome
    }

    /// Create an empty, inactive link in front of the list
    pub async fn add(&mut self) -> Result<Link> {
        let profile = self.profiles.get(&self.owner_id).await?;
        if profile.is_none() {
            return Err(OpenLinkError::creation(format!(
                "No profile exists for owner {}",
                self.owner_id
            )));
        }

        let order = match plan_insert(&self.order_snapshot()) {
            InsertPlan::Front(order) => order,
            InsertPlan::RenumberThenFront { renumbered, order } => {
                warn!(
                    "Order values of {} exhausted, renumbering {} links",
                    self.owner_id,
                    renumbered.len()
                );
                let by_id: HashMap<&str, i32> =
                    renumbered.iter().map(|a| (a.id.as_str(), a.order)).collect();
                for entry in &mut self.entries {
                    if let Some(order) = by_id.get(entry.link.id.as_str()) {
                        entry.link.order = *order;
                    }
                }
                // Entries left stale by an earlier failed write are rewritten too
                let writes: Vec<OrderAssignment> = self
                    .entries
                    .iter()
                    .filter(|e| e.link.order != e.persisted.order)
                    .map(|e| OrderAssignment {
                        id: e.link.id.clone(),
                        order: e.link.order,
                    })
                    .collect();
                let outcome = self.persist_orders(&writes).await;
                if !outcome.is_complete() {
                    warn!(
                        "{} links could not be renumbered before insert",
                        outcome.failed.len()
                    );
                }
                order
            }
        };

        let link = self
            .links
            .create(
                &self.owner_id,
                NewLink {
                    title: Some(String::new()),
                    target_url: Some(String::new()),
                    order,
                    is_active: false,
                },
            )
            .await?;

        info!("Link {} added for {} at order {}", link.id, self.owner_id, order);
        self.entries.insert(0, LinkEntry::synced(link.clone()));
        Ok(link)
    }

    /// Change a text field in memory only; `commit` persists it
    pub fn edit(&mut self, id: &str, field: LinkField, value: impl Into<String>) -> Result<()> {
        let index = self.position(id)?;
        let entry = &mut self.entries[index];
        let value = Some(value.into());
        match field {
            LinkField::Title => entry.link.title = value,
            LinkField::TargetUrl => entry.link.target_url = value,
        }
        entry.sync = if entry.has_uncommitted_edits() {
            SyncState::Dirty
        } else if entry.sync == SyncState::Dirty {
            SyncState::Synced
        } else {
            entry.sync
        };
        Ok(())
    }

    /// Persist edited fields; returns `false` when nothing differed
    pub async fn commit(&mut self, id: &str) -> Result<bool> {
        let index = self.position(id)?;
        let entry = &self.entries[index];

        let mut update = LinkUpdate::default();
        if entry.link.title != entry.persisted.title {
            update.title = Some(entry.link.title.clone().unwrap_or_default());
        }
        if entry.link.target_url != entry.persisted.target_url {
            update.target_url = Some(entry.link.target_url.clone().unwrap_or_default());
        }

        if update.is_empty() {
            debug!("Commit of {} skipped, nothing changed", id);
            self.entries[index].settle();
            return Ok(false);
        }

        let result = self.links.update(id, update.clone()).await;
        let entry = &mut self.entries[index];
        match result {
            Ok(()) => {
                if let Some(title) = update.title {
                    entry.persisted.title = Some(title);
                }
                if let Some(target_url) = update.target_url {
                    entry.persisted.target_url = Some(target_url);
                }
                entry.settle();
                Ok(true)
            }
            Err(e) => {
                error!("Failed to commit edits of link {}: {}", id, e);
                entry.sync = SyncState::Failed;
                Err(e)
            }
        }
    }

    /// Set the activation flag; always issues exactly one write
    pub async fn set_active(&mut self, id: &str, is_active: bool) -> Result<()> {
        let index = self.position(id)?;
        self.entries[index].link.is_active = is_active;

        let result = self.links.update(id, LinkUpdate::active(is_active)).await;
        let entry = &mut self.entries[index];
        match result {
            Ok(()) => {
                entry.persisted.is_active = is_active;
                entry.settle();
                Ok(())
            }
            Err(e) => {
                error!("Failed to set is_active={} on link {}: {}", is_active, id, e);
                entry.sync = SyncState::Failed;
                Err(e)
            }
        }
    }

    /// Flip the activation flag, returning the new value
    pub async fn toggle_active(&mut self, id: &str) -> Result<bool> {
        let index = self.position(id)?;
        let next = !self.entries[index].link.is_active;
        self.set_active(id, next).await?;
        Ok(next)
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        self.entries.remove(index);

        match self.links.delete(id).await {
            Ok(()) => {
                info!("Link {} deleted for {}", id, self.owner_id);
                Ok(())
            }
            Err(OpenLinkError::NotFound(_)) => {
                debug!("Link {} was already gone from the store", id);
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete link {}: {}", id, e);
                self.unreconciled_deletes.push(id.to_string());
                Err(e)
            }
        }
    }

    /// Move one link; every changed order value is written, failures reported
    pub async fn reorder(&mut self, intent: &ReorderIntent) -> Result<ReorderOutcome> {
        let plan = plan_reorder(
            &self.persisted_order_snapshot(),
            intent.from_index,
            intent.to_index,
        )?;
        if self.entries[intent.from_index].link.id != intent.moved_id {
            return Err(OpenLinkError::validation(format!(
                "Link {} is not at position {}",
                intent.moved_id, intent.from_index
            )));
        }

        let (arrangement, changed) = match plan {
            ReorderPlan::Unchanged => return Ok(ReorderOutcome::default()),
            ReorderPlan::Renumbered {
                arrangement,
                changed,
            } => (arrangement, changed),
        };

        let mut by_id: HashMap<String, LinkEntry> = self
            .entries
            .drain(..)
            .map(|e| (e.link.id.clone(), e))
            .collect();
        for assignment in &arrangement {
            if let Some(mut entry) = by_id.remove(&assignment.id) {
                entry.link.order = assignment.order;
                self.entries.push(entry);
            }
        }

        let outcome = self.persist_orders(&changed).await;
        debug!(
            "Reordered {} for {}: {} written, {} failed",
            intent.moved_id,
            self.owner_id,
            outcome.written.len(),
            outcome.failed.len()
        );
        Ok(outcome)
    }
}
