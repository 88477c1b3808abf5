//! In-process storage backend (`memory://`)
//!
//! Mirrors the relational constraints that matter to the domain: unique
//! usernames, link → profile and click → link references, cascading deletes.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use super::models::{
    ClickCounts, DeviceClass, Link, LinkFilter, LinkUpdate, NewClick, NewLink, NewProfile,
    Profile, ProfileUpdate, sort_links_by_position,
};
use super::traits::{ClickStore, LinkStore, ProfileStore, StorageHealth};
use crate::errors::{OpenLinkError, Result};

pub fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("memory://") || database_url == "memory"
}

#[derive(Debug, Clone)]
struct ClickRecord {
    link_id: String,
    device_class: DeviceClass,
}

#[derive(Default)]
struct MemoryState {
    profiles: HashMap<String, Profile>,
    links: HashMap<String, Link>,
    clicks: Vec<ClickRecord>,
}

impl MemoryState {
    fn username_taken(&self, username: &str, except_id: &str) -> bool {
        self.profiles
            .values()
            .any(|p| p.id != except_id && p.username.as_deref() == Some(username))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_count(&self) -> usize {
        self.state.read().profiles.len()
    }

    pub fn click_count(&self) -> usize {
        self.state.read().clicks.len()
    }
}

#[async_trait]
impl LinkStore for MemoryStorage {
    async fn create(&self, owner_id: &str, link: NewLink) -> Result<Link> {
        let mut state = self.state.write();
        if !state.profiles.contains_key(owner_id) {
            return Err(OpenLinkError::persistence(format!(
                "Link owner does not exist: {}",
                owner_id
            )));
        }

        let stored = Link {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: link.title,
            target_url: link.target_url,
            order: link.order,
            is_active: link.is_active,
            created_at: Utc::now(),
        };
        state.links.insert(stored.id.clone(), stored.clone());
        debug!("memory: link {} created for {}", stored.id, owner_id);
        Ok(stored)
    }

    async fn get(&self, id: &str) -> Result<Option<Link>> {
        Ok(self.state.read().links.get(id).cloned())
    }

    async fn update(&self, id: &str, update: LinkUpdate) -> Result<()> {
        let mut state = self.state.write();
        let link = state
            .links
            .get_mut(id)
            .ok_or_else(|| OpenLinkError::not_found(format!("Link not found: {}", id)))?;

        if let Some(title) = update.title {
            link.title = Some(title);
        }
        if let Some(target_url) = update.target_url {
            link.target_url = Some(target_url);
        }
        if let Some(order) = update.order {
            link.order = order;
        }
        if let Some(is_active) = update.is_active {
            link.is_active = is_active;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.write();
        if state.links.remove(id).is_none() {
            return Err(OpenLinkError::not_found(format!("Link not found: {}", id)));
        }
        state.clicks.retain(|c| c.link_id != id);
        Ok(())
    }

    async fn list(&self, owner_id: &str, filter: LinkFilter) -> Result<Vec<Link>> {
        let state = self.state.read();
        let mut links: Vec<Link> = state
            .links
            .values()
            .filter(|l| l.owner_id == owner_id)
            .filter(|l| !filter.only_active || l.is_active)
            .cloned()
            .collect();
        sort_links_by_position(&mut links);
        Ok(links)
    }
}

#[async_trait]
impl ProfileStore for MemoryStorage {
    async fn get(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self.state.read().profiles.get(id).cloned())
    }

    async fn update(&self, id: &str, update: ProfileUpdate) -> Result<()> {
        let mut state = self.state.write();
        if let Some(ref username) = update.username
            && state.username_taken(username, id)
        {
            return Err(OpenLinkError::conflict(format!(
                "Username already taken: {}",
                username
            )));
        }

        let profile = state
            .profiles
            .get_mut(id)
            .ok_or_else(|| OpenLinkError::not_found(format!("Profile not found: {}", id)))?;
        update.apply_to(profile);
        profile.updated_at = Utc::now();
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>> {
        Ok(self
            .state
            .read()
            .profiles
            .values()
            .find(|p| p.username.as_deref() == Some(username))
            .cloned())
    }

    async fn create(&self, profile: NewProfile) -> Result<Profile> {
        let mut state = self.state.write();
        if state.profiles.contains_key(&profile.id) {
            return Err(OpenLinkError::conflict(format!(
                "Profile already exists: {}",
                profile.id
            )));
        }
        if let Some(ref username) = profile.username
            && state.username_taken(username, &profile.id)
        {
            return Err(OpenLinkError::conflict(format!(
                "Username already taken: {}",
                username
            )));
        }

        let now = Utc::now();
        let stored = Profile {
            id: profile.id,
            username: profile.username,
            display_name: profile.display_name,
            bio: None,
            avatar_url: None,
            background_color: None,
            accent_color: None,
            button_style: None,
            created_at: now,
            updated_at: now,
        };
        state.profiles.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl ClickStore for MemoryStorage {
    async fn append(&self, click: NewClick) -> Result<()> {
        let mut state = self.state.write();
        if !state.links.contains_key(&click.link_id) {
            return Err(OpenLinkError::persistence(format!(
                "Clicked link does not exist: {}",
                click.link_id
            )));
        }
        state.clicks.push(ClickRecord {
            link_id: click.link_id,
            device_class: click.device_class,
        });
        Ok(())
    }

    async fn count_by_link(&self, link_ids: &[String]) -> Result<HashMap<String, ClickCounts>> {
        let state = self.state.read();
        let mut counts: HashMap<String, ClickCounts> = HashMap::new();
        for click in state.clicks.iter().filter(|c| link_ids.contains(&c.link_id)) {
            counts
                .entry(click.link_id.clone())
                .or_default()
                .record(click.device_class, 1);
        }
        Ok(counts)
    }
}

#[async_trait]
impl StorageHealth for MemoryStorage {
    fn backend_name(&self) -> String {
        "memory".to_string()
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryStorage {
        let storage = MemoryStorage::new();
        ProfileStore::create(
            &storage,
            NewProfile {
                id: "owner-1".to_string(),
                username: Some("jane".to_string()),
                display_name: None,
            },
        )
        .await
        .unwrap();
        storage
    }

    #[tokio::test]
    async fn test_list_orders_by_position() {
        let storage = seeded().await;
        for order in [3, -1, 7] {
            LinkStore::create(
                &storage,
                "owner-1",
                NewLink {
                    order,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        let orders: Vec<i32> = storage
            .list("owner-1", LinkFilter::default())
            .await
            .unwrap()
            .iter()
            .map(|l| l.order)
            .collect();
        assert_eq!(orders, vec![-1, 3, 7]);
    }

    #[tokio::test]
    async fn test_username_uniqueness() {
        let storage = seeded().await;
        let err = ProfileStore::create(
            &storage,
            NewProfile {
                id: "owner-2".to_string(),
                username: Some("jane".to_string()),
                display_name: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, OpenLinkError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_link_delete_cascades_clicks() {
        let storage = seeded().await;
        let link = LinkStore::create(&storage, "owner-1", NewLink::default())
            .await
            .unwrap();
        storage
            .append(NewClick {
                link_id: link.id.clone(),
                device_class: DeviceClass::Mobile,
            })
            .await
            .unwrap();
        assert_eq!(storage.click_count(), 1);

        LinkStore::delete(&storage, &link.id).await.unwrap();
        assert_eq!(storage.click_count(), 0);
        assert!(matches!(
            LinkStore::delete(&storage, &link.id).await,
            Err(OpenLinkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_link_requires_owner() {
        let storage = MemoryStorage::new();
        let err = LinkStore::create(&storage, "ghost", NewLink::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OpenLinkError::Persistence(_)));
    }
}
