//! Store contracts the domain layer talks to
//!
//! Every backend (SeaORM, memory, test doubles) implements these traits; the
//! services only ever hold `Arc<dyn ...>` handles.

use std::collections::HashMap;

use async_trait::async_trait;

use super::models::{
    ClickCounts, Link, LinkFilter, LinkUpdate, NewClick, NewLink, NewProfile, Profile,
    ProfileUpdate,
};
use crate::errors::Result;

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a new link for `owner_id`, returning the stored record
    async fn create(&self, owner_id: &str, link: NewLink) -> Result<Link>;

    async fn get(&self, id: &str) -> Result<Option<Link>>;

    /// Write the set fields of `update`; a missing id is `NotFound`
    async fn update(&self, id: &str, update: LinkUpdate) -> Result<()>;

    /// A missing id is `NotFound`
    async fn delete(&self, id: &str) -> Result<()>;

    /// Links of one owner, ascending by `order` (ties by `created_at`, `id`)
    async fn list(&self, owner_id: &str, filter: LinkFilter) -> Result<Vec<Link>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Profile>>;

    /// Write the set fields of `update`; a taken username is `Conflict`
    async fn update(&self, id: &str, update: ProfileUpdate) -> Result<()>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>>;

    /// Insert a profile row; a taken id or username is `Conflict`
    async fn create(&self, profile: NewProfile) -> Result<Profile>;
}

#[async_trait]
pub trait ClickStore: Send + Sync {
    async fn append(&self, click: NewClick) -> Result<()>;

    /// Raw per-link counts; links without clicks are absent from the map
    async fn count_by_link(&self, link_ids: &[String]) -> Result<HashMap<String, ClickCounts>>;
}

/// Liveness of the backing store, used by the health probes
#[async_trait]
pub trait StorageHealth: Send + Sync {
    fn backend_name(&self) -> String;

    async fn ping(&self) -> Result<()>;
}
