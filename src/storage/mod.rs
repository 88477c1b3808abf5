use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;
pub mod traits;

pub use backend::SeaOrmStorage;
pub use memory::MemoryStorage;
pub use models::{
    ButtonStyle, ClickCounts, DeviceClass, Link, LinkFilter, LinkUpdate, NewClick, NewLink,
    NewProfile, Profile, ProfileUpdate, Theme, UNTITLED_LINK, sort_links_by_position,
};
pub use traits::{ClickStore, LinkStore, ProfileStore, StorageHealth};

/// Store handles shared by every service and handler
#[derive(Clone)]
pub struct Stores {
    pub links: Arc<dyn LinkStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub clicks: Arc<dyn ClickStore>,
    pub health: Arc<dyn StorageHealth>,
}

impl Stores {
    /// Hand out one backend through every store trait
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: LinkStore + ProfileStore + ClickStore + StorageHealth + 'static,
    {
        Self {
            links: backend.clone(),
            profiles: backend.clone(),
            clicks: backend.clone(),
            health: backend,
        }
    }
}

pub struct StorageFactory;

impl StorageFactory {
    /// Build the stores from `database.database_url` in the global config
    pub async fn create() -> Result<Stores> {
        let config = crate::config::get_config();
        Self::create_from_url(&config.database.database_url).await
    }

    pub async fn create_from_url(database_url: &str) -> Result<Stores> {
        if memory::is_memory_url(database_url) {
            tracing::warn!("Using in-process memory storage; data is lost on exit");
            return Ok(Stores::from_backend(Arc::new(MemoryStorage::new())));
        }

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Stores::from_backend(Arc::new(storage)))
    }
}
