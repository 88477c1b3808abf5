use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::jwt::JwtService;
use crate::config::StaticConfig;
use crate::services::{
    AnalyticsService, PublicPageService, RedirectService, SessionRegistry, UsernameService,
};
use crate::storage::{StorageFactory, Stores};

/// Everything the HTTP workers share
#[derive(Clone)]
pub struct StartupContext {
    pub stores: Stores,
    pub sessions: Arc<SessionRegistry>,
    pub jwt: Arc<JwtService>,
    pub redirects: Arc<RedirectService>,
    pub pages: Arc<PublicPageService>,
    pub usernames: Arc<UsernameService>,
    pub analytics: Arc<AnalyticsService>,
}

impl StartupContext {
    /// Wire the services on top of already opened stores
    pub fn from_stores(stores: Stores, config: &StaticConfig) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new(stores.clone(), &config.session)),
            jwt: Arc::new(JwtService::from_config(&config.auth)),
            redirects: Arc::new(RedirectService::new(
                stores.links.clone(),
                stores.clicks.clone(),
            )),
            pages: Arc::new(PublicPageService::new(
                stores.profiles.clone(),
                stores.links.clone(),
            )),
            usernames: Arc::new(UsernameService::new(
                stores.profiles.clone(),
                &config.profile,
            )),
            analytics: Arc::new(AnalyticsService::new(
                stores.profiles.clone(),
                stores.links.clone(),
                stores.clicks.clone(),
            )),
            stores,
        }
    }
}

/// 准备服务器启动的上下文：存储、迁移与服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = crate::config::get_config();
    let stores = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", stores.health.backend_name());

    let context = StartupContext::from_stores(stores, &config);

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
