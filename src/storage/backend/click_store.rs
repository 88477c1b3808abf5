//! ClickStore implementation for SeaOrmStorage

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};
use tracing::{trace, warn};

use super::SeaOrmStorage;
use super::converters::new_click_to_active_model;
use crate::errors::{OpenLinkError, Result};
use crate::storage::models::{ClickCounts, DeviceClass, NewClick};
use crate::storage::traits::ClickStore;

use migration::entities::click;

/// (link, device) 分组计数结果
#[derive(Debug, FromQueryResult)]
struct DeviceCountRow {
    link_id: String,
    device_class: String,
    count: i64,
}

#[async_trait]
impl ClickStore for SeaOrmStorage {
    async fn append(&self, new_click: NewClick) -> Result<()> {
        let link_id = new_click.link_id.clone();
        click::Entity::insert(new_click_to_active_model(new_click, Utc::now()))
            .exec(&self.db)
            .await
            .map_err(|e| OpenLinkError::persistence(format!("Failed to record click: {}", e)))?;

        trace!("Click recorded for link {}", link_id);
        Ok(())
    }

    async fn count_by_link(&self, link_ids: &[String]) -> Result<HashMap<String, ClickCounts>> {
        if link_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = click::Entity::find()
            .select_only()
            .column(click::Column::LinkId)
            .column(click::Column::DeviceClass)
            .column_as(click::Column::Id.count(), "count")
            .filter(click::Column::LinkId.is_in(link_ids.iter().cloned()))
            .group_by(click::Column::LinkId)
            .group_by(click::Column::DeviceClass)
            .into_model::<DeviceCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| OpenLinkError::persistence(format!("Failed to count clicks: {}", e)))?;

        let mut counts: HashMap<String, ClickCounts> = HashMap::new();
        for row in rows {
            let Ok(device) = row.device_class.parse::<DeviceClass>() else {
                warn!(
                    "Ignoring clicks with unknown device class '{}'",
                    row.device_class
                );
                continue;
            };
            counts
                .entry(row.link_id)
                .or_default()
                .record(device, row.count.max(0) as u64);
        }
        Ok(counts)
    }
}
