//! LinkStore implementation for SeaOrmStorage

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, info};

use super::converters::{link_update_to_active_model, model_to_link, new_link_to_active_model};
use super::{SeaOrmStorage, map_write_err};
use crate::errors::{OpenLinkError, Result};
use crate::storage::models::{Link, LinkFilter, LinkUpdate, NewLink};
use crate::storage::traits::LinkStore;

use migration::entities::link;

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn create(&self, owner_id: &str, new_link: NewLink) -> Result<Link> {
        let id = uuid::Uuid::new_v4().to_string();
        let active_model = new_link_to_active_model(id, owner_id, new_link, Utc::now());

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, "Failed to create link"))?;

        info!("Link created: {} (owner {})", model.id, owner_id);
        Ok(model_to_link(model))
    }

    async fn get(&self, id: &str) -> Result<Option<Link>> {
        let model = link::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| OpenLinkError::persistence(format!("Failed to load link {}: {}", id, e)))?;
        Ok(model.map(model_to_link))
    }

    async fn update(&self, id: &str, update: LinkUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let result = link::Entity::update_many()
            .set(link_update_to_active_model(update))
            .filter(link::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err(e, "Failed to update link"))?;

        // MySQL 对未变化的行返回 0，需再确认记录是否存在
        if result.rows_affected == 0 && LinkStore::get(self, id).await?.is_none() {
            return Err(OpenLinkError::not_found(format!("Link not found: {}", id)));
        }

        debug!("Link updated: {}", id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = link::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| OpenLinkError::persistence(format!("Failed to delete link: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(OpenLinkError::not_found(format!("Link not found: {}", id)));
        }

        info!("Link deleted: {}", id);
        Ok(())
    }

    async fn list(&self, owner_id: &str, filter: LinkFilter) -> Result<Vec<Link>> {
        let mut query = link::Entity::find().filter(link::Column::OwnerId.eq(owner_id));
        if filter.only_active {
            query = query.filter(link::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(link::Column::Order)
            .order_by_asc(link::Column::CreatedAt)
            .order_by_asc(link::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                OpenLinkError::persistence(format!("Failed to list links of {}: {}", owner_id, e))
            })?;

        Ok(models.into_iter().map(model_to_link).collect())
    }
}
