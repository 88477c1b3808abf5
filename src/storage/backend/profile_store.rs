//! ProfileStore implementation for SeaOrmStorage

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use super::converters::{
    model_to_profile, new_profile_to_active_model, profile_update_to_active_model,
};
use super::{SeaOrmStorage, map_write_err};
use crate::errors::{OpenLinkError, Result};
use crate::storage::models::{NewProfile, Profile, ProfileUpdate};
use crate::storage::traits::ProfileStore;

use migration::entities::profile;

#[async_trait]
impl ProfileStore for SeaOrmStorage {
    async fn get(&self, id: &str) -> Result<Option<Profile>> {
        let model = profile::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                OpenLinkError::persistence(format!("Failed to load profile {}: {}", id, e))
            })?;
        Ok(model.map(model_to_profile))
    }

    async fn update(&self, id: &str, update: ProfileUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let result = profile::Entity::update_many()
            .set(profile_update_to_active_model(update, Utc::now()))
            .filter(profile::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err(e, "Failed to update profile"))?;

        if result.rows_affected == 0 && ProfileStore::get(self, id).await?.is_none() {
            return Err(OpenLinkError::not_found(format!("Profile not found: {}", id)));
        }

        info!("Profile updated: {}", id);
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Profile>> {
        let model = profile::Entity::find()
            .filter(profile::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| {
                OpenLinkError::persistence(format!("Failed to look up username: {}", e))
            })?;
        Ok(model.map(model_to_profile))
    }

    async fn create(&self, new_profile: NewProfile) -> Result<Profile> {
        let model = new_profile_to_active_model(new_profile, Utc::now())
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, "Failed to create profile"))?;

        info!("Profile created: {}", model.id);
        Ok(model_to_profile(model))
    }
}
