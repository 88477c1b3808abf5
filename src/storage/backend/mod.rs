//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod click_store;
mod connection;
mod converters;
mod link_store;
mod profile_store;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::warn;

use crate::errors::{OpenLinkError, Result};
use crate::storage::traits::StorageHealth;

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(OpenLinkError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://, memory://",
            database_url
        )))
    }
}

/// Unique index violations become `Conflict`, everything else `Persistence`
pub(crate) fn map_write_err(err: DbErr, context: &str) -> OpenLinkError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            OpenLinkError::conflict(format!("{}: {}", context, detail))
        }
        _ => OpenLinkError::persistence(format!("{}: {}", context, err)),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(OpenLinkError::database_config("database_url is empty"));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }
}

#[async_trait]
impl StorageHealth for SeaOrmStorage {
    fn backend_name(&self) -> String {
        self.backend_name.clone()
    }

    async fn ping(&self) -> Result<()> {
        self.db.ping().await.map_err(|e| {
            OpenLinkError::database_connection(format!(
                "{} ping failed: {}",
                self.backend_name.to_uppercase(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://a.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("openlink.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mariadb://h/db").unwrap(), "mysql");
        assert_eq!(
            infer_backend_from_url("postgresql://h/db").unwrap(),
            "postgres"
        );
        assert!(matches!(
            infer_backend_from_url("redis://h"),
            Err(OpenLinkError::DatabaseConfig(_))
        ));
    }
}
