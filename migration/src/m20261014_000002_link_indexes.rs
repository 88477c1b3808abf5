//! 链接与点击查询索引
//!
//! - links(owner_id, order): 管理端 / 公开页按 owner 有序读取
//! - clicks(link_id): 分析页按链接聚合

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_owner_order")
                    .table(Links::Table)
                    .col(Links::OwnerId)
                    .col(Links::Order)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clicks_link_id")
                    .table(Clicks::Table)
                    .col(Clicks::LinkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_clicks_link_id")
                    .table(Clicks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_links_owner_order")
                    .table(Links::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Links {
    Table,
    OwnerId,
    Order,
}

#[derive(DeriveIden)]
enum Clicks {
    Table,
    LinkId,
}
