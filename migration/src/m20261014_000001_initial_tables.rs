use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // profiles 由外部注册流程创建，username 在 onboarding 时认领
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profile::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Profile::Username)
                            .string_len(30)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profile::DisplayName).string_len(255).null())
                    .col(ColumnDef::new(Profile::Bio).text().null())
                    .col(ColumnDef::new(Profile::AvatarUrl).text().null())
                    .col(
                        ColumnDef::new(Profile::BackgroundColor)
                            .string_len(16)
                            .null(),
                    )
                    .col(ColumnDef::new(Profile::AccentColor).string_len(16).null())
                    .col(ColumnDef::new(Profile::ButtonStyle).string_len(16).null())
                    .col(
                        ColumnDef::new(Profile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Profile::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Link::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Link::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Link::OwnerId).string_len(64).not_null())
                    .col(ColumnDef::new(Link::Title).text().null())
                    .col(ColumnDef::new(Link::TargetUrl).text().null())
                    .col(
                        ColumnDef::new(Link::Order)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Link::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Link::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_owner_id")
                            .from(Link::Table, Link::OwnerId)
                            .to(Profile::Table, Profile::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Click::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Click::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Click::LinkId).string_len(64).not_null())
                    .col(ColumnDef::new(Click::DeviceClass).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Click::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clicks_link_id")
                            .from(Click::Table, Click::LinkId)
                            .to(Link::Table, Link::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Click::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Link::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Profile {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
    Username,
    DisplayName,
    Bio,
    AvatarUrl,
    BackgroundColor,
    AccentColor,
    ButtonStyle,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    OwnerId,
    Title,
    TargetUrl,
    Order,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Click {
    #[sea_orm(iden = "clicks")]
    Table,
    Id,
    LinkId,
    DeviceClass,
    CreatedAt,
}
