use sea_orm_migration::{prelude::*, schema::*};

use super::m20250801_000001_create_folders::Folders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(uuid(Posts::Id).primary_key())
                    .col(uuid(Posts::UserId))
                    .col(text(Posts::Caption))
                    .col(string_null(Posts::Hashtags))
                    .col(string(Posts::Platform))
                    .col(uuid_null(Posts::FolderId))
                    .col(string_null(Posts::ImagePrompt))
                    .col(string_null(Posts::ImageUrl))
                    .col(string(Posts::Status))
                    .col(timestamp_with_time_zone_null(Posts::ScheduledAt))
                    .col(timestamp_with_time_zone_null(Posts::PublishedAt))
                    .col(timestamp_with_time_zone(Posts::CreatedAt))
                    .col(timestamp_with_time_zone(Posts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_folder")
                            .from(Posts::Table, Posts::FolderId)
                            .to(Folders::Table, Folders::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_user_created")
                    .table(Posts::Table)
                    .col(Posts::UserId)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_user_status")
                    .table(Posts::Table)
                    .col(Posts::UserId)
                    .col(Posts::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    UserId,
    Caption,
    Hashtags,
    Platform,
    FolderId,
    ImagePrompt,
    ImageUrl,
    Status,
    ScheduledAt,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
