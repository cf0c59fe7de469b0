use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Folders::Table)
                    .if_not_exists()
                    .col(uuid(Folders::Id).primary_key())
                    .col(uuid(Folders::UserId))
                    .col(string(Folders::Name))
                    .col(string_null(Folders::Description))
                    .col(string(Folders::Color))
                    .col(timestamp_with_time_zone(Folders::CreatedAt))
                    .col(timestamp_with_time_zone(Folders::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_folders_user_created")
                    .table(Folders::Table)
                    .col(Folders::UserId)
                    .col(Folders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Case-insensitive per-user name uniqueness; backs up the service
        // check under concurrent creates.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_folders_user_name_ci \
                 ON folders (user_id, lower(name))",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Folders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Folders {
    Table,
    Id,
    UserId,
    Name,
    Description,
    Color,
    CreatedAt,
    UpdatedAt,
}
