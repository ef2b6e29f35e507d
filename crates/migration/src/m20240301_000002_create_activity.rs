//! Create `activity` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(uuid(Activity::Id).primary_key())
                    .col(string_len(Activity::Title, 200).not_null())
                    .col(text(Activity::Description).not_null())
                    .col(string_len(Activity::DisplayOn, 16).not_null())
                    .col(string_len_null(Activity::ImagePath, 1024))
                    .col(timestamp_with_time_zone(Activity::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Activity::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Activity {
    Table,
    Id,
    Title,
    Description,
    DisplayOn,
    ImagePath,
    CreatedAt,
}
