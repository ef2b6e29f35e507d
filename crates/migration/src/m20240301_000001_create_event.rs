//! Create `event` table.
//! `image_path` holds a blob object name (or a legacy absolute URL).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(uuid(Event::Id).primary_key())
                    .col(string_len(Event::Title, 200).not_null())
                    .col(date(Event::Date).not_null())
                    .col(string_len(Event::Time, 64).not_null())
                    .col(string_len(Event::Venue, 200).not_null())
                    .col(text(Event::Description).not_null())
                    .col(string_len(Event::DisplayOn, 16).not_null())
                    .col(string_len_null(Event::ImagePath, 1024))
                    .col(timestamp_with_time_zone(Event::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Event::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Event {
    Table,
    Id,
    Title,
    Date,
    Time,
    Venue,
    Description,
    DisplayOn,
    ImagePath,
    CreatedAt,
}
