use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_event::Event;
use crate::m20240301_000002_create_activity::Activity;
use crate::m20240301_000003_create_gallery_image::GalleryImage;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Event: public pages filter by display target and sort by date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_event_display_on")
                    .table(Event::Table)
                    .col(Event::DisplayOn)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_event_date")
                    .table(Event::Table)
                    .col(Event::Date)
                    .to_owned(),
            )
            .await?;

        // Activity: display target, newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_display_on")
                    .table(Activity::Table)
                    .col(Activity::DisplayOn)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_created_at")
                    .table(Activity::Table)
                    .col(Activity::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Gallery: category filter, newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_gallery_image_category_created")
                    .table(GalleryImage::Table)
                    .col(GalleryImage::Category)
                    .col(GalleryImage::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_gallery_image_category_created").table(GalleryImage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activity_created_at").table(Activity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activity_display_on").table(Activity::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_event_date").table(Event::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_event_display_on").table(Event::Table).to_owned())
            .await
    }
}
