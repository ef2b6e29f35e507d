//! Migrator registering content tables in creation order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_event;
mod m20240301_000002_create_activity;
mod m20240301_000003_create_gallery_image;
mod m20240301_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_event::Migration),
            Box::new(m20240301_000002_create_activity::Migration),
            Box::new(m20240301_000003_create_gallery_image::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000010_add_indexes::Migration),
        ]
    }
}
