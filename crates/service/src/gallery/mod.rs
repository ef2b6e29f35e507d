pub mod repository;
pub mod service;

pub use repository::{GalleryRepository, SeaOrmGalleryRepository};
pub use service::{BulkDeleteOutcome, GalleryService};
