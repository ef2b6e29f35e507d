pub mod repository;
pub mod service;

pub use repository::{ActivityRepository, SeaOrmActivityRepository};
pub use service::ActivityService;
