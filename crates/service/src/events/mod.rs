pub mod repository;
pub mod service;

pub use repository::{EventRepository, SeaOrmEventRepository};
pub use service::EventService;
