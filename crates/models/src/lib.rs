//! SeaORM entities for the community site content tables, plus the
//! input types and field validation the service layer builds on.

pub mod errors;
pub mod db;
pub mod display;
pub mod validate;
pub mod event;
pub mod activity;
pub mod gallery_image;

#[cfg(test)]
mod tests;
