//! Closed enumerations stored as short strings.
//!
//! `both` on a display target is a member of the home selection *and* of the
//! section selection, so list filters always widen a target with `both`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A display target enum with a distinguished `both` member.
pub trait DisplayTarget: Copy + PartialEq + Send + Sync + 'static {
    const BOTH: Self;

    /// Values a row may carry to be selected by `self`.
    fn selection(self) -> Vec<Self> {
        if self == Self::BOTH { vec![Self::BOTH] } else { vec![self, Self::BOTH] }
    }

    fn selected_by(self, filter: Self) -> bool {
        self == filter || self == Self::BOTH
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EventDisplay {
    #[sea_orm(string_value = "home")]
    Home,
    #[sea_orm(string_value = "events")]
    Events,
    #[sea_orm(string_value = "both")]
    Both,
}

impl DisplayTarget for EventDisplay {
    const BOTH: Self = EventDisplay::Both;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ActivityDisplay {
    #[sea_orm(string_value = "home")]
    Home,
    #[sea_orm(string_value = "activities")]
    Activities,
    #[sea_orm(string_value = "both")]
    Both,
}

impl DisplayTarget for ActivityDisplay {
    const BOTH: Self = ActivityDisplay::Both;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    #[sea_orm(string_value = "events")]
    Events,
    #[sea_orm(string_value = "activities")]
    Activities,
    #[sea_orm(string_value = "community")]
    Community,
    #[sea_orm(string_value = "facilities")]
    Facilities,
}
