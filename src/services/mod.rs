//! Service layer for the scraper.
//!
//! This module contains the business logic for:
//! - Label normalization (`normalize_key`)
//! - Index enumeration (`MissionLister`)
//! - Detail page extraction (`DetailExtractor`)

mod details;
mod missions;
mod normalize;

pub use details::{DetailExtractor, harvest};
pub use missions::{MissionLister, extract_stubs};
pub use normalize::normalize_key;
