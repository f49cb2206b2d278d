// src/models/mod.rs

//! Domain models for the scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod mission;

// Re-export all public types
pub use config::{
    Config, LoggingConfig, OutputConfig, RendererConfig, SelectorConfig, SiteConfig,
    TimeoutConfig,
};
pub use mission::{MissionRecord, MissionStub, finalize};
