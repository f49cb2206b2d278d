//! Pipeline entry points for scraper operations.
//!
//! - `run_scrape`: Enumerate, extract and save the mission directory
//! - `run_list`: Enumerate the index only
//! - `run_validate`: Check the configuration
//! - `run_info`: Summarize the saved directory

pub mod info;
pub mod list;
pub mod scrape;
pub mod validate;

pub use info::run_info;
pub use list::run_list;
pub use scrape::{MissionScraper, ScrapeOutcome, SkippedMission, run_scrape};
pub use validate::run_validate;
