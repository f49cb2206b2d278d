//! Storage abstractions for the mission directory.
//!
//! The directory is a single JSON array:
//!
//! ```text
//! [
//!   { "name": "...", "launch_date": "...", "id": 1 },
//!   ...
//! ]
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::MissionRecord;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for mission directory backends.
#[async_trait]
pub trait MissionStorage: Send + Sync {
    /// Replace the stored directory with `records`, in the given order.
    async fn save(&self, records: &[MissionRecord]) -> Result<()>;

    /// Load the stored directory; empty when nothing has been written yet.
    async fn load(&self) -> Result<Vec<MissionRecord>>;

    /// Human-readable location for log lines.
    fn location(&self) -> String;
}
