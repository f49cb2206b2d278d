// src/pipeline/info.rs

use crate::error::Result;
use crate::models::{Config, MissionRecord};
use crate::storage::{LocalStorage, MissionStorage};
use crate::utils::log;

/// Entries shown by `run_info`.
const PREVIEW: usize = 10;

/// Load the saved mission directory and print a preview.
pub async fn run_info(config: &Config) -> Result<Vec<MissionRecord>> {
    let storage = LocalStorage::new(&config.output.path);
    let records = storage.load().await?;

    log::success(&format!(
        "{} missions in {}",
        records.len(),
        storage.location()
    ));
    for record in records.iter().take(PREVIEW) {
        log::sub_item(&format!(
            "#{} {} ({} attributes)",
            record.id,
            record.name,
            record.attributes.len()
        ));
    }
    if records.len() > PREVIEW {
        log::sub_item(&format!("... {} more", records.len() - PREVIEW));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissionStub, finalize};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_info_reads_saved_directory() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.path = tmp.path().join("missions.json");

        let mut record =
            MissionRecord::from_stub(&MissionStub::new("RISAT-1", "https://example.com"));
        record.set_attribute("orbit_type", "SSO");
        LocalStorage::new(&config.output.path)
            .save(&finalize(vec![record]))
            .await
            .unwrap();

        let records = run_info(&config).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }

    #[tokio::test]
    async fn test_run_info_without_file() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.path = tmp.path().join("missing.json");
        assert!(run_info(&config).await.unwrap().is_empty());
    }
}
