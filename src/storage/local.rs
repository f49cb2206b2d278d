//! Local filesystem storage implementation.
//!
//! Writes the directory to one JSON file, pretty-printed, non-ASCII text
//! kept as-is. Each save replaces the whole file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::MissionRecord;
use crate::storage::MissionStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a storage writing to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Sibling the next save is staged in: the file name plus `.tmp`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write bytes to a temp sibling, then rename over the target.
    ///
    /// The temp file is removed again when any step fails.
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.staging_path();
        let result = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            drop(file);
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = result {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(AppError::Io(e));
        }
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl MissionStorage for LocalStorage {
    async fn save(&self, records: &[MissionRecord]) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(records)?;
        bytes.push(b'\n');
        self.write_bytes(&bytes).await?;
        log::info!("{} missions written to {}", records.len(), self.path.display());
        Ok(())
    }

    async fn load(&self) -> Result<Vec<MissionRecord>> {
        match self.read_bytes().await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => {
                log::warn!("No mission directory at {}", self.path.display());
                Ok(Vec::new())
            }
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MissionStub;
    use tempfile::TempDir;

    fn record(name: &str, id: u32, attrs: &[(&str, &str)]) -> MissionRecord {
        let mut record = MissionRecord::from_stub(&MissionStub::new(name, "https://example.com"));
        for (key, value) in attrs {
            record.set_attribute(*key, *value);
        }
        record.id = id;
        record
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("data/nested/missions.json"));

        storage.save(&[record("A", 1, &[("orbit", "LEO")])]).await.unwrap();
        assert!(storage.path().exists());
        assert!(!tmp.path().join("data/nested/missions.json.tmp").exists());

        // Existing directories are fine
        storage.save(&[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_overwrites_without_merge() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missions.json"));

        storage
            .save(&[record("A", 1, &[("orbit", "LEO")]), record("B", 2, &[("orbit", "GTO")])])
            .await
            .unwrap();
        storage
            .save(&[record("C", 1, &[("mission_life", "5 years")])])
            .await
            .unwrap();

        let loaded = storage.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "C");
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_ids() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missions.json"));
        let records = vec![
            record("Chandrayaan-3", 1, &[("launch_date", "July 14, 2023")]),
            record("Mangalyaan", 2, &[("orbit_type", "Mars orbit"), ("mission_life", "8 yrs")]),
        ];

        storage.save(&records).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_non_ascii_written_literally() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missions.json"));

        storage
            .save(&[record("चंद्रयान-3", 1, &[("launch_site", "Sriharikota – SDSC")])])
            .await
            .unwrap();

        let text = std::fs::read_to_string(storage.path()).unwrap();
        assert!(text.contains("चंद्रयान-3"));
        assert!(text.contains("Sriharikota – SDSC"));
        assert!(text.starts_with("[\n  {"));
    }

    #[test]
    fn test_staging_path_appends_to_file_name() {
        let storage = LocalStorage::new("out/missions.json");
        assert_eq!(storage.staging_path(), PathBuf::from("out/missions.json.tmp"));

        let storage = LocalStorage::new("out/missions.tmp");
        assert_eq!(storage.staging_path(), PathBuf::from("out/missions.tmp.tmp"));
    }

    #[tokio::test]
    async fn test_save_to_tmp_named_target() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missions.tmp"));

        storage.save(&[record("A", 1, &[("orbit", "LEO")])]).await.unwrap();
        assert_eq!(storage.load().await.unwrap().len(), 1);
        assert!(!tmp.path().join("missions.tmp.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let tmp = TempDir::new().unwrap();
        // A non-empty directory at the target makes the rename fail
        let target = tmp.path().join("missions.json");
        std::fs::create_dir_all(target.join("occupied")).unwrap();
        let storage = LocalStorage::new(&target);

        assert!(storage.save(&[record("A", 1, &[])]).await.is_err());
        assert!(!tmp.path().join("missions.json.tmp").exists());
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nope.json"));
        assert!(storage.load().await.unwrap().is_empty());
    }
}
