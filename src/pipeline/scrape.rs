// src/pipeline/scrape.rs

//! Full scrape: enumerate the index, extract every mission, number the
//! result and persist it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Result, SkipReason};
use crate::models::{Config, MissionRecord, MissionStub, finalize};
use crate::render::{HttpRenderer, PageRenderer};
use crate::services::{DetailExtractor, MissionLister};
use crate::storage::{LocalStorage, MissionStorage};
use crate::utils::log;

/// Run a full scrape over HTTP into the configured output file.
pub async fn run_scrape(config: Arc<Config>) -> Result<ScrapeOutcome> {
    let storage = LocalStorage::new(&config.output.path);
    let renderer = HttpRenderer::new(&config.renderer)?;
    MissionScraper::new(config, renderer).run(&storage).await
}

/// A mission left out of the output, with the reason.
#[derive(Debug)]
pub struct SkippedMission {
    pub stub: MissionStub,
    pub reason: SkipReason,
}

/// Summary of a scrape run.
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// Final records, most recently listed first, ids from 1
    pub records: Vec<MissionRecord>,
    pub skipped: Vec<SkippedMission>,
    pub stub_count: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives one browsing session through the whole catalog.
///
/// The session is closed when a run ends, whether it succeeded or not.
pub struct MissionScraper<R: PageRenderer> {
    config: Arc<Config>,
    renderer: R,
}

impl<R: PageRenderer> MissionScraper<R> {
    pub fn new(config: Arc<Config>, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Scrape the catalog and save the result through `storage`.
    pub async fn run(&mut self, storage: &dyn MissionStorage) -> Result<ScrapeOutcome> {
        let result = self.scrape(storage).await;
        self.release().await;
        result
    }

    /// Enumerate the index only.
    pub async fn list(&mut self) -> Result<Vec<MissionStub>> {
        let result = self.enumerate().await;
        self.release().await;
        result
    }

    async fn scrape(&mut self, storage: &dyn MissionStorage) -> Result<ScrapeOutcome> {
        let started_at = Utc::now();
        log::header("Spacecraft mission scrape");

        log::step(1, 3, "Enumerating missions on the index");
        let stubs = self.enumerate().await?;
        log::info(&format!("Found {} missions to scrape", stubs.len()));

        log::step(2, 3, "Extracting mission details");
        let (extracted, skipped) = self.extract_all(&stubs).await;
        let records = finalize(extracted);

        log::step(3, 3, "Saving mission directory");
        storage.save(&records).await?;

        let outcome = ScrapeOutcome {
            records,
            skipped,
            stub_count: stubs.len(),
            started_at,
            finished_at: Utc::now(),
        };
        report(&outcome, &storage.location());
        Ok(outcome)
    }

    async fn enumerate(&mut self) -> Result<Vec<MissionStub>> {
        self.config.validate()?;
        let index_url = self.config.index_url()?;
        MissionLister::new(&self.config)
            .enumerate(&mut self.renderer, &index_url)
            .await
    }

    /// Extract every stub in order. Records come back in extraction order.
    async fn extract_all(
        &mut self,
        stubs: &[MissionStub],
    ) -> (Vec<MissionRecord>, Vec<SkippedMission>) {
        let extractor = DetailExtractor::new(&self.config);
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for (i, stub) in stubs.iter().enumerate() {
            log::info(&format!("[{}/{}] Scraping: {}", i + 1, stubs.len(), stub.title));
            match extractor.extract(&mut self.renderer, stub).await {
                Ok(record) => records.push(record),
                Err(reason) => {
                    log::warn(&format!("Skipping {}: {}", stub.title, reason));
                    skipped.push(SkippedMission {
                        stub: stub.clone(),
                        reason,
                    });
                }
            }
        }
        (records, skipped)
    }

    async fn release(&mut self) {
        if let Err(e) = self.renderer.close().await {
            log::warn(&format!("Failed to close renderer: {e}"));
        }
    }
}

fn report(outcome: &ScrapeOutcome, location: &str) {
    let elapsed = outcome.finished_at - outcome.started_at;
    log::summary(
        "Scrape",
        &[
            ("Listed", outcome.stub_count.to_string()),
            ("Saved", outcome.records.len().to_string()),
            ("Skipped", outcome.skipped.len().to_string()),
            ("Elapsed", format!("{}s", elapsed.num_seconds())),
        ],
    );
    log::success(&format!(
        "Successfully updated {} with {} missions.",
        location,
        outcome.records.len()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeoutConfig;
    use crate::render::MemoryRenderer;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_invalid_config_is_fatal_and_closes() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missions.json"));
        let mut config = Config {
            timeouts: TimeoutConfig::immediate(),
            ..Config::default()
        };
        config.selectors.mission_link = "[[invalid".to_string();

        let mut scraper = MissionScraper::new(Arc::new(config), MemoryRenderer::new());
        assert!(scraper.run(&storage).await.is_err());
        assert_eq!(scraper.renderer().close_count(), 1);
        assert!(scraper.renderer().visited().is_empty());
        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_list_closes_session() {
        let config = Config {
            timeouts: TimeoutConfig::immediate(),
            ..Config::default()
        };
        let index_url = config.index_url().unwrap();
        let renderer =
            MemoryRenderer::new().with_page(index_url, r#"<a class="out" href="/x.html">X</a>"#);

        let mut scraper = MissionScraper::new(Arc::new(config), renderer);
        let stubs = scraper.list().await.unwrap();
        assert_eq!(stubs, vec![MissionStub::new("X", "https://www.isro.gov.in/x.html")]);
        assert_eq!(scraper.renderer().close_count(), 1);
    }
}
