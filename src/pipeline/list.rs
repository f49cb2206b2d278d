// src/pipeline/list.rs

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, MissionStub};
use crate::pipeline::MissionScraper;
use crate::render::HttpRenderer;
use crate::utils::log;

/// Enumerate the catalog index without visiting detail pages.
pub async fn run_list(config: Arc<Config>) -> Result<Vec<MissionStub>> {
    log::header("Mission index");

    let renderer = HttpRenderer::new(&config.renderer)?;
    let stubs = MissionScraper::new(config, renderer).list().await?;

    log::success(&format!("Found {} missions", stubs.len()));
    for stub in &stubs {
        log::sub_item(&format!("{} -> {}", stub.title, stub.url));
    }

    Ok(stubs)
}
