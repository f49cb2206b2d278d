// src/render/http.rs

//! HTTP-backed renderer.
//!
//! Serves documents exactly as the server sends them. Table plugins on the
//! catalog paginate client-side, so the served markup already holds every
//! row; selecting a page size only has to confirm the option exists.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::{Instant, sleep};

use crate::error::{AppError, Result};
use crate::models::RendererConfig;
use crate::render::{OptionChoice, Page, PageRenderer, resolve_option};
use crate::utils::html;

/// Renderer that fetches pages over HTTP.
pub struct HttpRenderer {
    client: Client,
    poll_interval: Duration,
}

impl HttpRenderer {
    /// Create a renderer with a configured HTTP client.
    pub fn new(config: &RendererConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    async fn fetch(&self, url: &str) -> Result<Page> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        let text = response.text().await?;
        Ok(Page::new(final_url, text))
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&mut self, url: &str) -> Result<Page> {
        log::debug!("GET {}", url);
        self.fetch(url).await
    }

    async fn select_option(
        &mut self,
        page: &Page,
        control: &str,
        choice: &OptionChoice,
    ) -> Result<Page> {
        let value = resolve_option(page, control, choice)?;
        log::debug!(
            "Option '{}' of '{}' resolved on {}; served markup already holds every row",
            value,
            control,
            page.url
        );
        Ok(page.clone())
    }

    async fn wait_for(&mut self, page: &Page, selector: &str, timeout: Duration) -> Result<Page> {
        let sel = html::parse_selector(selector)?;
        if html::contains(&page.html, &sel) {
            return Ok(page.clone());
        }

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(AppError::timeout(&page.url, selector, timeout));
            }
            sleep(self.poll_interval.min(remaining)).await;

            log::debug!("Re-fetching {} while waiting for '{}'", page.url, selector);
            let current = self.fetch(&page.url).await?;
            if html::contains(&current.html, &sel) {
                return Ok(current);
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        log::debug!("HTTP renderer closed");
        Ok(())
    }
}
