//! In-memory renderer serving canned markup.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::render::{OptionChoice, Page, PageRenderer, resolve_option};
use crate::utils::html;

/// Renderer backed by a URL → markup table.
///
/// Nothing changes between calls, so `wait_for` either finds the element
/// straight away or times out without sleeping.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    pages: HashMap<String, String>,
    expanded: HashMap<String, String>,
    failures: HashSet<String>,
    visited: Vec<String>,
    selections: Vec<OptionChoice>,
    closed: usize,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Serve `html` for `url` once an option has been selected on it.
    pub fn with_expanded(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.expanded.insert(url.into(), html.into());
        self
    }

    /// Make every render of `url` fail.
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.failures.insert(url.into());
        self
    }

    /// URLs rendered so far, in order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Successful option selections, in order.
    pub fn selections(&self) -> &[OptionChoice] {
        &self.selections
    }

    /// How many times the session was closed.
    pub fn close_count(&self) -> usize {
        self.closed
    }
}

#[async_trait]
impl PageRenderer for MemoryRenderer {
    async fn render(&mut self, url: &str) -> Result<Page> {
        self.visited.push(url.to_string());
        if self.failures.contains(url) {
            return Err(AppError::render(url, "render failure"));
        }
        self.pages
            .get(url)
            .map(|markup| Page::new(url, markup.as_str()))
            .ok_or_else(|| AppError::render(url, "no page registered"))
    }

    async fn select_option(
        &mut self,
        page: &Page,
        control: &str,
        choice: &OptionChoice,
    ) -> Result<Page> {
        resolve_option(page, control, choice)?;
        self.selections.push(choice.clone());
        Ok(match self.expanded.get(&page.url) {
            Some(markup) => Page::new(page.url.as_str(), markup.as_str()),
            None => page.clone(),
        })
    }

    async fn wait_for(&mut self, page: &Page, selector: &str, timeout: Duration) -> Result<Page> {
        let sel = html::parse_selector(selector)?;
        if html::contains(&page.html, &sel) {
            Ok(page.clone())
        } else {
            Err(AppError::timeout(&page.url, selector, timeout))
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_registered_page() {
        let mut renderer = MemoryRenderer::new().with_page("https://a.test/", "<p>hi</p>");
        let page = renderer.render("https://a.test/").await.unwrap();
        assert_eq!(page.html, "<p>hi</p>");
        assert_eq!(renderer.visited(), ["https://a.test/".to_string()]);
    }

    #[tokio::test]
    async fn test_render_failure_and_missing() {
        let mut renderer = MemoryRenderer::new()
            .with_page("https://a.test/x", "<p>x</p>")
            .with_failure("https://a.test/x");
        assert!(renderer.render("https://a.test/x").await.is_err());
        assert!(renderer.render("https://a.test/y").await.is_err());
    }

    #[tokio::test]
    async fn test_select_option_serves_expanded_markup() {
        let index = r#"<select name="t_length"><option value="-1">All</option></select>"#;
        let mut renderer = MemoryRenderer::new()
            .with_page("https://a.test/", index)
            .with_expanded("https://a.test/", "<p>all rows</p>");
        let page = renderer.render("https://a.test/").await.unwrap();
        let expanded = renderer
            .select_option(&page, "select", &OptionChoice::Value("-1".into()))
            .await
            .unwrap();
        assert_eq!(expanded.html, "<p>all rows</p>");
        assert_eq!(renderer.selections().len(), 1);
    }

    #[tokio::test]
    async fn test_wait_for_missing_times_out() {
        let mut renderer = MemoryRenderer::new();
        let page = Page::new("https://a.test/", "<p>none</p>");
        let result = renderer.wait_for(&page, "table", Duration::ZERO).await;
        assert!(result.unwrap_err().is_timeout());
    }
}
