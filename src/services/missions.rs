// src/services/missions.rs

//! Mission index enumeration.
//!
//! Expands the catalog's paginated table to show every entry, then reads
//! the mission links off the rendered index.

use std::collections::HashSet;

use url::Url;

use crate::error::Result;
use crate::models::{Config, MissionStub};
use crate::render::{OptionChoice, Page, PageRenderer};
use crate::utils::{html, log, resolve_link};

/// Service listing the missions on the catalog index.
pub struct MissionLister<'a> {
    config: &'a Config,
}

impl<'a> MissionLister<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render the index, expand it and return every mission once, in page order.
    ///
    /// Only a failure to render the index itself is an error.
    pub async fn enumerate<R: PageRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        index_url: &str,
    ) -> Result<Vec<MissionStub>> {
        let page = renderer.render(index_url).await?;
        let page = self.show_all(renderer, page).await;

        let base = Url::parse(&self.config.site.base_url)?;
        let stubs = extract_stubs(&page.html, &self.config.selectors.mission_link, &base)?;
        ::log::debug!("{} unique missions on {}", stubs.len(), page.url);
        Ok(stubs)
    }

    /// Switch the page-size control to "all". Falls back to the page as
    /// first rendered when the control is missing or rejects both choices.
    async fn show_all<R: PageRenderer + ?Sized>(&self, renderer: &mut R, page: Page) -> Page {
        let selectors = &self.config.selectors;
        let timeouts = &self.config.timeouts;

        let control = renderer
            .wait_for(&page, &selectors.page_size_control, timeouts.control())
            .await;
        let page = match control {
            Ok(found) => found,
            Err(e) => {
                log::warn(&format!(
                    "Page-size control not found, keeping default row count: {e}"
                ));
                return page;
            }
        };

        let choices = [
            OptionChoice::Value(selectors.show_all_value.clone()),
            OptionChoice::Label(selectors.show_all_label.clone()),
        ];
        for choice in &choices {
            match renderer
                .select_option(&page, &selectors.page_size_control, choice)
                .await
            {
                Ok(expanded) => {
                    log::info(&format!("Selected 'all entries' by {choice}"));
                    let settle = timeouts.settle();
                    if !settle.is_zero() {
                        tokio::time::sleep(settle).await;
                    }
                    return expanded;
                }
                Err(e) => ::log::debug!("Page-size {} rejected: {}", choice, e),
            }
        }

        log::warn("Could not select 'all entries', keeping default row count");
        page
    }
}

/// Read mission links from index markup.
///
/// Titles are whitespace-collapsed; empty titles, anchors without `href`
/// and repeated titles are skipped, keeping the first occurrence.
pub fn extract_stubs(markup: &str, link_selector: &str, base: &Url) -> Result<Vec<MissionStub>> {
    let selector = html::parse_selector(link_selector)?;
    let document = html::parse(markup);

    let mut seen = HashSet::new();
    let mut stubs = Vec::new();
    for anchor in html::find_all(document.root_element(), &selector) {
        let title = html::text_of(anchor);
        if title.is_empty() || seen.contains(&title) {
            continue;
        }
        let Some(href) = anchor.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            ::log::debug!("Skipping '{}': no href", title);
            continue;
        };

        let url = resolve_link(base, href);
        seen.insert(title.clone());
        stubs.push(MissionStub { title, url });
    }
    Ok(stubs)
}
