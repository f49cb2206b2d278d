//! Page renderer abstraction.
//!
//! The pipeline only needs three capabilities from a browsing session:
//! render a URL, pick an option in a `<select>` control, and wait a bounded
//! time for an element to appear. Backends:
//! - `HttpRenderer`: plain HTTP fetches through `reqwest`
//! - `MemoryRenderer`: canned markup, for offline replays and tests

pub mod http;
pub mod memory;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::utils::html;

pub use http::HttpRenderer;
pub use memory::MemoryRenderer;

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL the document was rendered from
    pub url: String,

    /// Serialized markup of the rendered document
    pub html: String,
}

impl Page {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// How to pick an option inside a `<select>` control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionChoice {
    /// Match the option's `value` attribute
    Value(String),

    /// Match the option's visible text
    Label(String),
}

impl fmt::Display for OptionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "value '{value}'"),
            Self::Label(label) => write!(f, "label '{label}'"),
        }
    }
}

/// Find the option `choice` names inside the first control matching
/// `control`, returning that option's value.
pub(crate) fn resolve_option(page: &Page, control: &str, choice: &OptionChoice) -> Result<String> {
    let control_sel = html::parse_selector(control)?;
    let option_sel = html::parse_selector("option")?;
    let document = html::parse(&page.html);

    let select = document
        .select(&control_sel)
        .next()
        .ok_or_else(|| AppError::render(&page.url, format!("no control matches '{control}'")))?;

    html::find_all(select, &option_sel)
        .into_iter()
        .find_map(|option| {
            let value = option
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| html::text_of(option));
            let matched = match choice {
                OptionChoice::Value(wanted) => value == *wanted,
                OptionChoice::Label(wanted) => html::text_of(option) == *wanted,
            };
            matched.then_some(value)
        })
        .ok_or_else(|| AppError::render(&page.url, format!("control has no option with {choice}")))
}

/// A browsing session able to produce rendered documents.
#[async_trait]
pub trait PageRenderer: Send {
    /// Load `url` and return the rendered document.
    async fn render(&mut self, url: &str) -> Result<Page>;

    /// Select an option in the control matched by `control` on `page`.
    ///
    /// Fails when the control or the option cannot be resolved.
    async fn select_option(
        &mut self,
        page: &Page,
        control: &str,
        choice: &OptionChoice,
    ) -> Result<Page>;

    /// Wait until an element matching `selector` is present on `page`.
    ///
    /// Returns the document in which it was found, or `AppError::Timeout`.
    async fn wait_for(&mut self, page: &Page, selector: &str, timeout: Duration) -> Result<Page>;

    /// Release the session. Called exactly once at the end of a run.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
