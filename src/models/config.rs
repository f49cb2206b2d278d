//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::html;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog location
    #[serde(default)]
    pub site: SiteConfig,

    /// CSS selectors for the index and detail layouts
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Bounded waits
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// HTTP renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Console log settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(AppError::validation("site.base_url must be an absolute URL"));
        }
        self.index_url()?;

        for (name, selector) in self.selectors.all() {
            if selector.trim().is_empty() {
                return Err(AppError::validation(format!("selectors.{name} is empty")));
            }
            html::parse_selector(selector)?;
        }
        if self.selectors.show_all_value.is_empty() && self.selectors.show_all_label.is_empty() {
            return Err(AppError::validation(
                "selectors.show_all_value and selectors.show_all_label are both empty",
            ));
        }

        if self.renderer.user_agent.trim().is_empty() {
            return Err(AppError::validation("renderer.user_agent is empty"));
        }
        if self.renderer.request_timeout_secs == 0 {
            return Err(AppError::validation(
                "renderer.request_timeout_secs must be > 0",
            ));
        }
        if self.renderer.poll_interval_ms == 0 {
            return Err(AppError::validation("renderer.poll_interval_ms must be > 0"));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AppError::validation("output.path is empty"));
        }
        Ok(())
    }

    /// Absolute URL of the catalog index page.
    pub fn index_url(&self) -> Result<String> {
        let base = Url::parse(&self.site.base_url)?;
        Ok(base.join(&self.site.index_path)?.to_string())
    }
}

/// Catalog location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin that relative mission links resolve against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Path of the mission index, relative to `base_url`
    #[serde(default = "defaults::index_path")]
    pub index_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            index_path: defaults::index_path(),
        }
    }
}

/// CSS selectors for the catalog's index and detail layouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Entries-per-page `<select>` on the index
    #[serde(default = "defaults::page_size_control")]
    pub page_size_control: String,

    /// Option value meaning "unlimited"
    #[serde(default = "defaults::show_all_value")]
    pub show_all_value: String,

    /// Visible option label meaning "all", tried when the value is rejected
    #[serde(default = "defaults::show_all_label")]
    pub show_all_label: String,

    /// Anchors that point at mission detail pages
    #[serde(default = "defaults::mission_link")]
    pub mission_link: String,

    /// Element whose presence marks a detail page as rendered
    #[serde(default = "defaults::detail_ready")]
    pub detail_ready: String,

    /// Attribute tables on a detail page
    #[serde(default = "defaults::attribute_table")]
    pub attribute_table: String,
}

impl SelectorConfig {
    /// Every CSS selector with its config field name.
    pub fn all(&self) -> [(&'static str, &str); 4] {
        [
            ("page_size_control", self.page_size_control.as_str()),
            ("mission_link", self.mission_link.as_str()),
            ("detail_ready", self.detail_ready.as_str()),
            ("attribute_table", self.attribute_table.as_str()),
        ]
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            page_size_control: defaults::page_size_control(),
            show_all_value: defaults::show_all_value(),
            show_all_label: defaults::show_all_label(),
            mission_link: defaults::mission_link(),
            detail_ready: defaults::detail_ready(),
            attribute_table: defaults::attribute_table(),
        }
    }
}

/// Bounded waits, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Wait for the page-size control on the index
    #[serde(default = "defaults::control_secs")]
    pub control_secs: u64,

    /// Wait for a table on each detail page
    #[serde(default = "defaults::table_secs")]
    pub table_secs: u64,

    /// Pause after expanding the index, for asynchronous re-rendering
    #[serde(default = "defaults::settle_secs")]
    pub settle_secs: u64,
}

impl TimeoutConfig {
    pub fn control(&self) -> Duration {
        Duration::from_secs(self.control_secs)
    }

    pub fn table(&self) -> Duration {
        Duration::from_secs(self.table_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    /// No waiting at all; used for canned pages.
    pub fn immediate() -> Self {
        Self {
            control_secs: 0,
            table_secs: 0,
            settle_secs: 0,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            control_secs: defaults::control_secs(),
            table_secs: defaults::table_secs(),
            settle_secs: defaults::settle_secs(),
        }
    }
}

/// HTTP renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,

    /// Delay between re-fetches while waiting for an element
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            request_timeout_secs: defaults::request_timeout(),
            poll_interval_ms: defaults::poll_interval(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON file the mission directory is written to
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
        }
    }
}

/// Console log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of debug, info, warn, error
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Site defaults
    pub fn base_url() -> String {
        "https://www.isro.gov.in".into()
    }
    pub fn index_path() -> String {
        "/SpacecraftMissions.html".into()
    }

    // Selector defaults
    pub fn page_size_control() -> String {
        "select[name='datatable_length'], select[name='example_length'], select[name*='length']"
            .into()
    }
    pub fn show_all_value() -> String {
        "-1".into()
    }
    pub fn show_all_label() -> String {
        "All".into()
    }
    pub fn mission_link() -> String {
        "a.out".into()
    }
    pub fn detail_ready() -> String {
        "table".into()
    }
    pub fn attribute_table() -> String {
        "table.pContent.table.table-striped.table-bordered".into()
    }

    // Timeout defaults
    pub fn control_secs() -> u64 {
        20
    }
    pub fn table_secs() -> u64 {
        20
    }
    pub fn settle_secs() -> u64 {
        3
    }

    // Renderer defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; spacecraft-missions/0.1)".into()
    }
    pub fn request_timeout() -> u64 {
        30
    }
    pub fn poll_interval() -> u64 {
        500
    }

    pub fn output_path() -> PathBuf {
        PathBuf::from("data/spacecraft_missions.json")
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let mut config = Config::default();
        config.site.base_url = "isro.gov.in".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.selectors.attribute_table = "[[invalid".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_poll_interval() {
        let mut config = Config::default();
        config.renderer.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn index_url_joins_base_and_path() {
        let config = Config::default();
        assert_eq!(
            config.index_url().unwrap(),
            "https://www.isro.gov.in/SpacecraftMissions.html"
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [timeouts]
            settle_secs = 0

            [output]
            path = "out/missions.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.timeouts.settle_secs, 0);
        assert_eq!(config.timeouts.table_secs, 20);
        assert_eq!(config.output.path, PathBuf::from("out/missions.json"));
        assert_eq!(config.selectors.mission_link, "a.out");
    }

    #[test]
    fn shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config.toml");
        let config = Config::load(path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeouts.settle_secs, 3);
    }

    #[test]
    fn load_or_default_falls_back() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.site.base_url, "https://www.isro.gov.in");
    }
}
