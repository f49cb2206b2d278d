// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::utils::log;

/// Validate the configuration and print the settings a run depends on.
pub fn run_validate(config: &Config) -> Result<()> {
    log::header("Validating configuration");

    match config.validate() {
        Ok(()) => {
            log::success("Configuration OK");
            log::sub_item(&format!("Index: {}", config.index_url()?));
            log::sub_item(&format!("Mission links: {}", config.selectors.mission_link));
            log::sub_item(&format!(
                "Attribute tables: {}",
                config.selectors.attribute_table
            ));
            log::sub_item(&format!(
                "Timeouts: control {}s, table {}s, settle {}s",
                config.timeouts.control_secs,
                config.timeouts.table_secs,
                config.timeouts.settle_secs
            ));
            log::sub_item(&format!("Output: {}", config.output.path.display()));
            Ok(())
        }
        Err(e) => {
            log::error(&format!("Validation failed: {e}"));
            Err(e)
        }
    }
}
