// src/services/details.rs

//! Mission detail extraction.
//!
//! Harvests the two-column attribute tables of a mission's detail page
//! into a `MissionRecord`.

use crate::error::{Result, SkipReason};
use crate::models::{Config, MissionRecord, MissionStub};
use crate::render::PageRenderer;
use crate::services::normalize_key;
use crate::utils::html;

/// Service extracting one mission record per detail page.
pub struct DetailExtractor<'a> {
    config: &'a Config,
}

impl<'a> DetailExtractor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Render the stub's detail page and harvest its attribute tables.
    ///
    /// Every failure is reported as a `SkipReason` for this mission alone.
    pub async fn extract<R: PageRenderer + ?Sized>(
        &self,
        renderer: &mut R,
        stub: &MissionStub,
    ) -> std::result::Result<MissionRecord, SkipReason> {
        let page = renderer.render(&stub.url).await.map_err(SkipReason::Render)?;
        let page = renderer
            .wait_for(
                &page,
                &self.config.selectors.detail_ready,
                self.config.timeouts.table(),
            )
            .await?;

        harvest(stub, &page.html, &self.config.selectors.attribute_table)
            .map_err(SkipReason::Render)?
            .ok_or(SkipReason::NoAttributes)
    }
}

/// Collect attribute rows from every table matching `table_selector`.
///
/// A row counts only with exactly two `td` cells: the first normalizes to
/// the key, the second's collapsed text is the value. Later rows win on a
/// repeated key. Returns `None` when no row had both a key and a value.
pub fn harvest(
    stub: &MissionStub,
    markup: &str,
    table_selector: &str,
) -> Result<Option<MissionRecord>> {
    let table_sel = html::parse_selector(table_selector)?;
    let row_sel = html::parse_selector("tr")?;
    let cell_sel = html::parse_selector("td")?;
    let document = html::parse(markup);

    let mut record = MissionRecord::from_stub(stub);
    let mut found = false;
    for table in html::find_all(document.root_element(), &table_sel) {
        for row in html::find_all(table, &row_sel) {
            let cells = html::find_all(row, &cell_sel);
            let [label, value] = cells.as_slice() else {
                continue;
            };
            let key = normalize_key(&html::text_of(*label));
            found |= record.set_attribute(key, html::text_of(*value));
        }
    }
    Ok(found.then_some(record))
}
