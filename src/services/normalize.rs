//! Attribute label normalization.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

/// Map a human-written table label to a canonical key.
///
/// `"Launch Date:"` becomes `launch_date`. An empty result means the label
/// carried no letters or digits and the row should be dropped.
pub fn normalize_key(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = DISALLOWED.replace_all(lowered.trim(), "");
    let underscored = WHITESPACE.replace_all(&stripped, "_");
    UNDERSCORES.replace_all(&underscored, "_").into_owned()
}
