// src/utils/html.rs

//! Markup parsing helpers over `scraper`.
//!
//! `Html` is not `Send`, so callers parse, query and drop the tree inside
//! one synchronous scope and only carry owned strings across awaits.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::utils::collapse_whitespace;

/// Parse a full document.
pub fn parse(markup: &str) -> Html {
    Html::parse_document(markup)
}

/// Parse a CSS selector, mapping failures into `AppError::Selector`.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Every element under `root` matching `selector`, in document order.
pub fn find_all<'a>(root: ElementRef<'a>, selector: &Selector) -> Vec<ElementRef<'a>> {
    root.select(selector).collect()
}

/// Whitespace-collapsed text content of an element.
pub fn text_of(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    collapse_whitespace(&raw)
}

/// Whether any element of `markup` matches `selector`.
pub fn contains(markup: &str, selector: &Selector) -> bool {
    parse(markup).select(selector).next().is_some()
}
