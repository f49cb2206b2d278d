// src/utils/log.rs

//! Console progress lines for a run: headers, steps, per-mission lines and
//! summaries, each stamped with local time.
//!
//! Diagnostic detail goes through the `log` facade instead; this module only
//! borrows its level types for filtering.

use std::str::FromStr;
use std::sync::OnceLock;

use ::log::{Level, LevelFilter};
use chrono::Local;

static CONSOLE_LEVEL: OnceLock<LevelFilter> = OnceLock::new();

/// Set the console level from a name such as `warn`. Unknown names fall
/// back to `info`. Only the first call takes effect.
pub fn init(level: &str) {
    let _ = CONSOLE_LEVEL.set(parse_level(level));
}

fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

fn enabled(level: Level) -> bool {
    level <= CONSOLE_LEVEL.get().copied().unwrap_or(LevelFilter::Info)
}

fn line(level: Level, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{timestamp}] [{level}] {message}")
}

fn emit(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{}", line(level, message)),
        _ => println!("{}", line(level, message)),
    }
}

pub fn info(message: &str) {
    emit(Level::Info, message);
}

pub fn warn(message: &str) {
    emit(Level::Warn, message);
}

pub fn error(message: &str) {
    emit(Level::Error, message);
}

/// Final confirmation of a run; printed even when the console is quiet.
pub fn success(message: &str) {
    println!("{}", line(Level::Info, &format!("✓ {message}")));
}

/// `[STEP n/total]` progress marker.
pub fn step(current: usize, total: usize, message: &str) {
    emit(Level::Info, &format!("[STEP {current}/{total}] {message}"));
}

/// Title framed by rules.
pub fn header(title: &str) {
    let rule = "═".repeat(60);
    emit(Level::Info, &rule);
    emit(Level::Info, &format!("  {title}"));
    emit(Level::Info, &rule);
}

/// Indented detail under the previous line.
pub fn sub_item(message: &str) {
    emit(Level::Info, &format!("    {message}"));
}

/// Labelled key/value block closing a run.
pub fn summary(title: &str, items: &[(&str, String)]) {
    if !enabled(Level::Info) {
        return;
    }
    println!();
    emit(Level::Info, &format!("[SUMMARY] {title}"));
    for (key, value) in items {
        sub_item(&format!("{key}: {value}"));
    }
}
