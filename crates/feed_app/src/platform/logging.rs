//! Log initialization for the feed app.
//!
//! The terminal belongs to the UI, so records go to a file only.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Target prefixes written to the log file: the feed library crates and this binary.
const LOG_TARGETS: [&str; 2] = ["feed_", "gif_feed"];

/// Install a file logger at `path`.
///
/// If the file cannot be created the app runs without logging.
pub fn initialize(path: &Path, level: LevelFilter) {
    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, build_config(), file);
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
        }
    }
}

fn build_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error);
    for target in LOG_TARGETS {
        builder.add_filter_allow_str(target);
    }
    builder.build()
}
