mod clipboard;
mod core;
mod editor;
mod fs;
#[cfg(test)]
mod test_support;
mod tui;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use crate::core::config;

fn main() -> std::io::Result<()> {
    // Initialize file logger - writes to qfm.log in current directory.
    // The terminal belongs to the UI, so nothing may log to stdout/stderr.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("qfm.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = config::resolve(&config::load_or_default());
    log::info!("qfm starting up (editor: {})", config.editor);

    tui::run(&config)
}
