pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod ui;

use tracing::level_filters::LevelFilter;

/// Install the stderr log subscriber. Stdout is reserved for the link.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
