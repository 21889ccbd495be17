//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

const CRATES: [&str; 4] = [
    "bucketsweep",
    "bucketsweep_scan",
    "bucketsweep_analyze",
    "bucketsweep_report",
];

/// Install a stderr subscriber.
///
/// With no `-v` flags `RUST_LOG` is honoured (default `warn`); each `-v`
/// raises this workspace's crates one level while dependencies stay at `warn`.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        n => EnvFilter::new(directives(if n == 1 { "info" } else { "debug" })),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}
