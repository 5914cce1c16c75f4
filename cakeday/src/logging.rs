use tracing_subscriber::EnvFilter;

/// Initialize tracing based on CLI verbosity level.
///
/// 0 maps to warn, 1 to info, 2 to debug and anything higher to trace.
/// `RUST_LOG` overrides the flag when set. Logs go to stderr so they never
/// mix with menu output.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cakeday={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
