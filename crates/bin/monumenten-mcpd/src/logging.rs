use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Transport;

/// Installs the global subscriber. `RUST_LOG` overrides `level` when set.
///
/// Stdio keeps stdout free for the protocol, so logs go to stderr without
/// timestamps. HTTP logs go to stdout.
pub fn init(transport: Transport, level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    match transport {
        Transport::Stdio => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .without_time()
                    .with_target(false)
                    .with_ansi(false)
                    .compact(),
            )
            .init(),
        Transport::Http => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true),
            )
            .init(),
    }
}
