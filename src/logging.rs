//! Tracing initialization.
//!
//! Logs always go to stderr: stdout carries the MCP protocol. Set
//! `DESIGNKB_LOG_FORMAT=json` for one JSON object per line.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Environment variable selecting the log line format (`compact` or `json`).
pub const LOG_FORMAT_ENV: &str = "DESIGNKB_LOG_FORMAT";

/// Initialize tracing. Safe to call multiple times.
///
/// `RUST_LOG` directives are honored; the baseline level is DEBUG under a test
/// runner and INFO otherwise.
pub fn init() {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));
        let result = if is_test {
            builder.compact().with_test_writer().try_init()
        } else if json {
            builder.json().with_writer(std::io::stderr).try_init()
        } else {
            builder.compact().with_writer(std::io::stderr).try_init()
        };
        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
