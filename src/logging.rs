//! Tracing setup and event macros.
//!
//! The library only emits events; installing a subscriber is up to the
//! binary. Levels come from `[logging]` in the settings file unless
//! `RUST_LOG` is set:
//!
//! ```toml
//! [logging]
//! default = "warn"
//!
//! [logging.modules]
//! "fpath::watcher" = "debug"
//! ```
//!
//! ```bash
//! RUST_LOG=fpath=trace fpath kv app.conf
//! ```

use std::sync::Once;

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// HH:MM:SS.mmm in local time
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Filter directive string for `config`, e.g. `warn,fpath::watcher=debug`.
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = config.default.clone();
    for (module, level) in &config.modules {
        directives.push(',');
        directives.push_str(module);
        directives.push('=');
        directives.push_str(level);
    }
    directives
}

/// Install the global subscriber, writing to stderr. Only the first call
/// in a process has an effect.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_timer(CompactTime)
            .with_filter(filter);

        // Another subscriber may already be installed by an embedding program.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}

/// [`init_with_config`] with the default `warn` level.
pub fn init() {
    init_with_config(&LoggingConfig::default());
}

/// Info-level `[scope] event: detail` line.
///
/// ```ignore
/// log_event!("watcher", "started", "{root}");
/// log_event!("config", "created");
/// ```
#[macro_export]
macro_rules! log_event {
    ($scope:expr, $event:expr) => {
        tracing::info!("[{}] {}", $scope, $event)
    };
    ($scope:expr, $event:expr, $($arg:tt)*) => {
        tracing::info!("[{}] {}: {}", $scope, $event, format!($($arg)*))
    };
}

/// Debug-level counterpart of [`log_event!`].
#[macro_export]
macro_rules! debug_event {
    ($scope:expr, $event:expr) => {
        tracing::debug!("[{}] {}", $scope, $event)
    };
    ($scope:expr, $event:expr, $($arg:tt)*) => {
        tracing::debug!("[{}] {}: {}", $scope, $event, format!($($arg)*))
    };
}
