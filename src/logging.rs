//! Console logging with an optional rotating file layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default directive when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "screenlens=info";

/// Initialize logging.
///
/// Console output is always on (compact, level from `RUST_LOG`); when
/// `log_dir` is set, application events additionally go to a daily-rotated
/// JSON log file in that directory.
pub fn init(log_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        );

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "screenlens.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));

            tracing_subscriber::registry()
                .with(console_layer)
                .with(file_layer)
                .init();

            // Dropping the guard would close the log file.
            std::mem::forget(guard);
        }
        None => {
            tracing_subscriber::registry().with(console_layer).init();
        }
    }

    Ok(())
}
