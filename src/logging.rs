//! Sets up `tracing` output for the command line tools.

use std::{fs::OpenOptions, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::Error;

/// The filter used for stderr when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// Log messages go to stderr, filtered by `RUST_LOG` (default: warnings and
/// errors only). If `log_file` is given, everything at debug level and above
/// is also appended to that file.
///
/// # Errors
/// Returns [Error::IoError] if the log file cannot be opened or a global
/// subscriber has already been installed.
pub fn setup_logging(log_file: Option<&str>) -> Result<(), Error> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(env_filter);

    let debug_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .try_init()
        .map_err(|error| Error::IoError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{Error, setup_logging};

    #[test]
    fn unwritable_log_file_is_error() {
        let result = setup_logging(Some("/this/directory/does/not/exist/debug.log"));

        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
