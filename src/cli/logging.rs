use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `KEYTALLY_LOG=keytally=trace`.
pub const LOG_ENV: &str = "KEYTALLY_LOG";

/// Initialize the tracing subscriber writing to stderr.
///
/// `KEYTALLY_LOG` wins when set. Otherwise only warnings are shown, or debug
/// events from keytally itself with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "warn,keytally=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
