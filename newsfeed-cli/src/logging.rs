//! Diagnostic output for the `newsfeed` binary.

use tracing::Level;

/// Install a stderr formatter that also captures `log` records from the
/// library crates.
///
/// A second call is a no-op, so [`crate::run`] may be driven more than once
/// in one process.
pub(crate) fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    if tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("logging already initialised");
    }
}
