#![forbid(unsafe_code)]

//! File logging for the demo.
//!
//! The alternate screen owns stdout, so tracing output only goes to a file,
//! and only when one is configured. `RUST_LOG` overrides the default filter.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "scrollstage_demo=debug,scrollstage_runtime=debug,scrollstage_core=debug";

/// Install a global subscriber writing to `path`.
pub fn init(path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()?;
    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}
