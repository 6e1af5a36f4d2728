use std::io::Write;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::persist::PersistedRecord;

const DEFAULT_FILTER: &str = "bolt_builder=info";
const DEBUG_FILTER: &str = "bolt_builder=debug";

/// Install the global subscriber. `RUST_LOG` wins over both defaults.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn print_record_debug(stage: &str, record: &PersistedRecord) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    eprintln!("\n===== DEBUG [{stage}]: PROJECT RECORD =====\n{}\n", json);
    std::io::stderr().flush().ok();
    Ok(())
}
