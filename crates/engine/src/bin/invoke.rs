//! Runs one request through the stats service.
//!
//! Reads a JSON request (`method`, `path`, `headers`, `body`) from stdin and
//! writes the JSON response to stdout, the way a serverless runtime would
//! invoke the handler.
//!
//! ```bash
//! echo '{"method":"GET","path":"/stats","headers":{"Authorization":"Bearer t1"}}' \
//!   | LOADOUT_TOKENS=t1=player-1 cargo run -p loadout-engine --bin loadout-invoke
//! ```

use std::io::Read;

use anyhow::{Context, Result};
use loadout_engine::{Request, ServiceConfig, StaticTokenResolver, StatsService, logging};
use loadout_storage::{MemoryRecordStore, RecordStore, SqliteRecordStore};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env();
    logging::setup_logging(&config.log_filter)?;

    let resolver = StaticTokenResolver::parse(&config.tokens).context("LOADOUT_TOKENS")?;
    if resolver.is_empty() {
        tracing::warn!("no tokens configured, every request will be rejected");
    }

    let store: Box<dyn RecordStore> = match &config.db_path {
        Some(path) => {
            let path = path.to_str().context("LOADOUT_DB_PATH is not valid UTF-8")?;
            tracing::info!(path, "using sqlite store");
            Box::new(SqliteRecordStore::open(path)?)
        }
        None => {
            tracing::info!("using in-memory store");
            Box::new(MemoryRecordStore::new())
        }
    };

    let service = StatsService::new(resolver, store);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let request: Request = serde_json::from_str(&input).context("request is not valid JSON")?;

    let response = service.handle(&request);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
