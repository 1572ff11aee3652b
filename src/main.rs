use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rangeseek::{
    CancellationToken, CliConfig, Decompression, FileSource, HttpConfig, IndexEngine,
    RangeSource, SearchOutcome,
};

mod cli;
use cli::display::{self, themed, BOLD, RED};
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            source,
            query,
            limit,
            json,
            raw,
            config,
        } => run_search(&source, &query, limit, json, raw, config.as_deref()).await,
        Commands::Inspect {
            source,
            keys,
            json,
            config,
        } => run_inspect(&source, keys, json, config.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", themed(RED, &[BOLD], "error:"), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> anyhow::Result<CliConfig> {
    match path {
        Some(path) => CliConfig::from_file(path).with_context(|| format!("loading {}", path)),
        None => Ok(CliConfig::default()),
    }
}

fn open_source(source: &str, http: &HttpConfig) -> anyhow::Result<Arc<dyn RangeSource>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        #[cfg(feature = "http")]
        return Ok(Arc::new(rangeseek::HttpSource::new(source, http)?));

        #[cfg(not(feature = "http"))]
        {
            let _ = http;
            bail!("built without HTTP support, cannot open {}", source);
        }
    }
    if !std::path::Path::new(source).is_file() {
        bail!("no such index file: {}", source);
    }
    Ok(Arc::new(FileSource::new(source)))
}

/// Cancel `token` on Ctrl-C.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
}

async fn run_search(
    source: &str,
    query: &str,
    limit: usize,
    json: bool,
    raw: bool,
    config: Option<&str>,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    if raw {
        config.engine.decompression = Decompression::Raw;
    }

    let engine = IndexEngine::with_config(open_source(source, &config.http)?, config.engine);
    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    let started = Instant::now();
    let outcome = match engine.search(query, cancel).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_cancelled() => return Ok(()),
        Err(e) => return Err(e).context("search failed"),
    };

    let hits = match outcome {
        SearchOutcome::Hits(hits) => hits,
        SearchOutcome::Empty(reason) => {
            if json {
                println!("[]");
            } else {
                display::print_no_results(query, &reason);
            }
            return Ok(());
        }
    };

    let total = hits.hit_count();
    let records = hits
        .collect_records(Some(limit))
        .await
        .context("fetching result documents")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        display::print_results(query, total, &records, started.elapsed());
    }
    Ok(())
}

async fn run_inspect(
    source: &str,
    keys: usize,
    json: bool,
    config: Option<&str>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let engine = IndexEngine::with_config(open_source(source, &config.http)?, config.engine);
    engine.load().await.context("loading index")?;

    let (Some(stats), Some(index)) = (engine.stats(), engine.index()) else {
        bail!("index reported ready but has no state");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let listed: Vec<(String, u32, Option<u64>)> = index
        .dictionary
        .entries()
        .take(keys)
        .enumerate()
        .map(|(i, entry)| {
            let docs = index
                .posting_range(i)
                .ok()
                .and_then(|range| range.len())
                .map(|len| len / rangeseek::binary::POSTING_RECORD_SIZE as u64);
            (entry.key, entry.offset, docs)
        })
        .collect();

    display::print_inspect(&stats, &listed);
    Ok(())
}
