//! govjob-feed — binary entrypoint.
//! Loads the classification config, queries the feeds for both categories,
//! and writes the curated board to disk.

use anyhow::Context;
use govjob_feed::config::{self, RunSettings};
use govjob_feed::ingest::providers::google_news::GoogleNewsRssProvider;
use govjob_feed::ingest::types::FeedSource;
use govjob_feed::pipeline::{collect_board, Pipeline};
use govjob_feed::sink::{JsonFileSink, Sink};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("govjob_feed=info,pipeline=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Config problems stop the run before any fetch.
    let cfg = config::load_default().context("loading classification config")?;
    let settings = RunSettings::from_env().context("reading run settings")?;

    let pipeline = Pipeline::new(&cfg)
        .context("building classifier")?
        .with_display_offset(settings.display_offset);

    let sources: Vec<Box<dyn FeedSource>> = vec![Box::new(
        GoogleNewsRssProvider::new().with_timeout(settings.fetch_timeout_secs),
    )];

    let now = chrono::Utc::now();
    let board = collect_board(&sources, &pipeline, now).await;

    let sink = JsonFileSink::new(&settings.output_path, settings.display_offset);
    sink.persist(&board)
        .await
        .with_context(|| format!("writing {}", settings.output_path.display()))?;

    tracing::info!(
        active = board.active.len(),
        upcoming = board.upcoming.len(),
        "done"
    );
    Ok(())
}
