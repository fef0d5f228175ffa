//! # Hoops MVP
//!
//! Scrapes historical NBA award voting, per-game player stats and team
//! standings from basketball-reference.com, caches the relevant table of
//! each page on disk, and names a season's Most Valuable Player from the
//! cached data.
//!
//! ## Usage
//!
//! ```sh
//! hoops_mvp --cache-dir ./data -j ./json
//! ```
//!
//! ## Architecture
//!
//! 1. **Backfill**: for each data kind and season, fetch the page unless it
//!    is already cached (429s are retried with a fixed delay), cut out the
//!    table and store it as `{cache_dir}/{kind_dir}/{year}.html`
//! 2. **Processing**: parse the cached tables into a per-season dataset
//! 3. **Prediction**: run the predictor for the target season and print it
//! 4. **Output**: optionally write the dataset and prediction as JSON

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cache;
mod cli;
mod config;
mod error;
mod extract;
mod fetch;
#[cfg(test)]
mod fixtures;
mod models;
mod outputs;
mod predict;
mod process;
mod utils;

use cache::CacheWriter;
use cli::Cli;
use config::Settings;
use fetch::{HttpFetcher, PageSource};
use models::{BackfillReport, DataKind, Report};
use outputs::json;
use predict::{Predictor, VoteShareLeader};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("hoops_mvp starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate()?;

    let years = args.years()?;
    let kinds = args.kinds();
    info!(
        base_url = %settings.base_url,
        cache_dir = %settings.cache_dir.display(),
        first = years.first().copied(),
        last = years.last().copied(),
        kinds = ?kinds,
        "Configuration resolved"
    );

    // ---- Backfill the page cache ----
    let reports = scrape_basketball_reference(&settings, &kinds, &years).await?;
    for report in &reports {
        info!(
            kind = %report.kind,
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Cache backfilled"
        );
    }

    // ---- Process & predict ----
    let target_year = args.target_year();
    let dataset = process::process_data(&settings, &args.analysis_years()?).await?;
    let predictor = VoteShareLeader;
    let prediction = predictor.predict(&dataset, target_year);

    match &prediction {
        Some(p) => {
            info!(predictor = predictor.name(), year = target_year, player = %p.player, share = p.share, "Prediction ready");
            println!("The predicted MVP is: {p}");
        }
        None => {
            warn!(
                predictor = predictor.name(),
                year = target_year,
                latest_cached = dataset.latest_year(),
                "No MVP data for target season"
            );
            println!("The predicted MVP is: unknown (no MVP data cached for {target_year})");
        }
    }

    // ---- JSON output ----
    if let Some(dir) = &args.json_output_dir {
        ensure_writable_dir(dir).await?;
        let report = Report {
            generated_at: Utc::now(),
            target_year,
            prediction: prediction.as_ref(),
            dataset: &dataset,
        };
        json::write_report(&report, dir).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Backfill the cache of every requested kind, one kind at a time.
/// The first failing year ends the run.
#[instrument(level = "info", skip_all, fields(kinds = kinds.len(), years = years.len()))]
async fn scrape_basketball_reference(
    settings: &Settings,
    kinds: &[DataKind],
    years: &[u16],
) -> Result<Vec<BackfillReport>, Box<dyn Error>> {
    let http = HttpFetcher::from_settings(settings)?;
    let mut reports = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        let writer = CacheWriter::new(
            kind,
            settings.kind_dir(kind),
            settings.url_template(kind)?,
            PageSource::for_kind(settings, kind, &http),
        );
        reports.push(writer.backfill(years).await?);
    }
    Ok(reports)
}
