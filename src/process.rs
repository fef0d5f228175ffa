//! Data processing: cached fragments → [`Dataset`].
//!
//! Seasons are driven by the MVP cache. A season is loaded when its MVP
//! fragment exists and holds at least one candidate; its player and team
//! tables are attached when cached and left empty otherwise.

use crate::cache::cache_file_name;
use crate::config::Settings;
use crate::error::ScrapeError;
use crate::extract::parse_stat_table;
use crate::models::{DataKind, Dataset, MvpCandidate, SeasonData, StatTable};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

static YEAR_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})\.html$").unwrap());

/// Years with a cache file in `dir`, ascending. A missing directory has none.
pub async fn cached_years(dir: &Path) -> Result<Vec<u16>, ScrapeError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ScrapeError::io(dir, e)),
    };

    let mut years = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ScrapeError::io(dir, e))?
    {
        let name = entry.file_name();
        let Some(caps) = name.to_str().and_then(|n| YEAR_FILE.captures(n)) else {
            continue;
        };
        if let Ok(year) = caps[1].parse::<u16>() {
            years.push(year);
        }
    }
    years.sort_unstable();
    Ok(years)
}

async fn read_fragment(path: &Path) -> Result<Option<String>, ScrapeError> {
    match fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ScrapeError::io(path, e)),
    }
}

async fn load_table(settings: &Settings, kind: DataKind, year: u16) -> Result<StatTable, ScrapeError> {
    let path = settings.kind_dir(kind).join(cache_file_name(year));
    Ok(read_fragment(&path)
        .await?
        .map(|text| parse_stat_table(&text))
        .unwrap_or_default())
}

/// Load every requested season that has cached MVP voting data.
///
/// Nothing is fetched here; only files already in the cache are read.
///
/// # Arguments
///
/// * `settings` - Supplies the cache directory of each data kind
/// * `years` - Seasons to consider, in any order and possibly repeated
///
/// # Returns
///
/// A [`Dataset`] with one [`SeasonData`] per requested year whose MVP
/// fragment exists and lists at least one candidate, ascending by year.
/// Candidates are sorted by vote share, highest first. Player and team
/// tables are empty when their fragments are not cached.
///
/// # Errors
///
/// [`ScrapeError::Io`] when a cache directory or file exists but cannot be
/// read.
#[instrument(level = "info", skip_all, fields(requested = years.len()))]
pub async fn process_data(settings: &Settings, years: &[u16]) -> Result<Dataset, ScrapeError> {
    let mvp_dir = settings.kind_dir(DataKind::Mvp);
    let available = cached_years(&mvp_dir).await?;
    let wanted = years
        .iter()
        .copied()
        .filter(|y| available.binary_search(y).is_ok())
        .sorted_unstable()
        .dedup()
        .collect::<Vec<_>>();

    let mut dataset = Dataset::default();
    for year in wanted {
        let table = load_table(settings, DataKind::Mvp, year).await?;
        let mvp = table
            .rows
            .iter()
            .filter_map(MvpCandidate::from_row)
            .sorted_by(|a, b| b.share.total_cmp(&a.share))
            .collect::<Vec<_>>();
        if mvp.is_empty() {
            warn!(year, "Cached MVP page holds no candidates; skipping season");
            continue;
        }

        let players = load_table(settings, DataKind::PlayerPerGame, year).await?;
        let teams = load_table(settings, DataKind::TeamStandings, year).await?;
        debug!(
            year,
            candidates = mvp.len(),
            players = players.len(),
            teams = teams.len(),
            "Loaded season"
        );
        dataset.seasons.push(SeasonData {
            year,
            mvp,
            players,
            teams,
        });
    }

    info!(seasons = dataset.seasons.len(), "Processed cached data");
    Ok(dataset)
}
