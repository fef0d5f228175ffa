//! Data models shared by the scraper, the data-processing step and the predictor.
//!
//! - [`DataKind`]: which basketball-reference table a cached page holds
//! - [`StatTable`]: a parsed table, rows keyed by the site's `data-stat` names
//! - [`MvpCandidate`]: typed view of one MVP voting row
//! - [`SeasonData`] / [`Dataset`]: everything loaded from the cache
//! - [`Prediction`]: the predictor's answer
//! - [`BackfillReport`]: what one cache backfill did

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Category of remote page. Each kind has its own URL template, cache
/// directory, page source and extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    Mvp,
    PlayerPerGame,
    TeamStandings,
}

impl DataKind {
    pub const ALL: [DataKind; 3] = [
        DataKind::Mvp,
        DataKind::PlayerPerGame,
        DataKind::TeamStandings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Mvp => "mvp",
            DataKind::PlayerPerGame => "player_per_game",
            DataKind::TeamStandings => "team_standings",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a stats table: `data-stat` attribute → cell text.
pub type StatRow = BTreeMap<String, String>;

/// A basketball-reference table, flattened.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatTable {
    /// Column `data-stat` names in header order.
    pub columns: Vec<String>,
    pub rows: Vec<StatRow>,
}

impl StatTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Append the rows of `other`, adding any columns not seen yet.
    pub fn extend(&mut self, other: StatTable) {
        for column in other.columns {
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self.rows.extend(other.rows);
    }
}

/// A player who received MVP votes in a season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MvpCandidate {
    /// Voting rank as printed, e.g. `"1"` or `"9T"`.
    pub rank: String,
    pub player: String,
    pub age: Option<u32>,
    pub team: String,
    pub first_place_votes: Option<f64>,
    pub points_won: Option<f64>,
    pub points_max: Option<f64>,
    pub share: f64,
    pub points_per_game: Option<f64>,
    pub rebounds_per_game: Option<f64>,
    pub assists_per_game: Option<f64>,
    pub win_shares: Option<f64>,
}

impl MvpCandidate {
    /// Build a candidate from an MVP table row. Rows without a player name
    /// or a parseable vote share are not candidates.
    pub fn from_row(row: &StatRow) -> Option<Self> {
        let text = |key: &str| row.get(key).map(|s| s.trim()).unwrap_or_default();
        let number = |key: &str| parse_stat(text(key));

        let player = text("player");
        if player.is_empty() {
            return None;
        }
        Some(Self {
            rank: text("rank").to_string(),
            player: player.to_string(),
            age: text("age").parse().ok(),
            team: text("team_id").to_string(),
            first_place_votes: number("votes_first"),
            points_won: number("points_won"),
            points_max: number("points_max"),
            share: number("award_share")?,
            points_per_game: number("pts_per_g"),
            rebounds_per_game: number("trb_per_g"),
            assists_per_game: number("ast_per_g"),
            win_shares: number("ws"),
        })
    }
}

/// Parse a stat cell. Handles the site's leading-dot percentages (`.512`)
/// and treats blanks as missing.
pub fn parse_stat(raw: &str) -> Option<f64> {
    let raw = raw.trim().trim_end_matches('*');
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// Everything cached for one season.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonData {
    pub year: u16,
    pub mvp: Vec<MvpCandidate>,
    pub players: StatTable,
    pub teams: StatTable,
}

/// Output of the data-processing step, ordered by season.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub seasons: Vec<SeasonData>,
}

impl Dataset {
    pub fn season(&self, year: u16) -> Option<&SeasonData> {
        self.seasons.iter().find(|s| s.year == year)
    }

    pub fn latest_year(&self) -> Option<u16> {
        self.seasons.iter().map(|s| s.year).max()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub year: u16,
    pub player: String,
    pub team: String,
    pub share: f64,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.player, self.team, self.year)
    }
}

/// JSON export written next to the prediction.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub target_year: u16,
    pub prediction: Option<&'a Prediction>,
    pub dataset: &'a Dataset,
}

/// Summary of one cache backfill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillReport {
    pub kind: DataKind,
    pub created: Vec<u16>,
    pub skipped: Vec<u16>,
}

impl BackfillReport {
    pub fn new(kind: DataKind) -> Self {
        Self {
            kind,
            created: Vec::new(),
            skipped: Vec::new(),
        }
    }
}
