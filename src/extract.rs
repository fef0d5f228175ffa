//! Fragment extraction and table parsing for basketball-reference pages.
//!
//! The extractors cut the one table (or pair of tables) each [`DataKind`]
//! cares about out of a full page, so the cache holds only that fragment.
//! basketball-reference ships many secondary tables inside HTML comments
//! and swaps them in with scripts; [`locate_table`] looks in both places.
//!
//! [`parse_stat_table`] turns a cached fragment back into a [`StatTable`]
//! for the data-processing step.

use crate::error::ExtractError;
use crate::models::{DataKind, StatRow, StatTable};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

const MVP_TABLE_ID: &str = "mvp";
const PER_GAME_TABLE_ID: &str = "per_game_stats";
const CONFERENCE_TABLE_IDS: [&str; 2] = ["confs_standings_E", "confs_standings_W"];
const DIVISION_TABLE_IDS: [&str; 2] = ["divs_standings_E", "divs_standings_W"];

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static OVER_HEADER_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.over_header").unwrap());
static REPEATED_HEADER_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody tr.thead").unwrap());
static HEADER_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("thead tr:not(.over_header) th").unwrap());
static BODY_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody tr:not(.thead):not(.over_header)").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").unwrap());

/// Cut the fragment for `kind` out of a full page.
#[instrument(level = "debug", skip(page), fields(bytes = page.len()))]
pub fn extract(kind: DataKind, year: u16, page: &str) -> Result<String, ExtractError> {
    match kind {
        DataKind::Mvp => extract_mvp_table(page),
        DataKind::PlayerPerGame => extract_player_table(page),
        DataKind::TeamStandings => extract_team_tables(page),
    }
}

/// The MVP voting table, without its decorative first header row.
pub fn extract_mvp_table(page: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(page);
    let mut table = locate_table(&document, MVP_TABLE_ID)?;
    if remove_rows(&mut table, &OVER_HEADER_ROW, Some(1)) == 0 {
        return Err(ExtractError::missing("tr.over_header in table#mvp"));
    }
    outer_table_html(&table, MVP_TABLE_ID)
}

/// The per-game stats table, without the header rows repeated every
/// twenty-odd players.
pub fn extract_player_table(page: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(page);
    let mut table = locate_table(&document, PER_GAME_TABLE_ID)?;
    let removed = remove_rows(&mut table, &REPEATED_HEADER_ROW, None);
    debug!(removed, "Dropped repeated header rows");
    outer_table_html(&table, PER_GAME_TABLE_ID)
}

/// Both conference standings tables, or both division tables on the
/// older pages that have no conference view.
///
/// A pair counts only when both of its tables are present; half a league
/// is logged and the next pair is tried.
///
/// # Errors
///
/// [`ExtractError::StructureNotFound`] when neither pair is complete.
pub fn extract_team_tables(page: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(page);
    for ids in [CONFERENCE_TABLE_IDS, DIVISION_TABLE_IDS] {
        let found: Vec<String> = ids
            .iter()
            .filter_map(|id| {
                let table = locate_table(&document, id).ok()?;
                outer_table_html(&table, id).ok()
            })
            .collect();
        match found.len() {
            0 => continue,
            n if n == ids.len() => return Ok(found.join("\n")),
            n => warn!(found = n, expected = ids.len(), tables = ?ids, "Incomplete standings pair; ignoring"),
        }
    }
    Err(ExtractError::missing(format!(
        "standings tables ({} or {})",
        CONFERENCE_TABLE_IDS.join(", "),
        DIVISION_TABLE_IDS.join(", ")
    )))
}

/// Find `table#id` in the live DOM or in a comment, and re-parse it as a
/// standalone fragment that can be edited.
fn locate_table(document: &Html, id: &str) -> Result<Html, ExtractError> {
    if let Some(table) = find_by_id(document, id) {
        return Ok(Html::parse_fragment(&table.html()));
    }

    let needle = format!("id=\"{id}\"");
    for node in document.tree.nodes() {
        let Some(comment) = node.value().as_comment() else {
            continue;
        };
        let text: &str = &comment.comment;
        if !text.contains(&needle) {
            continue;
        }
        let hidden = Html::parse_fragment(text);
        if let Some(table) = find_by_id(&hidden, id) {
            debug!(id, "Found table inside comment");
            return Ok(Html::parse_fragment(&table.html()));
        }
    }

    Err(ExtractError::missing(format!("table#{id}")))
}

fn find_by_id<'a>(html: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    html.select(&TABLE).find(|t| t.value().id() == Some(id))
}

/// Detach matching rows (at most `limit` of them). Returns how many went.
fn remove_rows(html: &mut Html, rows: &Selector, limit: Option<usize>) -> usize {
    let ids: Vec<_> = html
        .select(rows)
        .map(|row| (*row).id())
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    for node_id in &ids {
        if let Some(mut node) = html.tree.get_mut(*node_id) {
            node.detach();
        }
    }
    ids.len()
}

fn outer_table_html(html: &Html, id: &str) -> Result<String, ExtractError> {
    find_by_id(html, id)
        .map(|t| t.html())
        .ok_or_else(|| ExtractError::missing(format!("table#{id}")))
}

/// Flatten every table in a cached fragment into one [`StatTable`].
///
/// Cells are keyed by their `data-stat` attribute; cells without one
/// (division banners, spacer cells) are ignored, as are rows left empty.
pub fn parse_stat_table(fragment: &str) -> StatTable {
    let html = Html::parse_fragment(fragment);
    let mut merged = StatTable::default();

    for table in html.select(&TABLE) {
        let columns = table
            .select(&HEADER_CELL)
            .filter_map(|th| th.value().attr("data-stat"))
            .filter(|stat| !stat.is_empty())
            .map(str::to_string)
            .collect();

        let rows = table
            .select(&BODY_ROW)
            .map(parse_row)
            .filter(|row| !row.is_empty())
            .collect();

        merged.extend(StatTable { columns, rows });
    }
    merged
}

fn parse_row(row: ElementRef<'_>) -> StatRow {
    row.select(&CELL)
        .filter_map(|cell| {
            let stat = cell.value().attr("data-stat").filter(|s| !s.is_empty())?;
            let text = cell.text().collect::<String>();
            Some((stat.to_string(), text.trim().to_string()))
        })
        .collect()
}
