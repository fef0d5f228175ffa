//! Command-line interface definitions.
//!
//! Flags override the matching values from the config file; everything
//! else comes from [`Settings`].

use crate::config::Settings;
use crate::error::ConfigError;
use crate::models::DataKind;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// ```sh
/// # Backfill everything for 1991-2022 and predict 2022
/// hoops_mvp
///
/// # Only MVP pages, a narrower range, with a JSON report
/// hoops_mvp -k mvp --start-year 2015 --end-year 2020 -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root directory of the page cache
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Site to scrape
    #[arg(long, env = "HOOPS_BASE_URL")]
    pub base_url: Option<String>,

    /// First season to backfill
    #[arg(long, default_value_t = 1991)]
    pub start_year: u16,

    /// Last season to backfill (inclusive)
    #[arg(long, default_value_t = 2022)]
    pub end_year: u16,

    /// Data kinds to backfill; repeat for several (default: all)
    #[arg(short, long = "kind", value_enum)]
    pub kinds: Vec<DataKind>,

    /// Season to predict (default: the last backfilled season)
    #[arg(short, long)]
    pub target_year: Option<u16>,

    /// Output directory for a JSON report
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,
}

impl Cli {
    pub fn years(&self) -> Result<Vec<u16>, ConfigError> {
        if self.start_year > self.end_year {
            return Err(ConfigError::Invalid(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            )));
        }
        Ok((self.start_year..=self.end_year).collect())
    }

    pub fn kinds(&self) -> Vec<DataKind> {
        if self.kinds.is_empty() {
            DataKind::ALL.to_vec()
        } else {
            self.kinds.clone()
        }
    }

    pub fn target_year(&self) -> u16 {
        self.target_year.unwrap_or(self.end_year)
    }

    /// Seasons to load for prediction: the backfilled range plus the
    /// target season, which may lie outside it but already be cached.
    ///
    /// # Errors
    ///
    /// Same as [`Cli::years`].
    pub fn analysis_years(&self) -> Result<Vec<u16>, ConfigError> {
        let mut years = self.years()?;
        let target = self.target_year();
        if let Err(pos) = years.binary_search(&target) {
            years.insert(pos, target);
        }
        Ok(years)
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.cache_dir {
            settings.cache_dir = dir.clone();
        }
        if let Some(url) = &self.base_url {
            settings.base_url = url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["hoops_mvp"]);
        assert_eq!(cli.years().unwrap().len(), 32);
        assert_eq!(cli.years().unwrap().first(), Some(&1991));
        assert_eq!(cli.years().unwrap().last(), Some(&2022));
        assert_eq!(cli.kinds(), DataKind::ALL.to_vec());
        assert_eq!(cli.target_year(), 2022);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "hoops_mvp",
            "-k",
            "mvp",
            "-k",
            "team-standings",
            "-t",
            "2019",
            "-j",
            "/tmp/json",
        ]);
        assert_eq!(cli.kinds(), vec![DataKind::Mvp, DataKind::TeamStandings]);
        assert_eq!(cli.target_year(), 2019);
        assert_eq!(cli.json_output_dir, Some(PathBuf::from("/tmp/json")));
    }

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Cli::parse_from([
            "hoops_mvp",
            "--cache-dir",
            "/srv/cache",
            "--base-url",
            "http://localhost:9000",
        ]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.cache_dir, PathBuf::from("/srv/cache"));
        assert_eq!(settings.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_cli_analysis_years_include_target_outside_range() {
        let cli = Cli::parse_from([
            "hoops_mvp",
            "--start-year",
            "2000",
            "--end-year",
            "2005",
            "-t",
            "1991",
        ]);
        let years = cli.analysis_years().unwrap();
        assert_eq!(years.first(), Some(&1991));
        assert_eq!(years.len(), 7);
        assert_eq!(cli.years().unwrap().len(), 6);

        let inside = Cli::parse_from(["hoops_mvp", "--start-year", "2000", "--end-year", "2005", "-t", "2003"]);
        assert_eq!(inside.analysis_years().unwrap(), inside.years().unwrap());
    }

    #[test]
    fn test_cli_rejects_inverted_range() {
        let cli = Cli::parse_from(["hoops_mvp", "--start-year", "2000", "--end-year", "1999"]);
        assert!(cli.years().is_err());
    }
}
