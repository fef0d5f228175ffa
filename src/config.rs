//! Runtime configuration.
//!
//! Everything the pipeline needs to know about the remote site and the local
//! cache lives in [`Settings`]: the base URL, one URL template and cache
//! directory per [`DataKind`], the retry policy and the optional page
//! renderer. Settings come from an optional YAML file; every field has a
//! default so an empty (or absent) file describes basketball-reference.com.
//!
//! ```yaml
//! base_url: https://www.basketball-reference.com
//! cache_dir: data
//! retry:
//!   attempts: 3
//!   delay_secs: 10
//! kinds:
//!   player_per_game:
//!     path: "leagues/NBA_{year}_per_game.html"
//!     dir: yearly_player_data
//!     source: rendered
//! renderer:
//!   command: ["chromium", "--headless", "--dump-dom"]
//! ```

use crate::error::ConfigError;
use crate::models::DataKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.basketball-reference.com";
pub const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    /// Root under which each data kind gets its own directory.
    pub cache_dir: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub retry: RetrySettings,
    pub kinds: KindsSettings,
    pub renderer: Option<RendererSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: PathBuf::from("data"),
            user_agent: concat!("hoops_mvp/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            retry: RetrySettings::default(),
            kinds: KindsSettings::default(),
            renderer: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub attempts: u32,
    pub delay_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_secs: 10,
        }
    }
}

/// Retry policy handed to [`RetryFetch`](crate::fetch::RetryFetch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            delay: Duration::from_secs(self.delay_secs),
        }
    }
}

/// How pages of a kind are retrieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Http,
    /// Through the external renderer command (for pages that need a browser).
    Rendered,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KindSettings {
    /// Path relative to `base_url`, containing `{year}`.
    pub path: String,
    /// Directory name under `cache_dir`.
    pub dir: String,
    #[serde(default)]
    pub source: SourceKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KindsSettings {
    pub mvp: KindSettings,
    pub player_per_game: KindSettings,
    pub team_standings: KindSettings,
}

impl Default for KindsSettings {
    fn default() -> Self {
        Self {
            mvp: KindSettings {
                path: "awards/awards_{year}.html".into(),
                dir: "yearly_mvp_data".into(),
                source: SourceKind::Http,
            },
            player_per_game: KindSettings {
                path: "leagues/NBA_{year}_per_game.html".into(),
                dir: "yearly_player_data".into(),
                source: SourceKind::Http,
            },
            team_standings: KindSettings {
                path: "leagues/NBA_{year}_standings.html".into(),
                dir: "yearly_team_data".into(),
                source: SourceKind::Http,
            },
        }
    }
}

impl KindsSettings {
    pub fn get(&self, kind: DataKind) -> &KindSettings {
        match kind {
            DataKind::Mvp => &self.mvp,
            DataKind::PlayerPerGame => &self.player_per_game,
            DataKind::TeamStandings => &self.team_standings,
        }
    }
}

/// External program that prints a rendered page's DOM to stdout.
/// The URL is appended as the last argument.
#[derive(Debug, Clone, Deserialize)]
pub struct RendererSettings {
    pub command: Vec<String>,
}

/// Builds the remote URL of a data kind for a given year.
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    base: Url,
    path: String,
}

impl UrlTemplate {
    pub fn new(base: Url, path: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.contains(YEAR_PLACEHOLDER) {
            return Err(ConfigError::Template { template: path });
        }
        Ok(Self { base, path })
    }

    /// Absolute URL of `year`'s page, e.g. `.../awards/awards_1991.html`.
    pub fn for_year(&self, year: u16) -> String {
        let path = self.path.replace(YEAR_PLACEHOLDER, &year.to_string());
        match self.base.join(path.trim_start_matches('/')) {
            Ok(url) => url.to_string(),
            // join only fails on unparseable input; keep the raw form so the
            // fetcher reports it against a recognisable URL
            Err(_) => format!("{}{}", self.base, path),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                let settings = Self::from_yaml_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                info!(path = %path.display(), "Loaded configuration");
                settings
            }
            None => {
                debug!("No config file given; using defaults");
                Self::default()
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base()?;
        for kind in DataKind::ALL {
            let ks = self.kinds.get(kind);
            if !ks.path.contains(YEAR_PLACEHOLDER) {
                return Err(ConfigError::Template {
                    template: ks.path.clone(),
                });
            }
            if ks.dir.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "cache directory for {kind} is empty"
                )));
            }
        }
        if self.retry.attempts == 0 {
            return Err(ConfigError::Invalid("retry.attempts must be at least 1".into()));
        }
        if let Some(renderer) = &self.renderer {
            if renderer.command.is_empty() {
                return Err(ConfigError::Invalid("renderer.command is empty".into()));
            }
        }
        Ok(())
    }

    /// Parsed base URL, always ending in `/` so templates join beneath it.
    pub fn base(&self) -> Result<Url, ConfigError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    pub fn url_template(&self, kind: DataKind) -> Result<UrlTemplate, ConfigError> {
        UrlTemplate::new(self.base()?, self.kinds.get(kind).path.clone())
    }

    /// `{cache_dir}/{dir}` for `kind`.
    pub fn kind_dir(&self, kind: DataKind) -> PathBuf {
        self.cache_dir.join(&self.kinds.get(kind).dir)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
