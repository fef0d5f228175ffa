//! On-disk page cache, one directory per data kind.
//!
//! # Layout
//!
//! ```text
//! cache_dir/
//! ├── yearly_mvp_data/
//! │   ├── 1991.html
//! │   └── 1992.html
//! ├── yearly_player_data/
//! └── yearly_team_data/
//! ```
//!
//! A file's presence means "already fetched"; its content is never checked
//! or refreshed. New pages are written to a hidden staging file and renamed
//! into place only after fetching and extraction succeeded, so a failed
//! year leaves nothing behind and is retried on the next run.

use crate::config::UrlTemplate;
use crate::error::ScrapeError;
use crate::extract::extract;
use crate::fetch::FetchPage;
use crate::models::{BackfillReport, DataKind};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// What [`CacheWriter::ensure_cached`] did for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Fetched, extracted and written.
    Created,
    /// A file was already there; nothing was requested.
    Skipped,
}

/// File name of a season inside a kind's cache directory (`1991.html`).
pub fn cache_file_name(year: u16) -> String {
    format!("{year}.html")
}

/// Backfills the cache of one data kind.
pub struct CacheWriter<S> {
    kind: DataKind,
    dir: PathBuf,
    urls: UrlTemplate,
    source: S,
}

impl<S> CacheWriter<S>
where
    S: FetchPage,
{
    pub fn new(kind: DataKind, dir: impl Into<PathBuf>, urls: UrlTemplate, source: S) -> Self {
        Self {
            kind,
            dir: dir.into(),
            urls,
            source,
        }
    }

    pub fn cache_path(&self, year: u16) -> PathBuf {
        self.dir.join(cache_file_name(year))
    }

    fn staging_path(&self, year: u16) -> PathBuf {
        self.dir.join(format!(".{year}.html.partial"))
    }

    /// Make sure every year in `years` is cached, in order.
    ///
    /// Years are handled one after another; no two requests are in flight
    /// at once. Years already on disk are skipped without a request.
    ///
    /// # Arguments
    ///
    /// * `years` - Seasons to cache, processed in the given order
    ///
    /// # Returns
    ///
    /// A [`BackfillReport`] listing which years were created and which were
    /// skipped.
    ///
    /// # Errors
    ///
    /// The first year that cannot be fetched ([`ScrapeError::RequestFailed`]),
    /// extracted ([`ScrapeError::Extract`]) or written ([`ScrapeError::Io`])
    /// ends the run. Years cached before it stay cached; later years are
    /// never requested.
    #[instrument(level = "info", skip_all, fields(kind = %self.kind, dir = %self.dir.display()))]
    pub async fn backfill(&self, years: &[u16]) -> Result<BackfillReport, ScrapeError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ScrapeError::io(&self.dir, e))?;

        let outcomes: Vec<(u16, CacheOutcome)> = stream::iter(years.iter().copied())
            .then(|year| async move { self.ensure_cached(year).await.map(|o| (year, o)) })
            .try_collect()
            .await?;

        let mut report = BackfillReport::new(self.kind);
        for (year, outcome) in outcomes {
            match outcome {
                CacheOutcome::Created => report.created.push(year),
                CacheOutcome::Skipped => report.skipped.push(year),
            }
        }
        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Backfill complete"
        );
        Ok(report)
    }

    /// Fetch, extract and store one year unless it is already cached.
    #[instrument(level = "info", skip(self), fields(kind = %self.kind))]
    pub async fn ensure_cached(&self, year: u16) -> Result<CacheOutcome, ScrapeError> {
        let path = self.cache_path(year);
        if fs::try_exists(&path)
            .await
            .map_err(|e| ScrapeError::io(&path, e))?
        {
            debug!(path = %path.display(), "Already cached; skipping");
            return Ok(CacheOutcome::Skipped);
        }

        let url = self.urls.for_year(year);
        let page = match self.source.fetch(&url).await {
            Ok(page) => page,
            Err(source) => return Err(ScrapeError::RequestFailed { url, source }),
        };

        let fragment = extract(self.kind, year, &page).map_err(|source| ScrapeError::Extract {
            kind: self.kind.to_string(),
            year,
            source,
        })?;

        self.publish(year, &path, &fragment).await?;
        info!(path = %path.display(), bytes = fragment.len(), %url, "Cached page");
        Ok(CacheOutcome::Created)
    }

    async fn publish(&self, year: u16, path: &Path, fragment: &str) -> Result<(), ScrapeError> {
        let staging = self.staging_path(year);

        if let Err(e) = fs::write(&staging, fragment).await {
            discard(&staging).await;
            return Err(ScrapeError::io(&staging, e));
        }
        if let Err(e) = fs::rename(&staging, path).await {
            discard(&staging).await;
            return Err(ScrapeError::io(path, e));
        }
        Ok(())
    }
}

async fn discard(staging: &Path) {
    if let Err(e) = fs::remove_file(staging).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %staging.display(), error = %e, "Could not remove staging file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RetryPolicy, Settings};
    use crate::error::FetchError;
    use crate::fetch::{HttpFetcher, RetryFetch};
    use crate::fixtures::{MVP_PAGE, PER_GAME_PAGE};
    use scraper::{Html, Selector};
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn writer(server: &MockServer, dir: &Path) -> CacheWriter<RetryFetch<HttpFetcher>> {
        let settings = Settings {
            base_url: server.uri(),
            ..Settings::default()
        };
        let policy = RetryPolicy {
            attempts: 3,
            delay: Duration::from_millis(5),
        };
        CacheWriter::new(
            DataKind::Mvp,
            dir,
            settings.url_template(DataKind::Mvp).unwrap(),
            RetryFetch::new(HttpFetcher::new(reqwest::Client::new()), policy),
        )
    }

    async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn existing_file_is_left_alone() {
        let server = MockServer::start().await;
        serve(&server, "/awards/awards_2020.html", ResponseTemplate::new(200).set_body_string(MVP_PAGE)).await;
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("2020.html"), "stale").unwrap();

        let report = writer(&server, tmp.path()).backfill(&[2020]).await.unwrap();

        assert_eq!(report.skipped, vec![2020]);
        assert!(report.created.is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(tmp.path().join("2020.html")).unwrap(), "stale");
    }

    #[tokio::test]
    async fn fresh_cache_gets_one_file_per_year() {
        let server = MockServer::start().await;
        for year in [2020, 2021] {
            serve(
                &server,
                &format!("/awards/awards_{year}.html"),
                ResponseTemplate::new(200).set_body_string(MVP_PAGE),
            )
            .await;
        }
        let tmp = TempDir::new().unwrap();

        let report = writer(&server, tmp.path()).backfill(&[2020, 2021]).await.unwrap();

        assert_eq!(report.created, vec![2020, 2021]);
        assert_eq!(file_names(tmp.path()), vec!["2020.html", "2021.html"]);

        let table_sel = Selector::parse("table").unwrap();
        let row_sel = Selector::parse("tr").unwrap();
        for name in ["2020.html", "2021.html"] {
            let text = std::fs::read_to_string(tmp.path().join(name)).unwrap();
            let html = Html::parse_fragment(&text);
            let table = html.select(&table_sel).next().unwrap();
            assert_eq!(table.value().id(), Some("mvp"));
            let first_row = table.select(&row_sel).next().unwrap();
            assert!(!first_row.value().classes().any(|c| c == "over_header"));
        }
    }

    #[tokio::test]
    async fn failed_year_stops_backfill_and_leaves_no_file() {
        let server = MockServer::start().await;
        serve(&server, "/awards/awards_2020.html", ResponseTemplate::new(200).set_body_string(MVP_PAGE)).await;
        serve(&server, "/awards/awards_2021.html", ResponseTemplate::new(404)).await;
        serve(&server, "/awards/awards_2022.html", ResponseTemplate::new(200).set_body_string(MVP_PAGE)).await;
        let tmp = TempDir::new().unwrap();

        let err = writer(&server, tmp.path())
            .backfill(&[2020, 2021, 2022])
            .await
            .unwrap_err();

        match err {
            ScrapeError::RequestFailed { url, source } => {
                assert!(url.ends_with("/awards/awards_2021.html"));
                assert!(matches!(source, FetchError::UnknownResource { status: 404, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(file_names(tmp.path()), vec!["2020.html"]);
        let requested: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(requested, vec!["/awards/awards_2020.html", "/awards/awards_2021.html"]);
    }

    #[tokio::test]
    async fn unexpected_page_layout_is_not_cached() {
        let server = MockServer::start().await;
        serve(&server, "/awards/awards_2020.html", ResponseTemplate::new(200).set_body_string(PER_GAME_PAGE)).await;
        let tmp = TempDir::new().unwrap();

        let err = writer(&server, tmp.path()).backfill(&[2020]).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Extract { year: 2020, .. }));
        assert!(file_names(tmp.path()).is_empty());
    }

    #[tokio::test]
    async fn second_run_skips_what_the_first_cached() {
        let server = MockServer::start().await;
        serve(&server, "/awards/awards_1991.html", ResponseTemplate::new(200).set_body_string(MVP_PAGE)).await;
        let tmp = TempDir::new().unwrap();
        let cache = writer(&server, tmp.path());

        assert_eq!(cache.ensure_cached(1991).await.unwrap(), CacheOutcome::Created);
        assert_eq!(cache.ensure_cached(1991).await.unwrap(), CacheOutcome::Skipped);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_rename_removes_staging_file() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        let cache = writer(&server, tmp.path());
        let path = cache.cache_path(2020);
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let err = cache.publish(2020, &path, "<table id=\"mvp\"></table>").await.unwrap_err();

        assert!(matches!(err, ScrapeError::Io { .. }));
        assert!(!cache.staging_path(2020).exists());
        assert_eq!(file_names(tmp.path()), vec!["2020.html"]);
        assert!(path.is_dir());
    }
}
