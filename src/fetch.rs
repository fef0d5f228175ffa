//! Page retrieval with rate-limit retry.
//!
//! # Architecture
//!
//! - [`FetchPage`]: "give me the text of this URL"
//! - [`HttpFetcher`]: one plain GET, response classified by status
//! - [`RetryFetch`]: decorator that retries rate-limited (429) responses a
//!   bounded number of times with a fixed delay between attempts
//! - [`RenderedFetcher`]: runs an external renderer (headless browser) for
//!   pages whose tables only exist after scripts run
//! - [`PageSource`]: the per-kind choice between the two
//!
//! # Status classification
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 200 | body returned |
//! | 400, 404 | [`FetchError::UnknownResource`], not retried |
//! | 429 | [`FetchError::RateLimited`], retried by [`RetryFetch`] |
//! | other | [`FetchError::UnexpectedStatus`], not retried |

use crate::config::{RetryPolicy, Settings, SourceKind};
use crate::error::FetchError;
use crate::models::DataKind;
use crate::utils::truncate_for_log;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Anything that can turn a URL into page text.
pub trait FetchPage {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Map a response status onto the fetch outcome.
pub fn classify(url: &str, status: StatusCode) -> Result<(), FetchError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Err(FetchError::UnknownResource {
            url: url.to_string(),
            status: status.as_u16(),
        }),
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited {
            url: url.to_string(),
        }),
        other => Err(FetchError::UnexpectedStatus {
            url: url.to_string(),
            status: other.as_u16(),
        }),
    }
}

/// Single GET over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wrap an existing client (tests pass a bare `Client::new()`).
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client with the configured user agent and request timeout.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout())
            .build()?;
        Ok(Self::new(client))
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), elapsed_ms = t0.elapsed().as_millis() as u64, "GET");
        classify(url, status)?;

        let body = response.text().await.map_err(transport)?;
        debug!(bytes = body.len(), "Read body");
        Ok(body)
    }
}

/// Retries the inner fetcher while it reports [`FetchError::RateLimited`].
///
/// The attempt budget counts requests, so with the default policy a URL that
/// keeps answering 429 is requested three times, with a wait between each
/// pair of requests, before [`FetchError::RetriesExhausted`] is returned.
/// Every other outcome of the inner fetcher is passed through untouched.
///
/// # Timing
///
/// | Responses | Requests | Total wait |
/// |-----------|----------|------------|
/// | 200 | 1 | none |
/// | 429, 429, 200 | 3 | 2 × `delay` |
/// | 429, 429, 429 | 3 | 2 × `delay`, then `RetriesExhausted` |
/// | 404 | 1 | none, `UnknownResource` |
///
/// # Example
///
/// ```ignore
/// let http = HttpFetcher::from_settings(&settings)?;
/// let fetcher = RetryFetch::new(http, settings.retry.policy());
/// let page = fetcher.fetch("https://www.basketball-reference.com/awards/awards_1991.html").await?;
/// ```
pub struct RetryFetch<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> RetryFetch<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("attempts", &self.policy.attempts)
            .field("delay", &self.policy.delay)
            .finish()
    }
}

impl<T> FetchPage for RetryFetch<T>
where
    T: FetchPage,
{
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut remaining = self.policy.attempts;

        while remaining > 0 {
            match self.inner.fetch(url).await {
                Err(e) if e.is_rate_limited() => {
                    remaining -= 1;
                    if remaining == 0 {
                        break;
                    }
                    warn!(
                        remaining,
                        max = self.policy.attempts,
                        delay = ?self.policy.delay,
                        "Rate limited; backing off"
                    );
                    sleep(self.policy.delay).await;
                }
                other => return other,
            }
        }

        error!(attempts = self.policy.attempts, "Exhausted retries");
        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.policy.attempts,
        })
    }
}

/// Runs `command.. URL` and takes its stdout as the page text.
#[derive(Debug, Clone)]
pub struct RenderedFetcher {
    command: Option<Vec<String>>,
    timeout: Duration,
}

impl RenderedFetcher {
    pub fn new(command: Option<Vec<String>>, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.renderer.as_ref().map(|r| r.command.clone()),
            settings.timeout(),
        )
    }
}

impl FetchPage for RenderedFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let failed = |reason: String| FetchError::RendererFailed {
            url: url.to_string(),
            reason,
        };
        let Some((program, args)) = self.command.as_deref().and_then(|c| c.split_first()) else {
            return Err(FetchError::RendererUnavailable {
                url: url.to_string(),
            });
        };

        let t0 = Instant::now();
        let mut command = Command::new(program);
        command.args(args).arg(url).kill_on_drop(true);
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| failed(format!("timed out after {:?}", self.timeout)))?
            .map_err(|e| failed(format!("could not run {program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "{}: {}",
                output.status,
                truncate_for_log(stderr.trim(), 300)
            )));
        }

        let body = String::from_utf8_lossy(&output.stdout).into_owned();
        if body.trim().is_empty() {
            return Err(failed("renderer printed nothing".into()));
        }
        info!(bytes = body.len(), elapsed_ms = t0.elapsed().as_millis() as u64, "Rendered page");
        Ok(body)
    }
}

/// Page source chosen per data kind.
#[derive(Debug)]
pub enum PageSource {
    Http(RetryFetch<HttpFetcher>),
    Rendered(RenderedFetcher),
}

impl PageSource {
    pub fn for_kind(settings: &Settings, kind: DataKind, http: &HttpFetcher) -> Self {
        match settings.kinds.get(kind).source {
            SourceKind::Http => {
                PageSource::Http(RetryFetch::new(http.clone(), settings.retry.policy()))
            }
            SourceKind::Rendered => PageSource::Rendered(RenderedFetcher::from_settings(settings)),
        }
    }
}

impl FetchPage for PageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self {
            PageSource::Http(f) => f.fetch(url).await,
            PageSource::Rendered(f) => f.fetch(url).await,
        }
    }
}
