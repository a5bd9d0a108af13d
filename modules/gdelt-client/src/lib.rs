pub mod error;
pub mod types;

pub use error::{GdeltError, Result};
pub use types::{
    AnalysisJob, AnalysisStatus, CountryMetric, CountryQuery, EventQuery, EventRecord,
    HealthStatus, NlpResult, RegionalSummary,
};

use std::time::Duration;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Port the analysis API listens on when run locally.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4041";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the GDELT/SGM analysis API.
///
/// Every method issues exactly one request. Nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct GdeltClient {
    client: reqwest::Client,
    base_url: String,
}

impl GdeltClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch SGM metrics for all countries.
    pub async fn fetch_countries(&self, query: &CountryQuery) -> Result<Vec<CountryMetric>> {
        self.request(Method::GET, &["sgm", "countries"], Some(query))
            .await
    }

    /// Fetch SGM metrics for one country. The code is sent as a path segment as-is.
    pub async fn fetch_country(&self, country_code: &str) -> Result<CountryMetric> {
        self.request::<(), _>(Method::GET, &["sgm", "countries", country_code], None)
            .await
    }

    pub async fn fetch_regions(&self) -> Result<Vec<RegionalSummary>> {
        self.request::<(), _>(Method::GET, &["sgm", "regions"], None)
            .await
    }

    /// Submit a new analysis run. Returns as soon as the backend has accepted it.
    pub async fn submit_analysis(&self) -> Result<AnalysisJob> {
        self.request::<(), _>(Method::POST, &["sgm", "run-analysis"], None)
            .await
    }

    pub async fn fetch_analysis_status(&self, job_id: &str) -> Result<AnalysisStatus> {
        self.request::<(), _>(Method::GET, &["sgm", "analysis-status", job_id], None)
            .await
    }

    pub async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        self.request(Method::GET, &["gdelt", "events"], Some(query))
            .await
    }

    pub async fn fetch_nlp_results(&self) -> Result<Vec<NlpResult>> {
        self.request::<(), _>(Method::GET, &["nlp", "results"], None)
            .await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.request::<(), _>(Method::GET, &["health"], None).await
    }

    /// Segments are escaped but otherwise sent as given. `.` and `..` are
    /// refused: URL parsing collapses them (also in `%2E` form), which would
    /// silently address a different endpoint.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(GdeltError::Request(format!(
                "path segment {dot:?} cannot be sent in a URL"
            )));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GdeltError::Request(format!("invalid base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| GdeltError::Request(format!("base url {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request<Q, T>(&self, method: Method, segments: &[&str], query: Option<&Q>) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        tracing::debug!(method = %method, url = %url, "Calling analysis API");

        let mut req = self.client.request(method, url);
        if let Some(query) = query {
            req = req.query(query);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GdeltError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
