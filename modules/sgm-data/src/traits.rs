// GdeltSource: the fetch collaborator behind SgmDataService.
//
// GdeltClient is the production implementation. Tests swap in an in-memory
// source so the classification layer runs without a network.

use async_trait::async_trait;

use gdelt_client::{
    AnalysisJob, AnalysisStatus, CountryMetric, CountryQuery, EventQuery, EventRecord,
    GdeltClient, NlpResult, RegionalSummary, Result,
};

#[async_trait]
pub trait GdeltSource: Send + Sync {
    async fn countries(&self, query: &CountryQuery) -> Result<Vec<CountryMetric>>;

    async fn country(&self, country_code: &str) -> Result<CountryMetric>;

    async fn regions(&self) -> Result<Vec<RegionalSummary>>;

    /// Submit an analysis run. No job state is kept on this side.
    async fn submit_analysis(&self) -> Result<AnalysisJob>;

    async fn analysis_status(&self, job_id: &str) -> Result<AnalysisStatus>;

    async fn events(&self, query: &EventQuery) -> Result<Vec<EventRecord>>;

    async fn nlp_results(&self) -> Result<Vec<NlpResult>>;
}

#[async_trait]
impl GdeltSource for GdeltClient {
    async fn countries(&self, query: &CountryQuery) -> Result<Vec<CountryMetric>> {
        self.fetch_countries(query).await
    }

    async fn country(&self, country_code: &str) -> Result<CountryMetric> {
        self.fetch_country(country_code).await
    }

    async fn regions(&self) -> Result<Vec<RegionalSummary>> {
        self.fetch_regions().await
    }

    async fn submit_analysis(&self) -> Result<AnalysisJob> {
        GdeltClient::submit_analysis(self).await
    }

    async fn analysis_status(&self, job_id: &str) -> Result<AnalysisStatus> {
        self.fetch_analysis_status(job_id).await
    }

    async fn events(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        self.fetch_events(query).await
    }

    async fn nlp_results(&self) -> Result<Vec<NlpResult>> {
        self.fetch_nlp_results().await
    }
}
