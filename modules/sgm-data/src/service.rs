use tracing::error;

use gdelt_client::{
    AnalysisJob, AnalysisStatus, CountryMetric, CountryQuery, EventQuery, EventRecord,
    GdeltClient, NlpResult, RegionalSummary, Result,
};

use crate::category::ensure_category;
use crate::traits::GdeltSource;

/// Data access for the SGM dashboard.
///
/// Each operation makes one call to the source. Country metrics get a
/// `category` filled in when upstream omitted it; everything else is
/// returned as received. Failures are logged once and returned unchanged.
pub struct SgmDataService<S = GdeltClient> {
    source: S,
}

impl<S: GdeltSource> SgmDataService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// All countries with server-default paging.
    pub async fn get_supremacism_data(&self) -> Result<Vec<CountryMetric>> {
        self.get_supremacism_data_with(&CountryQuery::default())
            .await
    }

    pub async fn get_supremacism_data_with(
        &self,
        query: &CountryQuery,
    ) -> Result<Vec<CountryMetric>> {
        let mut countries = self
            .source
            .countries(query)
            .await
            .inspect_err(|e| error!(error = %e, "Error fetching supremacism data"))?;

        countries.iter_mut().for_each(ensure_category);
        Ok(countries)
    }

    /// `country_code` goes upstream untouched; no format check happens here.
    pub async fn get_country_analysis(&self, country_code: &str) -> Result<CountryMetric> {
        let mut metric = self.source.country(country_code).await.inspect_err(
            |e| error!(country_code, error = %e, "Error fetching country analysis"),
        )?;

        ensure_category(&mut metric);
        Ok(metric)
    }

    pub async fn get_regional_summary(&self) -> Result<Vec<RegionalSummary>> {
        self.source
            .regions()
            .await
            .inspect_err(|e| error!(error = %e, "Error fetching regional summary"))
    }

    pub async fn trigger_gdelt_analysis(&self) -> Result<AnalysisJob> {
        self.source
            .submit_analysis()
            .await
            .inspect_err(|e| error!(error = %e, "Error triggering GDELT analysis"))
    }

    pub async fn get_analysis_status(&self, job_id: &str) -> Result<AnalysisStatus> {
        self.source
            .analysis_status(job_id)
            .await
            .inspect_err(|e| error!(job_id, error = %e, "Error fetching analysis status"))
    }

    pub async fn get_event_data(&self) -> Result<Vec<EventRecord>> {
        self.get_event_data_with(&EventQuery::default()).await
    }

    pub async fn get_event_data_with(&self, query: &EventQuery) -> Result<Vec<EventRecord>> {
        self.source
            .events(query)
            .await
            .inspect_err(|e| error!(error = %e, "Error fetching event data"))
    }

    pub async fn get_nlp_analysis(&self) -> Result<Vec<NlpResult>> {
        self.source
            .nlp_results()
            .await
            .inspect_err(|e| error!(error = %e, "Error fetching NLP analysis"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use gdelt_client::GdeltError;

    use super::*;

    /// In-memory source. Returns canned data, or an Api error when `failing`.
    #[derive(Default)]
    struct MockSource {
        countries: Vec<CountryMetric>,
        regions: Vec<RegionalSummary>,
        events: Vec<EventRecord>,
        nlp: Vec<NlpResult>,
        failing: bool,
        calls: AtomicUsize,
        seen_codes: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn failing() -> Self {
            Self {
                failing: true,
                ..Default::default()
            }
        }

        fn check(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                Err(GdeltError::Api {
                    status: 503,
                    message: "upstream down".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl GdeltSource for MockSource {
        async fn countries(&self, query: &CountryQuery) -> Result<Vec<CountryMetric>> {
            self.check()?;
            let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
            Ok(self.countries.iter().take(limit).cloned().collect())
        }

        async fn country(&self, country_code: &str) -> Result<CountryMetric> {
            self.check()?;
            self.seen_codes
                .lock()
                .unwrap()
                .push(country_code.to_string());
            self.countries
                .iter()
                .find(|c| c.code == country_code)
                .cloned()
                .ok_or(GdeltError::Api {
                    status: 404,
                    message: format!("Country {country_code} not found"),
                })
        }

        async fn regions(&self) -> Result<Vec<RegionalSummary>> {
            self.check()?;
            Ok(self.regions.clone())
        }

        async fn submit_analysis(&self) -> Result<AnalysisJob> {
            self.check()?;
            Ok(AnalysisJob {
                job_id: "job-42".to_string(),
                status: "started".to_string(),
            })
        }

        async fn analysis_status(&self, job_id: &str) -> Result<AnalysisStatus> {
            self.check()?;
            Ok(AnalysisStatus {
                job_id: job_id.to_string(),
                status: "completed".to_string(),
                progress: Some(1.0),
                message: None,
            })
        }

        async fn events(&self, _query: &EventQuery) -> Result<Vec<EventRecord>> {
            self.check()?;
            Ok(self.events.clone())
        }

        async fn nlp_results(&self) -> Result<Vec<NlpResult>> {
            self.check()?;
            Ok(self.nlp.clone())
        }
    }

    fn country(code: &str, sgm: Option<f64>, gscs: Option<f64>) -> CountryMetric {
        CountryMetric {
            code: code.to_string(),
            country: format!("Country {code}"),
            srs_d: None,
            srs_i: None,
            sgm,
            gscs,
            latitude: 0.0,
            longitude: 0.0,
            sti: None,
            category: None,
            description: None,
            event_count: None,
            avg_tone: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn supremacism_data_fills_missing_categories() {
        let mut labelled = country("SE", Some(1.7), None);
        labelled.category = Some("Custom Label".to_string());

        let service = SgmDataService::new(MockSource {
            countries: vec![
                country("US", Some(5.5), None),
                labelled,
                country("CN", None, Some(7.0)),
                country("XX", None, None),
                country("RU", Some(8.5), None),
            ],
            ..Default::default()
        });

        let data = service.get_supremacism_data().await.unwrap();
        let labels: Vec<_> = data.iter().map(|c| c.category.as_deref().unwrap()).collect();
        assert_eq!(
            labels,
            vec![
                "Soft Supremacism",
                "Custom Label",
                "Structural Supremacism",
                "Non-Supremacist Governance",
                "Extreme Supremacism",
            ]
        );
        assert_eq!(service.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn query_is_forwarded_to_source() {
        let service = SgmDataService::new(MockSource {
            countries: vec![country("US", Some(5.5), None), country("CN", Some(7.0), None)],
            ..Default::default()
        });

        let data = service
            .get_supremacism_data_with(&CountryQuery {
                limit: Some(1),
                include_details: None,
            })
            .await
            .unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].code, "US");
    }

    #[tokio::test]
    async fn country_analysis_only_adds_category() {
        let upstream = country("US", Some(5.5), None);
        let service = SgmDataService::new(MockSource {
            countries: vec![upstream.clone()],
            ..Default::default()
        });

        let metric = service.get_country_analysis("US").await.unwrap();

        let mut expected = upstream;
        expected.category = Some("Soft Supremacism".to_string());
        assert_eq!(metric, expected);
    }

    #[tokio::test]
    async fn country_code_is_passed_uninterpreted() {
        let service = SgmDataService::new(MockSource::default());
        let _ = service.get_country_analysis(" us/../x ").await;
        assert_eq!(
            *service.source().seen_codes.lock().unwrap(),
            vec![" us/../x ".to_string()]
        );
    }

    #[tokio::test]
    async fn pass_through_operations_return_upstream_values() {
        let regions = vec![RegionalSummary {
            region: "Europe".to_string(),
            avg_sgm: 3.2,
            countries: 5,
            highest_country: "Russia".to_string(),
            highest_sgm: 7.3,
            lowest_country: "Sweden".to_string(),
            lowest_sgm: 1.7,
        }];
        let events = vec![EventRecord {
            date: "2025-03-01".to_string(),
            country: "US".to_string(),
            event_count: 12,
            avg_tone: -1.5,
            event_codes: vec!["190".to_string(), "014".to_string()],
            themes: vec!["PROTEST".to_string(), "CONFLICT".to_string()],
        }];
        let nlp = vec![NlpResult {
            country: "US".to_string(),
            sentiment_score: -0.4,
            top_themes: vec!["CONFLICT".to_string()],
            related_countries: vec!["CN".to_string()],
            entity_analysis: BTreeMap::from([("NATO".to_string(), 0.8)]),
        }];

        let service = SgmDataService::new(MockSource {
            regions: regions.clone(),
            events: events.clone(),
            nlp: nlp.clone(),
            ..Default::default()
        });

        assert_eq!(service.get_regional_summary().await.unwrap(), regions);
        assert_eq!(service.get_event_data().await.unwrap(), events);
        assert_eq!(service.get_nlp_analysis().await.unwrap(), nlp);
    }

    #[tokio::test]
    async fn trigger_analysis_delegates() {
        let service = SgmDataService::new(MockSource::default());
        let job = service.trigger_gdelt_analysis().await.unwrap();
        assert_eq!(job.job_id, "job-42");
        assert_eq!(job.status, "started");

        let status = service.get_analysis_status(&job.job_id).await.unwrap();
        assert_eq!(status.job_id, "job-42");
        assert_eq!(service.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn every_operation_propagates_the_upstream_error() {
        let service = SgmDataService::new(MockSource::failing());
        let expected = "API error (status 503): upstream down";

        let errors = vec![
            service.get_supremacism_data().await.unwrap_err(),
            service.get_country_analysis("US").await.unwrap_err(),
            service.get_regional_summary().await.unwrap_err(),
            service.trigger_gdelt_analysis().await.unwrap_err(),
            service.get_analysis_status("job-1").await.unwrap_err(),
            service.get_event_data().await.unwrap_err(),
            service.get_nlp_analysis().await.unwrap_err(),
        ];

        for err in &errors {
            assert!(
                matches!(err, GdeltError::Api { status: 503, .. }),
                "got {err:?}"
            );
            assert_eq!(err.to_string(), expected);
        }
        // One upstream call per operation, no retries.
        assert_eq!(service.source().calls.load(Ordering::SeqCst), errors.len());
    }
}
