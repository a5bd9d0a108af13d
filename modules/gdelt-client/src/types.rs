use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// --- SGM country metrics ---

/// Per-country Supremacism Global Metric record as served by `/sgm/countries`.
///
/// Optional fields that upstream leaves out stay out when the record is
/// serialized again, so a record passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMetric {
    /// ISO country identifier.
    pub code: String,
    pub country: String,
    #[serde(rename = "srsD", default, skip_serializing_if = "Option::is_none")]
    pub srs_d: Option<f64>,
    #[serde(rename = "srsI", default, skip_serializing_if = "Option::is_none")]
    pub srs_i: Option<f64>,
    /// Composite metric. The data model requires it, but older backends only
    /// send `gscs`, so it is tolerated as absent on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sgm: Option<f64>,
    /// Legacy alias for `sgm`. Read as a fallback only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gscs: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sti: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_tone: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Query parameters accepted by `/sgm/countries`. Unset fields are not sent,
/// leaving the server defaults (limit 200, details included) in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_details: Option<bool>,
}

/// Aggregate SGM figures for one world region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalSummary {
    pub region: String,
    pub avg_sgm: f64,
    /// Number of countries in the region.
    pub countries: u32,
    pub highest_country: String,
    pub highest_sgm: f64,
    pub lowest_country: String,
    pub lowest_sgm: f64,
}

// --- Analysis jobs ---

/// Returned when an analysis run is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisJob {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: String,
}

/// Backend-reported state of a submitted analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStatus {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// --- GDELT events and NLP ---

/// Daily GDELT event aggregate for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: String,
    pub country: String,
    pub event_count: i64,
    pub avg_tone: f64,
    pub event_codes: Vec<String>,
    pub themes: Vec<String>,
}

/// Query parameters accepted by `/gdelt/events`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// NLP analysis output for one country's news coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpResult {
    pub country: String,
    pub sentiment_score: f64,
    pub top_themes: Vec<String>,
    pub related_countries: Vec<String>,
    pub entity_analysis: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
