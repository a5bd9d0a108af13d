//! SGM data access layer.
//!
//! Thin wrappers over the analysis API that pass results through and fill in
//! the governance `category` of country metrics when upstream left it out.

pub mod category;
pub mod service;
pub mod traits;

pub use category::{categorize, classification_score, ensure_category, Category};
pub use service::SgmDataService;
pub use traits::GdeltSource;

pub use gdelt_client::{
    AnalysisJob, AnalysisStatus, CountryMetric, CountryQuery, EventQuery, EventRecord,
    GdeltClient, GdeltError, NlpResult, RegionalSummary, Result,
};
