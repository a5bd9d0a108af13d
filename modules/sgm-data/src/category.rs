use std::fmt;

use serde::{Deserialize, Serialize};

use gdelt_client::CountryMetric;

/// Governance classification derived from a country's SGM score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Non-Supremacist Governance")]
    NonSupremacist,
    #[serde(rename = "Mixed Governance")]
    Mixed,
    #[serde(rename = "Soft Supremacism")]
    Soft,
    #[serde(rename = "Structural Supremacism")]
    Structural,
    #[serde(rename = "Extreme Supremacism")]
    Extreme,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::NonSupremacist,
        Category::Mixed,
        Category::Soft,
        Category::Structural,
        Category::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NonSupremacist => "Non-Supremacist Governance",
            Category::Mixed => "Mixed Governance",
            Category::Soft => "Soft Supremacism",
            Category::Structural => "Structural Supremacism",
            Category::Extreme => "Extreme Supremacism",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a score onto its bracket. Upper bounds are inclusive, so 2, 4, 6
/// and 8 fall into the lower bracket. NaN is scored as 0.
pub fn categorize(score: f64) -> Category {
    let score = if score.is_nan() { 0.0 } else { score };
    if score <= 2.0 {
        Category::NonSupremacist
    } else if score <= 4.0 {
        Category::Mixed
    } else if score <= 6.0 {
        Category::Soft
    } else if score <= 8.0 {
        Category::Structural
    } else {
        Category::Extreme
    }
}

/// Score used for classification: `sgm`, then legacy `gscs`, then 0.
pub fn classification_score(metric: &CountryMetric) -> f64 {
    metric.sgm.or(metric.gscs).unwrap_or(0.0)
}

/// Fill in `category` when upstream left it out. An existing label, even one
/// outside the five known categories, is never recomputed.
pub fn ensure_category(metric: &mut CountryMetric) {
    if metric.category.is_none() {
        let category = categorize(classification_score(metric));
        metric.category = Some(category.as_str().to_string());
    }
}
