//! Presentation response types
//!
//! Rounded, display-ready views of engine results, shared by the WASM
//! bindings and the terminal shell. Rounding happens here and nowhere in the
//! engine.

use crate::analysis::{Analysis, Band};
use crate::city::CityStats;
use crate::footprint::{Category, FootprintResult};
use crate::narrative::{narrate, Narrative};
use serde::{Deserialize, Serialize};

/// Round to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// One category row of the breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub tonnes_per_year: f64,
    /// Share of the total, in percent
    pub percent: f64,
}

/// Comparison against the global baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInfo {
    pub band: Band,
    pub band_label: String,
    pub ratio: f64,
    pub baseline_tonnes: f64,
    pub dominant_category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_share_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_potential_tonnes: Option<f64>,
}

/// Calculator result panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintReport {
    pub total_tonnes_per_year: f64,
    pub location_factor: f64,
    pub breakdown: Vec<CategoryInfo>,
    pub comparison: ComparisonInfo,
    pub narrative: Narrative,
    pub unit: String,
}

impl FootprintReport {
    pub fn new(result: &FootprintResult, analysis: &Analysis) -> Self {
        let total = result.total_tonnes_per_year();
        let breakdown = result
            .breakdown()
            .entries()
            .iter()
            .map(|(category, value)| CategoryInfo {
                category: *category,
                tonnes_per_year: round_to(*value, 2),
                percent: if total > 0.0 {
                    round_to(value / total * 100.0, 1)
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            total_tonnes_per_year: round_to(total, 2),
            location_factor: result.location_factor(),
            breakdown,
            comparison: ComparisonInfo {
                band: analysis.band,
                band_label: analysis.band.description().to_string(),
                ratio: round_to(analysis.ratio, 2),
                baseline_tonnes: analysis.baseline_tonnes_per_year,
                dominant_category: analysis.dominant_category,
                dominant_share_pct: analysis.dominant_share.map(|s| round_to(s * 100.0, 1)),
                reduction_potential_tonnes: analysis
                    .reduction_potential_30pct
                    .map(|t| round_to(t, 2)),
            },
            narrative: narrate(analysis),
            unit: "t CO₂/year".to_string(),
        }
    }
}

/// City panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub population: u32,
    pub green_score: String,
    pub renewable_energy: String,
}

impl From<CityStats> for CityInfo {
    fn from(stats: CityStats) -> Self {
        Self {
            population: stats.population,
            green_score: format!("{}%", stats.green_score_pct),
            renewable_energy: format!("{}%", stats.renewable_energy_pct),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>, field: Option<&str>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                field: field.map(str::to_string),
            },
        }
    }
}
