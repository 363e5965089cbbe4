//! Comparative analysis of a footprint against the global baseline

use crate::footprint::{Category, FootprintResult};
use serde::{Deserialize, Serialize};

/// Global average annual footprint, tonnes CO₂/year
pub const DEFAULT_BASELINE_TONNES: f64 = 4.8;

/// Ratio below which a footprint counts as leading
pub const LEADER_RATIO: f64 = 0.7;

/// Share of the dominant category used for the reduction estimate
pub const REDUCTION_FRACTION: f64 = 0.3;

/// Classification against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Band {
    /// Well below average (ratio < 0.7)
    Leader,
    /// Below average with room to improve (0.7 ≤ ratio < 1.0)
    Good,
    /// At or above average
    AboveAverage,
}

impl Band {
    pub fn classify(ratio: f64) -> Self {
        if ratio < LEADER_RATIO {
            Band::Leader
        } else if ratio < 1.0 {
            Band::Good
        } else {
            Band::AboveAverage
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Band::Leader => "Sustainability leader",
            Band::Good => "Below global average",
            Band::AboveAverage => "Above global average",
        }
    }
}

/// Structured analysis of one footprint result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub band: Band,
    /// total / baseline
    pub ratio: f64,
    pub baseline_tonnes_per_year: f64,
    pub total_tonnes_per_year: f64,
    pub dominant_category: Category,
    /// Tonnes/year of the dominant category
    pub dominant_value: f64,
    /// Fraction of the total taken by the dominant category; only for `AboveAverage`
    pub dominant_share: Option<f64>,
    /// Tonnes/year saved by cutting the dominant category by 30%; only for `AboveAverage`
    pub reduction_potential_30pct: Option<f64>,
}

/// Find the largest category; ties go to the earliest in [`Category::ALL`]
pub fn dominant_category(result: &FootprintResult) -> (Category, f64) {
    result
        .breakdown()
        .entries()
        .into_iter()
        .fold(None, |best: Option<(Category, f64)>, (category, value)| match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((category, value)),
        })
        .unwrap_or((Category::Transport, 0.0))
}

/// Compare a result against a baseline footprint
pub fn analyze(result: &FootprintResult, baseline_tonnes_per_year: f64) -> Analysis {
    let total = result.total_tonnes_per_year();
    let ratio = total / baseline_tonnes_per_year;
    let band = Band::classify(ratio);
    let (dominant, dominant_value) = dominant_category(result);

    let (dominant_share, reduction_potential_30pct) = match band {
        Band::AboveAverage => {
            let share = if total > 0.0 { dominant_value / total } else { 0.0 };
            (Some(share), Some(dominant_value * REDUCTION_FRACTION))
        }
        Band::Leader | Band::Good => (None, None),
    };

    Analysis {
        band,
        ratio,
        baseline_tonnes_per_year,
        total_tonnes_per_year: total,
        dominant_category: dominant,
        dominant_value,
        dominant_share,
        reduction_potential_30pct,
    }
}

/// [`analyze`] against [`DEFAULT_BASELINE_TONNES`]
pub fn analyze_default(result: &FootprintResult) -> Analysis {
    analyze(result, DEFAULT_BASELINE_TONNES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::{calculate_footprint, ActivityInput, CategoryBreakdown, DietCategory};
    use crate::location::Location;
    use proptest::prelude::*;

    fn footprint(distance: f64, energy: f64, diet: DietCategory, waste: f64) -> FootprintResult {
        calculate_footprint(&ActivityInput {
            monthly_distance_km: distance,
            monthly_energy_kwh: energy,
            diet,
            monthly_waste_kg: waste,
            location: None,
        })
        .unwrap()
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(Band::classify(0.0), Band::Leader);
        assert_eq!(Band::classify(0.69), Band::Leader);
        assert_eq!(Band::classify(0.7), Band::Good);
        assert_eq!(Band::classify(0.99), Band::Good);
        assert_eq!(Band::classify(1.0), Band::AboveAverage);
        assert_eq!(Band::classify(3.0), Band::AboveAverage);
    }

    #[test]
    fn test_end_to_end_analysis() {
        let result = calculate_footprint(&ActivityInput {
            monthly_distance_km: 1000.0,
            monthly_energy_kwh: 300.0,
            diet: DietCategory::Balanced,
            monthly_waste_kg: 20.0,
            location: Some(Location::new(50.0, 10.0)),
        })
        .unwrap();

        let analysis = analyze_default(&result);
        assert_eq!(analysis.band, Band::AboveAverage);
        assert!((analysis.ratio - 1.5621).abs() < 1e-4);
        assert_eq!(analysis.dominant_category, Category::Transport);
        assert!((analysis.dominant_share.unwrap() - 0.3697).abs() < 1e-3);
        assert!((analysis.reduction_potential_30pct.unwrap() - 0.8316).abs() < 1e-9);
    }

    #[test]
    fn test_tie_prefers_transport() {
        // transport = km * 0.21 * 12 / 1000, energy = kWh * 0.45 * 12 / 1000
        // 450 km and 210 kWh both give 1.134 t
        let result = footprint(450.0, 210.0, DietCategory::Vegan, 0.0);
        let b = result.breakdown();
        assert_eq!(b.transport, b.energy);

        let (dominant, _) = dominant_category(&result);
        assert_eq!(dominant, Category::Transport);
    }

    #[test]
    fn test_diet_dominates_small_inputs() {
        let result = footprint(10.0, 0.0, DietCategory::Meat, 0.0);
        let analysis = analyze_default(&result);
        assert_eq!(analysis.dominant_category, Category::Diet);
        assert_eq!(analysis.band, Band::Leader);
        assert!(analysis.dominant_share.is_none());
        assert!(analysis.reduction_potential_30pct.is_none());
    }

    #[test]
    fn test_good_band() {
        // 2.5 (diet) + 1.26 (transport) = 3.76 t -> ratio ~0.78
        let result = footprint(500.0, 0.0, DietCategory::Meat, 0.0);
        let analysis = analyze_default(&result);
        assert_eq!(analysis.band, Band::Good);
        assert_eq!(analysis.dominant_category, Category::Diet);
    }

    #[test]
    fn test_zero_baseline_share_guard() {
        // A zero baseline pushes every result into the above-average band;
        // share stays finite
        let result = footprint(100.0, 0.0, DietCategory::Vegan, 0.0);
        let analysis = analyze(&result, 0.0);
        assert_eq!(analysis.band, Band::AboveAverage);
        assert!(analysis.dominant_share.unwrap().is_finite());
    }

    #[test]
    fn test_zero_total_share_is_zero() {
        // 0 / 0 gives a NaN ratio, which classifies as above average
        let result = FootprintResult::new(CategoryBreakdown::default(), 1.0);
        let analysis = analyze(&result, 0.0);
        assert_eq!(analysis.band, Band::AboveAverage);
        assert_eq!(analysis.total_tonnes_per_year, 0.0);
        assert_eq!(analysis.dominant_category, Category::Transport);
        assert_eq!(analysis.dominant_share, Some(0.0));
        assert_eq!(analysis.reduction_potential_30pct, Some(0.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: the dominant category holds the maximum value
        #[test]
        fn prop_dominant_is_max(
            distance in 0.0f64..5000.0,
            energy in 0.0f64..2000.0,
            waste in 0.01f64..200.0
        ) {
            let result = footprint(distance, energy, DietCategory::Balanced, waste);
            let (_, value) = dominant_category(&result);
            for (_, v) in result.breakdown().entries() {
                prop_assert!(value >= v);
            }
        }

        /// Property: dominant share is a fraction in [0, 1]
        #[test]
        fn prop_share_is_fraction(distance in 2000.0f64..20000.0, energy in 0.0f64..2000.0) {
            let result = footprint(distance, energy, DietCategory::Meat, 0.0);
            let analysis = analyze_default(&result);
            let share = analysis.dominant_share.unwrap();
            prop_assert!((0.0..=1.0).contains(&share));
        }
    }
}
