//! Human-readable summary and insights built from an [`Analysis`]

use crate::analysis::{Analysis, Band};
use serde::{Deserialize, Serialize};

/// Summary line plus supporting insights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub summary: String,
    pub insights: [String; 3],
}

/// Whole percent, rounded half away from zero; non-finite fractions read as 0
fn percent(fraction: f64) -> i64 {
    let value = (fraction * 100.0).round();
    if value.is_finite() {
        value as i64
    } else {
        0
    }
}

/// Render the narrative for an analysis
pub fn narrate(analysis: &Analysis) -> Narrative {
    let area = analysis.dominant_category.as_str();

    match analysis.band {
        Band::Leader => Narrative {
            summary: format!(
                "Outstanding! Your footprint is {}% below the global average. You're a sustainability leader! 🌟",
                percent(1.0 - analysis.ratio)
            ),
            insights: [
                "You could inspire others by sharing your sustainable practices".to_string(),
                "Consider carbon offsetting to achieve net-negative emissions".to_string(),
                "Your lifestyle choices are making a significant positive impact".to_string(),
            ],
        },
        Band::Good => Narrative {
            summary: format!(
                "Great job! You're {}% below the global average with room for optimization. 👍",
                percent(1.0 - analysis.ratio)
            ),
            insights: [
                format!(
                    "Your {} emissions ({:.1}t) offer the biggest improvement opportunity",
                    area, analysis.dominant_value
                ),
                "Small changes in daily habits could push you well below global average".to_string(),
                "You're on track to inspire positive change in your community".to_string(),
            ],
        },
        Band::AboveAverage => Narrative {
            summary: format!(
                "You're {}% above global average, but don't worry - I have a personalized plan to help! 🎯",
                percent(analysis.ratio - 1.0)
            ),
            insights: [
                format!(
                    "Focus on {} first - it represents {}% of your footprint",
                    area,
                    percent(analysis.dominant_share.unwrap_or(0.0))
                ),
                format!(
                    "Reducing {} by 30% would save {:.1} tons CO₂ annually",
                    area,
                    analysis.reduction_potential_30pct.unwrap_or(0.0)
                ),
                "Quick wins in this area can rapidly improve your environmental impact".to_string(),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, analyze_default};
    use crate::footprint::{calculate_footprint, ActivityInput, DietCategory};
    use crate::location::Location;

    fn narrate_input(input: ActivityInput) -> Narrative {
        let result = calculate_footprint(&input).unwrap();
        narrate(&analyze_default(&result))
    }

    #[test]
    fn test_above_average_narrative() {
        let narrative = narrate_input(ActivityInput {
            monthly_distance_km: 1000.0,
            monthly_energy_kwh: 300.0,
            diet: DietCategory::Balanced,
            monthly_waste_kg: 20.0,
            location: Some(Location::new(50.0, 10.0)),
        });

        assert_eq!(
            narrative.summary,
            "You're 56% above global average, but don't worry - I have a personalized plan to help! 🎯"
        );
        assert_eq!(
            narrative.insights[0],
            "Focus on transport first - it represents 37% of your footprint"
        );
        assert_eq!(
            narrative.insights[1],
            "Reducing transport by 30% would save 0.8 tons CO₂ annually"
        );
    }

    #[test]
    fn test_good_narrative() {
        // 3.76 t total -> 22% below
        let narrative = narrate_input(ActivityInput {
            monthly_distance_km: 500.0,
            monthly_energy_kwh: 0.0,
            diet: DietCategory::Meat,
            monthly_waste_kg: 0.0,
            location: None,
        });
        assert!(narrative.summary.starts_with("Great job! You're 22% below"));
        assert_eq!(
            narrative.insights[0],
            "Your diet emissions (2.5t) offer the biggest improvement opportunity"
        );
    }

    #[test]
    fn test_leader_narrative() {
        // 0.8 + 0.052 = 0.852 t -> ratio 0.1775 -> 82% below
        let narrative = narrate_input(ActivityInput {
            monthly_distance_km: 0.0,
            monthly_energy_kwh: 0.0,
            diet: DietCategory::Vegan,
            monthly_waste_kg: 1.0,
            location: None,
        });
        assert!(narrative.summary.starts_with("Outstanding! Your footprint is 82% below"));
    }

    #[test]
    fn test_percent_of_non_finite_is_zero() {
        assert_eq!(percent(0.564), 56);
        assert_eq!(percent(f64::INFINITY), 0);
        assert_eq!(percent(f64::NEG_INFINITY), 0);
        assert_eq!(percent(f64::NAN), 0);
    }

    #[test]
    fn test_zero_baseline_keeps_numbers_readable() {
        let result = calculate_footprint(&ActivityInput {
            monthly_energy_kwh: 100.0,
            ..ActivityInput::default()
        })
        .unwrap();
        let narrative = narrate(&analyze(&result, 0.0));
        assert_eq!(
            narrative.summary,
            "You're 0% above global average, but don't worry - I have a personalized plan to help! 🎯"
        );
    }
}
