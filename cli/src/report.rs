//! Plain-text rendering for the terminal

use ecowise_shared::coach::InsightCard;
use ecowise_shared::session::footprint_trend;
use ecowise_shared::types::{CityInfo, FootprintReport};
use ecowise_shared::{CityBuilding, EcoProfile, EmissionUnit};
use std::fmt::Write;

fn amount(tonnes: f64, unit: EmissionUnit) -> String {
    let value = unit.from_tonnes(tonnes);
    match unit {
        EmissionUnit::Tonnes => format!("{:.2} {}", value, unit.abbreviation()),
        EmissionUnit::Kg => format!("{:.0} {}", value, unit.abbreviation()),
    }
}

/// Calculator result panel
pub fn render_report(report: &FootprintReport, unit: EmissionUnit) -> String {
    let mut out = String::new();
    let c = &report.comparison;

    let _ = writeln!(out, "Annual footprint: {}/year", amount(report.total_tonnes_per_year, unit));
    let _ = writeln!(out, "Location factor:  x{}", report.location_factor);
    let _ = writeln!(out);

    for row in &report.breakdown {
        let _ = writeln!(
            out,
            "  {:<10} {:>14}  {:>5.1}%",
            row.category.as_str(),
            amount(row.tonnes_per_year, unit),
            row.percent
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} ({:.2}x the {} baseline)",
        c.band_label,
        c.ratio,
        amount(c.baseline_tonnes, unit)
    );
    let _ = writeln!(out, "{}", report.narrative.summary);
    for insight in &report.narrative.insights {
        let _ = writeln!(out, "  - {}", insight);
    }
    out
}

/// City panel with the placed buildings
pub fn render_city(info: &CityInfo, buildings: &[CityBuilding]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Population:       {}", info.population);
    let _ = writeln!(out, "Green score:      {}", info.green_score);
    let _ = writeln!(out, "Renewable energy: {}", info.renewable_energy);

    if !buildings.is_empty() {
        let _ = writeln!(out);
        for b in buildings {
            let _ = writeln!(
                out,
                "  {:<12} at ({:>6.1}, {:>6.1})  height {:.1}",
                b.kind.as_str(),
                b.position.x,
                b.position.z,
                b.height
            );
        }
    }
    out
}

pub fn render_insights(cards: &[InsightCard]) -> String {
    cards
        .iter()
        .map(|card| format!("{}\n  {}\n", card.title, card.description))
        .collect()
}

/// Score, points and calculation history
pub fn render_profile(profile: &EcoProfile, unit: EmissionUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "EcoScore:     {}", profile.eco_score);
    let _ = writeln!(out, "EcoPoints:    {}", profile.eco_points);
    let _ = writeln!(out, "Calculations: {}", profile.calculation_log.len());
    let _ = writeln!(out, "Buildings:    {}", profile.city_buildings.len());

    if let Some(last) = &profile.last_calculation {
        let _ = writeln!(
            out,
            "Last result:  {}/year on {}",
            amount(last.footprint, unit),
            last.date.format("%Y-%m-%d")
        );
    }
    match footprint_trend(profile) {
        Some(trend) if trend == 0.0 => {
            let _ = writeln!(out, "Trend:        unchanged");
        }
        Some(trend) => {
            let direction = if trend < 0.0 { "down" } else { "up" };
            let _ = writeln!(out, "Trend:        {} {}", direction, amount(trend.abs(), unit));
        }
        None => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ecowise_shared::session::record_calculation;
    use ecowise_shared::{analyze_default, calculate_footprint, ActivityInput, DietCategory, Location};

    fn example_report() -> FootprintReport {
        let result = calculate_footprint(&ActivityInput {
            monthly_distance_km: 1000.0,
            monthly_energy_kwh: 300.0,
            diet: DietCategory::Balanced,
            monthly_waste_kg: 20.0,
            location: Some(Location::new(50.0, 10.0)),
        })
        .unwrap();
        FootprintReport::new(&result, &analyze_default(&result))
    }

    #[test]
    fn test_render_report_tonnes() {
        let text = render_report(&example_report(), EmissionUnit::Tonnes);
        assert!(text.starts_with("Annual footprint: 7.50 t CO₂/year"));
        assert!(text.contains("transport"));
        assert!(text.contains("Above global average (1.56x the 4.80 t CO₂ baseline)"));
        assert!(text.contains("  - Focus on transport first - it represents 37% of your footprint"));
    }

    #[test]
    fn test_render_report_kg() {
        let text = render_report(&example_report(), EmissionUnit::Kg);
        assert!(text.starts_with("Annual footprint: 7500 kg CO₂/year"));
    }

    #[test]
    fn test_render_profile_trend() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let higher = calculate_footprint(&ActivityInput {
            monthly_distance_km: 500.0,
            ..Default::default()
        })
        .unwrap();
        let lower = calculate_footprint(&ActivityInput {
            monthly_distance_km: 250.0,
            ..Default::default()
        })
        .unwrap();

        let profile = record_calculation(EcoProfile::default(), &higher, at);
        let profile = record_calculation(profile, &lower, at);
        let text = render_profile(&profile, EmissionUnit::Tonnes);

        assert!(text.contains("EcoScore:     870"));
        assert!(text.contains("Calculations: 2"));
        assert!(text.contains("on 2024-05-01"));
        assert!(text.contains("Trend:        down"));
    }

    #[test]
    fn test_render_profile_unchanged_trend() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let result = calculate_footprint(&ActivityInput {
            monthly_energy_kwh: 120.0,
            ..Default::default()
        })
        .unwrap();

        let profile = record_calculation(EcoProfile::default(), &result, at);
        let profile = record_calculation(profile, &result, at);
        let text = render_profile(&profile, EmissionUnit::Tonnes);

        assert!(text.contains("Trend:        unchanged"));
        assert!(!text.contains("down"));
    }

    #[test]
    fn test_render_empty_city() {
        let info = CityInfo {
            population: 1000,
            green_score: "0%".to_string(),
            renewable_energy: "0%".to_string(),
        };
        let text = render_city(&info, &[]);
        assert_eq!(text.lines().count(), 3);
    }
}
