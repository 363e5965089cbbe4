//! End-to-end tests of the footprint engine through the public API

use ecowise_shared::session::{record_calculation, rewards};
use ecowise_shared::types::FootprintReport;
use ecowise_shared::validation::RawActivityForm;
use ecowise_shared::{
    analyze, analyze_default, calculate_footprint, compute_location_factor, ActivityInput, Band,
    Category, DietCategory, EcoProfile, FootprintError, Location,
};

fn example_input() -> ActivityInput {
    ActivityInput {
        monthly_distance_km: 1000.0,
        monthly_energy_kwh: 300.0,
        diet: DietCategory::Balanced,
        monthly_waste_kg: 20.0,
        location: Some(Location::new(50.0, 10.0)),
    }
}

#[test]
fn test_reference_calculation() {
    let input = example_input();
    assert_eq!(compute_location_factor(input.location.as_ref()), 1.1);

    let result = calculate_footprint(&input).unwrap();
    let b = result.breakdown();
    assert!((b.transport - 2.772).abs() < 1e-9);
    assert!((b.energy - 1.782).abs() < 1e-9);
    assert!((b.diet - 1.8).abs() < 1e-9);
    assert!((b.waste - 1.144).abs() < 1e-9);
    assert!((result.total_tonnes_per_year() - 7.498).abs() < 1e-9);

    let analysis = analyze(&result, 4.8);
    assert_eq!(analysis.band, Band::AboveAverage);
    assert_eq!(analysis.dominant_category, Category::Transport);
    assert!((analysis.ratio - 1.5621).abs() < 1e-4);
    assert!((analysis.dominant_share.unwrap() - 0.3697).abs() < 1e-3);
    assert!((analysis.reduction_potential_30pct.unwrap() - 0.8316).abs() < 1e-9);
}

#[test]
fn test_nothing_to_calculate() {
    let input = ActivityInput {
        monthly_distance_km: 0.0,
        monthly_energy_kwh: 0.0,
        diet: DietCategory::Balanced,
        monthly_waste_kg: 0.0,
        location: Some(Location::new(65.0, 25.0)),
    };
    let err = calculate_footprint(&input).unwrap_err();
    assert!(matches!(err, FootprintError::InvalidInput(_)));
}

#[test]
fn test_form_to_report_flow() {
    let form: RawActivityForm = serde_json::from_str(
        r#"{
            "transport": "1000",
            "energy": "300",
            "diet": "balanced",
            "waste": "20",
            "location": { "latitude": 50.0, "longitude": 10.0 }
        }"#,
    )
    .unwrap();

    let input = form.into_activity_input().unwrap();
    assert_eq!(input, example_input());

    let result = calculate_footprint(&input).unwrap();
    let report = FootprintReport::new(&result, &analyze_default(&result));
    assert_eq!(report.total_tonnes_per_year, 7.5);
    assert!(report.narrative.summary.starts_with("You're 56% above global average"));

    let profile = record_calculation(EcoProfile::default(), &result, chrono::Utc::now());
    assert_eq!(profile.eco_score, 850 + rewards::CALCULATION);
    assert_eq!(
        profile.last_calculation.unwrap().breakdown,
        *result.breakdown()
    );
}

#[test]
fn test_blank_form_is_rejected_by_engine() {
    let input = RawActivityForm::default().into_activity_input().unwrap();
    assert!(calculate_footprint(&input).is_err());
}
