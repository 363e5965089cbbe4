//! Eco-city builder rules and statistics

use crate::errors::CityError;
use crate::models::{BuildingKind, CityBuilding, EcoProfile, GroundPosition};
use crate::session::{adjust_points, award_score};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of buildings in a freshly generated city
pub const STARTER_BUILDINGS: usize = 15;

/// Half-width of the ground area starter buildings are scattered over
pub const STARTER_HALF_EXTENT: f64 = 15.0;

const BASE_POPULATION: u32 = 1000;
const POPULATION_PER_BUILDING: u32 = 100;
const RENEWABLE_PCT_PER_GREEN_BUILDING: u32 = 12;

/// Derived statistics for the city panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStats {
    pub population: u32,
    pub green_score_pct: u32,
    pub renewable_energy_pct: u32,
}

/// Compute population, green score and renewable share
pub fn city_stats(buildings: &[CityBuilding]) -> CityStats {
    let total = buildings.len() as u32;
    let green = buildings.iter().filter(|b| b.kind.is_green()).count() as u32;

    let green_score_pct = if total == 0 {
        0
    } else {
        ((green as f64 / total as f64) * 100.0).round().min(100.0) as u32
    };

    CityStats {
        population: total * POPULATION_PER_BUILDING + BASE_POPULATION,
        green_score_pct,
        renewable_energy_pct: (green * RENEWABLE_PCT_PER_GREEN_BUILDING).min(100),
    }
}

/// Place a building bought with EcoPoints
///
/// Deducts `cost` points and awards `cost / 5` EcoScore.
pub fn place_building(
    profile: EcoProfile,
    kind: BuildingKind,
    cost: u32,
    position: GroundPosition,
    at: DateTime<Utc>,
) -> Result<EcoProfile, CityError> {
    if profile.eco_points < cost {
        return Err(CityError::InsufficientPoints {
            needed: cost,
            available: profile.eco_points,
        });
    }

    let profile = adjust_points(profile, -(cost as i64));
    let mut profile = award_score(profile, (cost / 5) as i64);
    profile.city_buildings.push(CityBuilding {
        kind,
        position,
        height: kind.placed_height(),
        built_at: at,
    });

    debug!(kind = kind.as_str(), cost, points_left = profile.eco_points, "building placed");
    Ok(profile)
}

/// Generate the starter city of mixed residential/commercial/industrial blocks
pub fn seed_initial_city<R: Rng>(rng: &mut R, at: DateTime<Utc>) -> Vec<CityBuilding> {
    (0..STARTER_BUILDINGS)
        .map(|_| {
            let x = rng.gen_range(-STARTER_HALF_EXTENT..STARTER_HALF_EXTENT);
            let z = rng.gen_range(-STARTER_HALF_EXTENT..STARTER_HALF_EXTENT);
            let kind = BuildingKind::STARTER[rng.gen_range(0..BuildingKind::STARTER.len())];
            let height = rng.gen_range(2.0..7.0);
            CityBuilding {
                kind,
                position: GroundPosition { x, z },
                height,
                built_at: at,
            }
        })
        .collect()
}

/// Lay out the starter city the first time the city is opened
///
/// Starter blocks go in front of anything already placed. Once the city is
/// founded the profile is returned unchanged.
pub fn found_city<R: Rng>(mut profile: EcoProfile, rng: &mut R, at: DateTime<Utc>) -> EcoProfile {
    if profile.city_founded {
        return profile;
    }

    let mut buildings = seed_initial_city(rng, at);
    buildings.append(&mut profile.city_buildings);
    profile.city_buildings = buildings;
    profile.city_founded = true;

    debug!(buildings = profile.city_buildings.len(), "city founded");
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn building(kind: BuildingKind) -> CityBuilding {
        CityBuilding {
            kind,
            position: GroundPosition::default(),
            height: kind.placed_height(),
            built_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_city_stats() {
        let stats = city_stats(&[]);
        assert_eq!(stats.population, 1000);
        assert_eq!(stats.green_score_pct, 0);
        assert_eq!(stats.renewable_energy_pct, 0);
    }

    #[test]
    fn test_city_stats() {
        let buildings = vec![
            building(BuildingKind::Residential),
            building(BuildingKind::Solar),
            building(BuildingKind::Park),
        ];
        let stats = city_stats(&buildings);
        assert_eq!(stats.population, 1300);
        assert_eq!(stats.green_score_pct, 67);
        assert_eq!(stats.renewable_energy_pct, 24);
    }

    #[test]
    fn test_renewable_capped() {
        let buildings: Vec<_> = (0..10).map(|_| building(BuildingKind::Wind)).collect();
        let stats = city_stats(&buildings);
        assert_eq!(stats.green_score_pct, 100);
        assert_eq!(stats.renewable_energy_pct, 100);
    }

    #[test]
    fn test_place_building() {
        let profile = EcoProfile::default();
        let profile = place_building(
            profile,
            BuildingKind::Solar,
            100,
            GroundPosition { x: 1.0, z: -2.0 },
            Utc::now(),
        )
        .unwrap();

        assert_eq!(profile.eco_points, 150);
        assert_eq!(profile.eco_score, 870);
        assert_eq!(profile.city_buildings.len(), 1);
        assert_eq!(profile.city_buildings[0].height, 0.5);
    }

    #[test]
    fn test_place_building_insufficient_points() {
        let profile = EcoProfile::default();
        let err = place_building(
            profile,
            BuildingKind::Wind,
            300,
            GroundPosition::default(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CityError::InsufficientPoints {
                needed: 300,
                available: 250
            }
        );
    }

    #[test]
    fn test_seed_initial_city() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let city = seed_initial_city(&mut rng, Utc::now());
        assert_eq!(city.len(), STARTER_BUILDINGS);
        for b in &city {
            assert!(!b.kind.is_green());
            assert!(b.position.x >= -15.0 && b.position.x < 15.0);
            assert!(b.position.z >= -15.0 && b.position.z < 15.0);
            assert!(b.height >= 2.0 && b.height < 7.0);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let again = seed_initial_city(&mut rng, city[0].built_at);
        assert_eq!(city, again);
    }

    #[test]
    fn test_found_city_once() {
        let at = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let profile = found_city(EcoProfile::default(), &mut rng, at);
        assert!(profile.city_founded);
        assert_eq!(profile.city_buildings.len(), STARTER_BUILDINGS);

        let stats = city_stats(&profile.city_buildings);
        assert_eq!(stats.population, 2500);
        assert_eq!(stats.green_score_pct, 0);

        let again = found_city(profile.clone(), &mut rng, at);
        assert_eq!(again, profile);
    }

    #[test]
    fn test_found_city_keeps_placed_buildings() {
        let mut profile = EcoProfile::default();
        profile.city_buildings.push(building(BuildingKind::Park));

        let profile = found_city(profile, &mut ChaCha8Rng::seed_from_u64(3), Utc::now());
        assert_eq!(profile.city_buildings.len(), STARTER_BUILDINGS + 1);
        assert_eq!(profile.city_buildings.last().unwrap().kind, BuildingKind::Park);

        // 1 green of 16
        let stats = city_stats(&profile.city_buildings);
        assert_eq!(stats.population, 2600);
        assert_eq!(stats.green_score_pct, 6);
        assert_eq!(stats.renewable_energy_pct, 12);
    }
}
