//! Session data models
//!
//! The profile is owned by the caller and passed through the pure functions
//! in [`crate::session`] and [`crate::city`]. Persisting it (browser local
//! storage, a JSON file) is the caller's concern.

use crate::footprint::{CategoryBreakdown, FootprintResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// EcoScore a new profile starts with
pub const INITIAL_ECO_SCORE: i64 = 850;

/// EcoPoints a new profile starts with
pub const INITIAL_ECO_POINTS: u32 = 250;

/// Key the browser shell stores the profile under
pub const PROFILE_STORAGE_KEY: &str = "ecowise_profile";

/// One logged footprint calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub date: DateTime<Utc>,
    /// Total tonnes CO₂/year
    pub footprint: f64,
    pub breakdown: CategoryBreakdown,
}

impl CalculationRecord {
    pub fn new(result: &FootprintResult, date: DateTime<Utc>) -> Self {
        Self {
            date,
            footprint: result.total_tonnes_per_year(),
            breakdown: *result.breakdown(),
        }
    }
}

/// Eco-city building type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Solar,
    Wind,
    Park,
}

impl BuildingKind {
    /// Kinds the starter city is generated from
    pub const STARTER: [BuildingKind; 3] = [
        BuildingKind::Residential,
        BuildingKind::Commercial,
        BuildingKind::Industrial,
    ];

    /// Renewable or green-space building
    pub fn is_green(&self) -> bool {
        matches!(self, BuildingKind::Solar | BuildingKind::Wind | BuildingKind::Park)
    }

    /// Rendered height in scene units for buildings the player places
    pub fn placed_height(&self) -> f64 {
        match self {
            BuildingKind::Wind => 8.0,
            BuildingKind::Solar => 0.5,
            _ => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingKind::Residential => "residential",
            BuildingKind::Commercial => "commercial",
            BuildingKind::Industrial => "industrial",
            BuildingKind::Solar => "solar",
            BuildingKind::Wind => "wind",
            BuildingKind::Park => "park",
        }
    }
}

impl std::str::FromStr for BuildingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "residential" => Ok(BuildingKind::Residential),
            "commercial" => Ok(BuildingKind::Commercial),
            "industrial" => Ok(BuildingKind::Industrial),
            "solar" => Ok(BuildingKind::Solar),
            "wind" => Ok(BuildingKind::Wind),
            "park" => Ok(BuildingKind::Park),
            _ => Err(format!("Unknown building type: {}", s)),
        }
    }
}

/// Ground-plane position in the city scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GroundPosition {
    pub x: f64,
    pub z: f64,
}

/// A building in the player's eco-city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBuilding {
    pub kind: BuildingKind,
    pub position: GroundPosition,
    pub height: f64,
    pub built_at: DateTime<Utc>,
}

/// Caller-owned session profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoProfile {
    pub id: Uuid,
    pub eco_score: i64,
    pub eco_points: u32,
    #[serde(default)]
    pub last_calculation: Option<CalculationRecord>,
    #[serde(default)]
    pub calculation_log: Vec<CalculationRecord>,
    #[serde(default)]
    pub city_buildings: Vec<CityBuilding>,
    /// Set once the starter city has been laid out
    #[serde(default)]
    pub city_founded: bool,
    #[serde(default)]
    pub completed_actions: Vec<String>,
}

impl Default for EcoProfile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            eco_score: INITIAL_ECO_SCORE,
            eco_points: INITIAL_ECO_POINTS,
            last_calculation: None,
            calculation_log: Vec::new(),
            city_buildings: Vec::new(),
            city_founded: false,
            completed_actions: Vec::new(),
        }
    }
}
