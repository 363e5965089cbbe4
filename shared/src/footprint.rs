//! Carbon footprint calculations
//!
//! Converts monthly activity quantities into annual emissions per category,
//! in tonnes CO₂-equivalent per year.
//!
//! # Model
//!
//! | Category  | Formula                                   |
//! |-----------|-------------------------------------------|
//! | transport | km × 0.21 × 12 × location factor / 1000   |
//! | energy    | kWh × 0.45 × 12 × location factor / 1000  |
//! | diet      | annual diet factor / 1000                 |
//! | waste     | kg × 52 × location factor / 1000          |
//!
//! Transport is always priced as car-equivalent distance. The other modes
//! are exposed through [`calculate_footprint_for_mode`].

use crate::errors::FootprintError;
use crate::location::{location_band, Location, DEFAULT_LOCATION_FACTOR};
use crate::validation::sanitize_quantity;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

// ============================================================================
// Emission Factors
// ============================================================================

/// Transport mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Car,
    Bus,
    Train,
    Bike,
    Walk,
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" => Ok(TransportMode::Car),
            "bus" => Ok(TransportMode::Bus),
            "train" => Ok(TransportMode::Train),
            "bike" | "bicycle" => Ok(TransportMode::Bike),
            "walk" => Ok(TransportMode::Walk),
            _ => Err(format!("Unknown transport mode: {}", s)),
        }
    }
}

/// Diet category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DietCategory {
    Meat,
    #[default]
    Balanced,
    Vegetarian,
    Vegan,
}

impl DietCategory {
    pub const ALL: [DietCategory; 4] = [
        DietCategory::Meat,
        DietCategory::Balanced,
        DietCategory::Vegetarian,
        DietCategory::Vegan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietCategory::Meat => "meat",
            DietCategory::Balanced => "balanced",
            DietCategory::Vegetarian => "vegetarian",
            DietCategory::Vegan => "vegan",
        }
    }
}

impl fmt::Display for DietCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DietCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        DietCategory::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = DietCategory::ALL.iter().map(|d| d.as_str()).collect();
                format!("Invalid diet category. Must be one of: {}", names.join(", "))
            })
    }
}

/// kg CO₂ per km, by mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransportFactors {
    pub car: f64,
    pub bus: f64,
    pub train: f64,
    pub bike: f64,
    pub walk: f64,
}

/// kg CO₂ per year, by diet
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DietFactors {
    pub meat: f64,
    pub balanced: f64,
    pub vegetarian: f64,
    pub vegan: f64,
}

/// Conversion constants from activity quantities to CO₂ mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionFactors {
    pub transport: TransportFactors,
    /// kg CO₂ per kWh (global average grid)
    pub electricity: f64,
    pub diet: DietFactors,
    /// kg CO₂ per kg of waste
    pub waste: f64,
}

impl EmissionFactors {
    pub fn transport(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Car => self.transport.car,
            TransportMode::Bus => self.transport.bus,
            TransportMode::Train => self.transport.train,
            TransportMode::Bike => self.transport.bike,
            TransportMode::Walk => self.transport.walk,
        }
    }

    pub fn diet(&self, diet: DietCategory) -> f64 {
        match diet {
            DietCategory::Meat => self.diet.meat,
            DietCategory::Balanced => self.diet.balanced,
            DietCategory::Vegetarian => self.diet.vegetarian,
            DietCategory::Vegan => self.diet.vegan,
        }
    }
}

/// The emission factor table used by every calculation
pub const EMISSION_FACTORS: EmissionFactors = EmissionFactors {
    transport: TransportFactors {
        car: 0.21,
        bus: 0.089,
        train: 0.041,
        bike: 0.0,
        walk: 0.0,
    },
    electricity: 0.45,
    diet: DietFactors {
        meat: 2500.0,
        balanced: 1800.0,
        vegetarian: 1200.0,
        vegan: 800.0,
    },
    waste: 52.0,
};

const MONTHS_PER_YEAR: f64 = 12.0;
const KG_PER_TONNE: f64 = 1000.0;

// ============================================================================
// Categories
// ============================================================================

/// Emission category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Transport,
    Energy,
    Diet,
    Waste,
}

impl Category {
    /// Fixed category order; also the tie-break priority (first wins)
    pub const ALL: [Category; 4] = [
        Category::Transport,
        Category::Energy,
        Category::Diet,
        Category::Waste,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Energy => "energy",
            Category::Diet => "diet",
            Category::Waste => "waste",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emissions per category in tonnes CO₂/year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub transport: f64,
    pub energy: f64,
    pub diet: f64,
    pub waste: f64,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Energy => self.energy,
            Category::Diet => self.diet,
            Category::Waste => self.waste,
        }
    }

    /// All four entries in fixed category order
    pub fn entries(&self) -> [(Category, f64); 4] {
        Category::ALL.map(|c| (c, self.get(c)))
    }

    /// Sum of all categories, accumulated in category order
    pub fn total(&self) -> f64 {
        self.entries().iter().fold(0.0, |sum, (_, value)| sum + value)
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// One calculation request. Quantities are monthly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityInput {
    /// Vehicle distance per month (km)
    #[serde(default)]
    pub monthly_distance_km: f64,
    /// Electricity use per month (kWh)
    #[serde(default)]
    pub monthly_energy_kwh: f64,
    #[serde(default)]
    pub diet: DietCategory,
    /// Waste per month (kg)
    #[serde(default)]
    pub monthly_waste_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl ActivityInput {
    /// True when there is at least one non-zero quantity to price
    pub fn has_activity(&self) -> bool {
        !(self.monthly_distance_km == 0.0
            && self.monthly_energy_kwh == 0.0
            && self.monthly_waste_kg == 0.0)
    }

    /// Coerce the quantities to finite, non-negative values (anything else becomes 0)
    pub fn sanitized(self) -> Self {
        Self {
            monthly_distance_km: sanitize_quantity(self.monthly_distance_km),
            monthly_energy_kwh: sanitize_quantity(self.monthly_energy_kwh),
            monthly_waste_kg: sanitize_quantity(self.monthly_waste_kg),
            ..self
        }
    }
}

/// Result of a footprint calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FootprintResult {
    breakdown: CategoryBreakdown,
    total_tonnes_per_year: f64,
    location_factor: f64,
}

impl FootprintResult {
    pub(crate) fn new(breakdown: CategoryBreakdown, location_factor: f64) -> Self {
        Self {
            total_tonnes_per_year: breakdown.total(),
            breakdown,
            location_factor,
        }
    }

    pub fn breakdown(&self) -> &CategoryBreakdown {
        &self.breakdown
    }

    pub fn total_tonnes_per_year(&self) -> f64 {
        self.total_tonnes_per_year
    }

    /// Regional multiplier that was applied
    pub fn location_factor(&self) -> f64 {
        self.location_factor
    }
}

/// Calculate the annual footprint for one set of monthly activities
///
/// Fails with [`FootprintError::InvalidInput`] when distance, energy and
/// waste are all zero. Diet always has a value and is not part of the check.
pub fn calculate_footprint(input: &ActivityInput) -> Result<FootprintResult, FootprintError> {
    calculate_footprint_for_mode(input, TransportMode::Car)
}

/// Like [`calculate_footprint`], pricing distance with the given transport mode
pub fn calculate_footprint_for_mode(
    input: &ActivityInput,
    mode: TransportMode,
) -> Result<FootprintResult, FootprintError> {
    if !input.has_activity() {
        return Err(FootprintError::nothing_to_calculate());
    }

    let factors = &EMISSION_FACTORS;
    let band = input.location.as_ref().and_then(|loc| location_band(loc.latitude));
    let location_factor = band.map_or(DEFAULT_LOCATION_FACTOR, |b| b.factor);

    let breakdown = CategoryBreakdown {
        transport: (input.monthly_distance_km
            * factors.transport(mode)
            * MONTHS_PER_YEAR
            * location_factor)
            / KG_PER_TONNE,
        energy: (input.monthly_energy_kwh * factors.electricity * MONTHS_PER_YEAR * location_factor)
            / KG_PER_TONNE,
        diet: factors.diet(input.diet) / KG_PER_TONNE,
        waste: (input.monthly_waste_kg * factors.waste * location_factor) / KG_PER_TONNE,
    };

    let result = FootprintResult::new(breakdown, location_factor);
    debug!(
        ?mode,
        diet = %input.diet,
        region = band.map_or("default", |b| b.region),
        location_factor,
        total = result.total_tonnes_per_year(),
        "footprint calculated"
    );
    Ok(result)
}
