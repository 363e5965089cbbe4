//! Unit conversion for calculator input and display
//!
//! The engine works in km, kg and tonnes CO₂. Values entered in other units
//! are converted at the boundary, before they reach the calculation.

use serde::{Deserialize, Serialize};
use std::fmt;

const KM_PER_MILE: f64 = 1.609344;
const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Distance Units
// ============================================================================

/// Distance unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

impl DistanceUnit {
    /// Convert from this unit to kilometers
    pub fn to_km(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Km => value,
            DistanceUnit::Miles => value * KM_PER_MILE,
        }
    }

    /// Convert from kilometers to this unit
    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Km => km,
            DistanceUnit::Miles => km / KM_PER_MILE,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Km),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass unit preference (household waste)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    #[default]
    Kg,
    Lbs,
}

impl MassUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            MassUnit::Kg => value,
            MassUnit::Lbs => value * KG_PER_LB,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            MassUnit::Kg => kg,
            MassUnit::Lbs => kg / KG_PER_LB,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            MassUnit::Kg => "kg",
            MassUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for MassUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(MassUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(MassUnit::Lbs),
            _ => Err(format!("Unknown mass unit: {}", s)),
        }
    }
}

// ============================================================================
// Emission Units
// ============================================================================

/// Display unit for CO₂ amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmissionUnit {
    #[default]
    Tonnes,
    Kg,
}

impl EmissionUnit {
    /// Convert from tonnes CO₂ to this unit
    pub fn from_tonnes(&self, tonnes: f64) -> f64 {
        match self {
            EmissionUnit::Tonnes => tonnes,
            EmissionUnit::Kg => tonnes * 1000.0,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            EmissionUnit::Tonnes => "t CO₂",
            EmissionUnit::Kg => "kg CO₂",
        }
    }
}
