//! Input validation and coercion
//!
//! The calculator form is permissive: blank, non-numeric or negative
//! quantities are treated as zero before they reach the engine. Location and
//! diet are checked strictly.

use crate::footprint::{ActivityInput, DietCategory};
use crate::location::Location;
use crate::units::{DistanceUnit, MassUnit};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Coerce a quantity to a finite, non-negative number (anything else becomes 0)
pub fn sanitize_quantity(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a form field; unparsable text counts as 0
pub fn parse_quantity(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(sanitize_quantity)
        .unwrap_or(0.0)
}

/// Parse a diet category (case-insensitive)
pub fn parse_diet_category(value: &str) -> Result<DietCategory, String> {
    value.parse()
}

/// Validate latitude/longitude ranges
pub fn validate_location(location: &Location) -> Result<(), String> {
    if !location.latitude.is_finite() || !location.longitude.is_finite() {
        return Err("Location must be a valid number".to_string());
    }
    location.validate().map_err(|e| {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        format!("Location out of range: {}", fields.join(", "))
    })
}

// ============================================================================
// Raw form input
// ============================================================================

/// Calculator form exactly as the UI submits it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawActivityForm {
    #[serde(default)]
    pub transport: String,
    #[serde(default)]
    pub energy: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default)]
    pub waste: String,
    #[serde(default)]
    pub distance_unit: DistanceUnit,
    #[serde(default)]
    pub waste_unit: MassUnit,
    #[serde(default)]
    pub location: Option<Location>,
}

impl RawActivityForm {
    /// Coerce the form into engine input
    ///
    /// Quantities are coerced leniently. An unknown diet or an out-of-range
    /// location is rejected with a field-labelled error.
    pub fn into_activity_input(self) -> Result<ActivityInput, ValidationError> {
        let diet = if self.diet.trim().is_empty() {
            DietCategory::default()
        } else {
            parse_diet_category(&self.diet).map_err(|msg| ValidationError::new("diet", &msg))?
        };

        if let Some(location) = &self.location {
            validate_location(location).map_err(|msg| ValidationError::new("location", &msg))?;
        }

        Ok(ActivityInput {
            monthly_distance_km: self.distance_unit.to_km(parse_quantity(&self.transport)),
            monthly_energy_kwh: parse_quantity(&self.energy),
            diet,
            monthly_waste_kg: self.waste_unit.to_kg(parse_quantity(&self.waste)),
            location: self.location,
        })
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "transport" | "monthly_distance_km" => "Monthly Distance",
        "energy" | "monthly_energy_kwh" => "Monthly Electricity",
        "diet" => "Diet Type",
        "waste" | "monthly_waste_kg" => "Monthly Waste",
        "location" => "Location",
        "distance_unit" => "Distance Unit",
        "waste_unit" => "Waste Unit",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ValidationError {}
