//! EcoWise Shared Library
//!
//! The carbon-footprint engine and the pure domain logic around it, used by
//! the WASM bindings and the terminal shell.

pub mod analysis;
pub mod city;
pub mod coach;
pub mod errors;
pub mod footprint;
pub mod location;
pub mod models;
pub mod narrative;
pub mod session;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use analysis::{analyze, analyze_default, Analysis, Band, DEFAULT_BASELINE_TONNES};
pub use errors::*;
pub use footprint::{
    calculate_footprint, calculate_footprint_for_mode, ActivityInput, Category, CategoryBreakdown,
    DietCategory, EmissionFactors, FootprintResult, TransportMode, EMISSION_FACTORS,
};
pub use location::{compute_location_factor, Location};
pub use models::{BuildingKind, CalculationRecord, CityBuilding, EcoProfile, GroundPosition};
pub use narrative::{narrate, Narrative};
pub use units::*;
