//! Error types for the EcoWise engine

use thiserror::Error;

/// Footprint calculation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FootprintError {
    /// Distance, energy and waste were all zero: nothing to calculate
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FootprintError {
    pub fn nothing_to_calculate() -> Self {
        FootprintError::InvalidInput(
            "enter at least one of distance, energy or waste to calculate a footprint".to_string(),
        )
    }
}

/// Eco-city builder errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CityError {
    #[error("Need {needed} EcoPoints to build this (have {available})")]
    InsufficientPoints { needed: u32, available: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FootprintError::nothing_to_calculate();
        assert!(err.to_string().starts_with("Invalid input:"));

        let err = CityError::InsufficientPoints {
            needed: 100,
            available: 40,
        };
        assert_eq!(err.to_string(), "Need 100 EcoPoints to build this (have 40)");
    }
}
