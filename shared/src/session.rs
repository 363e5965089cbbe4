//! Session profile transitions
//!
//! Every function takes the profile by value and returns the updated one,
//! so independent sessions never share state.

use crate::footprint::FootprintResult;
use crate::models::{CalculationRecord, EcoProfile};
use chrono::{DateTime, Utc};

/// Calculations kept in the log; older entries are dropped first
pub const MAX_CALCULATION_LOG: usize = 50;

/// EcoScore rewards
pub mod rewards {
    pub const CALCULATION: i64 = 10;
    pub const JOURNEY_START: i64 = 5;
    pub const CHAT_MESSAGE: i64 = 2;
}

/// Log a calculation and award its EcoScore
pub fn record_calculation(
    profile: EcoProfile,
    result: &FootprintResult,
    at: DateTime<Utc>,
) -> EcoProfile {
    let record = CalculationRecord::new(result, at);
    let mut profile = award_score(profile, rewards::CALCULATION);
    profile.calculation_log.push(record.clone());
    let overflow = profile.calculation_log.len().saturating_sub(MAX_CALCULATION_LOG);
    profile.calculation_log.drain(..overflow);
    profile.last_calculation = Some(record);
    profile
}

/// Add (or with a negative value, remove) EcoScore
pub fn award_score(mut profile: EcoProfile, points: i64) -> EcoProfile {
    profile.eco_score = profile.eco_score.saturating_add(points);
    profile
}

/// Adjust EcoPoints; the balance never drops below zero
pub fn adjust_points(mut profile: EcoProfile, delta: i64) -> EcoProfile {
    let next = (profile.eco_points as i64).saturating_add(delta);
    profile.eco_points = next.clamp(0, u32::MAX as i64) as u32;
    profile
}

/// Record an action as completed; repeats are ignored
pub fn complete_action(mut profile: EcoProfile, action: &str) -> EcoProfile {
    if !profile.completed_actions.iter().any(|a| a == action) {
        profile.completed_actions.push(action.to_string());
    }
    profile
}

/// Trend of the last calculation against the one before it, tonnes/year
pub fn footprint_trend(profile: &EcoProfile) -> Option<f64> {
    match profile.calculation_log.as_slice() {
        [.., previous, latest] => Some(latest.footprint - previous.footprint),
        _ => None,
    }
}
