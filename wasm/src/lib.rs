//! EcoWise WASM Module
//!
//! WebAssembly bindings so the browser page can call the footprint engine.
//! Structured values cross the boundary as JSON strings; the session profile
//! stays in the page's local storage and is passed in and returned on each
//! call.

use chrono::{DateTime, NaiveDateTime, Utc};
use ecowise_shared::city::{city_stats, found_city, place_building};
use ecowise_shared::coach::{
    daily_insights, keyword_response, progress_insight, topic_response, CoachTopic, FOLLOW_UP,
};
use ecowise_shared::models::PROFILE_STORAGE_KEY;
use ecowise_shared::session::record_calculation;
use ecowise_shared::types::{CityInfo, ErrorResponse, FootprintReport};
use ecowise_shared::validation::RawActivityForm;
use ecowise_shared::{
    analyze, calculate_footprint, compute_location_factor, ActivityInput,
    BuildingKind, EcoProfile, GroundPosition, Location, DEFAULT_BASELINE_TONNES,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

type BindingResult<T> = Result<T, ErrorResponse>;

fn bad_request(message: impl Into<String>) -> ErrorResponse {
    ErrorResponse::new("BAD_REQUEST", message, None)
}

fn to_json<T: Serialize>(value: &T) -> BindingResult<String> {
    serde_json::to_string(value).map_err(|e| ErrorResponse::new("INTERNAL_ERROR", e.to_string(), None))
}

fn into_js_error(err: ErrorResponse) -> JsError {
    let message = serde_json::to_string(&err).unwrap_or(err.error.message);
    JsError::new(&message)
}

fn timestamp(now_ms: f64) -> BindingResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(now_ms as i64)
        .ok_or_else(|| bad_request("Invalid timestamp"))
}

/// Parse a stored profile; an empty string starts a new session
fn parse_profile(profile_json: &str) -> BindingResult<EcoProfile> {
    if profile_json.trim().is_empty() {
        return Ok(EcoProfile::default());
    }
    serde_json::from_str(profile_json).map_err(|e| bad_request(format!("Invalid profile: {}", e)))
}

/// Parse engine input; negative or non-finite quantities count as 0
fn parse_input(input_json: &str) -> BindingResult<ActivityInput> {
    serde_json::from_str::<ActivityInput>(input_json)
        .map(ActivityInput::sanitized)
        .map_err(|e| bad_request(format!("Invalid input: {}", e)))
}

/// Comparison baseline; must be a positive number when given
fn baseline_or_default(baseline: Option<f64>) -> BindingResult<f64> {
    match baseline {
        None => Ok(DEFAULT_BASELINE_TONNES),
        Some(b) if b.is_finite() && b > 0.0 => Ok(b),
        Some(_) => Err(ErrorResponse::new(
            "BAD_REQUEST",
            "Baseline must be a positive number of tonnes",
            Some("baseline_tonnes"),
        )),
    }
}

fn report(input: &ActivityInput, baseline: Option<f64>) -> BindingResult<FootprintReport> {
    let baseline = baseline_or_default(baseline)?;
    let result = calculate_footprint(input)
        .map_err(|e| ErrorResponse::new("VALIDATION_ERROR", e.to_string(), None))?;
    let analysis = analyze(&result, baseline);
    Ok(FootprintReport::new(&result, &analysis))
}

fn report_for_input(input_json: &str, baseline: Option<f64>) -> BindingResult<String> {
    to_json(&report(&parse_input(input_json)?, baseline)?)
}

fn report_for_form(form_json: &str, baseline: Option<f64>) -> BindingResult<String> {
    let form: RawActivityForm =
        serde_json::from_str(form_json).map_err(|e| bad_request(format!("Invalid form: {}", e)))?;
    let input = form.into_activity_input().map_err(|e| {
        ErrorResponse::new("VALIDATION_ERROR", e.user_message(), Some(e.field.as_str()))
    })?;
    to_json(&report(&input, baseline)?)
}

fn record_for(profile_json: &str, input_json: &str, now_ms: f64) -> BindingResult<String> {
    let profile = parse_profile(profile_json)?;
    let input = parse_input(input_json)?;
    let result = calculate_footprint(&input)
        .map_err(|e| ErrorResponse::new("VALIDATION_ERROR", e.to_string(), None))?;
    to_json(&record_calculation(profile, &result, timestamp(now_ms)?))
}

fn open_city_for(profile_json: &str, seed: u64, now_ms: f64) -> BindingResult<String> {
    let profile = parse_profile(profile_json)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    to_json(&found_city(profile, &mut rng, timestamp(now_ms)?))
}

fn build_for(
    profile_json: &str,
    kind: &str,
    cost: u32,
    x: f64,
    z: f64,
    seed: u64,
    now_ms: f64,
) -> BindingResult<String> {
    let profile = parse_profile(profile_json)?;
    let kind: BuildingKind = kind.parse().map_err(bad_request)?;
    let at = timestamp(now_ms)?;
    let profile = found_city(profile, &mut ChaCha8Rng::seed_from_u64(seed), at);
    let profile = place_building(profile, kind, cost, GroundPosition { x, z }, at)
        .map_err(|e| ErrorResponse::new("INSUFFICIENT_POINTS", e.to_string(), None))?;
    to_json(&profile)
}

fn city_for(profile_json: &str) -> BindingResult<String> {
    let profile = parse_profile(profile_json)?;
    to_json(&CityInfo::from(city_stats(&profile.city_buildings)))
}

fn progress_for(profile_json: &str, seed: u64) -> BindingResult<String> {
    let profile = parse_profile(profile_json)?;
    Ok(progress_insight(&profile, &mut ChaCha8Rng::seed_from_u64(seed)))
}

fn coach_topic_for(topic: &str, profile_json: &str, seed: u64) -> BindingResult<Vec<String>> {
    let topic: CoachTopic = topic.parse().map_err(bad_request)?;
    let profile = parse_profile(profile_json)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(vec![topic_response(topic, &profile, &mut rng), FOLLOW_UP.to_string()])
}

fn coach_message_for(message: &str, profile_json: &str, seed: u64) -> BindingResult<String> {
    let profile = parse_profile(profile_json)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(keyword_response(message, &profile, &mut rng))
}

fn insights_for(profile_json: &str, local_now_ms: f64, seed: u64) -> BindingResult<String> {
    let profile = parse_profile(profile_json)?;
    let now: NaiveDateTime = timestamp(local_now_ms)?.naive_utc();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    to_json(&daily_insights(now, &profile, &mut rng))
}

// ============================================================================
// Exported bindings
// ============================================================================

/// Calculate a footprint report from `ActivityInput` JSON
#[wasm_bindgen(js_name = calculateFootprint)]
pub fn calculate_footprint_json(input_json: &str, baseline_tonnes: Option<f64>) -> Result<String, JsError> {
    report_for_input(input_json, baseline_tonnes).map_err(into_js_error)
}

/// Calculate a footprint report straight from the calculator form fields
#[wasm_bindgen(js_name = calculateFromForm)]
pub fn calculate_from_form(form_json: &str, baseline_tonnes: Option<f64>) -> Result<String, JsError> {
    report_for_form(form_json, baseline_tonnes).map_err(into_js_error)
}

/// Regional multiplier for a latitude; longitude never affects the factor
#[wasm_bindgen(js_name = locationFactor)]
pub fn location_factor(latitude: f64) -> f64 {
    compute_location_factor(Some(&Location::new(latitude, 0.0)))
}

/// Log a calculation into the stored profile and return the updated profile
#[wasm_bindgen(js_name = recordCalculation)]
pub fn record_calculation_binding(profile_json: &str, input_json: &str, now_ms: f64) -> Result<String, JsError> {
    record_for(profile_json, input_json, now_ms).map_err(into_js_error)
}

/// Local storage key the page keeps the profile under
#[wasm_bindgen(js_name = profileStorageKey)]
pub fn profile_storage_key() -> String {
    PROFILE_STORAGE_KEY.to_string()
}

/// Lay out the starter city on first open and return the profile
#[wasm_bindgen(js_name = openCity)]
pub fn open_city(profile_json: &str, seed: u64, now_ms: f64) -> Result<String, JsError> {
    open_city_for(profile_json, seed, now_ms).map_err(into_js_error)
}

/// Place a purchased building and return the updated profile
///
/// A city that was never opened gets its starter blocks first.
#[wasm_bindgen(js_name = placeBuilding)]
pub fn place_building_binding(
    profile_json: &str,
    kind: &str,
    cost: u32,
    x: f64,
    z: f64,
    seed: u64,
    now_ms: f64,
) -> Result<String, JsError> {
    build_for(profile_json, kind, cost, x, z, seed, now_ms).map_err(into_js_error)
}

/// Population, green score and renewable share of the stored city
#[wasm_bindgen(js_name = cityStats)]
pub fn city_stats_binding(profile_json: &str) -> Result<String, JsError> {
    city_for(profile_json).map_err(into_js_error)
}

/// Coach reply for a quick-ask topic, followed by the follow-up line
#[wasm_bindgen(js_name = askCoach)]
pub fn ask_coach(topic: &str, profile_json: &str, seed: u64) -> Result<Vec<String>, JsError> {
    coach_topic_for(topic, profile_json, seed).map_err(into_js_error)
}

/// Coach reply to a free-text chat message
#[wasm_bindgen(js_name = coachReply)]
pub fn coach_reply(message: &str, profile_json: &str, seed: u64) -> Result<String, JsError> {
    coach_message_for(message, profile_json, seed).map_err(into_js_error)
}

/// Progress line for the profile panel
#[wasm_bindgen(js_name = progressInsight)]
pub fn progress_insight_binding(profile_json: &str, seed: u64) -> Result<String, JsError> {
    progress_for(profile_json, seed).map_err(into_js_error)
}

/// Insight cards for the page's local time (milliseconds, already offset to local)
#[wasm_bindgen(js_name = dailyInsights)]
pub fn daily_insights_binding(profile_json: &str, local_now_ms: f64, seed: u64) -> Result<String, JsError> {
    insights_for(profile_json, local_now_ms, seed).map_err(into_js_error)
}
