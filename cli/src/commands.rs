//! Command-line surface and command handlers
//!
//! Handlers take the loaded profile by value and hand back the text to print
//! plus the updated profile when something changed. Reading the clock and
//! seeding the RNG happen in `main`, so handlers stay deterministic.

use crate::report::{render_city, render_insights, render_profile, render_report};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use ecowise_shared::city::{city_stats, found_city, place_building};
use ecowise_shared::coach::{
    daily_insights, greeting, keyword_response, progress_insight, topic_response, CoachTopic, FOLLOW_UP,
};
use ecowise_shared::session::{award_score, complete_action, record_calculation, rewards};
use ecowise_shared::types::{CityInfo, FootprintReport};
use ecowise_shared::validation::RawActivityForm;
use ecowise_shared::{
    analyze, calculate_footprint_for_mode, ActivityInput, BuildingKind, EcoProfile, EmissionUnit,
    GroundPosition, TransportMode,
};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Action recorded the first time a journey is started
pub const JOURNEY_START_ACTION: &str = "journey_start";

#[derive(Parser, Debug)]
#[command(name = "ecowise-cli")]
#[command(version, about = "Carbon footprint calculator and eco-city companion")]
pub struct Cli {
    /// Profile file, overriding session.profile_path
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,
    /// Seed for coach replies, insight cards and the starter city
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate the footprint for an activity JSON file and log it
    Calculate {
        file: PathBuf,
        /// Read the file as raw calculator form fields (strings, units)
        #[arg(long)]
        form: bool,
        /// Price distance with this transport mode instead of car
        #[arg(long)]
        mode: Option<TransportMode>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Do not log the calculation into the profile
        #[arg(long)]
        dry_run: bool,
    },
    /// Start the eco journey
    Start,
    /// Talk to the eco-coach
    Coach {
        /// Quick-ask topic: transport, energy or diet
        #[arg(long)]
        topic: Option<CoachTopic>,
        /// Free-text message
        message: Vec<String>,
    },
    /// Buy and place a building in the eco-city
    Build {
        kind: BuildingKind,
        /// EcoPoints the building costs
        #[arg(long)]
        cost: u32,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        z: f64,
    },
    /// Show eco-city statistics and buildings
    City,
    /// Show today's personalized insight cards
    Insights,
    /// Show EcoScore, EcoPoints and calculation history
    Profile,
}

/// Inputs a handler needs besides the profile
pub struct RunContext {
    pub baseline_tonnes: f64,
    pub emission_unit: EmissionUnit,
    pub now: DateTime<Utc>,
    pub local_now: NaiveDateTime,
    pub rng: ChaCha8Rng,
}

/// What a handler produced
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    /// Updated profile to persist; `None` when nothing changed
    pub profile: Option<EcoProfile>,
}

impl Outcome {
    fn read_only(output: String) -> Self {
        Self { output, profile: None }
    }

    fn changed(output: String, profile: EcoProfile) -> Self {
        Self {
            output,
            profile: Some(profile),
        }
    }
}

/// Read an activity file, either as engine input or as raw form fields
pub fn read_activity(path: &Path, form: bool) -> Result<ActivityInput> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read activity file {}", path.display()))?;

    if form {
        let form: RawActivityForm = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid calculator form", path.display()))?;
        Ok(form.into_activity_input()?)
    } else {
        let input: ActivityInput = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid activity input", path.display()))?;
        Ok(input.sanitized())
    }
}

/// Run one command against the profile
pub fn execute(command: &Command, profile: EcoProfile, ctx: &mut RunContext) -> Result<Outcome> {
    match command {
        Command::Calculate {
            file,
            form,
            mode,
            json,
            dry_run,
        } => {
            let input = read_activity(file, *form)?;
            let result = calculate_footprint_for_mode(&input, mode.unwrap_or_default())?;
            let analysis = analyze(&result, ctx.baseline_tonnes);
            let report = FootprintReport::new(&result, &analysis);

            info!(
                total_tonnes = result.total_tonnes_per_year(),
                band = ?analysis.band,
                dominant = analysis.dominant_category.as_str(),
                "Footprint calculated"
            );

            let output = if *json {
                serde_json::to_string_pretty(&report)?
            } else {
                render_report(&report, ctx.emission_unit)
            };

            if *dry_run {
                Ok(Outcome::read_only(output))
            } else {
                Ok(Outcome::changed(output, record_calculation(profile, &result, ctx.now)))
            }
        }

        Command::Start => {
            let profile = award_score(profile, rewards::JOURNEY_START);
            let profile = complete_action(profile, JOURNEY_START_ACTION);
            let output = format!(
                "Welcome to your eco journey! Calculate your footprint to get started.\nEcoScore: {}\n",
                profile.eco_score
            );
            Ok(Outcome::changed(output, profile))
        }

        Command::Coach { topic, message } => {
            if let Some(topic) = topic {
                let reply = topic_response(*topic, &profile, &mut ctx.rng);
                return Ok(Outcome::read_only(format!("{}\n{}\n", reply, FOLLOW_UP)));
            }

            let message = message.join(" ");
            if message.trim().is_empty() {
                return Ok(Outcome::read_only(format!("{}\n", greeting(&profile, &mut ctx.rng))));
            }

            let reply = keyword_response(&message, &profile, &mut ctx.rng);
            let profile = award_score(profile, rewards::CHAT_MESSAGE);
            Ok(Outcome::changed(format!("{}\n", reply), profile))
        }

        Command::Build { kind, cost, x, z } => {
            let position = GroundPosition { x: *x, z: *z };
            let profile = found_city(profile, &mut ctx.rng, ctx.now);
            match place_building(profile, *kind, *cost, position, ctx.now) {
                Ok(profile) => {
                    let stats = CityInfo::from(city_stats(&profile.city_buildings));
                    let output = format!(
                        "Placed a {} building. EcoPoints left: {}\n{}",
                        kind.as_str(),
                        profile.eco_points,
                        render_city(&stats, &[])
                    );
                    Ok(Outcome::changed(output, profile))
                }
                Err(err) => {
                    warn!(kind = kind.as_str(), cost, "Building rejected: {}", err);
                    Err(err.into())
                }
            }
        }

        Command::City => {
            let founded = profile.city_founded;
            let profile = found_city(profile, &mut ctx.rng, ctx.now);
            let stats = CityInfo::from(city_stats(&profile.city_buildings));
            let output = render_city(&stats, &profile.city_buildings);
            if founded {
                Ok(Outcome::read_only(output))
            } else {
                info!(buildings = profile.city_buildings.len(), "Starter city founded");
                Ok(Outcome::changed(output, profile))
            }
        }

        Command::Insights => {
            let cards = daily_insights(ctx.local_now, &profile, &mut ctx.rng);
            Ok(Outcome::read_only(render_insights(&cards)))
        }

        Command::Profile => {
            let mut output = render_profile(&profile, ctx.emission_unit);
            output.push_str(&format!("\n{}\n", progress_insight(&profile, &mut ctx.rng)));
            Ok(Outcome::read_only(output))
        }
    }
}
