//! EcoWise command-line shell
//!
//! Loads configuration and the saved profile, runs one command, prints its
//! output and persists the profile when the command changed it.

use anyhow::Result;
use chrono::{Local, Utc};
use clap::Parser;
use ecowise_cli::commands::{self, Cli, RunContext};
use ecowise_cli::config::AppConfig;
use ecowise_cli::storage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    init_tracing(config.json_logs());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        "Starting EcoWise"
    );

    let profile_path = cli
        .profile
        .clone()
        .unwrap_or_else(|| config.session.profile_path.clone());
    let profile = storage::load_profile(&profile_path)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut ctx = RunContext {
        baseline_tonnes: config.analysis.baseline_tonnes,
        emission_unit: config.display.emission_unit,
        now: Utc::now(),
        local_now: Local::now().naive_local(),
        rng: ChaCha8Rng::seed_from_u64(seed),
    };

    let outcome = commands::execute(&cli.command, profile, &mut ctx)?;
    print!("{}", outcome.output);

    if let Some(profile) = outcome.profile {
        storage::save_profile(&profile_path, &profile)?;
        info!(
            eco_score = profile.eco_score,
            eco_points = profile.eco_points,
            "Profile updated"
        );
    }

    Ok(())
}

/// Initialize tracing/logging on stderr so reports on stdout stay clean
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "ecowise_cli=info,ecowise_shared=info".into()
        } else {
            "ecowise_cli=debug,ecowise_shared=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
