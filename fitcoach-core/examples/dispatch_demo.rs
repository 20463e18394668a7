//! Dispatch demo
//!
//! Builds a registry from the environment (DEEPSEEK_API_KEY,
//! TENCENT_SECRET_ID/TENCENT_SECRET_KEY, AIMLAPI_API_KEY) or from a config file
//! passed as the first argument, then asks the coach for a workout plan.
//! With no credentials at all the simulated response is returned.
//!
//! Run with: cargo run --example dispatch_demo [-- fitcoach.yaml]

use anyhow::Context;
use fitcoach_core::coach::{CoachService, FitnessLevel, UserProfile};
use fitcoach_core::config::{self, EnvCredentials};
use fitcoach_core::ProviderRegistry;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let registry = match std::env::args().nth(1) {
        Some(path) => {
            let mut config = config::load_from_path(&path)
                .with_context(|| format!("loading {path}"))?;
            config.merge_credentials(&EnvCredentials);
            ProviderRegistry::from_config(&config)?
        }
        None => ProviderRegistry::from_env()?,
    };
    let registry = registry.with_span(tracing::info_span!("demo"));

    println!("Providers in priority order: {:?}", registry.providers());
    println!("Available now: {:?}", registry.available_providers());
    if registry.is_mock() {
        println!("No provider configured; expect a simulated response");
    }
    println!();

    let coach = CoachService::new(Arc::new(registry));
    let profile = UserProfile {
        age: Some(29),
        fitness_level: FitnessLevel::Intermediate,
        goals: Some("muscle_gain".to_string()),
        available_hours_per_week: Some(5.0),
        equipment: Some("dumbbells, pull-up bar".to_string()),
        ..Default::default()
    };

    let report = coach.generate_workout_plan(&profile).await?;
    println!("Answered by {} ({})", report.ai_provider, report.ai_model);
    println!("Structured reply: {}", report.parsed);
    println!("{}", serde_json::to_string_pretty(&report.body)?);

    Ok(())
}
