use crate::display;
use crate::input::read_reply;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use safeher_common::{prompt, HistoryConfig, RiskAssessment, SystemConfig};
use safeher_history::HistoryStore;
use safeher_risk::RiskEngine;
use std::io::Write;
use std::path::Path;

/// Seeded when a seed is given, otherwise from OS entropy
pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn history_store(config: &HistoryConfig) -> Result<HistoryStore> {
    let path = config
        .path
        .as_ref()
        .context("history.path is not set in the configuration")?;
    Ok(HistoryStore::new(path))
}

/// JSON for an optional assessment; `null` when the reply had no signal
pub fn to_json(assessment: Option<&RiskAssessment>, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(&assessment)?
    } else {
        serde_json::to_string(&assessment)?
    };
    Ok(json)
}

pub fn assess(
    config: &SystemConfig,
    input: Option<&Path>,
    seed: Option<u64>,
    record: bool,
    pretty: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let reply = read_reply(input)?;
    let engine = RiskEngine::from_config(&config.engine);
    let mut rng = build_rng(seed.or(config.engine.seed));

    let assessment = engine.assess_with_rng(&reply, &mut rng);
    writeln!(out, "{}", to_json(assessment.as_ref(), pretty)?)?;

    if record {
        match &assessment {
            Some(assessment) => {
                let store = history_store(&config.history)?;
                let mut history = store.load(config.history.capacity)?;
                history.record_assessment(assessment);
                store.save(&history)?;
                tracing::info!(
                    percentage = assessment.percentage,
                    path = %store.path().display(),
                    "Recorded risk reading"
                );
            }
            None => tracing::info!("No risk signal, nothing recorded"),
        }
    }

    Ok(())
}

pub fn strip(input: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let reply = read_reply(input)?;
    writeln!(out, "{}", safeher_risk::remove_risk_tag(&reply))?;
    Ok(())
}

pub fn history(config: &SystemConfig, out: &mut dyn Write) -> Result<()> {
    let store = history_store(&config.history)?;
    let history = store.load(config.history.capacity)?;
    write!(out, "{}", display::history_report(&history, config.history.trend_threshold))?;
    Ok(())
}

pub fn print_prompt(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", prompt::SAFETY_SYSTEM_PROMPT)?;
    Ok(())
}
