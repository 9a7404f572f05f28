//! Factor breakdown: the `FACTORS` sub-parser and the default generator.

use crate::grammar;
use crate::numeric::clamp_between;
use rand::Rng;
use safeher_common::{FactorKind, Level, RiskFactor};

/// Overall percentage used when a `FACTORS` segment yields nothing usable
pub const FALLBACK_FACTOR_PERCENTAGE: u8 = 50;

/// Maximum distance a synthesized factor strays from the overall percentage
const FACTOR_JITTER: i64 = 10;

const FACTOR_MIN: u8 = 5;
const FACTOR_MAX: u8 = 95;

/// Percentage for a factor whose level was given without a number.
/// LOW draws from [10,30), MEDIUM from [40,65), HIGH from [75,95).
pub fn default_percentage_for<R: Rng + ?Sized>(level: Level, rng: &mut R) -> u8 {
    match level {
        Level::Low => rng.gen_range(10..30),
        Level::Medium => rng.gen_range(40..65),
        Level::High => rng.gen_range(75..95),
    }
}

/// Factor level skewed toward the overall band. A LOW overall never produces
/// a HIGH factor and a HIGH overall never produces a LOW one.
pub fn varied_level<R: Rng + ?Sized>(overall: Level, rng: &mut R) -> Level {
    let roll: f64 = rng.gen();
    match overall {
        Level::Low => {
            if roll < 0.7 {
                Level::Low
            } else {
                Level::Medium
            }
        }
        Level::Medium => {
            if roll < 0.3 {
                Level::Low
            } else if roll < 0.8 {
                Level::Medium
            } else {
                Level::High
            }
        }
        Level::High => {
            if roll < 0.3 {
                Level::Medium
            } else {
                Level::High
            }
        }
    }
}

fn synthesize_factor<R: Rng + ?Sized>(kind: FactorKind, overall: u8, rng: &mut R) -> RiskFactor {
    let level = varied_level(Level::from_percentage(overall), rng);
    let offset = rng.gen_range(-FACTOR_JITTER..=FACTOR_JITTER);
    let percentage = clamp_between(overall as i64 + offset, FACTOR_MIN, FACTOR_MAX);
    RiskFactor::new(kind, level, percentage)
}

/// All four canonical factors, jittered around `overall`
pub fn generate_default_factors<R: Rng + ?Sized>(overall: u8, rng: &mut R) -> Vec<RiskFactor> {
    FactorKind::ALL
        .into_iter()
        .map(|kind| synthesize_factor(kind, overall, rng))
        .collect()
}

/// Parse a `FACTORS` segment such as `time:HIGH,location:LOW-20,alone:MEDIUM`.
///
/// Unknown keys and unreadable values are skipped and the first occurrence of
/// a key wins. Canonical factors the segment does not mention are synthesized
/// around `overall`; a segment with no usable pair at all falls back to a
/// full default set around 50.
pub fn parse_factors<R: Rng + ?Sized>(segment: &str, overall: u8, rng: &mut R) -> Vec<RiskFactor> {
    let mut slots: [Option<RiskFactor>; 4] = Default::default();

    for part in segment.split(',') {
        let mut pieces = part.trim().split(':');
        let (Some(key), Some(value)) = (pieces.next(), pieces.next()) else {
            continue;
        };

        let Some(kind) = FactorKind::from_tag_key(key.trim()) else {
            tracing::debug!("Ignoring unknown factor key {:?}", key.trim());
            continue;
        };

        let Some((level, explicit)) = grammar::factor_value(value.trim()) else {
            tracing::debug!("Ignoring unreadable value {:?} for factor {}", value, kind.tag_key());
            continue;
        };

        let slot = &mut slots[kind.index()];
        if slot.is_none() {
            let percentage = match explicit {
                Some(percentage) => percentage,
                None => default_percentage_for(level, rng),
            };
            *slot = Some(RiskFactor::new(kind, level, percentage));
        }
    }

    if slots.iter().all(Option::is_none) {
        tracing::debug!("FACTORS segment had no usable pairs, using defaults");
        return generate_default_factors(FALLBACK_FACTOR_PERCENTAGE, rng);
    }

    let mut factors = Vec::with_capacity(FactorKind::ALL.len());
    for (kind, slot) in FactorKind::ALL.into_iter().zip(slots) {
        match slot {
            Some(factor) => factors.push(factor),
            None => factors.push(synthesize_factor(kind, overall, rng)),
        }
    }
    factors
}
