//! Risk-signal extraction from free-text assistant replies.
//!
//! A reply is tried against an ordered chain of classifiers: a structured
//! inline tag, a minimal tag, then keyword scoring. Whatever a tier does not
//! supply (factor breakdown, ranked actions) is synthesized from the resolved
//! level and percentage.
//!
//! ```
//! use safeher_common::Level;
//!
//! let reply = "Please head somewhere busy. [RISK: HIGH - 85%]";
//! let assessment = safeher_risk::parse_risk_from_response(reply).unwrap();
//! assert_eq!(assessment.level, Level::High);
//! assert_eq!(assessment.percentage, 85);
//! assert_eq!(safeher_risk::remove_risk_tag(reply), "Please head somewhere busy.");
//! ```

pub mod classifier;
pub mod factors;
pub mod grammar;
pub mod lexicon;
pub mod numeric;
pub mod recommendations;

pub use classifier::{
    LexicalClassifier, RiskClassifier, RiskEngine, SimpleTagClassifier, StructuredTagClassifier,
};
pub use factors::generate_default_factors;
pub use numeric::clamp_percentage;
pub use recommendations::default_recommendations;

use once_cell::sync::Lazy;
use safeher_common::RiskAssessment;

static DEFAULT_ENGINE: Lazy<RiskEngine> = Lazy::new(RiskEngine::new);

/// Recover a risk assessment from an assistant reply, or `None` when the
/// reply carries no risk signal at all.
pub fn parse_risk_from_response(reply: &str) -> Option<RiskAssessment> {
    DEFAULT_ENGINE.assess(reply)
}

/// The reply as it should be shown to the user, with every risk tag removed
pub fn remove_risk_tag(reply: &str) -> String {
    DEFAULT_ENGINE.strip(reply)
}
