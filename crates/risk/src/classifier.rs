use crate::factors::{generate_default_factors, parse_factors};
use crate::grammar::{self, TagForm, TagMatch};
use crate::lexicon::LexiconScores;
use crate::recommendations::{default_recommendations, parse_recommendations};
use rand::RngCore;
use safeher_common::{EngineConfig, Level, RiskAssessment};

/// One tier of the fallback chain
pub trait RiskClassifier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Priority of this classifier (higher = tried first)
    fn priority(&self) -> u8;

    /// Attempt to classify a reply, returns Some if this tier recognised it
    fn classify(&self, reply: &str, rng: &mut dyn RngCore) -> Option<RiskAssessment>;
}

/// Runs a chain of classifiers; the first one that answers wins
pub struct RiskEngine {
    classifiers: Vec<Box<dyn RiskClassifier>>,
}

impl RiskEngine {
    /// Structured tag, then simple tag, then keyword scoring
    pub fn new() -> Self {
        Self::from_classifiers(vec![
            Box::new(StructuredTagClassifier), // 100
            Box::new(SimpleTagClassifier),     // 80
            Box::new(LexicalClassifier),       // 60
        ])
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let mut classifiers: Vec<Box<dyn RiskClassifier>> = vec![
            Box::new(StructuredTagClassifier),
            Box::new(SimpleTagClassifier),
        ];
        if config.lexical_fallback {
            classifiers.push(Box::new(LexicalClassifier));
        }
        Self::from_classifiers(classifiers)
    }

    pub fn from_classifiers(mut classifiers: Vec<Box<dyn RiskClassifier>>) -> Self {
        classifiers.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self { classifiers }
    }

    /// Add a tier; it slots in according to its priority
    pub fn with_classifier(mut self, classifier: Box<dyn RiskClassifier>) -> Self {
        self.classifiers.push(classifier);
        self.classifiers.sort_by(|a, b| b.priority().cmp(&a.priority()));
        self
    }

    /// Names of the tiers in the order they are tried
    pub fn tiers(&self) -> Vec<&'static str> {
        self.classifiers.iter().map(|c| c.name()).collect()
    }

    pub fn assess(&self, reply: &str) -> Option<RiskAssessment> {
        self.assess_with_rng(reply, &mut rand::thread_rng())
    }

    pub fn assess_with_rng(&self, reply: &str, rng: &mut dyn RngCore) -> Option<RiskAssessment> {
        for classifier in &self.classifiers {
            if let Some(assessment) = classifier.classify(reply, rng) {
                tracing::debug!(
                    tier = classifier.name(),
                    level = %assessment.level,
                    percentage = assessment.percentage,
                    "Risk assessed"
                );
                return Some(assessment);
            }
        }

        tracing::debug!("No risk signal in reply");
        None
    }

    /// Strip every tag this engine understands from display text
    pub fn strip(&self, reply: &str) -> String {
        grammar::excise(reply)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn from_tag(tag: &TagMatch<'_>, rng: &mut dyn RngCore) -> RiskAssessment {
    let factors = match tag.factors {
        Some(segment) => parse_factors(segment, tag.percentage, rng),
        None => generate_default_factors(tag.percentage, rng),
    };
    let recommendations = match tag.actions {
        Some(segment) => parse_recommendations(segment),
        None => default_recommendations(tag.level, tag.percentage),
    };

    RiskAssessment {
        level: tag.level,
        percentage: tag.percentage,
        factors,
        recommendations,
    }
}

/// `[RISK: LEVEL - N% | FACTORS: ... | ACTIONS: ...]`
pub struct StructuredTagClassifier;

impl RiskClassifier for StructuredTagClassifier {
    fn name(&self) -> &'static str {
        "structured-tag"
    }

    fn priority(&self) -> u8 {
        100
    }

    fn classify(&self, reply: &str, rng: &mut dyn RngCore) -> Option<RiskAssessment> {
        let tag = grammar::extract(TagForm::Structured, reply)?;
        Some(from_tag(&tag, rng))
    }
}

/// `[RISK: LEVEL - N%]`
pub struct SimpleTagClassifier;

impl RiskClassifier for SimpleTagClassifier {
    fn name(&self) -> &'static str {
        "simple-tag"
    }

    fn priority(&self) -> u8 {
        80
    }

    fn classify(&self, reply: &str, rng: &mut dyn RngCore) -> Option<RiskAssessment> {
        let tag = grammar::extract(TagForm::Simple, reply)?;
        Some(from_tag(&tag, rng))
    }
}

/// Keyword scoring over the whole reply
pub struct LexicalClassifier;

impl LexicalClassifier {
    /// Level and percentage for a set of scores; `None` when nothing decides it
    pub fn decide(scores: &LexiconScores) -> Option<(Level, u8)> {
        if scores.high > scores.medium && scores.high > scores.low {
            Some((Level::High, (70 + 5 * scores.high).min(100) as u8))
        } else if scores.medium > scores.low {
            Some((Level::Medium, (35 + 5 * scores.medium).min(66) as u8))
        } else if scores.low > 0 {
            Some((Level::Low, 25u32.saturating_sub(3 * scores.low).max(10) as u8))
        } else {
            None
        }
    }
}

impl RiskClassifier for LexicalClassifier {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn priority(&self) -> u8 {
        60
    }

    fn classify(&self, reply: &str, rng: &mut dyn RngCore) -> Option<RiskAssessment> {
        let scores = LexiconScores::score(reply);
        tracing::trace!(high = scores.high, medium = scores.medium, low = scores.low, "Lexicon scores");

        let (level, percentage) = Self::decide(&scores)?;
        Some(RiskAssessment {
            level,
            percentage,
            factors: generate_default_factors(percentage, rng),
            recommendations: default_recommendations(level, percentage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scores(high: u32, medium: u32, low: u32) -> LexiconScores {
        LexiconScores { high, medium, low }
    }

    #[test]
    fn test_decide_high() {
        assert_eq!(LexicalClassifier::decide(&scores(2, 0, 0)), Some((Level::High, 80)));
        assert_eq!(LexicalClassifier::decide(&scores(9, 1, 1)), Some((Level::High, 100)));
    }

    #[test]
    fn test_decide_medium() {
        assert_eq!(LexicalClassifier::decide(&scores(0, 1, 0)), Some((Level::Medium, 40)));
        assert_eq!(LexicalClassifier::decide(&scores(0, 12, 0)), Some((Level::Medium, 66)));
    }

    #[test]
    fn test_decide_low() {
        assert_eq!(LexicalClassifier::decide(&scores(0, 0, 1)), Some((Level::Low, 22)));
        assert_eq!(LexicalClassifier::decide(&scores(0, 0, 9)), Some((Level::Low, 10)));
    }

    #[test]
    fn test_decide_ties() {
        // high ties medium: medium beats low, so MEDIUM
        assert_eq!(LexicalClassifier::decide(&scores(1, 1, 0)), Some((Level::Medium, 40)));
        // high ties low with no medium: falls through to LOW
        assert_eq!(LexicalClassifier::decide(&scores(1, 0, 1)), Some((Level::Low, 22)));
        // medium ties low
        assert_eq!(LexicalClassifier::decide(&scores(0, 1, 1)), Some((Level::Low, 22)));
        assert_eq!(LexicalClassifier::decide(&scores(0, 0, 0)), None);
    }

    #[test]
    fn test_engine_order() {
        assert_eq!(RiskEngine::new().tiers(), vec!["structured-tag", "simple-tag", "lexical"]);
    }

    #[test]
    fn test_from_config_without_lexical() {
        let config = EngineConfig {
            lexical_fallback: false,
            seed: None,
        };
        let engine = RiskEngine::from_config(&config);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(engine.tiers(), vec!["structured-tag", "simple-tag"]);
        assert!(engine.assess_with_rng("Someone is stalking me", &mut rng).is_none());
    }

    #[test]
    fn test_simple_tag_classifier_fills_defaults() {
        let mut rng = StdRng::seed_from_u64(5);
        let assessment = SimpleTagClassifier
            .classify("Walk toward the open cafe. [RISK: HIGH - 85%]", &mut rng)
            .unwrap();

        assert_eq!(assessment.level, Level::High);
        assert_eq!(assessment.percentage, 85);
        assert_eq!(assessment.factors.len(), 4);
        assert!(assessment.factors.iter().all(|f| (75..=95).contains(&f.percentage)));
        assert_eq!(assessment.recommendations, default_recommendations(Level::High, 85));
    }

    #[test]
    fn test_simple_tag_classifier_ignores_segmented_tag() {
        let mut rng = StdRng::seed_from_u64(5);
        let reply = "[RISK: LOW - 10% | ACTIONS: 1.Stay put]";
        assert!(SimpleTagClassifier.classify(reply, &mut rng).is_none());
    }

    #[test]
    fn test_engine_strip() {
        let engine = RiskEngine::new();
        assert_eq!(
            engine.strip("Stay on the main road. [RISK: MEDIUM - 45% | ACTIONS: 1.Call home]"),
            "Stay on the main road."
        );
    }

    struct AlwaysHigh;

    impl RiskClassifier for AlwaysHigh {
        fn name(&self) -> &'static str {
            "always-high"
        }

        fn priority(&self) -> u8 {
            200
        }

        fn classify(&self, _reply: &str, _rng: &mut dyn RngCore) -> Option<RiskAssessment> {
            Some(RiskAssessment {
                level: Level::High,
                percentage: 99,
                factors: vec![],
                recommendations: vec![],
            })
        }
    }

    #[test]
    fn test_with_classifier_prepends_by_priority() {
        let engine = RiskEngine::new().with_classifier(Box::new(AlwaysHigh));
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(engine.tiers()[0], "always-high");
        let assessment = engine.assess_with_rng("[RISK: LOW - 5%]", &mut rng).unwrap();
        assert_eq!(assessment.percentage, 99);
    }
}
