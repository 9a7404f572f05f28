//! Keyword lexicons for replies that carry no tag.

/// Phrases signalling immediate danger
pub const HIGH_RISK_TERMS: &[&str] = &[
    "immediate danger",
    "call police",
    "emergency",
    "being followed",
    "threatened",
    "attack",
    "assault",
    "violence",
    "urgent",
    "get help now",
    "leave immediately",
    "domestic violence",
    "stalking",
    "harassed",
];

/// Phrases signalling a situation worth watching
pub const MEDIUM_RISK_TERMS: &[&str] = &[
    "be careful",
    "stay alert",
    "trust your instincts",
    "potentially unsafe",
    "unfamiliar area",
    "alone at night",
    "cautious",
    "concerning",
    "share your location",
    "uncomfortable",
    "uneasy",
    "nervous",
];

/// Reassurance and check-in phrases
pub const LOW_RISK_TERMS: &[&str] = &[
    "safe",
    "glad you're okay",
    "relieved",
    "good to hear",
    "no immediate concern",
    "stay safe",
    "doing well",
    "secure",
    "comfortable",
];

/// Per-lexicon hit counts for one reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexiconScores {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl LexiconScores {
    /// Each term present anywhere in `text` (case-insensitive) counts once,
    /// however many times it occurs.
    pub fn score(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self {
            high: count_terms(&lowered, HIGH_RISK_TERMS),
            medium: count_terms(&lowered, MEDIUM_RISK_TERMS),
            low: count_terms(&lowered, LOW_RISK_TERMS),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.high == 0 && self.medium == 0 && self.low == 0
    }
}

fn count_terms(lowered: &str, terms: &[&str]) -> u32 {
    terms.iter().filter(|term| lowered.contains(*term)).count() as u32
}
