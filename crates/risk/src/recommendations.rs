//! Ranked safety actions: the `ACTIONS` sub-parser and the default tiers.

use crate::grammar;
use safeher_common::{Level, Recommendation, RecommendationIcon};

pub const MAX_RECOMMENDATIONS: usize = 3;

/// Checked in order; the first keyword contained in the action picks the icon
const ICON_KEYWORDS: &[(&str, RecommendationIcon)] = &[
    ("call", RecommendationIcon::Phone),
    ("phone", RecommendationIcon::Phone),
    ("share", RecommendationIcon::MapPin),
    ("location", RecommendationIcon::MapPin),
    ("friend", RecommendationIcon::Users),
    ("contact", RecommendationIcon::Users),
    ("move", RecommendationIcon::Move),
    ("leave", RecommendationIcon::Move),
    ("alert", RecommendationIcon::Alert),
    ("sos", RecommendationIcon::Alert),
    ("safe", RecommendationIcon::Shield),
    ("stay", RecommendationIcon::Shield),
];

const HIGH_TIER: [(&str, RecommendationIcon); 3] = [
    ("Contact emergency services or someone you trust immediately", RecommendationIcon::Phone),
    ("Move to a safe, well-lit public area if possible", RecommendationIcon::Move),
    ("Activate SOS to share your location with emergency contacts", RecommendationIcon::Alert),
];

const MEDIUM_TIER: [(&str, RecommendationIcon); 3] = [
    ("Share your live location with a trusted friend or family member", RecommendationIcon::MapPin),
    ("Stay in well-lit areas and be aware of your surroundings", RecommendationIcon::Shield),
    ("Keep your phone charged and easily accessible", RecommendationIcon::Phone),
];

const LOW_TIER: [(&str, RecommendationIcon); 3] = [
    ("Continue staying aware of your surroundings", RecommendationIcon::Shield),
    ("Keep emergency contacts easily accessible", RecommendationIcon::Users),
    ("Trust your instincts if something feels off", RecommendationIcon::Alert),
];

pub fn icon_for_action(action: &str) -> RecommendationIcon {
    let lowered = action.to_lowercase();
    ICON_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(RecommendationIcon::Shield)
}

/// Parse an `ACTIONS` segment such as `1.Call a friend;2.Move to a lit area`.
///
/// Only the first three items are read. Empty items are dropped and the
/// survivors are numbered 1..n in order. Items without an `N.` prefix are kept
/// verbatim with the shield icon. Nothing usable yields the MEDIUM defaults.
pub fn parse_recommendations(segment: &str) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(MAX_RECOMMENDATIONS);

    for item in segment.split(';').take(MAX_RECOMMENDATIONS) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let (action, icon) = match grammar::numbered_action(item) {
            Some(action) => (action, icon_for_action(action)),
            None => (item, RecommendationIcon::Shield),
        };
        let priority = recommendations.len() as u8 + 1;
        recommendations.push(Recommendation::new(priority, action, icon));
    }

    if recommendations.is_empty() {
        tracing::debug!("ACTIONS segment had no usable items, using defaults");
        return default_recommendations(Level::Medium, 50);
    }
    recommendations
}

/// Fixed three-step plan for a level. A percentage above a band's upper bound
/// escalates to the next tier even when `level` says otherwise.
pub fn default_recommendations(level: Level, percentage: u8) -> Vec<Recommendation> {
    let tier = if level == Level::High || percentage > Level::MEDIUM_MAX {
        &HIGH_TIER
    } else if level == Level::Medium || percentage > Level::LOW_MAX {
        &MEDIUM_TIER
    } else {
        &LOW_TIER
    };

    tier.iter()
        .enumerate()
        .map(|(i, (action, icon))| Recommendation::new(i as u8 + 1, *action, *icon))
        .collect()
}
