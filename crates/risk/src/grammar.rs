//! The inline risk tag grammar.
//!
//! ```text
//! [RISK: LOW|MEDIUM|HIGH - <digits>%? ( | FACTORS: key:LEVEL[-digits%]?(,...)* )? ( | ACTIONS: N.<text>(;N.<text>)* )?]
//! ```
//!
//! Both the parsers and the stripper go through the two patterns below, so a
//! span that can be extracted is exactly a span that gets excised.

use crate::numeric::parse_percentage;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use safeher_common::Level;
use std::ops::Range;
use std::str::FromStr;

const STRUCTURED_PATTERN: &str = r"(?i)\[RISK\s*:\s*(?P<level>LOW|MEDIUM|HIGH)\s*-\s*(?P<percentage>[0-9]+)%?\s*(?:\|\s*FACTORS\s*:\s*(?P<factors>[^\]|]+))?\s*(?:\|\s*ACTIONS\s*:\s*(?P<actions>[^\]]+))?\]";

const SIMPLE_PATTERN: &str = r"(?i)\[RISK\s*:\s*(?P<level>LOW|MEDIUM|HIGH)\s*-\s*(?P<percentage>[0-9]+)%?\]";

/// `value` half of a `key:value` factor pair
const FACTOR_VALUE_PATTERN: &str = r"(?i)(?P<level>LOW|MEDIUM|HIGH)(?:\s*-?\s*(?P<percentage>[0-9]+))?";

/// One `;`-separated item of an `ACTIONS` segment
const ACTION_ITEM_PATTERN: &str = r"^(?P<priority>[0-9]+)\.?\s*(?P<action>.+)";

static STRUCTURED_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(STRUCTURED_PATTERN).expect("structured tag pattern compiles"));

static SIMPLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(SIMPLE_PATTERN).expect("simple tag pattern compiles"));

static FACTOR_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(FACTOR_VALUE_PATTERN).expect("factor value pattern compiles"));

static ACTION_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(ACTION_ITEM_PATTERN).expect("action item pattern compiles"));

/// Which of the two recognised tag shapes to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagForm {
    /// Level and percentage with optional `FACTORS` / `ACTIONS` segments
    Structured,
    /// Level and percentage only
    Simple,
}

impl TagForm {
    fn pattern(&self) -> &'static Regex {
        match self {
            TagForm::Structured => &STRUCTURED_TAG,
            TagForm::Simple => &SIMPLE_TAG,
        }
    }
}

/// First tag of a given form found in a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch<'a> {
    pub level: Level,
    /// Already clamped to `[0, 100]`
    pub percentage: u8,
    pub factors: Option<&'a str>,
    pub actions: Option<&'a str>,
    /// Byte range of the whole bracketed tag
    pub span: Range<usize>,
}

impl<'a> TagMatch<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        let level = Level::from_str(caps.name("level")?.as_str()).ok()?;
        let percentage = parse_percentage(caps.name("percentage")?.as_str());

        Some(Self {
            level,
            percentage,
            factors: caps.name("factors").map(|m| m.as_str()),
            actions: caps.name("actions").map(|m| m.as_str()),
            span: whole.range(),
        })
    }
}

/// Find the first tag of `form` anywhere in `text`
pub fn extract(form: TagForm, text: &str) -> Option<TagMatch<'_>> {
    let caps = form.pattern().captures(text)?;
    TagMatch::from_captures(&caps)
}

/// Level word and optional explicit percentage of a factor value such as
/// `HIGH`, `medium-55` or `LOW 20%`.
pub fn factor_value(value: &str) -> Option<(Level, Option<u8>)> {
    let caps = FACTOR_VALUE.captures(value)?;
    let level = Level::from_str(caps.name("level")?.as_str()).ok()?;
    let percentage = caps.name("percentage").map(|m| parse_percentage(m.as_str()));
    Some((level, percentage))
}

/// Action text of an item written as `N.<text>`; `None` when the numeric
/// prefix is missing.
pub fn numbered_action(item: &str) -> Option<&str> {
    ACTION_ITEM
        .captures(item)
        .and_then(|caps| caps.name("action"))
        .map(|m| m.as_str().trim())
}

/// Remove every recognised tag from `text` and trim the result.
///
/// Removal repeats until nothing matches, since deleting an inner tag can
/// splice its surroundings into a new one.
pub fn excise(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let stripped = SIMPLE_TAG
            .replace_all(&STRUCTURED_TAG.replace_all(&current, ""), "")
            .into_owned();
        if stripped == current {
            break;
        }
        current = stripped;
    }
    current.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_form() {
        let text = "Please stay where you are. [RISK: HIGH - 85%]";
        let tag = extract(TagForm::Simple, text).unwrap();

        assert_eq!(tag.level, Level::High);
        assert_eq!(tag.percentage, 85);
        assert_eq!(&text[tag.span.clone()], "[RISK: HIGH - 85%]");
        assert!(tag.factors.is_none());
        assert!(tag.actions.is_none());
    }

    #[test]
    fn test_structured_form_also_matches_minimal_tag() {
        let tag = extract(TagForm::Structured, "[risk: medium - 40]").unwrap();

        assert_eq!(tag.level, Level::Medium);
        assert_eq!(tag.percentage, 40);
        assert!(tag.factors.is_none());
    }

    #[test]
    fn test_extract_structured_segments() {
        let text = "[RISK: LOW - 20% | FACTORS: time:LOW,alone:MEDIUM | ACTIONS: 1.Stay alert;2.Call a friend]";
        let tag = extract(TagForm::Structured, text).unwrap();

        assert_eq!(tag.factors, Some("time:LOW,alone:MEDIUM "));
        assert_eq!(tag.actions, Some("1.Stay alert;2.Call a friend"));
    }

    #[test]
    fn test_actions_without_factors() {
        let tag = extract(TagForm::Structured, "[RISK: HIGH - 90% | ACTIONS: 1.Leave now]").unwrap();

        assert!(tag.factors.is_none());
        assert_eq!(tag.actions, Some("1.Leave now"));
    }

    #[test]
    fn test_whitespace_around_colons() {
        let tag = extract(TagForm::Structured, "[RISK : HIGH-70% | FACTORS : time:HIGH]").unwrap();

        assert_eq!(tag.percentage, 70);
        assert_eq!(tag.factors, Some("time:HIGH"));
    }

    #[test]
    fn test_out_of_range_percentage_is_clamped() {
        let tag = extract(TagForm::Simple, "[RISK: HIGH - 250%]").unwrap();
        assert_eq!(tag.percentage, 100);
    }

    #[test]
    fn test_no_tag() {
        assert!(extract(TagForm::Structured, "All good here.").is_none());
        assert!(extract(TagForm::Simple, "[RISK: SEVERE - 90%]").is_none());
    }

    #[test]
    fn test_unknown_segment_breaks_both_forms() {
        let text = "[RISK: HIGH - 80% | NOTES: walk fast]";
        assert!(extract(TagForm::Structured, text).is_none());
        assert!(extract(TagForm::Simple, text).is_none());
    }

    #[test]
    fn test_non_ascii_digits_are_not_percentages() {
        let text = "Go now. [RISK: HIGH - ٨٥%]";
        assert!(extract(TagForm::Structured, text).is_none());
        assert!(extract(TagForm::Simple, text).is_none());
        assert_eq!(excise(text), text);

        assert_eq!(factor_value("HIGH-٩٠"), Some((Level::High, None)));
        assert_eq!(numbered_action("١.Call home"), None);
    }

    #[test]
    fn test_factor_value() {
        assert_eq!(factor_value("HIGH"), Some((Level::High, None)));
        assert_eq!(factor_value("medium-55%"), Some((Level::Medium, Some(55))));
        assert_eq!(factor_value("LOW 20"), Some((Level::Low, Some(20))));
        assert_eq!(factor_value("high-300"), Some((Level::High, Some(100))));
        assert_eq!(factor_value("unknown"), None);
    }

    #[test]
    fn test_numbered_action() {
        assert_eq!(numbered_action("1.Call a friend"), Some("Call a friend"));
        assert_eq!(numbered_action("2 Move somewhere bright "), Some("Move somewhere bright"));
        assert_eq!(numbered_action("Call a friend"), None);
    }

    #[test]
    fn test_excise_removes_every_tag() {
        let text = "[RISK: LOW - 5%] Hello [risk: high - 90% | ACTIONS: 1.Call] there [RISK: MEDIUM - 50%]";
        assert_eq!(excise(text), "Hello  there");
    }

    #[test]
    fn test_excise_spliced_tag() {
        let text = "Reply [RISK: LOW - 5[RISK: LOW - 5%]%] end";
        let once = excise(text);

        assert_eq!(once, "Reply  end");
        assert_eq!(excise(&once), once);
    }
}
