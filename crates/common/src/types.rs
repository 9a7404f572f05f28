use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Coarse risk category, totally ordered `Low < Medium < High`
#[derive(Display, EnumIter, EnumString, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Upper bound (inclusive) of the LOW band
    pub const LOW_MAX: u8 = 33;
    /// Upper bound (inclusive) of the MEDIUM band
    pub const MEDIUM_MAX: u8 = 66;

    /// Fixed banding: LOW=[0,33], MEDIUM=[34,66], HIGH=[67,100]
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage <= Self::LOW_MAX {
            Level::Low
        } else if percentage <= Self::MEDIUM_MAX {
            Level::Medium
        } else {
            Level::High
        }
    }
}

/// Icon shown next to a factor on the dashboard
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FactorIcon {
    Clock,
    Map,
    Person,
    Eye,
}

/// Icon shown next to a recommendation
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecommendationIcon {
    Shield,
    Phone,
    MapPin,
    Users,
    Alert,
    Move,
}

/// The four situational dimensions every assessment carries, in display order
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorKind {
    TimeOfDay,
    LocationFamiliarity,
    AloneStatus,
    EnvironmentVisibility,
}

impl FactorKind {
    /// Canonical order
    pub const ALL: [FactorKind; 4] = [
        FactorKind::TimeOfDay,
        FactorKind::LocationFamiliarity,
        FactorKind::AloneStatus,
        FactorKind::EnvironmentVisibility,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TimeOfDay => "Time of Day Risk",
            Self::LocationFamiliarity => "Location Familiarity",
            Self::AloneStatus => "Alone Status",
            Self::EnvironmentVisibility => "Environment Visibility",
        }
    }

    pub fn icon(&self) -> FactorIcon {
        match self {
            Self::TimeOfDay => FactorIcon::Clock,
            Self::LocationFamiliarity => FactorIcon::Map,
            Self::AloneStatus => FactorIcon::Person,
            Self::EnvironmentVisibility => FactorIcon::Eye,
        }
    }

    /// Key used for this factor inside a `FACTORS:` segment
    pub fn tag_key(&self) -> &'static str {
        match self {
            Self::TimeOfDay => "time",
            Self::LocationFamiliarity => "location",
            Self::AloneStatus => "alone",
            Self::EnvironmentVisibility => "visibility",
        }
    }

    /// Case-insensitive lookup of a tag key
    pub fn from_tag_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag_key().eq_ignore_ascii_case(key))
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub icon: FactorIcon,
    pub level: Level,
    pub percentage: u8,
}

impl RiskFactor {
    pub fn new(kind: FactorKind, level: Level, percentage: u8) -> Self {
        Self {
            name: kind.name().to_string(),
            icon: kind.icon(),
            level,
            percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1-based, dense
    pub priority: u8,
    pub action: String,
    pub icon: RecommendationIcon,
}

impl Recommendation {
    pub fn new(priority: u8, action: impl Into<String>, icon: RecommendationIcon) -> Self {
        Self {
            priority,
            action: action.into(),
            icon,
        }
    }
}

/// Structured risk recovered from a single assistant reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: Level,
    pub percentage: u8,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}%", self.level, self.percentage)
    }
}

/// Message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new_user(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn new_assistant(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}
