use safeher_common::RiskAssessment;
use safeher_history::{RiskHistory, RiskTrend};
use std::fmt::Write;

/// Multi-line dashboard view of an assessment
pub fn assessment_summary(assessment: &RiskAssessment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Risk: {}", assessment);

    if !assessment.factors.is_empty() {
        let _ = writeln!(out, "Factors:");
        for factor in &assessment.factors {
            let _ = writeln!(
                out,
                "  [{}] {:<18} {:<6} {:>3}%",
                factor.icon, factor.name, factor.level, factor.percentage
            );
        }
    }

    if !assessment.recommendations.is_empty() {
        let _ = writeln!(out, "Actions:");
        for recommendation in &assessment.recommendations {
            let _ = writeln!(
                out,
                "  {}. [{}] {}",
                recommendation.priority, recommendation.icon, recommendation.action
            );
        }
    }

    out
}

fn trend_arrow(trend: RiskTrend) -> &'static str {
    match trend {
        RiskTrend::Increasing => "↑",
        RiskTrend::Decreasing => "↓",
        RiskTrend::Stable => "→",
    }
}

pub fn trend_line(trend: RiskTrend) -> String {
    format!("Trend: {} {}", trend_arrow(trend), trend)
}

/// Stored readings oldest first, then average and trend
pub fn history_report(history: &RiskHistory, trend_threshold: u8) -> String {
    if history.is_empty() {
        return "No risk readings recorded yet\n".to_string();
    }

    let mut out = String::new();
    for entry in history.entries() {
        let _ = writeln!(
            out,
            "{}  {:>3}%",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.percentage
        );
    }
    if let Some(average) = history.average() {
        let _ = writeln!(out, "Average: {}%", average);
    }
    let _ = writeln!(out, "{}", trend_line(history.trend(trend_threshold)));
    out
}
