use crate::enums::RiskLevel;

/// Scores at or below this value are [`RiskLevel::Low`].
pub const LOW_RISK_THRESHOLD: f64 = 3.0;
/// Scores above this value are [`RiskLevel::High`].
pub const HIGH_RISK_THRESHOLD: f64 = 6.0;

/// Classifies a pool risk score.
///
/// Low if `score <= 3`, Medium if `3 < score <= 6`, High otherwise
/// (including NaN).
pub fn risk_bucket(score: f64) -> RiskLevel {
    if score <= LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if score <= HIGH_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}
