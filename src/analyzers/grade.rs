use serde::Serialize;

/// Platform-usage band.
///
/// | Range        | Tier      |
/// |--------------|-----------|
/// | > 80         | Excellent |
/// | > 60, <= 80  | Good      |
/// | <= 60        | Limited   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageTier {
    Excellent,
    Good,
    Limited,
}

/// Approval-rate band.
///
/// | Range        | Tier             |
/// |--------------|------------------|
/// | > 90         | Excellent        |
/// | > 80, <= 90  | Good             |
/// | <= 80        | NeedsImprovement |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalTier {
    Excellent,
    Good,
    NeedsImprovement,
}

pub fn usage_tier(p: f64) -> UsageTier {
    match p {
        p if p > 80.0 => UsageTier::Excellent,
        p if p > 60.0 => UsageTier::Good,
        _ => UsageTier::Limited,
    }
}

pub fn approval_tier(p: f64) -> ApprovalTier {
    match p {
        p if p > 90.0 => ApprovalTier::Excellent,
        p if p > 80.0 => ApprovalTier::Good,
        _ => ApprovalTier::NeedsImprovement,
    }
}

/// Composite score at or above which a school counts towards the excellence rate.
pub const EXCELLENCE_THRESHOLD: f64 = 85.0;

pub fn is_excellent(composite_score: f64) -> bool {
    composite_score >= EXCELLENCE_THRESHOLD
}
