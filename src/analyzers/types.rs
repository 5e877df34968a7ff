//! Result types produced by the aggregation engine.

use serde::Serialize;
use std::fmt;

use crate::analyzers::grade::{ApprovalTier, UsageTier};
use crate::dataset::Category;

/// Per-category means. Recomputed on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupStatistics {
    pub count: usize,
    /// Attendance in the second period.
    pub mean_attendance: f64,
    /// Performance grade in the second period.
    pub mean_performance: f64,
    pub mean_approval: f64,
    pub mean_platform_usage: f64,
    pub mean_composite_score: f64,
}

impl GroupStatistics {
    /// The five means on a common 0-100 scale, in the order attendance,
    /// performance, approval, platform usage, composite score. Performance is
    /// a 0-10 grade and is scaled by 10.
    pub fn normalized_profile(&self) -> [f64; 5] {
        [
            self.mean_attendance,
            self.mean_performance * 10.0,
            self.mean_approval,
            self.mean_platform_usage,
            self.mean_composite_score,
        ]
    }
}

/// Statistics for the two compared categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub pei: GroupStatistics,
    pub regular: GroupStatistics,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &Category) -> Option<&GroupStatistics> {
        match category {
            Category::Pei => Some(&self.pei),
            Category::Regular => Some(&self.regular),
            _ => None,
        }
    }
}

/// PEI versus Regular comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub groups: CategoryBreakdown,
    /// PEI mean composite score minus Regular mean composite score.
    pub score_difference: f64,
    /// Percent of PEI schools with a composite score of at least 85, rounded.
    pub excellence_pei: u32,
    pub excellence_regular: u32,
}

impl ComparisonReport {
    /// Signed difference to one decimal, e.g. `"+10.0"` or `"-2.5"`. Anything
    /// that rounds to zero prints as `"+0.0"`.
    pub fn score_difference_label(&self) -> String {
        let difference = if (self.score_difference * 10.0).round() == 0.0 {
            0.0
        } else {
            self.score_difference
        };
        format!("{difference:+.1}")
    }

    /// `"X% vs Y%"`, PEI first.
    pub fn excellence_ratio(&self) -> String {
        format!("{}% vs {}%", self.excellence_pei, self.excellence_regular)
    }
}

/// One narrative line about a school.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendStatement {
    AttendanceImproved { delta: f64 },
    AttendanceDeclined { delta: f64 },
    AttendanceStable { delta: f64 },
    PerformanceImproved { delta: f64 },
    PerformanceDeclined { delta: f64 },
    PlatformUsage { tier: UsageTier, usage: f64 },
    Approval { tier: ApprovalTier, rate: f64 },
}

impl fmt::Display for TrendStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendStatement::AttendanceImproved { delta } => write!(
                f,
                "Attendance improved: up {:.1}% from the first to the second period.",
                delta.abs()
            ),
            TrendStatement::AttendanceDeclined { delta } => write!(
                f,
                "Attendance declined: down {:.1}% from the first to the second period.",
                delta.abs()
            ),
            TrendStatement::AttendanceStable { delta } => write!(
                f,
                "Attendance stable: {:.1}% change between periods.",
                delta.abs()
            ),
            TrendStatement::PerformanceImproved { delta } => {
                write!(f, "Performance improved: up {:.1} in academic performance.", delta.abs())
            }
            TrendStatement::PerformanceDeclined { delta } => {
                write!(f, "Performance declined: down {:.1} in academic performance.", delta.abs())
            }
            TrendStatement::PlatformUsage { tier, usage } => match tier {
                UsageTier::Excellent => {
                    write!(f, "Excellent platform usage: {usage:.1}% use of digital tools.")
                }
                UsageTier::Good => write!(
                    f,
                    "Good platform usage: {usage:.1}% use, with room to grow."
                ),
                UsageTier::Limited => write!(
                    f,
                    "Limited platform usage: {usage:.1}% use, an opportunity for improvement."
                ),
            },
            TrendStatement::Approval { tier, rate } => match tier {
                ApprovalTier::Excellent => {
                    write!(f, "Excellent approval rate: {rate:.1}% of students approved.")
                }
                ApprovalTier::Good => write!(f, "Good approval rate: {rate:.1}% approved."),
                ApprovalTier::NeedsImprovement => write!(
                    f,
                    "Approval needs improvement: {rate:.1}% approved, focus on teaching strategies."
                ),
            },
        }
    }
}

/// Everything the detail panel shows for one school.
#[derive(Debug, Clone, Serialize)]
pub struct SchoolDetail {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub student_count: Option<u32>,
    pub classification: Option<String>,
    pub overall_score: f64,
    pub analysis: Vec<TrendStatement>,
}
