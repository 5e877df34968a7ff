use crate::analyzers::grade::is_excellent;
use crate::analyzers::types::{CategoryBreakdown, ComparisonReport, GroupStatistics};
use crate::analyzers::utility::{pct, positive_mean, present_mean};
use crate::dataset::{Category, SchoolRecord};
use tracing::debug;

/// Records whose category matches `category` case-insensitively, in input
/// order. `None` or an empty tag selects everything.
pub fn filter_by_category<'a>(
    records: &'a [SchoolRecord],
    category: Option<&str>,
) -> Vec<&'a SchoolRecord> {
    match category.map(str::trim) {
        Some(tag) if !tag.is_empty() => records
            .iter()
            .filter(|r| r.category.matches(tag))
            .collect(),
        _ => records.iter().collect(),
    }
}

/// Means over one partition. Absent fields are excluded per field; an empty
/// partition yields zeros.
pub fn statistics_for(records: &[&SchoolRecord]) -> GroupStatistics {
    GroupStatistics {
        count: records.len(),
        mean_attendance: present_mean(records.iter().map(|r| r.attendance_period2)),
        mean_performance: present_mean(records.iter().map(|r| r.performance_period2)),
        mean_approval: present_mean(records.iter().map(|r| r.approval_rate)),
        mean_platform_usage: present_mean(records.iter().map(|r| r.platform_usage)),
        mean_composite_score: present_mean(records.iter().map(|r| r.composite_score)),
    }
}

fn partition(records: &[SchoolRecord]) -> (Vec<&SchoolRecord>, Vec<&SchoolRecord>) {
    let mut pei = Vec::new();
    let mut regular = Vec::new();
    let mut excluded = 0usize;

    for record in records {
        match record.category {
            Category::Pei => pei.push(record),
            Category::Regular => regular.push(record),
            _ => excluded += 1,
        }
    }

    if excluded > 0 {
        debug!(excluded, "Records outside PEI/Regular left out of the comparison");
    }

    (pei, regular)
}

/// Group statistics for the PEI and Regular categories.
pub fn group_statistics(records: &[SchoolRecord]) -> CategoryBreakdown {
    let (pei, regular) = partition(records);
    CategoryBreakdown {
        pei: statistics_for(&pei),
        regular: statistics_for(&regular),
    }
}

/// Mean of both attendance periods, both performance periods and the approval
/// rate, counting only values strictly greater than zero. 0.0 when none qualify.
pub fn overall_score(record: &SchoolRecord) -> f64 {
    positive_mean([
        record.attendance_period1,
        record.attendance_period2,
        record.performance_period1,
        record.performance_period2,
        record.approval_rate,
    ])
}

/// Rounded percent of `records` with a composite score of at least 85.
/// Records without a score count towards the total but never as excellent.
pub fn excellence_rate(records: &[&SchoolRecord]) -> u32 {
    let excellent = records
        .iter()
        .filter(|r| r.composite_score.is_some_and(is_excellent))
        .count();
    pct(excellent, records.len()).round() as u32
}

/// Compares PEI against Regular: group means, composite score difference and
/// excellence rates.
pub fn category_comparison(records: &[SchoolRecord]) -> ComparisonReport {
    let (pei, regular) = partition(records);
    let groups = CategoryBreakdown {
        pei: statistics_for(&pei),
        regular: statistics_for(&regular),
    };
    let score_difference = groups.pei.mean_composite_score - groups.regular.mean_composite_score;

    ComparisonReport {
        score_difference,
        excellence_pei: excellence_rate(&pei),
        excellence_regular: excellence_rate(&regular),
        groups,
    }
}
