use crate::analyzers::aggregate::overall_score;
use crate::analyzers::grade::{approval_tier, usage_tier};
use crate::analyzers::types::{SchoolDetail, TrendStatement};
use crate::dataset::SchoolRecord;

/// Narrative analysis of one school across the two periods.
///
/// Always in this order: attendance, performance (omitted when unchanged),
/// platform usage, approval. Absent fields read as 0.
pub fn analyze_trend(record: &SchoolRecord) -> Vec<TrendStatement> {
    let mut statements = Vec::with_capacity(4);

    let attendance_delta =
        record.attendance_period2.unwrap_or(0.0) - record.attendance_period1.unwrap_or(0.0);
    statements.push(if attendance_delta > 0.0 {
        TrendStatement::AttendanceImproved {
            delta: attendance_delta,
        }
    } else if attendance_delta < 0.0 {
        TrendStatement::AttendanceDeclined {
            delta: attendance_delta,
        }
    } else {
        TrendStatement::AttendanceStable {
            delta: attendance_delta,
        }
    });

    let performance_delta =
        record.performance_period2.unwrap_or(0.0) - record.performance_period1.unwrap_or(0.0);
    if performance_delta > 0.0 {
        statements.push(TrendStatement::PerformanceImproved {
            delta: performance_delta,
        });
    } else if performance_delta < 0.0 {
        statements.push(TrendStatement::PerformanceDeclined {
            delta: performance_delta,
        });
    }

    let usage = record.platform_usage.unwrap_or(0.0);
    statements.push(TrendStatement::PlatformUsage {
        tier: usage_tier(usage),
        usage,
    });

    let rate = record.approval_rate.unwrap_or(0.0);
    statements.push(TrendStatement::Approval {
        tier: approval_tier(rate),
        rate,
    });

    statements
}

pub fn school_detail(record: &SchoolRecord) -> SchoolDetail {
    SchoolDetail {
        id: record.id.clone(),
        name: record.name.clone(),
        category: record.category.clone(),
        student_count: record.student_count,
        classification: record.classification.clone(),
        overall_score: overall_score(record),
        analysis: analyze_trend(record),
    }
}
