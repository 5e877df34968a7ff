use chrono::Utc;

use super::types::{Category, DataOrigin, Dataset, NetworkSummary, SchoolRecord};

/// The embedded dataset adopted when the document cannot be retrieved.
///
/// One school per category. The summary is derived from these records so its
/// counters always agree with the list.
pub fn fallback_dataset() -> Dataset {
    let schools = vec![
        SchoolRecord {
            id: "pei_edith_silveira".to_string(),
            name: "PEI EE Profª Edith Silveira Dalmaso".to_string(),
            category: Category::Pei,
            attendance_period1: Some(91.9),
            attendance_period2: Some(93.0),
            performance_period1: Some(7.7),
            performance_period2: Some(7.6),
            approval_rate: Some(87.8),
            platform_usage: Some(90.0),
            teacher_engagement: Some(4.5),
            composite_score: Some(86.7),
            classification: Some("MUITO BOM".to_string()),
            student_count: None,
        },
        SchoolRecord {
            id: "ee_plinio_berardo".to_string(),
            name: "EE Profº Plínio Berardo".to_string(),
            category: Category::Regular,
            attendance_period1: Some(84.8),
            attendance_period2: Some(87.0),
            performance_period1: Some(6.9),
            performance_period2: Some(6.8),
            approval_rate: Some(80.9),
            platform_usage: Some(76.7),
            teacher_engagement: Some(3.8),
            composite_score: Some(79.8),
            classification: Some("BOM".to_string()),
            student_count: None,
        },
    ];

    let summary = NetworkSummary::from_records(&schools);

    Dataset {
        origin: DataOrigin::Fallback,
        loaded_at: Utc::now(),
        schools,
        summary,
    }
}
