//! Data types for the school dataset document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analyzers::utility::present_mean;

/// School category. The dashboard compares [`Category::Pei`] against
/// [`Category::Regular`]; any other tag is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Pei,
    Regular,
    Other(String),
    #[default]
    Unspecified,
}

impl Category {
    /// Parses a category tag. Known tags match case-insensitively.
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            Category::Unspecified
        } else if trimmed.eq_ignore_ascii_case("pei") {
            Category::Pei
        } else if trimmed.eq_ignore_ascii_case("regular") {
            Category::Regular
        } else {
            Category::Other(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Pei => "PEI",
            Category::Regular => "Regular",
            Category::Other(tag) => tag,
            Category::Unspecified => "",
        }
    }

    /// Case-insensitive match against a raw tag.
    pub fn matches(&self, tag: &str) -> bool {
        self.as_str().to_lowercase() == tag.trim().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(tag.as_deref().map(Category::parse).unwrap_or_default())
    }
}

/// One school as it appears in the dataset document.
///
/// Numeric fields are optional: a record missing a metric is still valid and
/// the engine excludes the gap from averages instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "tipo")]
    pub category: Category,

    #[serde(default, alias = "frequencia_1bi")]
    pub attendance_period1: Option<f64>,
    #[serde(default, alias = "frequencia_2bi")]
    pub attendance_period2: Option<f64>,
    #[serde(default, alias = "rendimento_1bi")]
    pub performance_period1: Option<f64>,
    #[serde(default, alias = "rendimento_2bi")]
    pub performance_period2: Option<f64>,

    #[serde(default, alias = "aprovacao")]
    pub approval_rate: Option<f64>,
    #[serde(default, alias = "uso_plataformas")]
    pub platform_usage: Option<f64>,
    #[serde(default, alias = "engajamento_docente")]
    pub teacher_engagement: Option<f64>,
    #[serde(default, alias = "score_super_bi")]
    pub composite_score: Option<f64>,
    #[serde(default, alias = "classificacao")]
    pub classification: Option<String>,
    #[serde(default, alias = "total_alunos", deserialize_with = "lenient_count")]
    pub student_count: Option<u32>,
}

/// Accepts any JSON number as a count. Floats are truncated; negative,
/// out-of-range and non-numeric values read as absent.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let count = match value {
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u32::MAX as f64)
                .map(|v| v.trunc() as u32),
        },
        _ => None,
    };
    Ok(count)
}

/// Sort key for display names: accents stripped, lowercased.
fn name_key(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Orders schools by display name, ignoring case and accents. Names that
/// fold to the same key keep a stable byte order.
pub fn sort_by_name(schools: &mut [&SchoolRecord]) {
    schools.sort_by_cached_key(|s| (name_key(&s.name), s.name.clone()));
}

/// Network-wide counters shipped alongside the school list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    #[serde(default, alias = "total_escolas")]
    pub total_schools: usize,
    #[serde(default, alias = "escolas_pei")]
    pub pei_schools: usize,
    #[serde(default, alias = "escolas_regulares")]
    pub regular_schools: usize,
    #[serde(default, alias = "score_medio_geral")]
    pub mean_score_overall: Option<f64>,
    #[serde(default, alias = "score_medio_pei")]
    pub mean_score_pei: Option<f64>,
    #[serde(default, alias = "score_medio_regular")]
    pub mean_score_regular: Option<f64>,
    #[serde(default, alias = "frequencia_media_rede")]
    pub mean_attendance: Option<f64>,
    #[serde(default, alias = "rendimento_medio_rede")]
    pub mean_performance: Option<f64>,
    #[serde(default, alias = "aprovacao_media_rede")]
    pub mean_approval: Option<f64>,
}

impl NetworkSummary {
    /// Derives the summary from the records themselves. Used when the source
    /// document ships without one and for the embedded fallback.
    pub fn from_records(schools: &[SchoolRecord]) -> Self {
        let scores_of = |category: &Category| {
            present_mean(
                schools
                    .iter()
                    .filter(|s| &s.category == category)
                    .map(|s| s.composite_score),
            )
        };

        NetworkSummary {
            total_schools: schools.len(),
            pei_schools: schools.iter().filter(|s| s.category == Category::Pei).count(),
            regular_schools: schools
                .iter()
                .filter(|s| s.category == Category::Regular)
                .count(),
            mean_score_overall: Some(present_mean(schools.iter().map(|s| s.composite_score))),
            mean_score_pei: Some(scores_of(&Category::Pei)),
            mean_score_regular: Some(scores_of(&Category::Regular)),
            mean_attendance: Some(present_mean(schools.iter().map(|s| s.attendance_period2))),
            mean_performance: Some(present_mean(schools.iter().map(|s| s.performance_period2))),
            mean_approval: Some(present_mean(schools.iter().map(|s| s.approval_rate))),
        }
    }
}

/// The raw input document: the school list and an optional summary.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDocument {
    #[serde(alias = "escolas")]
    pub schools: Vec<SchoolRecord>,
    #[serde(default, alias = "resumo_rede")]
    pub summary: Option<NetworkSummary>,
}

/// Where the session's dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Source,
    Fallback,
}

/// The loaded, read-only snapshot for a session.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub origin: DataOrigin,
    pub loaded_at: DateTime<Utc>,
    pub schools: Vec<SchoolRecord>,
    pub summary: NetworkSummary,
}

impl Dataset {
    /// Adopts a parsed document, deriving the summary when the document has none.
    ///
    /// Ids must be unique: a record repeating an earlier id is dropped with a
    /// warning, and the first occurrence wins.
    pub fn from_document(doc: DatasetDocument) -> Self {
        let mut seen = HashSet::new();
        let mut schools = Vec::with_capacity(doc.schools.len());
        for school in doc.schools {
            if seen.contains(&school.id) {
                warn!(id = %school.id, name = %school.name, "Duplicate school id dropped");
                continue;
            }
            seen.insert(school.id.clone());
            schools.push(school);
        }

        let summary = doc
            .summary
            .unwrap_or_else(|| NetworkSummary::from_records(&schools));
        Dataset {
            origin: DataOrigin::Source,
            loaded_at: Utc::now(),
            schools,
            summary,
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&SchoolRecord> {
        self.schools.iter().find(|s| s.id == id)
    }

    /// Schools ordered by display name, the order the school picker lists them in.
    pub fn sorted_by_name(&self) -> Vec<&SchoolRecord> {
        let mut sorted: Vec<&SchoolRecord> = self.schools.iter().collect();
        sort_by_name(&mut sorted);
        sorted
    }
}
