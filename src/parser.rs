//! JSON parser for the school dataset document.

use crate::dataset::{DatasetDocument, RetrievalError};

/// Decodes a [`DatasetDocument`] from raw bytes.
///
/// # Errors
///
/// Returns [`RetrievalError::Malformed`] if the bytes are not JSON or lack the
/// school list.
pub fn parse_dataset(bytes: &[u8]) -> Result<DatasetDocument, RetrievalError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Category;

    #[test]
    fn test_parse_empty_bytes_fails() {
        let result = parse_dataset(&[]);
        assert!(matches!(result, Err(RetrievalError::Malformed(_))));
    }

    #[test]
    fn test_parse_missing_school_list_fails() {
        let result = parse_dataset(br#"{"resumo_rede": {"total_escolas": 3}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_valid_minimal_document() {
        let bytes = br#"{
            "escolas": [
                {"id": "a", "nome": "A", "tipo": "PEI", "score_super_bi": 90},
                {"id": "b", "nome": "B", "tipo": "Regular"}
            ],
            "resumo_rede": {"total_escolas": 2, "escolas_pei": 1, "escolas_regulares": 1}
        }"#;
        let doc = parse_dataset(bytes).unwrap();

        assert_eq!(doc.schools.len(), 2);
        assert_eq!(doc.schools[0].category, Category::Pei);
        assert_eq!(doc.schools[0].composite_score, Some(90.0));
        assert_eq!(doc.schools[1].composite_score, None);
        let summary = doc.summary.unwrap();
        assert_eq!(summary.total_schools, 2);
        assert_eq!(summary.mean_score_overall, None);
    }

    #[test]
    fn test_parse_float_student_count() {
        let bytes = br#"{
            "escolas": [
                {"id": "a", "nome": "A", "tipo": "PEI", "total_alunos": 512.0},
                {"id": "b", "nome": "B", "tipo": "Regular", "total_alunos": 430}
            ]
        }"#;
        let doc = parse_dataset(bytes).unwrap();

        assert_eq!(doc.schools[0].student_count, Some(512));
        assert_eq!(doc.schools[1].student_count, Some(430));
    }

    #[test]
    fn test_parse_english_keys() {
        let bytes = br#"{"schools": [{"id": "a", "category": "regular"}]}"#;
        let doc = parse_dataset(bytes).unwrap();

        assert_eq!(doc.schools[0].category, Category::Regular);
        assert!(doc.summary.is_none());
    }
}
