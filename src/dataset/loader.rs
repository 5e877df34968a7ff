use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::fallback::fallback_dataset;
use super::source::DatasetSource;
use super::types::Dataset;
use super::RetrievalError;
use crate::parser::parse_dataset;

/// Session-scoped loader. The first [`load`](Self::load) retrieves and parses
/// the document; every later call returns the same snapshot without touching
/// the source again.
pub struct DatasetLoader<S> {
    source: S,
    snapshot: OnceCell<Dataset>,
}

impl<S: DatasetSource> DatasetLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshot: OnceCell::new(),
        }
    }

    /// Returns the session dataset, loading it on first use.
    ///
    /// Never fails: if the source cannot produce a valid document the embedded
    /// fallback is adopted for the rest of the session.
    pub async fn load(&self) -> &Dataset {
        self.snapshot.get_or_init(|| self.load_uncached()).await
    }

    /// `true` once a snapshot (real or fallback) has been adopted.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.initialized()
    }

    #[tracing::instrument(skip(self), fields(source = %self.source.describe()))]
    async fn load_uncached(&self) -> Dataset {
        match self.retrieve().await {
            Ok(dataset) => {
                info!(
                    schools = dataset.schools.len(),
                    total = dataset.summary.total_schools,
                    loaded_at = %dataset.loaded_at,
                    "Dataset loaded"
                );
                dataset
            }
            Err(e) => {
                warn!(error = %e, "Dataset retrieval failed, using fallback data");
                fallback_dataset()
            }
        }
    }

    async fn retrieve(&self) -> Result<Dataset, RetrievalError> {
        let bytes = self.source.retrieve().await?;
        debug!(bytes = bytes.len(), "Dataset bytes received, parsing");
        let doc = parse_dataset(&bytes)?;
        Ok(Dataset::from_document(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataOrigin;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves `body` on the first call and fails on every call after that.
    struct OneShotSource {
        body: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl OneShotSource {
        fn new(body: Option<&'static str>) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DatasetSource for OneShotSource {
        async fn retrieve(&self) -> Result<Vec<u8>, RetrievalError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Some(body) if call == 0 => Ok(body.as_bytes().to_vec()),
                _ => Err(RetrievalError::Status(503)),
            }
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    const DOCUMENT: &str = r#"{
        "escolas": [
            {"id": "a", "nome": "A", "tipo": "PEI", "score_super_bi": 86.7},
            {"id": "b", "nome": "B", "tipo": "PEI", "score_super_bi": 90.0},
            {"id": "c", "nome": "C", "tipo": "Regular", "score_super_bi": 79.8}
        ],
        "resumo_rede": {"total_escolas": 3, "escolas_pei": 2, "escolas_regulares": 1}
    }"#;

    #[tokio::test]
    async fn test_second_load_is_memoized() {
        let loader = DatasetLoader::new(OneShotSource::new(Some(DOCUMENT)));
        assert!(!loader.is_loaded());

        let first = loader.load().await.clone();
        let second = loader.load().await;

        assert!(loader.is_loaded());
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.origin, DataOrigin::Source);
        assert_eq!(second.loaded_at, first.loaded_at);
        assert_eq!(second.schools, first.schools);
        assert_eq!(second.summary, first.summary);
    }

    #[tokio::test]
    async fn test_failing_source_falls_back() {
        let loader = DatasetLoader::new(OneShotSource::new(None));
        let dataset = loader.load().await;

        assert_eq!(dataset.origin, DataOrigin::Fallback);
        assert!(!dataset.schools.is_empty());
        assert_eq!(dataset.summary.total_schools, dataset.schools.len());
    }

    #[tokio::test]
    async fn test_fallback_is_permanent_for_the_session() {
        let loader = DatasetLoader::new(OneShotSource::new(None));
        loader.load().await;
        loader.load().await;

        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_document_falls_back() {
        let loader = DatasetLoader::new(OneShotSource::new(Some("<html>not found</html>")));
        let dataset = loader.load().await;

        assert_eq!(dataset.origin, DataOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_dropped_on_load() {
        const DUPLICATED: &str = r#"{
            "escolas": [
                {"id": "a", "nome": "A", "tipo": "PEI", "score_super_bi": 90.0},
                {"id": "a", "nome": "A again", "tipo": "Regular", "score_super_bi": 70.0}
            ]
        }"#;
        let loader = DatasetLoader::new(OneShotSource::new(Some(DUPLICATED)));
        let dataset = loader.load().await;

        assert_eq!(dataset.origin, DataOrigin::Source);
        assert_eq!(dataset.schools.len(), 1);
        assert_eq!(dataset.summary.regular_schools, 0);
    }

    #[tokio::test]
    async fn test_separate_sessions_are_independent() {
        let ok = DatasetLoader::new(OneShotSource::new(Some(DOCUMENT)));
        let failing = DatasetLoader::new(OneShotSource::new(None));

        assert_eq!(ok.load().await.schools.len(), 3);
        assert_eq!(failing.load().await.origin, DataOrigin::Fallback);
    }
}
