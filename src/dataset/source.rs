use async_trait::async_trait;
use std::path::PathBuf;

use super::RetrievalError;
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};

/// Something that can produce the raw dataset document.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn retrieve(&self) -> Result<Vec<u8>, RetrievalError>;

    /// Human-readable location, used in log fields.
    fn describe(&self) -> String;
}

/// Fetches the document from a URL through an [`HttpClient`].
pub struct HttpSource<C> {
    pub client: C,
    pub url: String,
}

impl HttpSource<BasicClient> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: BasicClient::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> DatasetSource for HttpSource<C> {
    async fn retrieve(&self) -> Result<Vec<u8>, RetrievalError> {
        fetch_bytes(&self.client, &self.url).await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the document from the local filesystem.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn retrieve(&self) -> Result<Vec<u8>, RetrievalError> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Picks a source for `location`: URLs go over HTTP, anything else is a path.
pub fn source_from(location: &str) -> Box<dyn DatasetSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

#[async_trait]
impl DatasetSource for Box<dyn DatasetSource> {
    async fn retrieve(&self) -> Result<Vec<u8>, RetrievalError> {
        (**self).retrieve().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_picks_by_scheme() {
        assert_eq!(
            source_from("https://example.org/dados_escolas.json").describe(),
            "https://example.org/dados_escolas.json"
        );
        assert_eq!(source_from("./dados_escolas.json").describe(), "./dados_escolas.json");
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/school_dashboard/dados.json");
        let err = source.retrieve().await.unwrap_err();
        assert!(matches!(err, RetrievalError::Io(_)));
    }

    #[tokio::test]
    async fn test_http_source_invalid_url_is_transport_error() {
        let source = HttpSource::new("http://");
        let err = source.retrieve().await.unwrap_err();
        assert!(matches!(err, RetrievalError::Transport(_)));
    }
}
