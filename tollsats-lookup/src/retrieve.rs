//! Retrieval seam for static artifacts
//!
//! The facade is transport-agnostic: anything that can fetch bytes by
//! artifact key works. A local directory serves development and tests; HTTP
//! serves the deployed static site. Keys are artifact-relative paths such
//! as `htc_index.json` or `best_origin/07.json`.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Retrieval errors, split so callers can treat "absent" differently from
/// transport trouble.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The key does not exist; chapter data treats this as empty.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The transport failed for some other reason.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Fetch the bytes stored under an artifact key.
#[async_trait]
pub trait Retrieve: Send + Sync {
    async fn retrieve(&self, key: &str) -> Result<Vec<u8>, RetrieveError>;
}

/// Serves artifacts from a local directory (a build output tree).
#[derive(Debug, Clone)]
pub struct FsRetriever {
    root: PathBuf,
}

impl FsRetriever {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Retrieve for FsRetriever {
    async fn retrieve(&self, key: &str) -> Result<Vec<u8>, RetrieveError> {
        let path = self.root.join(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(RetrieveError::NotFound(key.to_string()))
            }
            Err(err) => Err(RetrieveError::Transport(format!(
                "{}: {}",
                path.display(),
                err
            ))),
        }
    }
}

/// Fetches artifacts over HTTP from a static file host.
#[derive(Debug, Clone)]
pub struct HttpRetriever {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRetriever {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Retrieve for HttpRetriever {
    async fn retrieve(&self, key: &str) -> Result<Vec<u8>, RetrieveError> {
        let url = format!("{}/{}", self.base_url, key);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| RetrieveError::Transport(format!("{url}: {err}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RetrieveError::NotFound(key.to_string()));
        }
        if !response.status().is_success() {
            return Err(RetrieveError::Transport(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|err| RetrieveError::Transport(format!("{url}: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_fs_retriever_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("htc_index.json")).unwrap();
        file.write_all(b"[]").unwrap();

        let retriever = FsRetriever::new(dir.path());
        let bytes = retriever.retrieve("htc_index.json").await.unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[tokio::test]
    async fn test_fs_retriever_maps_missing_file_to_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let retriever = FsRetriever::new(dir.path());
        match retriever.retrieve("best_origin/07.json").await {
            Err(RetrieveError::NotFound(key)) => assert_eq!(key, "best_origin/07.json"),
            other => panic!("expected NotFound, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_http_retriever_normalizes_base_url() {
        let retriever = HttpRetriever::new("https://example.org/data/");
        assert_eq!(retriever.base_url, "https://example.org/data");
    }
}
