//! HTTP client for the internal curriculum endpoint.

use thiserror::Error;

use crate::model::{self, Curriculum};

/// Why a curriculum fetch failed.
///
/// Non-2xx statuses and undecodable bodies are explicit failures; callers
/// must surface them as an error state, never as an empty curriculum.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("curriculum request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("curriculum endpoint returned status {0}")]
    Status(u16),
    /// The response body was not a valid curriculum payload.
    #[error("invalid curriculum payload: {0}")]
    Decode(String),
}

/// Client for `GET {base}/api/curriculums/{slug}`.
#[derive(Debug, Clone)]
pub struct CurriculumClient {
    http: reqwest::Client,
    base_url: String,
}

impl CurriculumClient {
    /// Client against the given base URL (scheme + host, no trailing path).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent("cms-curriculum/0.3")
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch and decode the curriculum for a course slug.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] on any non-2xx response and
    /// [`FetchError::Decode`] when the body is not the expected shape.
    pub async fn fetch(&self, slug: &str) -> Result<Curriculum, FetchError> {
        let url = format!(
            "{}/api/curriculums/{slug}",
            self.base_url.trim_end_matches('/')
        );
        tracing::debug!(%url, "fetching curriculum");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        model::decode(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        let status = FetchError::Status(404);
        assert_eq!(
            status.to_string(),
            "curriculum endpoint returned status 404"
        );

        let decode = FetchError::Decode("expected value at line 1".to_owned());
        assert!(decode.to_string().contains("invalid curriculum payload"));
    }
}
