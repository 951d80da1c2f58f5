//! Embedding backends.
//!
//! The memory manager only depends on the [`Embedder`] trait; the shipped
//! backend talks to a local Ollama server.

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Turns text into a fixed-length vector.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Length of every vector this embedder returns.
    fn dimensions(&self) -> usize;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct LegacyEmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct LegacyEmbedResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding backend.
///
/// Uses `/api/embed`, falling back to the legacy `/api/embeddings`
/// endpoint on servers that predate it.
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
}

impl OllamaEmbedder {
    /// Create a backend producing `dimensions`-length vectors.
    pub fn new(config: &EmbeddingConfig, dimensions: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Embedding(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            dimensions,
            "Ollama embedder initialized"
        );
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimensions,
            timeout: config.timeout(),
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::EmbeddingTimeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            Error::Embedding(format!(
                "failed to connect to Ollama at {}. Is Ollama running?",
                self.base_url
            ))
        } else {
            Error::Embedding(e.to_string())
        }
    }

    /// `Ok(None)` when the server does not know the endpoint.
    async fn embed_current(&self, text: &str) -> Result<Option<Vec<f32>>> {
        let url = format!("{}/api/embed", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Embedding(format!("Ollama returned status {status}")));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("invalid embed response: {e}")))?;
        body.embeddings
            .into_iter()
            .next()
            .map(Some)
            .ok_or_else(|| Error::Embedding("Ollama returned no embeddings".into()))
    }

    async fn embed_legacy(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LegacyEmbedRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Embedding(format!("Ollama returned status {status}")));
        }
        let body: LegacyEmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("invalid embeddings response: {e}")))?;
        Ok(body.embedding)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = match self.embed_current(text).await? {
            Some(embedding) => embedding,
            None => {
                warn!("Ollama /api/embed not found, using legacy /api/embeddings");
                self.embed_legacy(text).await?
            }
        };

        if embedding.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        debug!(model = %self.model, chars = text.len(), "Embedded text");
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
