//! Realtor backend HTTP client implementation

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use super::types::*;

/// HTTP client for the Realtor assistant backend
#[derive(Debug, Clone)]
pub struct RealtorClient {
    base_url: String,
    client: Client,
}

impl RealtorClient {
    /// Create a new client with the given base URL and request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("Making GET request to {}", path);
        let response = self.client.get(self.endpoint(path)).send().await?;
        Self::decode(path, response).await
    }

    /// Make a POST request
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!("Making POST request to {}", path);
        let response = self.client.post(self.endpoint(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        tracing::debug!("Response from {}: {}", path, response.status());

        if !response.status().is_success() {
            return Err(anyhow!(
                "Request failed: {} {}",
                response.status(),
                response.text().await.unwrap_or_default()
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Malformed response from {}", path))
    }

    // ========================================================================
    // Chat API
    // ========================================================================

    /// Send a chat message and wait for the assistant's reply
    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post("/chat", request).await
    }

    // ========================================================================
    // Health API
    // ========================================================================

    /// Fetch backend health
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    /// Whether the backend is up and its chatbot is ready; any failure counts as not ready
    pub async fn is_ready(&self) -> bool {
        match self.health().await {
            Ok(health) => {
                tracing::debug!(
                    "Backend {} v{} at {} (chatbot ready: {})",
                    health.status,
                    health.version,
                    health.timestamp,
                    health.chatbot_ready
                );
                health.chatbot_ready
            }
            Err(e) => {
                tracing::warn!("System health check failed: {}", e);
                false
            }
        }
    }

    // ========================================================================
    // Auxiliary API
    // ========================================================================

    /// List knowledge base topics
    pub async fn topics(&self) -> Result<Vec<TopicCategory>> {
        self.get("/topics").await
    }

    /// Submit feedback for the session
    pub async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackAck> {
        self.post("/feedback", request).await
    }

    /// Fetch backend statistics
    pub async fn stats(&self) -> Result<serde_json::Value> {
        self.get("/stats").await
    }
}
