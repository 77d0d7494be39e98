//! reqwest-backed implementation of [`ChatTransport`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::TransportError;
use super::types::{BatchCheckResponse, ChatRequest, ChatResponse};

pub const CHAT_ENDPOINT: &str = "/api/chat";
pub const EMERGENCY_CHECK_ENDPOINT: &str = "/api/emergency/check";
pub const EMERGENCY_BATCH_CHECK_ENDPOINT: &str = "/api/emergency/batch-check";

/// Per-phase deadlines for one round-trip.
///
/// The defaults are generous because the hosted backend sleeps when idle and
/// needs 30-60s to wake up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(30),
            read: Duration::from_secs(60),
            write: Duration::from_secs(30),
        }
    }
}

impl Timeouts {
    /// reqwest has no write timeout, so the whole request is bounded by the sum
    /// of all three phases instead.
    pub fn overall(&self) -> Duration {
        self.connect + self.read + self.write
    }
}

/// Something that can carry a question to the backend and bring back its answer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Performs exactly one round-trip. No retries, no caching.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// HTTP transport talking to the chat backend at a fixed base URL.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeouts: Timeouts) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .timeout(timeouts.overall())
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(
            "HTTP transport ready: base_url={}, connect={:?}, read={:?}, write={:?}",
            base_url, timeouts.connect, timeouts.read, timeouts.write
        );

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Asks the backend whether a question mentions emergency symptoms.
    pub async fn check_emergency(&self, question: &str) -> Result<ChatResponse, TransportError> {
        self.post_json(EMERGENCY_CHECK_ENDPOINT, &ChatRequest::new(question))
            .await
    }

    /// Checks several questions for emergency symptoms in one call.
    pub async fn batch_check_emergency(
        &self,
        questions: &[String],
    ) -> Result<BatchCheckResponse, TransportError> {
        self.post_json(EMERGENCY_BATCH_CHECK_ENDPOINT, questions)
            .await
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        debug!("{} responded with HTTP {}", endpoint, status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error on {}: {} - {}", endpoint, status, body);
            return Err(TransportError::Server {
                status: status.as_u16(),
                body,
            });
        }

        // Read the body first so a malformed envelope is reported as a decode
        // error instead of a generic network failure.
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Undecodable body from {}: {} ({} bytes)", endpoint, e, text.len());
            TransportError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        info!(
            "Sending question ({} chars, session={:?})",
            request.question.chars().count(),
            request.session_id
        );
        let response: ChatResponse = self.post_json(CHAT_ENDPOINT, request).await?;

        match &response.data {
            Some(data) => info!(
                "Chat response: status={:?}, source={:?}, elapsed_ms={:?}, sections={}",
                response.status,
                data.source,
                data.elapsed_ms,
                data.sections.as_ref().map_or(0, Vec::len)
            ),
            None => info!(
                "Chat response: status={:?}, error={:?}",
                response.status,
                response.error.as_ref().map(|e| e.code.as_str())
            ),
        }

        Ok(response)
    }
}
