//! Inference API client

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use agrichat_session::Message;

use crate::error::InferenceError;
use crate::types::{AskRequest, ChatReply, TextToTextRequest};
use crate::Result;

#[async_trait]
pub trait InferenceApi: Send + Sync {
    /// Multi-session chat: the prompt plus the full history of its session
    async fn text_to_text(&self, prompt: &str, history: &[Message]) -> Result<ChatReply>;

    /// Single-thread chat: one query, no history
    async fn ask(&self, query: &str) -> Result<ChatReply>;
}

pub struct HttpInferenceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpInferenceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| InferenceError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(InferenceError::InvalidUrl(base_url.to_string()));
        }

        // Endpoints are joined relative to the base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        self.base_url
            .join(name)
            .map_err(|e| InferenceError::InvalidUrl(format!("{name}: {e}")))
    }

    async fn post<B>(&self, name: &str, body: &B) -> Result<ChatReply>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(name)?;
        tracing::debug!(url = %url, "Sending inference request");

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // Error statuses still carry a JSON body
        let reply: ChatReply = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                error = reply.error.as_deref().unwrap_or("<none>"),
                "Inference API returned an error status"
            );
        }

        Ok(reply)
    }
}

#[async_trait]
impl InferenceApi for HttpInferenceClient {
    async fn text_to_text(&self, prompt: &str, history: &[Message]) -> Result<ChatReply> {
        self.post("text_to_text", &TextToTextRequest { prompt, history })
            .await
    }

    async fn ask(&self, query: &str) -> Result<ChatReply> {
        self.post("ask", &AskRequest { query }).await
    }
}

impl Clone for HttpInferenceClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
        }
    }
}
