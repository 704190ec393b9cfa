//! Multi-provider client for generative text completion.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::{GenerationConfig, ModelConfig, ProviderKind};

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout. Generation on a cold model can be slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Repetition penalty used where a provider has no n-gram blocker.
const REPEAT_PENALTY: f64 = 1.3;

/// Build an HTTP client with proper timeout configuration.
fn build_http_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Errors from model adapter operations.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("API token not configured (env: {0})")]
    MissingApiKey(String),
    #[error("Model failed to load: {0}")]
    LoadFailed(String),
    #[error("Model is unavailable; generation is disabled")]
    Unavailable,
    #[error("Generation request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to parse generation response: {0}")]
    ParseError(String),
    #[error("Generation request timed out")]
    Timeout,
}

fn map_send_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else {
        ModelError::RequestFailed(e.to_string())
    }
}

/// Trait for text-generation providers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Hosted Hugging Face inference API provider.
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    client: Client,
    base_url: String,
    api_token: String,
    model: String,
    generation: GenerationConfig,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face provider.
    #[must_use]
    pub fn new(
        base_url: String,
        api_token: String,
        model: String,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            client: build_http_client(),
            base_url,
            api_token,
            model,
            generation,
        }
    }

    /// Check that the model identifier resolves on the inference API.
    async fn probe(&self) -> Result<(), ModelError> {
        let url = format!(
            "{}/status/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| ModelError::LoadFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ModelError::LoadFailed(format!(
                "model '{}' not available (HTTP {})",
                self.model,
                response.status()
            )))
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": self.generation.max_new_tokens,
                "no_repeat_ngram_size": self.generation.no_repeat_ngram_size,
                "return_full_text": false
            }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ModelError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::ParseError(e.to_string()))?;

        // Response format: [{"generated_text": "..."}]
        json[0]["generated_text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                ModelError::ParseError("No generated_text in response".to_string())
            })
    }
}

/// Local Ollama server provider.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    generation: GenerationConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    #[must_use]
    pub fn new(base_url: String, model: String, generation: GenerationConfig) -> Self {
        Self {
            client: build_http_client(),
            base_url,
            model,
            generation,
        }
    }

    /// Check that the server is reachable and the model is pulled.
    async fn probe(&self) -> Result<(), ModelError> {
        let url = format!("{}/api/tags", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModelError::LoadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ModelError::LoadFailed(format!(
                "Ollama server returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::LoadFailed(e.to_string()))?;

        let listed = json["models"]
            .as_array()
            .is_some_and(|models| {
                models.iter().any(|m| {
                    m["name"]
                        .as_str()
                        // Tags list names as "llama3:latest".
                        .is_some_and(|name| {
                            name == self.model
                                || name.split(':').next() == Some(self.model.as_str())
                        })
                })
            });

        if listed {
            Ok(())
        } else {
            Err(ModelError::LoadFailed(format!(
                "model '{}' is not pulled on the Ollama server",
                self.model
            )))
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        // Ollama has no n-gram blocker; repeat_penalty is its closest control.
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "num_predict": self.generation.max_new_tokens,
                "repeat_penalty": REPEAT_PENALTY
            }
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ModelError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::ParseError(e.to_string()))?;

        json["response"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| ModelError::ParseError("No response text in reply".to_string()))
    }
}

/// Provider enum for dispatch.
#[derive(Debug, Clone)]
pub enum Provider {
    HuggingFace(HuggingFaceProvider),
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build a provider from configuration and verify it can serve the model.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::MissingApiKey` if a hosted provider's token
    /// environment variable is unset, or `ModelError::LoadFailed` if the
    /// provider cannot be reached or does not know the model.
    pub async fn connect(config: &ModelConfig) -> Result<Self, ModelError> {
        match config.provider {
            ProviderKind::Huggingface => {
                let api_token = std::env::var(&config.api_key_env)
                    .map_err(|_| ModelError::MissingApiKey(config.api_key_env.clone()))?;
                let provider = HuggingFaceProvider::new(
                    config.base_url.clone(),
                    api_token,
                    config.model.clone(),
                    config.generation,
                );
                provider.probe().await?;
                Ok(Self::HuggingFace(provider))
            }
            ProviderKind::Ollama => {
                let provider = OllamaProvider::new(
                    config.base_url.clone(),
                    config.model.clone(),
                    config.generation,
                );
                provider.probe().await?;
                Ok(Self::Ollama(provider))
            }
        }
    }
}

#[async_trait]
impl TextGenerator for Provider {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        match self {
            Self::HuggingFace(p) => p.generate(prompt).await,
            Self::Ollama(p) => p.generate(prompt).await,
        }
    }
}

/// Handle to the generative model, acquired once at startup.
///
/// A failed load is non-fatal to the process: the adapter stays
/// `Unavailable` and only generation is disabled.
#[derive(Debug)]
pub enum ModelAdapter {
    Ready(Provider),
    Unavailable,
}

impl ModelAdapter {
    /// Acquire the model named in the configuration.
    ///
    /// Any acquisition failure (network, unknown identifier, missing token)
    /// degrades to `Unavailable` with a logged warning.
    pub async fn load(config: &ModelConfig) -> Self {
        match Provider::connect(config).await {
            Ok(provider) => {
                tracing::info!(model = %config.model, provider = ?config.provider, "Model ready");
                Self::Ready(provider)
            }
            Err(e) => {
                tracing::warn!(model = %config.model, error = %e, "Model load failed");
                Self::Unavailable
            }
        }
    }

    /// Whether generation is possible.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Generate a completion for the prompt.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Unavailable` when the adapter failed to load,
    /// or the underlying provider's error when the request fails.
    pub async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        match self {
            Self::Ready(provider) => provider.generate(prompt).await,
            Self::Unavailable => Err(ModelError::Unavailable),
        }
    }
}
