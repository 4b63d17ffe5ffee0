//! Ollama API client for local LLM inference.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models;
use crate::settings::EffectiveSettings;

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Placeholder text when the endpoint cannot be reached at all.
pub const CONNECT_FAILED_TEXT: &str = "// Failed to connect to Ollama";

/// Placeholder text when the endpoint answered without generated text.
pub const NO_RESPONSE_TEXT: &str = "// No response from model.";

/// Ollama API client.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the model-listing surface. The generation path never returns
/// these; it classifies failures into [`InferenceResult`] instead.
#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Ollama server not running at {0}. Start it with: ollama serve")]
    ServerNotRunning(String),
}

/// Outcome of one inference call. Never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResult {
    Success { text: String },
    Failure { kind: FailureKind, message: String },
}

/// Classified failure modes of the inference call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not be sent or no response was received.
    Network,
    /// A response arrived but carried no usable generation.
    MalformedResponse,
    /// The settings name a model unknown to the defaults table; detected
    /// before any network I/O.
    Configuration,
}

/// Request to the Ollama generate API.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    think: Option<bool>,
    options: GenerateOptions,
}

/// Inference options forwarded from the effective settings.
#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_ctx: u32,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    min_p: f32,
    repeat_penalty: f32,
    num_predict: i32,
    num_gpu: i32,
}

impl From<&EffectiveSettings> for GenerateOptions {
    fn from(settings: &EffectiveSettings) -> Self {
        Self {
            num_ctx: settings.context,
            temperature: settings.temperature,
            top_k: settings.top_k,
            top_p: settings.top_p,
            min_p: settings.min_p,
            repeat_penalty: settings.repeat_penalty,
            num_predict: settings.num_predict,
            num_gpu: settings.num_gpu,
        }
    }
}

/// Response from the Ollama generate API. The text field is optional by
/// contract.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Response from the Ollama tags API (list models).
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<TaggedModel>,
}

#[derive(Debug, Deserialize)]
struct TaggedModel {
    name: String,
}

impl OllamaClient {
    /// Create a client against the host from the environment, falling back
    /// to [`DEFAULT_OLLAMA_URL`].
    pub fn new() -> Self {
        Self::with_url(url_from_env())
    }

    /// Create a client against a specific base URL.
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one non-streaming generation request.
    ///
    /// This never returns an error: every failure mode is classified into
    /// the result. No retries are performed.
    pub async fn query(&self, prompt: &str, settings: &EffectiveSettings) -> InferenceResult {
        // An unknown model is guaranteed to fail server-side; abort before
        // any network call.
        if models::profile(&settings.model_id).is_none() {
            return InferenceResult::Failure {
                kind: FailureKind::Configuration,
                message: format!("unknown model '{}'", settings.model_id),
            };
        }

        let request = GenerateRequest {
            model: &settings.model_id,
            prompt,
            stream: false,
            think: settings.thinking_enabled.then_some(true),
            options: GenerateOptions::from(settings),
        };

        let url = format!("{}/api/generate", self.base_url);
        debug!("POST {} (model {})", url, settings.model_id);

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                return InferenceResult::Failure {
                    kind: FailureKind::Network,
                    message: err.to_string(),
                };
            }
        };

        // The server answered; from here on the call is a success and the
        // absence of generated text is itself the feedback shown to the user.
        if !response.status().is_success() {
            warn!("Ollama returned {} for {}", response.status(), url);
            return InferenceResult::Success {
                text: NO_RESPONSE_TEXT.to_string(),
            };
        }

        match response.json::<GenerateResponse>().await {
            Ok(GenerateResponse {
                response: Some(text),
            }) => InferenceResult::Success { text },
            Ok(GenerateResponse { response: None }) => {
                debug!("Response body carried no 'response' field");
                InferenceResult::Success {
                    text: NO_RESPONSE_TEXT.to_string(),
                }
            }
            Err(err) => {
                warn!("Undecodable response body: {}", err);
                InferenceResult::Success {
                    text: NO_RESPONSE_TEXT.to_string(),
                }
            }
        }
    }

    /// List the models the server can run, for the settings surface.
    pub async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                OllamaError::ServerNotRunning(self.base_url.clone())
            } else {
                OllamaError::Http(e)
            }
        })?;

        if !response.status().is_success() {
            return Err(OllamaError::ServerNotRunning(self.base_url.clone()));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

fn url_from_env() -> String {
    std::env::var("WINGMAN_OLLAMA_URL")
        .or_else(|_| std::env::var("OLLAMA_HOST"))
        .map(|host| normalize_host(&host))
        .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string())
}

/// `OLLAMA_HOST` is sometimes just `host` or `host:port` without a scheme.
fn normalize_host(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", host.trim_end_matches('/'))
    }
}
