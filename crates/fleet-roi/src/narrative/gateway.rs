use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::NarrativeConfig;

/// One text-generation call: a fixed system instruction plus the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeRequest {
    pub system_instruction: String,
    pub prompt: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("narrative collaborator is disabled")]
    Disabled,
    #[error("narrative request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("narrative collaborator answered with status {status}")]
    Status { status: u16 },
    #[error("narrative collaborator returned no usable candidate")]
    Blocked,
}

/// Untrusted text collaborator. Implementations return the raw text payload;
/// parsing and schema checks happen in the synthesizer.
#[async_trait]
pub trait NarrativeGateway: Send + Sync + Debug {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, GatewayError>;
}

/// Stand-in used when no API credential is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGateway;

#[async_trait]
impl NarrativeGateway for DisabledGateway {
    async fn generate(&self, _request: &NarrativeRequest) -> Result<String, GatewayError> {
        Err(GatewayError::Disabled)
    }
}

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini `generateContent` over REST.
#[derive(Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiGateway {
    pub fn new(api_key: String, config: &NarrativeConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("fleet-roi/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
            api_key,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        })
    }
}

impl Debug for GeminiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl NarrativeGateway for GeminiGateway {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, GatewayError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
                response_mime_type: "application/json",
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload.first_text().ok_or(GatewayError::Blocked)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Serialize)]
struct SafetySetting<'a> {
    category: &'a str,
    threshold: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
