use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{EditCapability, EditedImage};
use crate::config::ServiceConfig;
use crate::error::CapabilityError;

/// Finish reasons that mean the service refused to produce content.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "IMAGE_SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
    "RECITATION",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    InlineData(InlineDataRef<'a>),
    Text(&'a str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataRef<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

impl<'a> GenerateContentRequest<'a> {
    fn edit(image_base64: &'a str, mime_type: &'a str, instruction: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData(InlineDataRef {
                        mime_type,
                        data: image_base64,
                    }),
                    RequestPart::Text(instruction),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            },
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
    block_reason_message: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ResponsePart {
    text: Option<String>,
    #[serde(alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: Option<String>,
    data: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Extract the edited image from a successful `generateContent` response body.
pub fn parse_response(body: &str) -> Result<EditedImage, CapabilityError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| CapabilityError::MalformedResponse(e.to_string()))?;

    if let Some(feedback) = response.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            let detail = match feedback.block_reason_message {
                Some(message) => format!("{reason} ({message})"),
                None => reason,
            };
            return Err(CapabilityError::Blocked(detail));
        }
    }

    let mut texts = Vec::new();
    let mut finish_reasons = Vec::new();

    for candidate in response.candidates {
        if let Some(reason) = candidate.finish_reason {
            finish_reasons.push(reason);
        }
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts {
            if let Some(text) = part.text.filter(|t| !t.trim().is_empty()) {
                texts.push(text);
            }
            if let Some(inline) = part.inline_data.filter(|d| !d.data.is_empty()) {
                return Ok(EditedImage {
                    data: inline.data,
                    mime_type: inline.mime_type,
                    text: (!texts.is_empty()).then(|| texts.join("\n")),
                });
            }
        }
    }

    if let Some(reason) = finish_reasons
        .iter()
        .find(|r| BLOCKING_FINISH_REASONS.contains(&r.as_str()))
    {
        return Err(CapabilityError::Blocked(format!("finish reason {reason}")));
    }

    let detail = if texts.is_empty() {
        "no image data in the response".to_string()
    } else {
        texts.join("\n")
    };
    Err(CapabilityError::NoImage(detail))
}

/// Turn a non-success HTTP response into a readable error.
pub fn parse_error_response(status: u16, body: &str) -> CapabilityError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        Ok(envelope) => envelope
            .error
            .status
            .unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => format!("HTTP {status}"),
    };
    CapabilityError::Api { status, message }
}

fn transport_error(e: reqwest::Error) -> CapabilityError {
    if e.is_timeout() {
        CapabilityError::Transport("the request timed out".to_string())
    } else if e.is_connect() {
        CapabilityError::Transport(format!("could not connect to the edit service: {e}"))
    } else {
        CapabilityError::Transport(e.to_string())
    }
}

/// Gemini `generateContent` client for image edits.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, CapabilityError> {
        let api_key = config
            .resolve_api_key()
            .ok_or(CapabilityError::MissingApiKey)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl EditCapability for GeminiClient {
    fn edit(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<EditedImage, CapabilityError> {
        let body = GenerateContentRequest::edit(image_base64, mime_type, instruction);

        info!(
            model = %self.model,
            mime = mime_type,
            image_len = image_base64.len(),
            "Sending edit request"
        );

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().map_err(transport_error)?;
        debug!(status = %status, body_len = text.len(), "Edit response received");

        if !status.is_success() {
            let err = parse_error_response(status.as_u16(), &text);
            error!("Edit request failed: {err}");
            return Err(err);
        }

        parse_response(&text)
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"***")
            .finish()
    }
}
