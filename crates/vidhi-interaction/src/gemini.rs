//! GeminiClient - Direct REST API implementation for Gemini.
//!
//! This client calls the Gemini REST API directly without SDK dependency.
//! Credentials are loaded from secret.json.

use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vidhi_core::error::{Result, VidhiError};
use vidhi_core::grounding::{GroundingResult, MapResult, WebResult};
use vidhi_core::secret::SecretService;
use vidhi_core::TurnRole;

use crate::backend::{BackendReply, BackendRequest, GenerativeBackend, RequestPart};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Backend implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    /// Creates a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Loads credentials from a [`SecretService`].
    pub async fn try_from_secrets(service: &dyn SecretService) -> Result<Self> {
        let secrets = service.load_secrets().await?;
        let gemini = secrets
            .gemini
            .ok_or_else(|| VidhiError::config("Gemini configuration not found in secret.json"))?;
        Ok(Self::new(gemini.api_key))
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = model,
            api_key = self.api_key
        );

        debug!(model, "sending generateContent request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                VidhiError::backend(
                    format!("Gemini API request failed: {err}"),
                    err.is_connect() || err.is_timeout(),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        response.json().await.map_err(|err| {
            VidhiError::internal(format!("Failed to parse Gemini response: {err}"))
        })
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: BackendRequest) -> Result<BackendReply> {
        if request.parts.is_empty() {
            return Err(VidhiError::EmptyInput);
        }

        let wire = build_wire_request(&request);
        let response = self.send_request(&request.model, &wire).await?;
        Ok(reply_from_response(response))
    }
}

fn build_wire_request(request: &BackendRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|turn| Content {
            role: match turn.role {
                TurnRole::User => "user".to_string(),
                TurnRole::Model => "model".to_string(),
            },
            parts: vec![Part::Text {
                text: turn.text.clone(),
            }],
        })
        .collect();

    contents.push(Content {
        role: "user".to_string(),
        parts: request.parts.iter().map(part_to_wire).collect(),
    });

    let system_instruction = request.system_instruction.as_ref().map(|text| Content {
        role: "system".to_string(),
        parts: vec![Part::Text {
            text: text.to_string(),
        }],
    });

    let tools = request.tools.location_search.then(|| {
        vec![Tool {
            google_maps: EmptyObject {},
        }]
    });

    let tool_config = request.tools.spatial_bias.map(|coords| ToolConfig {
        retrieval_config: RetrievalConfig {
            lat_lng: LatLng {
                latitude: coords.latitude,
                longitude: coords.longitude,
            },
        },
    });

    GenerateContentRequest {
        contents,
        system_instruction,
        tools,
        tool_config,
    }
}

fn part_to_wire(part: &RequestPart) -> Part {
    match part {
        RequestPart::Text(text) => Part::Text { text: text.clone() },
        RequestPart::Inline(doc) => Part::InlineData {
            inline_data: InlineDataPayload {
                mime_type: doc.mime_type().to_string(),
                data: doc.data().to_string(),
            },
        },
    }
}

/// Extracts reply text and grounding chunks from the first candidate.
///
/// Absent text is an empty string, never an error; callers substitute
/// their own fallback wording.
fn reply_from_response(response: GenerateContentResponse) -> BackendReply {
    let Some(candidate) = response
        .candidates
        .and_then(|mut candidates| (!candidates.is_empty()).then(|| candidates.remove(0)))
    else {
        return BackendReply::default();
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let grounding = candidate
        .grounding_metadata
        .and_then(|metadata| metadata.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .map(classify_chunk)
        .collect();

    BackendReply { text, grounding }
}

/// Classifies a raw grounding chunk into a tagged result. Chunks lacking
/// a URI are not usable and become `Unknown`.
fn classify_chunk(chunk: GroundingChunkWire) -> GroundingResult {
    if let Some(maps) = chunk.maps {
        if let Some(uri) = maps.uri {
            let review_snippets = maps
                .place_answer_sources
                .and_then(|sources| sources.review_snippets)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|snippet| snippet.content)
                .collect();
            return GroundingResult::Map(MapResult {
                uri,
                title: maps.title.unwrap_or_default(),
                review_snippets,
            });
        }
        return GroundingResult::Unknown;
    }

    if let Some(web) = chunk.web {
        if let Some(uri) = web.uri {
            return GroundingResult::Web(WebResult {
                uri,
                title: web.title.unwrap_or_default(),
            });
        }
    }

    GroundingResult::Unknown
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> VidhiError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    let message = format!("HTTP {}: {message}", status.as_u16());
    if let Some(delay) = retry_after {
        VidhiError::backend_with_retry_after(message, is_retryable, delay)
    } else {
        VidhiError::backend(message, is_retryable)
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Retry-After HTTP-date parsing is omitted for simplicity
    None
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(rename = "toolConfig", skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "googleMaps")]
    google_maps: EmptyObject,
}

#[derive(Serialize)]
struct EmptyObject {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: LatLng,
}

#[derive(Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadataWire>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GroundingMetadataWire {
    #[serde(rename = "groundingChunks")]
    grounding_chunks: Option<Vec<GroundingChunkWire>>,
}

#[derive(Deserialize)]
struct GroundingChunkWire {
    maps: Option<MapsChunkWire>,
    web: Option<WebChunkWire>,
}

#[derive(Deserialize)]
struct MapsChunkWire {
    uri: Option<String>,
    title: Option<String>,
    #[serde(rename = "placeAnswerSources")]
    place_answer_sources: Option<PlaceAnswerSourcesWire>,
}

#[derive(Deserialize)]
struct PlaceAnswerSourcesWire {
    #[serde(rename = "reviewSnippets")]
    review_snippets: Option<Vec<ReviewSnippetWire>>,
}

#[derive(Deserialize)]
struct ReviewSnippetWire {
    content: Option<String>,
}

#[derive(Deserialize)]
struct WebChunkWire {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}
