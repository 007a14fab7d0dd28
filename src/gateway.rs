use crate::chat::ChatMessage;
use crate::config::get_config;
use crate::constants::{CHAT_SYSTEM_INSTRUCTION, MERGE_INSTRUCTION};
use crate::errors::{TimeWeaverError, TimeWeaverResult};
use crate::image::EncodedImage;
use crate::logging::{log_api_call, ApiCallLog};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};

/// Client for the Gemini `generateContent` endpoints.
///
/// The base URL is injected rather than a constant so tests can point the
/// client at a mock server.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    image_model: String,
    chat_model: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        image_model: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            image_model: image_model.into(),
            chat_model: chat_model.into(),
            max_output_tokens: crate::constants::DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: 0.7,
        }
    }

    pub fn from_config() -> Self {
        let config = get_config();
        Self {
            http: Client::new(),
            base_url: config.api_base_url,
            api_key: config.api_key,
            image_model: config.image_model,
            chat_model: config.chat_model,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }

    fn endpoint_for_model(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Asks the image model to merge the two photos into the described scene.
    pub async fn generate_merged_image(
        &self,
        younger: &EncodedImage,
        older: &EncodedImage,
        prompt: &str,
    ) -> TimeWeaverResult<EncodedImage> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    inline_data_part(younger),
                    inline_data_part(older),
                    { "text": format!("{} {}.", MERGE_INSTRUCTION, prompt) },
                ],
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
            },
        });

        let endpoint = self.endpoint_for_model(&self.image_model);
        let body = self.post_generate(&endpoint, &payload, "generate_merged_image").await?;

        extract_inline_image(&body)
    }

    /// Sends the transcript plus the current turn to the chat model and
    /// returns the assistant's reply text.
    pub async fn converse(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> TimeWeaverResult<String> {
        let mut contents: Vec<Value> = history
            .iter()
            .map(|m| {
                json!({
                    "role": m.role.wire_role(),
                    "parts": [{ "text": m.text }],
                })
            })
            .collect();
        contents.push(json!({
            "role": "user",
            "parts": [{ "text": message }],
        }));

        let payload = json!({
            "contents": contents,
            "systemInstruction": {
                "parts": [{ "text": CHAT_SYSTEM_INSTRUCTION }],
            },
            "generationConfig": {
                "maxOutputTokens": self.max_output_tokens,
                "temperature": self.temperature,
            },
        });

        let endpoint = self.endpoint_for_model(&self.chat_model);
        let body = self.post_generate(&endpoint, &payload, "converse").await?;

        extract_reply_text(&body)
    }

    /// Shared request path: POST, status check, JSON parse, error-object
    /// check, call logging.
    async fn post_generate(
        &self,
        endpoint: &str,
        payload: &Value,
        summary: &str,
    ) -> TimeWeaverResult<Value> {
        let start_time = std::time::Instant::now();

        let response = self
            .http
            .post(endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| TimeWeaverError::gateway_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: endpoint.to_string(),
            request_summary: summary.to_string(),
            response_status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TimeWeaverError::gateway_error(format!(
                "API returned error: {} - {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            TimeWeaverError::gateway_error(format!("Failed to parse API response: {}", e))
        })?;

        if let Some(error) = body["error"].as_object() {
            return Err(TimeWeaverError::gateway_error(format!(
                "{}: {}",
                error["status"].as_str().unwrap_or("unknown"),
                error["message"].as_str().unwrap_or("no message")
            )));
        }

        Ok(body)
    }
}

fn inline_data_part(image: &EncodedImage) -> Value {
    json!({
        "inlineData": {
            "mimeType": image.mime_type(),
            "data": image.base64_data(),
        }
    })
}

/// Pulls the first inline image out of a `generateContent` response. The
/// response uses camelCase field names; snake_case is accepted too.
fn extract_inline_image(body: &Value) -> TimeWeaverResult<EncodedImage> {
    let parts = candidate_parts(body);

    for part in parts {
        let inline = part
            .get("inlineData")
            .or_else(|| part.get("inline_data"))
            .and_then(Value::as_object);
        let Some(inline) = inline else { continue };

        let data = inline.get("data").and_then(Value::as_str).unwrap_or_default();
        if data.is_empty() {
            continue;
        }

        let bytes = BASE64.decode(data.as_bytes()).map_err(|e| {
            TimeWeaverError::gateway_error(format!("Image payload decode failed: {}", e))
        })?;
        let mime_type = inline
            .get("mimeType")
            .or_else(|| inline.get("mime_type"))
            .and_then(Value::as_str)
            .unwrap_or("image/png");

        return Ok(EncodedImage::from_parts(mime_type, &bytes));
    }

    Err(TimeWeaverError::gateway_error(
        "Response contained no image data",
    ))
}

fn extract_reply_text(body: &Value) -> TimeWeaverResult<String> {
    let text = candidate_parts(body)
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(TimeWeaverError::gateway_error(
            "Response contained no text content",
        ));
    }

    Ok(text.trim().to_string())
}

fn candidate_parts(body: &Value) -> Vec<Value> {
    body.get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
