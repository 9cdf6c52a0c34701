use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;
use tracing::debug;

use crate::core::{
    config::GenerationSettings,
    errors::GenerationCause,
    http::ensure_success,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self { role: Some("user".to_string()), parts: vec![Part { text: Some(text.to_string()) }] }
    }

    fn system(text: &str) -> Self {
        Self { role: None, parts: vec![Part { text: Some(text.to_string()) }] }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it produced any.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String =
            candidate.content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Thin wrapper over the `models/{model}:generateContent` endpoint with structured output.
#[derive(Clone)]
pub struct GeminiApi {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiApi {
    pub fn new(client: Client, settings: &GenerationSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Sends one prompt with a response schema and returns the raw JSON text payload.
    pub async fn generate_json(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        schema: Value,
    ) -> Result<String, GenerationCause> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerationCause::NotConfigured)?;

        let body = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: system_instruction.map(Content::system),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        };

        debug!(model = %self.model, "sending generateContent request");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let resp = ensure_success(resp)
            .await
            .map_err(|(status, body)| GenerationCause::Provider { status, body })?;

        let response: GenerateContentResponse = resp.json().await?;
        if let Some(reason) = response.candidates.first().and_then(|c| c.finish_reason.as_deref())
        {
            debug!(finish_reason = reason, "generateContent finished");
        }
        response.text().ok_or(GenerationCause::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_in_provider_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            system_instruction: Some(Content::system("be brief")),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: serde_json::json!({ "type": "STRING" }),
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"[{\"a\":"},{"text":"1}]"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some(r#"[{"a":1}]"#));
    }

    #[test]
    fn endpoint_names_the_configured_model() {
        let settings = GenerationSettings {
            model: "gemini-test".to_string(),
            api_base: "http://localhost:9/v1beta/".to_string(),
            ..GenerationSettings::default()
        };
        let api = GeminiApi::new(Client::new(), &settings);
        assert_eq!(api.model(), "gemini-test");
        assert_eq!(api.endpoint(), "http://localhost:9/v1beta/models/gemini-test:generateContent");
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }
}
