use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use aura_configuration::GenerationConfig;
use aura_domain::{DomainError, GenerativePort};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Adapter for a Gemini-shaped `generateContent` REST API. Single-shot
/// and stateless: the caller supplies the entire prompt each call.
pub struct GeminiGenerativeService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiGenerativeService {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl GenerativePort for GeminiGenerativeService {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| DomainError::generation(format!("transport failure: {err}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(DomainError::generation(format!(
                "request rejected with {status}: {detail}"
            )));
        }
        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| DomainError::generation(format!("malformed response: {err}")))?;

        let text = extract_text(payload);
        if text.trim().is_empty() {
            return Err(DomainError::generation("model returned no text"));
        }
        tracing::debug!(char_count = text.len(), "generation completed");
        Ok(text)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

/// Concatenates every text part of every candidate in wire order.
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).expect("response parses")
    }

    #[test]
    fn single_candidate_text_is_returned_verbatim() {
        let text = extract_text(response(
            r###"{"candidates":[{"content":{"parts":[{"text":"## Summary\nX"}]}}]}"###,
        ));
        assert_eq!(text, "## Summary\nX");
    }

    #[test]
    fn multiple_parts_concatenate_in_order() {
        let text = extract_text(response(
            r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#,
        ));
        assert_eq!(text, "ab");
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        assert_eq!(extract_text(response(r#"{"candidates":[]}"#)), "");
        assert_eq!(extract_text(response(r#"{}"#)), "");
    }

    #[test]
    fn textless_parts_are_skipped() {
        let text = extract_text(response(
            r#"{"candidates":[{"content":{"parts":[{},{"text":"kept"}]}}]}"#,
        ));
        assert_eq!(text, "kept");
    }
}
