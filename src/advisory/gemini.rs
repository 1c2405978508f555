//! Gemini `generateContent` client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{AdvisorySettings, Locale};
use crate::error::{MoneyflowError, MoneyflowResult};

use super::prompt::{build_prompt, keep_tracking_message, stay_focused_message};
use super::{Advisor, AdvisoryRequest};

const ERROR_EXCERPT_CHARS: usize = 200;

/// Advisor backed by the Gemini generative language API
pub struct GeminiAdvisor {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    locale: Locale,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
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

impl GeminiAdvisor {
    pub fn new(
        settings: &AdvisorySettings,
        api_key: String,
        locale: Locale,
    ) -> MoneyflowResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| MoneyflowError::Advisory(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
            locale,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Model text for `prompt`; `None` when the model returned no text
    async fn generate(&self, prompt: &str) -> MoneyflowResult<Option<String>> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MoneyflowError::Advisory(format!("Request timeout: {}", e))
                } else if e.is_connect() {
                    MoneyflowError::Advisory(format!("Connection failed: {}", e))
                } else {
                    MoneyflowError::Advisory(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MoneyflowError::Advisory(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(MoneyflowError::Advisory(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_excerpt(&text)
            )));
        }

        extract_text(&text)
    }
}

/// First characters of an error body, cut on a character boundary
fn error_excerpt(body: &str) -> String {
    body.chars().take(ERROR_EXCERPT_CHARS).collect()
}

/// Concatenated text parts of the first candidate.
///
/// Blank text counts as no text.
fn extract_text(body: &str) -> MoneyflowResult<Option<String>> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| MoneyflowError::Advisory(format!("Failed to parse response: {}", e)))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    async fn advise(&self, request: &AdvisoryRequest) -> String {
        let prompt = build_prompt(request, self.locale);
        debug!(model = %self.model, groups = request.top_groups().len(), "Requesting advice");

        match self.generate(&prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => keep_tracking_message(self.locale).to_string(),
            Err(e) => {
                warn!(error = %e, "Advisory request failed");
                stay_focused_message(self.locale).to_string()
            }
        }
    }
}

impl std::fmt::Debug for GeminiAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdvisor")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Corte o Uber. "},{"text":"Cozinhe mais."}]}}]}"#;
        assert_eq!(
            extract_text(body).unwrap().as_deref(),
            Some("Corte o Uber. Cozinhe mais.")
        );
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        assert_eq!(extract_text(r#"{"candidates":[]}"#).unwrap(), None);
        assert_eq!(extract_text("{}").unwrap(), None);
        assert_eq!(
            extract_text(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_extract_text_rejects_garbage() {
        assert!(extract_text("<html>").is_err());
    }

    #[test]
    fn test_url_shape() {
        let settings = AdvisorySettings {
            endpoint: "https://example.test/v1beta/".to_string(),
            ..AdvisorySettings::default()
        };
        let advisor = GeminiAdvisor::new(&settings, "key".into(), Locale::PtBr).unwrap();
        assert_eq!(
            advisor.url(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_resolves_to_fallback() {
        let settings = AdvisorySettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..AdvisorySettings::default()
        };
        let advisor = GeminiAdvisor::new(&settings, "key".into(), Locale::PtBr).unwrap();
        let request = AdvisoryRequest::new(Money::from_cents(100000), Money::from_cents(85000), vec![]);

        assert_eq!(
            advisor.advise(&request).await,
            "Mantenha o foco nos seus objetivos financeiros!"
        );
    }

    #[test]
    fn test_error_excerpt_respects_char_boundaries() {
        let body = format!("{}é requisição inválida", "a".repeat(199));
        let excerpt = error_excerpt(&body);
        assert_eq!(excerpt.chars().count(), 200);
        assert!(excerpt.ends_with('é'));
        assert_eq!(error_excerpt("curto"), "curto");
    }

    /// Answer one request with a 400 and a non-ASCII body
    async fn serve_bad_request(listener: tokio::net::TcpListener, body: String) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 400 Bad Request\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    }

    #[tokio::test]
    async fn test_error_body_with_multibyte_text_resolves_to_fallback() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = format!("{}é requisição inválida", "a".repeat(199));
        let server = tokio::spawn(serve_bad_request(listener, body));

        let settings = AdvisorySettings {
            endpoint: format!("http://{}", addr),
            timeout_secs: 5,
            ..AdvisorySettings::default()
        };
        let advisor = GeminiAdvisor::new(&settings, "key".into(), Locale::PtBr).unwrap();
        let request = AdvisoryRequest::new(Money::from_cents(100000), Money::from_cents(85000), vec![]);

        assert_eq!(
            advisor.advise(&request).await,
            "Mantenha o foco nos seus objetivos financeiros!"
        );
        server.await.unwrap();
    }
}
