//! Blocking HTTP client for a local Ollama instance.
//!
//! Two endpoints are used: `POST /api/generate` for text generation and
//! `GET /api/tags` for a cheap liveness and model-availability probe. Calls
//! run on worker threads, never on the UI thread.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "granite3.1-dense:2b";

/// Short timeout for the status probe so an offline backend never stalls
/// the status bar for long.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("cannot reach Ollama - is it running on the configured endpoint?")]
    BackendUnreachable,
    #[error("request timed out waiting for the model")]
    Timeout,
    #[error("backend error: {detail}")]
    Backend { detail: String },
    #[error("backend returned an empty response")]
    EmptyResponse,
}

/// Whether the backend is reachable and serving the configured model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Ready,
    ModelMissing,
    Offline,
}

impl BackendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BackendStatus::Ready => "Ollama ready",
            BackendStatus::ModelMissing => "model not pulled",
            BackendStatus::Offline => "Ollama offline",
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Backend {
                detail: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Send one generation request and block until the model answers or the
    /// client timeout fires.
    pub fn generate(&self, prompt: &str, temperature: f64) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            temperature,
        };
        debug!(url = %url, temperature, prompt_len = prompt.len(), "sending generate request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            warn!(%status, "generate request failed");
            return Err(GenerationError::Backend {
                detail: format!("HTTP {status}: {detail}"),
            });
        }

        let parsed: GenerateResponse =
            response.json().map_err(|e| GenerationError::Backend {
                detail: format!("malformed response body: {e}"),
            })?;
        if parsed.response.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(parsed.response)
    }

    /// Probe `/api/tags` and classify the result. Errors collapse to
    /// [`BackendStatus::Offline`] since the probe is purely informational.
    pub fn check_status(&self) -> BackendStatus {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.http.get(&url).timeout(PROBE_TIMEOUT).send() {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "status probe failed");
                return BackendStatus::Offline;
            }
        };
        if !response.status().is_success() {
            return BackendStatus::Offline;
        }
        match response.json::<TagsResponse>() {
            Ok(tags) => classify_models(&tags.models, &self.model),
            Err(_) => BackendStatus::Offline,
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::BackendUnreachable
    } else {
        GenerationError::Backend {
            detail: e.to_string(),
        }
    }
}

/// A model counts as available on an exact tag match or when a served tag
/// starts with the configured name, so `granite3.1-dense:2b` matches a
/// configured `granite3.1-dense`.
fn classify_models(models: &[ModelTag], wanted: &str) -> BackendStatus {
    let found = models
        .iter()
        .any(|m| m.name == wanted || m.name.starts_with(wanted));
    if found {
        BackendStatus::Ready
    } else {
        BackendStatus::ModelMissing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one canned HTTP response on an ephemeral local port.
    fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                // Drain the full request, headers and body, before answering
                // so the client never sees a reset mid-write.
                let mut buf = [0u8; 4096];
                let mut seen = Vec::new();
                loop {
                    let Ok(n) = stream.read(&mut buf) else { break };
                    if n == 0 {
                        break;
                    }
                    seen.extend_from_slice(&buf[..n]);
                    let Some(header_end) =
                        seen.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
                    else {
                        continue;
                    };
                    let headers = String::from_utf8_lossy(&seen[..header_end]);
                    let content_length: usize = headers
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if seen.len() >= header_end + content_length {
                        break;
                    }
                }
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> OllamaClient {
        OllamaClient::new(base_url, DEFAULT_MODEL, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_generate_success_returns_response_field() {
        let url = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"model":"granite3.1-dense:2b","response":"Week 1: basics","done":true}"#,
        );
        let text = client(&url).generate("hello", 0.6).unwrap();
        assert_eq!(text, "Week 1: basics");
    }

    #[test]
    fn test_generate_empty_response_is_an_error() {
        let url = one_shot_server("HTTP/1.1 200 OK", r#"{"response":""}"#);
        let err = client(&url).generate("hello", 0.6).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[test]
    fn test_generate_server_error_maps_to_backend() {
        let url = one_shot_server("HTTP/1.1 500 Internal Server Error", "model exploded");
        let err = client(&url).generate("hello", 0.6).unwrap_err();
        match err {
            GenerationError::Backend { detail } => {
                assert!(detail.contains("500"));
                assert!(detail.contains("model exploded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generate_malformed_body_maps_to_backend() {
        let url = one_shot_server("HTTP/1.1 200 OK", "not json at all");
        let err = client(&url).generate("hello", 0.6).unwrap_err();
        assert!(matches!(err, GenerationError::Backend { .. }));
    }

    #[test]
    fn test_connection_refused_maps_to_unreachable() {
        // Bind to grab a free port, then drop the listener so nothing is
        // on the other end.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let err = client(&format!("http://{addr}"))
            .generate("hello", 0.6)
            .unwrap_err();
        assert!(matches!(err, GenerationError::BackendUnreachable));
    }

    #[test]
    fn test_check_status_offline_when_unreachable() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let status = client(&format!("http://{addr}")).check_status();
        assert_eq!(status, BackendStatus::Offline);
    }

    #[test]
    fn test_check_status_ready_when_model_listed() {
        let url = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"models":[{"name":"granite3.1-dense:2b"},{"name":"llama3:8b"}]}"#,
        );
        assert_eq!(client(&url).check_status(), BackendStatus::Ready);
    }

    #[test]
    fn test_check_status_model_missing() {
        let url = one_shot_server("HTTP/1.1 200 OK", r#"{"models":[{"name":"llama3:8b"}]}"#);
        assert_eq!(client(&url).check_status(), BackendStatus::ModelMissing);
    }

    #[test]
    fn test_classify_models_prefix_match() {
        let models = vec![ModelTag {
            name: "granite3.1-dense:2b".to_string(),
        }];
        assert_eq!(
            classify_models(&models, "granite3.1-dense"),
            BackendStatus::Ready
        );
        assert_eq!(
            classify_models(&models, "mistral"),
            BackendStatus::ModelMissing
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let c = OllamaClient::new(
            "http://localhost:11434/",
            DEFAULT_MODEL,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(c.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_error_messages_are_user_readable() {
        assert!(GenerationError::BackendUnreachable
            .to_string()
            .contains("Ollama"));
        assert!(GenerationError::Timeout.to_string().contains("timed out"));
    }
}
