//! Report webhook HTTP client
//!
//! Submits a dictation recording to the report-generation webhook and
//! classifies the reply. One request per call, no retry.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest body excerpt shown for failed replies
pub const SNIPPET_CHARS: usize = 500;

/// Client for the report webhook
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

/// Raw reply from the webhook
#[derive(Debug, Clone)]
pub struct WebhookReply {
    pub status: u16,
    pub elapsed: Duration,
    pub body: String,
}

/// Classified webhook reply
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    /// HTTP 200 with a truthy `"success"` field
    Success { report_text: Option<String> },
    /// HTTP 200 with a JSON body that does not report success
    Rejected { body: Value },
    /// Any other status, or a 200 whose body is not JSON
    HttpError { status: u16, snippet: String },
}

impl WebhookOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WebhookOutcome::Success { .. })
    }
}

impl WebhookReply {
    /// Classify the reply
    pub fn outcome(&self) -> WebhookOutcome {
        if self.status == 200 {
            if let Ok(body) = serde_json::from_str::<Value>(&self.body) {
                if body.get("success").is_some_and(is_truthy) {
                    let report_text = body
                        .get("report_text")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    return WebhookOutcome::Success { report_text };
                }
                return WebhookOutcome::Rejected { body };
            }
        }

        WebhookOutcome::HttpError {
            status: self.status,
            snippet: self.body.chars().take(SNIPPET_CHARS).collect(),
        }
    }
}

impl WebhookClient {
    /// Create a new webhook client
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Upload an audio file as the multipart field `audio`
    pub async fn submit_audio(&self, path: &Path, mime: &str) -> Result<WebhookReply> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime)
            .with_context(|| format!("Invalid MIME type: {}", mime))?;
        let form = Form::new().part("audio", part);

        let start = Instant::now();
        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;
        let status = response.status().as_u16();
        let body = response.text().await.context("Failed to read webhook reply")?;
        let elapsed = start.elapsed();

        if status == 200 {
            info!("Webhook replied {} in {:.1}s", status, elapsed.as_secs_f64());
        } else {
            warn!("Webhook replied {} in {:.1}s", status, elapsed.as_secs_f64());
        }

        Ok(WebhookReply {
            status,
            elapsed,
            body,
        })
    }
}

/// Loose truthiness: `false`, `null`, zero, and empty strings or
/// containers are false, everything else is true
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// MIME type for an audio file, from its extension
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("oga") | Some("opus") => "audio/ogg",
        _ => "audio/webm",
    }
}
