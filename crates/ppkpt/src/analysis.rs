//! AI analysis collaborator.
//!
//! Best-effort summarization of a report narrative through the
//! Generative Language API. The collaborator never touches stored report
//! state; failure degrades to a user-visible "unavailable" message.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};

/// Structured result of an analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// One-to-two sentence summary of the narrative.
    pub summary: String,
    /// Urgency category: Rendah, Sedang, or Tinggi.
    pub urgency: String,
    /// Incident category inferred from the narrative.
    pub category: String,
}

impl Assessment {
    /// Render the assessment as a single line suitable for caching on a
    /// report.
    #[must_use]
    pub fn as_note(&self) -> String {
        format!("[{}] {}: {}", self.urgency, self.category, self.summary)
    }
}

/// A provider that can assess a report narrative.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Assess the given title and description.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider is unreachable or returns an
    /// unusable response.
    async fn analyze(&self, title: &str, description: &str) -> Result<Assessment>;
}

/// Run `analyzer` and degrade any failure to `None`.
///
/// This is the collaborator contract: best-effort, one shot, no retry,
/// never fatal to the session.
pub async fn analyze_best_effort(
    analyzer: &dyn Analyzer,
    title: &str,
    description: &str,
) -> Option<Assessment> {
    match analyzer.analyze(title, description).await {
        Ok(assessment) => Some(assessment),
        Err(err) => {
            warn!("analysis unavailable: {err}");
            None
        }
    }
}

/// Analyzer backed by the Generative Language API.
#[derive(Debug)]
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiAnalyzer {
    /// Create an analyzer from the analysis configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::analysis_unavailable("no API key configured"))?
            .to_string();

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Build the generateContent request body, constraining the response
    /// to the assessment schema.
    fn request_body(title: &str, description: &str) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [{ "text": analysis_prompt(title, description) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "summary": { "type": "STRING" },
                        "urgency": { "type": "STRING" },
                        "category": { "type": "STRING" }
                    },
                    "required": ["summary", "urgency", "category"]
                }
            }
        })
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, title: &str, description: &str) -> Result<Assessment> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint, self.model
        );
        debug!("requesting analysis from {url}");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(title, description))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::analysis_unavailable(format!(
                "service returned {}",
                response.status()
            )));
        }

        let value: serde_json::Value = response.json().await?;
        parse_response(&value)
    }
}

/// Build the analysis prompt for a report narrative.
fn analysis_prompt(title: &str, description: &str) -> String {
    format!(
        "Analisislah laporan kekerasan di lingkungan kampus berikut.\n\
         Judul: {title}\n\
         Deskripsi: {description}\n\n\
         Berikan ringkasan singkat (1-2 kalimat) dan kategori urgensi \
         (Rendah, Sedang, Tinggi) berdasarkan narasi tersebut."
    )
}

/// Pull the schema-constrained JSON text out of a generateContent
/// response and parse it into an [`Assessment`].
fn parse_response(value: &serde_json::Value) -> Result<Assessment> {
    let text = value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| Error::analysis_unavailable("response carried no candidate text"))?;

    serde_json::from_str(text)
        .map_err(|err| Error::analysis_unavailable(format!("malformed assessment payload: {err}")))
}
