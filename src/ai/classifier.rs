//! HTTP client for the remote text-classification endpoint.
//!
//! The endpoint is a Hugging Face style inference API: it accepts
//! `{"inputs": "<text>"}` and answers with either a flat array of
//! `{label, score}` records or an array whose first element is such an array.
//! Whatever it returns is normalized to one of the three `Sentiment` values.

use crate::config::Config;
use crate::constants::{NEGATIVE_CONFIDENCE_THRESHOLD, REDACTED_PLACEHOLDER};
use crate::errors::{AIError, AppResult};
use crate::journal_core::Sentiment;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Label fragments and exact sentinel codes recognized for each sentiment.
const POSITIVE_FRAGMENTS: &[&str] = &["positive", "pos"];
const POSITIVE_SENTINELS: &[&str] = &["label_2", "label_1_pos"];
const NEGATIVE_FRAGMENTS: &[&str] = &["negative", "neg"];
const NEGATIVE_SENTINELS: &[&str] = &["label_0", "label_0_neg"];
const NEUTRAL_FRAGMENTS: &[&str] = &["neutral", "neu"];
const NEUTRAL_SENTINELS: &[&str] = &["label_1"];

/// Something that can assign a sentiment to a piece of text.
///
/// Implementations report failures through the `Result`; callers that need an
/// answer no matter what fall back to `Sentiment::Neutral`.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifies `text`, reporting why classification failed if it did.
    async fn try_classify(&self, text: &str) -> AppResult<Sentiment>;

    /// Classifies `text`, falling back to `Sentiment::Neutral` on any failure.
    ///
    /// Failures are logged at warn level and never returned.
    async fn classify(&self, text: &str) -> Sentiment {
        match self.try_classify(text).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!("Classification failed, falling back to neutral: {}", e);
                Sentiment::Neutral
            }
        }
    }
}

/// Request body for the inference endpoint.
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

/// The first record of a classifier response.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Lower-cased label; empty if the record had none.
    pub label: String,
    /// Confidence score, if the record carried a numeric one.
    pub score: Option<f64>,
}

/// A classifier response body, by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedResponse {
    /// `[{label, score}, ...]`
    Flat(Prediction),
    /// `[[{label, score}, ...], ...]`
    Nested(Prediction),
    /// Anything else, including empty arrays and non-object records.
    Unparseable,
}

impl ParsedResponse {
    /// Picks the first record out of a response body.
    pub fn from_json(body: &Value) -> Self {
        let Some(first) = body.as_array().and_then(|rows| rows.first()) else {
            return ParsedResponse::Unparseable;
        };

        match first {
            Value::Array(inner) => match inner.first().and_then(Prediction::from_record) {
                Some(prediction) => ParsedResponse::Nested(prediction),
                None => ParsedResponse::Unparseable,
            },
            record => match Prediction::from_record(record) {
                Some(prediction) => ParsedResponse::Flat(prediction),
                None => ParsedResponse::Unparseable,
            },
        }
    }

    /// The sentiment this response stands for.
    pub fn sentiment(&self) -> Sentiment {
        match self {
            ParsedResponse::Flat(prediction) | ParsedResponse::Nested(prediction) => {
                normalize_label(&prediction.label, prediction.score)
            }
            ParsedResponse::Unparseable => Sentiment::Neutral,
        }
    }
}

impl Prediction {
    fn from_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;

        let label = match fields.get("label") {
            Some(Value::String(label)) => label.to_lowercase(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        };
        let score = fields.get("score").and_then(Value::as_f64);

        Some(Prediction { label, score })
    }
}

fn matches_any(label: &str, fragments: &[&str], sentinels: &[&str]) -> bool {
    fragments.iter().any(|fragment| label.contains(fragment))
        || sentinels.iter().any(|sentinel| label == *sentinel)
}

/// Maps a classifier label and optional score to a sentiment.
///
/// A negative label with a score below 0.8 is treated as inconclusive and
/// downgraded to neutral. That check runs before the label table and only
/// affects the negative branch.
///
/// # Examples
///
/// ```
/// use mood_journal::ai::normalize_label;
/// use mood_journal::journal_core::Sentiment;
///
/// assert_eq!(normalize_label("Positive", Some(0.95)), Sentiment::Positive);
/// assert_eq!(normalize_label("negative", Some(0.4)), Sentiment::Neutral);
/// assert_eq!(normalize_label("negative", None), Sentiment::Negative);
/// assert_eq!(normalize_label("LABEL_2", None), Sentiment::Positive);
/// assert_eq!(normalize_label("", None), Sentiment::Neutral);
/// ```
pub fn normalize_label(label: &str, score: Option<f64>) -> Sentiment {
    let label = label.to_lowercase();
    let is_negative = matches_any(&label, NEGATIVE_FRAGMENTS, NEGATIVE_SENTINELS);

    if let Some(score) = score {
        if is_negative && score < NEGATIVE_CONFIDENCE_THRESHOLD {
            return Sentiment::Neutral;
        }
    }

    if label.is_empty() {
        return Sentiment::Neutral;
    }

    if matches_any(&label, POSITIVE_FRAGMENTS, POSITIVE_SENTINELS) {
        Sentiment::Positive
    } else if is_negative {
        Sentiment::Negative
    } else {
        // Explicit neutral labels and unknown labels land in the same place.
        Sentiment::Neutral
    }
}

/// Client for the remote text-classification endpoint.
pub struct ClassificationClient {
    api_url: String,
    api_key: Option<String>,
    client: Client,
}

impl fmt::Debug for ClassificationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationClient")
            .field("api_url", &self.api_url)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .finish()
    }
}

impl ClassificationClient {
    /// Creates a new classification client.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full URL of the inference endpoint
    /// * `api_key` - Bearer credential; `None` disables remote classification
    /// * `timeout` - Timeout applied to each request
    ///
    /// # Errors
    ///
    /// Returns `AIError::Transport` if the HTTP client cannot be initialized.
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AIError::Transport)?;

        Ok(Self {
            api_url: api_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client,
        })
    }

    /// Creates a client from the application configuration.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    /// Whether a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Classifier for ClassificationClient {
    /// Sends `text` to the endpoint and normalizes the answer.
    ///
    /// Without a credential no request is made and the result is neutral.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is not reachable or the request times out
    /// - The endpoint answers with a non-success status
    /// - The body is not JSON
    ///
    /// A JSON body of an unexpected shape is not an error; it yields neutral.
    async fn try_classify(&self, text: &str) -> AppResult<Sentiment> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No classification credential configured, skipping request");
            return Ok(Sentiment::Neutral);
        };

        debug!("Sending {} characters for classification", text.chars().count());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&ClassifyRequest { inputs: text })
            .send()
            .await
            .map_err(AIError::Transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AIError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: Value = response.json().await.map_err(|e| {
            AIError::InvalidResponse(format!("Failed to parse classification response: {}", e))
        })?;

        let parsed = ParsedResponse::from_json(&body);
        let sentiment = parsed.sentiment();
        debug!("Classifier response {:?} normalized to {}", parsed, sentiment);
        Ok(sentiment)
    }
}
