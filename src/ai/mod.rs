//! Sentiment classification and advisory text.
//!
//! This module provides the client for the remote text-classification endpoint and
//! the fixed summary/advice copy attached to each classification.
//!
//! # Module Structure
//!
//! - `classifier`: HTTP client and response normalization
//! - `advisory`: Summary and advice text per sentiment
//!
//! # Example
//!
//! ```no_run
//! use mood_journal::ai::{ClassificationClient, Classifier};
//! use std::time::Duration;
//!
//! # async fn run() -> mood_journal::AppResult<()> {
//! let client = ClassificationClient::new(
//!     "https://router.huggingface.co/hf-inference/models/cardiffnlp/twitter-xlm-roberta-base-sentiment",
//!     Some("hf_...".to_string()),
//!     Duration::from_secs(30),
//! )?;
//! let sentiment = client.classify("harika bir gün geçirdim").await;
//! # Ok(())
//! # }
//! ```

pub mod advisory;
pub mod classifier;

// Re-export commonly used types
pub use advisory::{advise, analysis_for, Advisory};
pub use classifier::{
    normalize_label, ClassificationClient, Classifier, ParsedResponse, Prediction,
};
