//! Turn free text into an analysis result.

use crate::ai::{analysis_for, Classifier};
use crate::journal_core::AnalysisResult;
use std::sync::Arc;
use tracing::info;

/// Runs classification and attaches the advisory text.
///
/// Analysis never fails from the caller's point of view: if the classifier
/// reports an error, the neutral result is returned instead.
#[derive(Clone)]
pub struct AnalysisPipeline {
    classifier: Arc<dyn Classifier>,
}

impl AnalysisPipeline {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Analyzes `text`.
    ///
    /// # Flow
    ///
    /// 1. Classify the text, falling back to neutral on failure
    /// 2. Look up the summary and advice for the sentiment
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let sentiment = self.classifier.classify(text).await;

        info!("Text analyzed as {}", sentiment);
        analysis_for(sentiment)
    }
}
