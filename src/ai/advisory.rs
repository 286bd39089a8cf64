//! Fixed summary and advice text for each sentiment.

use crate::journal_core::{AnalysisResult, Sentiment};

/// Pre-authored summary/advice pair for a sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub summary: &'static str,
    pub advice: &'static str,
}

const POSITIVE: Advisory = Advisory {
    summary: "Bugün genel olarak olumlu bir gün geçirmişsin.",
    advice: "Bu enerjiyi sevdiğin bir işe veya hedefine aktarabilirsin.",
};

const NEGATIVE: Advisory = Advisory {
    summary: "Bugün seni zorlayan ve yoran duygular baskın gibi görünüyor.",
    advice: "Kendine nazik ol, kısa bir mola ve güvendiğin biriyle konuşmak iyi gelebilir.",
};

const NEUTRAL: Advisory = Advisory {
    summary: "Bugünün karmaşık geçmiş gibi görünüyor.",
    advice: "Kendine biraz zaman ayırmayı unutma.",
};

/// Returns the fixed advisory text for a sentiment.
///
/// # Examples
///
/// ```
/// use mood_journal::ai::advise;
/// use mood_journal::journal_core::Sentiment;
///
/// let advisory = advise(Sentiment::Neutral);
/// assert_eq!(advisory.advice, "Kendine biraz zaman ayırmayı unutma.");
/// ```
pub fn advise(sentiment: Sentiment) -> Advisory {
    match sentiment {
        Sentiment::Positive => POSITIVE,
        Sentiment::Negative => NEGATIVE,
        Sentiment::Neutral => NEUTRAL,
    }
}

/// Builds the full analysis result for a sentiment.
pub fn analysis_for(sentiment: Sentiment) -> AnalysisResult {
    let advisory = advise(sentiment);
    AnalysisResult {
        sentiment,
        summary: advisory.summary.to_string(),
        advice: advisory.advice.to_string(),
    }
}
