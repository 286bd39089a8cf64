//! Write a new journal entry: validate, analyze, store.

use crate::errors::AppResult;
use crate::journal_core::{validate_entry_text, JournalEntry};
use crate::ops::AnalysisPipeline;
use crate::store::EntryStore;
use tracing::info;

/// Analyzes `text` and adds it to the journal.
///
/// The text is validated before anything is sent for classification, so an
/// empty or oversized entry never costs a request.
///
/// # Errors
///
/// Returns `AppError::Journal` if the text is empty after trimming or longer
/// than 500 characters. Classification and storage failures are not errors.
pub async fn write_entry(
    pipeline: &AnalysisPipeline,
    store: &EntryStore,
    text: &str,
) -> AppResult<JournalEntry> {
    let text = validate_entry_text(text)?;

    let analysis = pipeline.analyze(text).await;
    let entry = store.add(text, &analysis)?;

    info!("Saved entry {}", entry.id);
    Ok(entry)
}
