/*!
# mood-journal

mood-journal keeps a journal of short free-text entries. Each entry is sent to a
remote text-classification service, its emotional tone is reduced to one of
`positive`, `negative` or `neutral`, and a fixed summary and piece of advice are
attached before the entry is saved locally.

## Core Features

- Classify entry text through a Hugging Face style inference endpoint
- Downgrade low-confidence negative calls to neutral
- Attach pre-authored summary and advice per sentiment
- Keep entries newest-first in memory, persisted to a local snapshot in the background
- Degrade gracefully: no credential, no network, or a broken disk never fail an entry

## Architecture

- `ai`: Classification client and advisory text
- `journal_core`: Data model and entry validation
- `storage`: Durable key-value backends
- `store`: The in-memory journal and its persistence
- `ops`: Analysis pipeline and the write-entry flow
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use mood_journal::ai::ClassificationClient;
use mood_journal::ops::{write_entry, AnalysisPipeline};
use mood_journal::storage::FileStore;
use mood_journal::store::EntryStore;
use mood_journal::Config;
use std::sync::Arc;

#[tokio::main]
async fn main() -> mood_journal::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let pipeline = AnalysisPipeline::new(Arc::new(ClassificationClient::from_config(&config)?));
    let store = EntryStore::new(Arc::new(FileStore::open(&config.data_dir)?));
    store.load().await;

    let entry = write_entry(&pipeline, &store, "harika bir gün geçirdim").await?;
    println!("{}: {}", entry.sentiment, entry.summary);

    store.flush().await;
    Ok(())
}
```
*/

/// Classification client and advisory text
pub mod ai;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Journal data model and validation
pub mod journal_core;
/// High-level journaling operations
pub mod ops;
/// Durable key-value storage backends
pub mod storage;
/// The journal entry store
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{AnalysisResult, JournalEntry, Sentiment};
pub use store::EntryStore;
