/*!
# mood-journal - A Journal That Reads Your Mood

mood-journal is a command-line tool for keeping short daily journal entries. Each
entry is classified as positive, negative or neutral by a remote sentiment model,
and a short summary and piece of advice are attached before it is saved.

This file contains the main application flow, coordinating the various components
to implement the journal functionality.

## Usage

```
mood-journal [OPTIONS] <COMMAND>

Commands:
  write    Analyze a new entry and save it to the journal
  analyze  Analyze text without saving it
  list     List saved entries, newest first
  clear    Delete every saved entry

Options:
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
  -h, --help                     Print help
  -V, --version                  Print version
```

## Configuration

- `MOOD_JOURNAL_API_KEY` or `HF_API_KEY`: Credential for the classification endpoint.
  Without one every entry is classified as neutral.
- `MOOD_JOURNAL_API_URL`: Classification endpoint URL
- `MOOD_JOURNAL_DIR`: Where entries are stored (defaults to "~/.local/share/mood-journal")
- `MOOD_JOURNAL_TIMEOUT_SECS`: Request timeout in seconds (defaults to 30)
*/

use chrono::Local;
use mood_journal::ai::ClassificationClient;
use mood_journal::cli::{CliArgs, Command};
use mood_journal::config::Config;
use mood_journal::constants::{
    APP_NAME, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use mood_journal::errors::{AppError, AppResult};
use mood_journal::journal_core::{validate_entry_text, AnalysisResult, JournalEntry};
use mood_journal::ops::{write_entry, AnalysisPipeline};
use mood_journal::storage::FileStore;
use mood_journal::store::EntryStore;
use std::sync::Arc;
use tracing::{debug, info, Instrument};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// The main entry point for the mood-journal application.
///
/// This function coordinates the overall application flow:
/// 1. Parses command-line arguments
/// 2. Initializes logging
/// 3. Loads and validates configuration
/// 4. Runs the requested command inside the root tracing span
///
/// # Errors
///
/// Returns configuration errors, storage errors that prevent opening the data
/// directory, and journal errors for invalid entry text. Classification failures
/// never surface here; they degrade to a neutral analysis.
#[tokio::main]
async fn main() -> AppResult<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let span = tracing::info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %Uuid::new_v4()
    );

    async move {
        info!("Starting {}", APP_NAME);
        debug!("CLI arguments: {:?}", args);

        info!("Loading configuration");
        let config = Config::load()?;
        config.validate()?;
        debug!("Configuration: {:?}", config);

        run(args.command, &config).await
    }
    .instrument(span)
    .await
}

/// Sets up the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug` with
/// `--verbose`.
fn init_tracing(verbose: bool, log_format: &str) {
    let default_level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log_format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).init();
    } else {
        builder.init();
    }
}

async fn run(command: Command, config: &Config) -> AppResult<()> {
    match command {
        Command::Analyze { text } => {
            let text = text.join(" ");
            let text = validate_entry_text(&text)?;
            let pipeline = build_pipeline(config)?;
            let result = pipeline.analyze(text).await;
            print_analysis(&result);
            Ok(())
        }
        Command::Write { text } => {
            let pipeline = build_pipeline(config)?;
            let store = open_store(config).await?;

            let entry = write_entry(&pipeline, &store, &text.join(" ")).await?;
            print_analysis(&entry.analysis());

            store.flush().await;
            Ok(())
        }
        Command::List { limit, json } => {
            let store = open_store(config).await?;
            let mut entries = store.list();
            if let Some(limit) = limit {
                entries.truncate(limit);
            }

            if json {
                let rendered = serde_json::to_string_pretty(&entries)
                    .map_err(|e| AppError::Journal(format!("Failed to render entries: {}", e)))?;
                println!("{}", rendered);
            } else if entries.is_empty() {
                println!("Henüz bir günlük girişi yapmadın.");
            } else {
                for entry in entries.iter() {
                    print_entry(entry);
                }
            }
            Ok(())
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(AppError::Journal(
                    "Refusing to delete every entry without --yes".to_string(),
                ));
            }

            let store = open_store(config).await?;
            let count = store.len();

            // Always clear so an unreadable snapshot is removed too.
            store.clear();
            store.flush().await;
            info!("Cleared {} entries", count);

            if count == 0 {
                println!("Journal is already empty.");
            } else {
                println!("Deleted {} entries.", count);
            }
            Ok(())
        }
    }
}

fn build_pipeline(config: &Config) -> AppResult<AnalysisPipeline> {
    let client = ClassificationClient::from_config(config)?;
    if !client.has_credential() {
        info!("No API key configured; entries will be classified as neutral");
    }
    Ok(AnalysisPipeline::new(Arc::new(client)))
}

async fn open_store(config: &Config) -> AppResult<EntryStore> {
    let backend = FileStore::open_async(config.data_dir.clone()).await?;
    let store = EntryStore::new(Arc::new(backend));
    store.load().await;
    Ok(store)
}

fn print_analysis(result: &AnalysisResult) {
    println!(
        "Duygu: {} ({})",
        result.sentiment.display_name(),
        result.sentiment
    );
    println!("Özet: {}", result.summary);
    println!("Öneri: {}", result.advice);
}

fn print_entry(entry: &JournalEntry) {
    let created = entry.created_at.with_timezone(&Local);
    println!(
        "{}  [{}]",
        created.format("%Y-%m-%d %H:%M"),
        entry.sentiment.display_name()
    );
    println!("{}", entry.text);
    println!("Özet: {}", entry.summary);
    println!();
}
