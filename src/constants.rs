//! Constants used throughout the application.
//!
//! This module contains all constants used in the mood-journal application,
//! organized into logical groups. Having constants centralized makes them easier
//! to find, modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "mood-journal";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable holding the classification API credential.
pub const ENV_VAR_API_KEY: &str = "MOOD_JOURNAL_API_KEY";
/// Fallback environment variable for the credential (Hugging Face convention).
pub const ENV_VAR_HF_API_KEY: &str = "HF_API_KEY";
/// Environment variable overriding the classification endpoint URL.
pub const ENV_VAR_API_URL: &str = "MOOD_JOURNAL_API_URL";
/// Environment variable for the data directory.
pub const ENV_VAR_DATA_DIR: &str = "MOOD_JOURNAL_DIR";
/// Environment variable for the classification request timeout, in seconds.
pub const ENV_VAR_TIMEOUT_SECS: &str = "MOOD_JOURNAL_TIMEOUT_SECS";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default data directory, relative to the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".local/share/mood-journal";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Classification
/// Default inference endpoint (multilingual Twitter sentiment model).
pub const DEFAULT_API_URL: &str =
    "https://router.huggingface.co/hf-inference/models/cardiffnlp/twitter-xlm-roberta-base-sentiment";
/// Default request timeout for the classification endpoint.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Negative calls scoring below this are downgraded to neutral.
pub const NEGATIVE_CONFIDENCE_THRESHOLD: f64 = 0.8;

// Journal Entries
/// Maximum length of an entry, in characters.
pub const MAX_ENTRY_CHARS: usize = 500;
/// Storage key holding the serialized entry collection.
pub const ENTRIES_STORAGE_KEY: &str = "JOURNAL_ENTRIES_V1";

// File System Parameters
/// File extension for stored snapshots.
pub const STORAGE_FILE_EXTENSION: &str = "json";
/// Name of the lock file guarding a data directory.
pub const LOCK_FILE_NAME: &str = ".lock";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "mood-journal";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
