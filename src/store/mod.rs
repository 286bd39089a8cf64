//! The journal entry store.
//!
//! `EntryStore` owns the ordered, newest-first collection of journal entries for a
//! session and keeps it synchronized with a durable `KeyValueStore`:
//!
//! - `load` reads the stored snapshot once, treating a missing or corrupt snapshot
//!   as an empty journal.
//! - `add` and `clear` update the in-memory collection before returning and then
//!   schedule a background persist. The in-memory collection is authoritative; a
//!   failed persist is logged and never rolled back.
//!
//! # Lifecycle
//!
//! A store starts `Uninitialized`, is `Loading` while the snapshot is read, and is
//! `Ready` afterwards. Mutations made before `Ready` are applied to the in-memory
//! view immediately and also kept in a pending log. When the load finishes, the
//! log is replayed on top of the loaded snapshot, so neither side is lost, and a
//! single persist is scheduled.
//!
//! # Persistence
//!
//! At most one write is in flight. Every mutation bumps a generation counter; one
//! background writer keeps writing the latest snapshot until it has written the
//! current generation. Mutations made while a write is running are folded into
//! the next write. An empty collection is persisted by deleting the key.
//!
//! # Example
//!
//! ```no_run
//! use mood_journal::ai::analysis_for;
//! use mood_journal::journal_core::Sentiment;
//! use mood_journal::storage::MemoryStore;
//! use mood_journal::store::EntryStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> mood_journal::AppResult<()> {
//! let store = EntryStore::new(Arc::new(MemoryStore::new()));
//! store.load().await;
//!
//! store.add("harika bir gün geçirdim", &analysis_for(Sentiment::Positive))?;
//! assert_eq!(store.len(), 1);
//!
//! store.flush().await;
//! # Ok(())
//! # }
//! ```

use crate::constants::ENTRIES_STORAGE_KEY;
use crate::errors::{AppResult, StorageError};
use crate::journal_core::{AnalysisResult, JournalEntry};
use crate::storage::KeyValueStore;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn, Instrument};

/// Where a store is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// `load` has not been called.
    Uninitialized,
    /// The stored snapshot is being read.
    Loading,
    /// The snapshot has been merged; mutations persist immediately.
    Ready,
}

/// A mutation recorded before the store became ready.
#[derive(Debug, Clone)]
enum Mutation {
    Add(JournalEntry),
    Clear,
}

impl Mutation {
    fn apply(&self, entries: &mut Vec<JournalEntry>) {
        match self {
            Mutation::Add(entry) => entries.insert(0, entry.clone()),
            Mutation::Clear => entries.clear(),
        }
    }
}

#[derive(Debug)]
struct State {
    lifecycle: Lifecycle,
    entries: Vec<JournalEntry>,
    pending: Vec<Mutation>,
    /// Bumped on every mutation that needs persisting.
    generation: u64,
    /// Generation covered by the last completed write attempt.
    persisted: u64,
    writer_active: bool,
}

struct Shared {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    state: Mutex<State>,
    /// Signalled when the writer goes idle.
    idle: Notify,
    /// Signalled when loading finishes.
    ready: Notify,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        // The state is only mutated in short, non-panicking sections.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The session's journal entries, synchronized with durable storage.
///
/// Cloning an `EntryStore` yields another handle to the same collection.
#[derive(Clone)]
pub struct EntryStore {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state();
        f.debug_struct("EntryStore")
            .field("key", &self.shared.key)
            .field("lifecycle", &state.lifecycle)
            .field("entries", &state.entries.len())
            .finish()
    }
}

impl EntryStore {
    /// Creates a store persisting under the default `JOURNAL_ENTRIES_V1` key.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, ENTRIES_STORAGE_KEY)
    }

    /// Creates a store persisting under `key`.
    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                key: key.into(),
                state: Mutex::new(State {
                    lifecycle: Lifecycle::Uninitialized,
                    entries: Vec::new(),
                    pending: Vec::new(),
                    generation: 0,
                    persisted: 0,
                    writer_active: false,
                }),
                idle: Notify::new(),
                ready: Notify::new(),
            }),
        }
    }

    /// Current lifecycle stage.
    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.state().lifecycle
    }

    /// Reads the stored snapshot and makes the store ready.
    ///
    /// Only the first call reads storage; a call made while another load is in
    /// progress waits for it, and calls after that return immediately. A missing
    /// key, unreadable storage or an unparseable snapshot all yield an empty
    /// journal; the cause is logged.
    pub async fn load(&self) {
        loop {
            let ready = self.shared.ready.notified();
            {
                let mut state = self.shared.state();
                let lifecycle = state.lifecycle;
                match lifecycle {
                    Lifecycle::Ready => return,
                    Lifecycle::Loading => {}
                    Lifecycle::Uninitialized => {
                        state.lifecycle = Lifecycle::Loading;
                        break;
                    }
                }
            }
            ready.await;
        }

        let loaded = self.read_snapshot().await;

        let needs_writer = {
            let mut state = self.shared.state();
            let mut entries = loaded;
            let pending: Vec<Mutation> = state.pending.drain(..).collect();
            for mutation in pending.iter() {
                mutation.apply(&mut entries);
            }
            state.entries = entries;
            state.lifecycle = Lifecycle::Ready;

            info!(
                "Journal ready with {} entries ({} replayed from before load)",
                state.entries.len(),
                pending.len()
            );

            !pending.is_empty() && Self::mark_dirty(&mut state)
        };

        self.shared.ready.notify_waiters();
        if needs_writer {
            self.spawn_writer();
        }
    }

    async fn read_snapshot(&self) -> Vec<JournalEntry> {
        let raw = match self.shared.backend.get(&self.shared.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No stored journal found, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read stored journal, starting empty: {}", e);
                return Vec::new();
            }
        };

        let parsed: Vec<JournalEntry> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Stored journal is not valid, starting empty: {}", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let total = parsed.len();
        let entries: Vec<JournalEntry> = parsed
            .into_iter()
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect();

        if entries.len() != total {
            warn!(
                "Dropped {} stored entries with duplicate ids",
                total - entries.len()
            );
        }

        debug!("Loaded {} stored entries", entries.len());
        entries
    }

    /// Adds a new entry at the front of the journal.
    ///
    /// The entry gets a fresh id, the current time, the trimmed `text` and a copy
    /// of `analysis`. It is visible to `list` as soon as this returns; persisting
    /// happens in the background (or after `load` completes, if the store is not
    /// ready yet). Must be called from within a Tokio runtime for the persist to
    /// be scheduled.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Journal` if `text` is empty after trimming or longer
    /// than 500 characters. Nothing is added in that case.
    pub fn add(&self, text: &str, analysis: &AnalysisResult) -> AppResult<JournalEntry> {
        let entry = JournalEntry::new(text, analysis, Utc::now())?;
        debug!("Adding entry {} ({})", entry.id, entry.sentiment);

        self.mutate(Mutation::Add(entry.clone()));
        Ok(entry)
    }

    /// Removes every entry.
    ///
    /// The in-memory journal is emptied immediately; the stored snapshot is
    /// deleted in the background.
    pub fn clear(&self) {
        debug!("Clearing journal");
        self.mutate(Mutation::Clear);
    }

    /// The current entries, newest first.
    pub fn list(&self) -> Vec<JournalEntry> {
        self.shared.state().entries.clone()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.shared.state().entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.shared.state().entries.is_empty()
    }

    /// Waits until every scheduled persist has completed.
    ///
    /// Mutations made before the store is ready are not scheduled until `load`
    /// completes, so flushing an unloaded store returns immediately.
    pub async fn flush(&self) {
        loop {
            let idle = self.shared.idle.notified();
            if !self.shared.state().writer_active {
                return;
            }
            idle.await;
        }
    }

    fn mutate(&self, mutation: Mutation) {
        let needs_writer = {
            let mut state = self.shared.state();
            mutation.apply(&mut state.entries);

            if state.lifecycle == Lifecycle::Ready {
                Self::mark_dirty(&mut state)
            } else {
                debug!("Store not ready, deferring persist");
                state.pending.push(mutation);
                false
            }
        };

        if needs_writer {
            self.spawn_writer();
        }
    }

    /// Bumps the generation; returns true if a writer must be started.
    fn mark_dirty(state: &mut State) -> bool {
        state.generation += 1;
        if state.writer_active {
            false
        } else {
            state.writer_active = true;
            true
        }
    }

    fn spawn_writer(&self) {
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(run_writer(Arc::clone(&self.shared)).in_current_span());
            }
            Err(e) => {
                error!("No async runtime available, journal not persisted: {}", e);
                self.shared.state().writer_active = false;
                self.shared.idle.notify_waiters();
            }
        }
    }
}

/// A snapshot taken for one write.
enum SnapshotWrite {
    Store(String),
    Delete,
}

/// Writes snapshots until the persisted generation catches up.
async fn run_writer(shared: Arc<Shared>) {
    loop {
        let (generation, write) = {
            let mut state = shared.state();
            if state.persisted == state.generation {
                state.writer_active = false;
                drop(state);
                shared.idle.notify_waiters();
                return;
            }

            let write = if state.entries.is_empty() {
                Ok(SnapshotWrite::Delete)
            } else {
                serde_json::to_string(&state.entries).map(SnapshotWrite::Store)
            };
            (state.generation, write)
        };

        let result = match write {
            Ok(SnapshotWrite::Store(json)) => shared.backend.set(&shared.key, json).await,
            Ok(SnapshotWrite::Delete) => shared.backend.delete(&shared.key).await,
            Err(e) => Err(StorageError::Serialize(e).into()),
        };

        match result {
            Ok(()) => debug!("Persisted journal generation {}", generation),
            Err(e) => warn!("Failed to persist journal (generation {}): {}", generation, e),
        }

        shared.state().persisted = generation;
    }
}
