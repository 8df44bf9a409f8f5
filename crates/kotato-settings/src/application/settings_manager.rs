//! SettingsManager: loads, merges, validates and persists the settings documents.
//!
//! The manager owns the process's single [`ConfigState`] and drives three jobs:
//!
//! 1. **Default document** – on start, make sure the informational default
//!    document exists and carries the running application's version;
//!    regenerate it otherwise.
//! 2. **Custom document** – read the user's overrides into the state, or seed
//!    the file from the packaged template when there is none.
//! 3. **Debounced writer** – rewrite the custom document from the state a
//!    fixed delay after the first change of a burst, or immediately when
//!    forced (shutdown).
//!
//! # Failure policy
//!
//! Nothing here returns an error to the caller.  A missing, locked or
//! malformed file is logged and the manager carries on with whatever state it
//! already has.  Disk failures never change the in-memory state.
//!
//! # Scheduling
//!
//! All work happens on the caller's task.  [`SettingsManager::tick`] is the
//! only suspension point: it sleeps until the pending deadline and then
//! flushes.  The host event loop polls it alongside its other event sources
//! (see `main.rs`), so setting changes and the timer never run concurrently
//! and the state needs no lock.

use std::path::PathBuf;

use kotato_settings_core::schema::fields::apply_option;
use kotato_settings_core::schema::writer::{document_version, CUSTOM_HEADER, DEFAULT_HEADER};
use kotato_settings_core::{
    apply_document, custom_document, default_document, parse_document, render_document,
    ConfigState, FieldOutcome, ManagerConfig,
};
use serde_json::Value;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::write_scheduler::{WriteDecision, WriteScheduler};

/// Error type for settings storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document does not exist.
    #[error("{0} does not exist")]
    NotFound(PathBuf),

    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Access to the two settings documents.
///
/// The production implementation is
/// [`FileStorage`](crate::infrastructure::storage::files::FileStorage); unit
/// tests use the generated `MockSettingsStorage` to count writes.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStorage {
    /// Raw bytes of the default document.
    fn read_default(&self) -> Result<Vec<u8>, StorageError>;

    /// Replaces the default document.
    fn write_default(&self, contents: &str) -> Result<(), StorageError>;

    /// Raw bytes of the custom document.
    ///
    /// Must return [`StorageError::NotFound`] when the file does not exist, so
    /// the manager can tell "no file" from "unreadable file".
    fn read_custom(&self) -> Result<Vec<u8>, StorageError>;

    /// Replaces the custom document.
    fn write_custom(&self, contents: &str) -> Result<(), StorageError>;

    /// Writes the packaged custom template in place of the custom document.
    fn seed_custom(&self) -> Result<(), StorageError>;
}

/// Owner of the process-wide setting state and its persistence.
pub struct SettingsManager<S> {
    storage: S,
    state: ConfigState,
    scheduler: WriteScheduler,
    app_version: i64,
}

impl<S: SettingsStorage> SettingsManager<S> {
    /// Creates an idle manager holding the built-in defaults.
    ///
    /// No file is touched until [`fill`](Self::fill) is called.
    pub fn new(storage: S, config: &ManagerConfig) -> Self {
        Self {
            storage,
            state: ConfigState::default(),
            scheduler: WriteScheduler::new(config.write_delay),
            app_version: config.app_version,
        }
    }

    /// Startup sequence: validate the default document, then load the custom
    /// one (seeding it from the template when it does not exist).
    pub fn fill(&mut self) {
        if !self.default_file_is_valid() {
            self.write_default_file();
        }
        if !self.read_custom_file() {
            self.seed_custom_file();
        }
    }

    pub fn state(&self) -> &ConfigState {
        &self.state
    }

    /// Mutates the state and schedules a debounced write.
    pub fn update<R>(&mut self, change: impl FnOnce(&mut ConfigState) -> R) -> R {
        let result = change(&mut self.state);
        self.write(false);
        result
    }

    /// Applies one option by dotted path (e.g. `fonts.main`) with the same
    /// validation as the document reader.  Schedules a write when applied.
    pub fn set_option(&mut self, path: &str, value: Value) -> FieldOutcome {
        let outcome = apply_option(path, value, &mut self.state);
        if outcome == FieldOutcome::Applied {
            self.write(false);
        }
        outcome
    }

    // ── Default document ──────────────────────────────────────────────────────

    /// Whether the default document exists, parses to an object and carries
    /// the current version.
    pub fn default_file_is_valid(&self) -> bool {
        let bytes = match self.storage.read_default() {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("default settings unavailable: {e}");
                return false;
            }
        };
        let document = match parse_document(&bytes) {
            Ok(document) => document,
            Err(e) => {
                debug!("default settings unreadable: {e}");
                return false;
            }
        };
        match document_version(&document) {
            Some(version) if version == self.app_version => true,
            other => {
                debug!(
                    "default settings version {other:?} does not match {}",
                    self.app_version
                );
                false
            }
        }
    }

    /// Regenerates the default document.  Failures leave the old file as is.
    pub fn write_default_file(&self) {
        let document = default_document(self.app_version);
        let contents = match render_document(DEFAULT_HEADER, &document) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("could not render default settings: {e}");
                return;
            }
        };
        match self.storage.write_default(&contents) {
            Ok(()) => info!("regenerated default settings for version {}", self.app_version),
            Err(e) => warn!("could not write default settings: {e}"),
        }
    }

    // ── Custom document ───────────────────────────────────────────────────────

    /// Reads the custom document into the state.
    ///
    /// Returns `false` only when the file does not exist.  An unreadable,
    /// malformed, non-object or empty document counts as processed: the
    /// state is left unchanged and the file is not overwritten.
    pub fn read_custom_file(&mut self) -> bool {
        let bytes = match self.storage.read_custom() {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound(path)) => {
                info!("no custom settings at {}", path.display());
                return false;
            }
            Err(e) => {
                warn!("could not read custom settings: {e}");
                return true;
            }
        };
        let document = match parse_document(&bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!("ignoring custom settings: {e}");
                return true;
            }
        };
        if document.is_empty() {
            debug!("custom settings are empty");
            return true;
        }

        let summary = apply_document(&document, &mut self.state);
        if !summary.rejected.is_empty() {
            warn!(
                "skipped invalid custom settings: {}",
                summary.rejected.join(", ")
            );
        }
        info!("applied {} custom settings", summary.applied);
        true
    }

    fn seed_custom_file(&self) {
        match self.storage.seed_custom() {
            Ok(()) => info!("created custom settings from template"),
            Err(e) => warn!("could not create custom settings: {e}"),
        }
    }

    // ── Debounced writer ──────────────────────────────────────────────────────

    /// Requests a write of the custom document.
    ///
    /// Without `force`, starts the debounce countdown unless one is already
    /// running.  With `force`, flushes immediately if a write is pending.
    pub fn write(&mut self, force: bool) {
        match self.scheduler.request(force, Instant::now()) {
            WriteDecision::FlushNow => self.write_current_settings(),
            WriteDecision::Scheduled(deadline) => {
                debug!(
                    "custom settings write scheduled in {:?}",
                    deadline.saturating_duration_since(Instant::now())
                );
            }
            WriteDecision::Nothing => {}
        }
    }

    /// Forced write for shutdown.
    pub fn finish(&mut self) {
        self.write(true);
    }

    pub fn is_write_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Flushes if the pending deadline has passed.  Returns whether it did.
    pub fn flush_if_due(&mut self) -> bool {
        if self.scheduler.expire(Instant::now()) {
            self.write_current_settings();
            true
        } else {
            false
        }
    }

    /// Waits for the pending deadline and flushes.
    ///
    /// Never completes while no write is pending.  Dropping the future before
    /// the deadline is harmless; the write stays pending.
    pub async fn tick(&mut self) {
        match self.scheduler.deadline() {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.flush_if_due();
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Rewrites the custom document from the current state right now.
    ///
    /// Cancels any pending countdown.  Write failures are logged only.
    pub fn write_current_settings(&mut self) {
        self.scheduler.cancel();
        let document = custom_document(&self.state);
        let contents = match render_document(CUSTOM_HEADER, &document) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("could not render custom settings: {e}");
                return;
            }
        };
        match self.storage.write_custom(&contents) {
            Ok(()) => info!("custom settings saved"),
            Err(e) => warn!("could not save custom settings: {e}"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
