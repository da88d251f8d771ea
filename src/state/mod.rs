//! Durable state for detecting changes across restarts.
//!
//! The persisted record holds the host name, the interfaces being watched,
//! the last announced snapshot, and the time of the last successful post.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileStateStore;

use std::io;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::network::{InterfaceSet, InterfaceSnapshot};

/// Everything the poller remembers between ticks and across restarts.
///
/// The state only advances after a notification was delivered, so the
/// stored snapshot is always the last one somebody was told about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    /// When a notification was last delivered. `None` if never.
    pub last_updated: Option<DateTime<Utc>>,
    /// The host name at the last delivery. `None` if never recorded.
    pub hostname: Option<String>,
    /// The interfaces being watched.
    pub interfaces_of_interest: InterfaceSet,
    /// The last announced snapshot.
    pub snapshot: InterfaceSnapshot,
}

impl PersistedState {
    /// Creates a state that has recorded a host and snapshot but never announced them.
    #[must_use]
    pub fn unannounced(
        hostname: impl Into<String>,
        interfaces_of_interest: InterfaceSet,
        snapshot: InterfaceSnapshot,
    ) -> Self {
        Self {
            last_updated: None,
            hostname: Some(hostname.into()),
            interfaces_of_interest,
            snapshot,
        }
    }

    /// Returns true if no notification has ever been delivered for this state.
    #[must_use]
    pub const fn never_announced(&self) -> bool {
        self.last_updated.is_none()
    }
}

/// Outcome of reading the stored record.
///
/// Reading never fails hard: a missing record means first run, and an
/// unreadable one is reported so the caller can start over.
#[derive(Debug, Clone)]
pub enum LoadResult {
    /// The stored record.
    Loaded(PersistedState),

    /// Nothing stored yet.
    NotFound,

    /// A record exists but cannot be used; the next save overwrites it.
    Corrupted {
        /// What was wrong with it, for the log.
        reason: String,
    },
}

impl LoadResult {
    /// Whether a usable record was read.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Why a save failed. Read problems are [`LoadResult`] variants instead.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write state file: {0}")]
    Write(#[source] io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Where the poller keeps its [`PersistedState`].
///
/// `save` replaces the whole record atomically. `load` maps a missing
/// record to [`LoadResult::NotFound`] and anything unreadable to
/// [`LoadResult::Corrupted`].
pub trait StateStore: Send + Sync {
    fn load(&self) -> LoadResult;

    /// Saves the full state record, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written. The previously
    /// stored record stays intact in that case.
    fn save(
        &self,
        state: &PersistedState,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;
}

/// Mock state store for testing.
///
/// Allows tests to inject specific load results and capture saved state.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// A mock implementation of [`StateStore`] for testing.
    #[derive(Debug)]
    pub struct MockStateStore {
        load_result: LoadResult,
        saved: RwLock<Option<PersistedState>>,
        save_count: AtomicUsize,
        fail_saves: AtomicBool,
    }

    impl MockStateStore {
        fn with_result(load_result: LoadResult) -> Self {
            Self {
                load_result,
                saved: RwLock::new(None),
                save_count: AtomicUsize::new(0),
                fail_saves: AtomicBool::new(false),
            }
        }

        /// Creates a mock that returns `LoadResult::Loaded` with the given state.
        #[must_use]
        pub fn with_loaded(state: PersistedState) -> Self {
            Self::with_result(LoadResult::Loaded(state))
        }

        /// Creates a mock that returns `LoadResult::NotFound`.
        #[must_use]
        pub fn not_found() -> Self {
            Self::with_result(LoadResult::NotFound)
        }

        /// Creates a mock that returns `LoadResult::Corrupted`.
        #[must_use]
        pub fn corrupted(reason: impl Into<String>) -> Self {
            Self::with_result(LoadResult::Corrupted {
                reason: reason.into(),
            })
        }

        /// Makes every subsequent save fail.
        pub fn fail_saves(&self) {
            self.fail_saves.store(true, Ordering::SeqCst);
        }

        /// Returns the last saved state, if any.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn saved_state(&self) -> Option<PersistedState> {
            self.saved.read().unwrap().clone()
        }

        /// Returns how many successful saves happened.
        #[must_use]
        pub fn save_count(&self) -> usize {
            self.save_count.load(Ordering::SeqCst)
        }
    }

    impl StateStore for MockStateStore {
        fn load(&self) -> LoadResult {
            self.load_result.clone()
        }

        async fn save(&self, state: &PersistedState) -> Result<(), StateError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StateError::Write(io::Error::other("disk full")));
            }
            *self.saved.write().unwrap() = Some(state.clone());
            self.save_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
