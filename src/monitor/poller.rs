//! Tick-driven poll orchestrator.
//!
//! [`Poller`] owns the in-memory copy of the persisted state and performs
//! one complete observe, detect, notify and persist cycle per
//! [`tick`](Poller::tick). The wait between ticks lives in
//! [`run`](Poller::run) so the cycle itself can be driven by any scheduler.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::network::{
    AddressFetcher, HostnameSource, InterfaceSet, InterfaceSnapshot, take_snapshot,
};
use crate::state::{LoadResult, PersistedState, StateStore};
use crate::time::{Clock, Sleeper, SystemClock, elapsed_since};
use crate::webhook::{DeliveryReport, MessengerGroup};

use super::{ChangeResult, MonitorError, compose_message, detect};

/// Knobs that decide when a tick notifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Re-announce unchanged state after this long. `None` disables reposting.
    pub repost_interval: Option<Duration>,
    /// Notify on every tick.
    pub force: bool,
    /// Include the OS interface index in adapter comparison.
    pub compare_index: bool,
    /// Require every messenger to succeed; otherwise one success is enough.
    pub require_all_services: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            repost_interval: None,
            force: false,
            compare_index: false,
            require_all_services: true,
        }
    }
}

/// Why a tick decided to notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyReason {
    /// The force flag is set.
    Forced,
    /// The stored state was never announced.
    FirstAnnouncement,
    /// The host name differs from the stored one.
    HostnameChanged,
    /// These interfaces differ from their stored records.
    InterfacesChanged(Vec<String>),
    /// The repost interval has elapsed since the last delivery.
    RepostDue,
}

impl fmt::Display for NotifyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forced => f.write_str("forced"),
            Self::FirstAnnouncement => f.write_str("first announcement"),
            Self::HostnameChanged => f.write_str("hostname changed"),
            Self::InterfacesChanged(names) => write!(f, "changed: {}", names.join(", ")),
            Self::RepostDue => f.write_str("repost interval elapsed"),
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The host could not be observed; nothing was compared.
    Skipped,
    /// Nothing warranted a notification.
    Unchanged,
    /// A notification was delivered and the state advanced.
    Delivered(NotifyReason),
    /// A notification was attempted but not accepted; the state is unchanged.
    DeliveryFailed(NotifyReason),
}

/// Periodic change detector and announcer.
///
/// # Type Parameters
///
/// * `F` - The [`AddressFetcher`] used for snapshots
/// * `S` - The [`StateStore`] holding the last announced state
/// * `H` - The [`HostnameSource`]
/// * `C` - The [`Clock`] used for delivery timestamps (defaults to [`SystemClock`])
pub struct Poller<F, S, H, C = SystemClock> {
    fetcher: F,
    store: S,
    hostname: H,
    messengers: MessengerGroup,
    clock: C,
    interfaces: InterfaceSet,
    options: PollOptions,
    state: PersistedState,
}

impl<F, S, H> Poller<F, S, H, SystemClock> {
    /// Creates a poller using the system clock.
    ///
    /// The in-memory state starts empty; call [`bootstrap`](Self::bootstrap)
    /// before the first tick.
    #[must_use]
    pub fn new(
        fetcher: F,
        store: S,
        hostname: H,
        messengers: MessengerGroup,
        interfaces: InterfaceSet,
        options: PollOptions,
    ) -> Self {
        Self {
            fetcher,
            store,
            hostname,
            messengers,
            clock: SystemClock,
            state: PersistedState {
                interfaces_of_interest: interfaces.clone(),
                ..PersistedState::default()
            },
            interfaces,
            options,
        }
    }
}

impl<F, S, H, C> Poller<F, S, H, C> {
    /// Replaces the clock, typically with a controllable one in tests.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Poller<F, S, H, C2> {
        Poller {
            fetcher: self.fetcher,
            store: self.store,
            hostname: self.hostname,
            messengers: self.messengers,
            clock,
            interfaces: self.interfaces,
            options: self.options,
            state: self.state,
        }
    }

    /// The in-memory state: what was last announced, or initialized.
    #[must_use]
    pub const fn state(&self) -> &PersistedState {
        &self.state
    }

    /// The state store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The configured options.
    #[must_use]
    pub const fn options(&self) -> &PollOptions {
        &self.options
    }
}

impl<F, S, H, C> Poller<F, S, H, C>
where
    F: AddressFetcher,
    S: StateStore,
    H: HostnameSource,
    C: Clock,
{
    /// Loads the persisted state, initializing it on first run.
    ///
    /// - `Loaded`: the stored state is used; the configured interface set
    ///   replaces the stored one if they differ.
    /// - `NotFound`: the current host name and snapshot are written as a
    ///   never-announced state, so the first tick announces them.
    /// - `Corrupted`: logged, and the poller continues from an empty state
    ///   that the next successful delivery overwrites.
    ///
    /// # Errors
    ///
    /// Only on first run: if the host cannot be observed or the initial
    /// state cannot be written.
    pub async fn bootstrap(&mut self) -> Result<(), MonitorError> {
        match self.store.load() {
            LoadResult::Loaded(mut state) => {
                if !state.interfaces_of_interest.same_members(&self.interfaces) {
                    tracing::info!(
                        "Configured interfaces {} differ from stored {}, using configured set",
                        self.interfaces,
                        state.interfaces_of_interest
                    );
                }
                state.interfaces_of_interest = self.interfaces.clone();
                tracing::info!(
                    "Loaded previous state for {} ({} interface(s))",
                    state.hostname.as_deref().unwrap_or("unknown host"),
                    state.snapshot.len()
                );
                self.state = state;
            }
            LoadResult::NotFound => {
                tracing::info!("No previous state found, initializing");
                let (hostname, snapshot) = self.observe()?;
                let state = PersistedState::unannounced(hostname, self.interfaces.clone(), snapshot);
                self.store
                    .save(&state)
                    .await
                    .map_err(MonitorError::StateInit)?;
                self.state = state;
            }
            LoadResult::Corrupted { reason } => {
                tracing::error!("State file corrupted ({reason}), starting from empty state");
                self.state = PersistedState {
                    interfaces_of_interest: self.interfaces.clone(),
                    ..PersistedState::default()
                };
            }
        }
        Ok(())
    }

    /// Runs one observe, detect, notify and persist cycle.
    ///
    /// The in-memory and stored state only advance after a delivery was
    /// accepted, so a failed delivery is detected again on the next tick.
    pub async fn tick(&mut self) -> TickOutcome {
        let (hostname, snapshot) = match self.observe() {
            Ok(observed) => observed,
            Err(e) => {
                tracing::error!("Skipping check: {e}");
                return TickOutcome::Skipped;
            }
        };

        let changes = detect(&self.state, &hostname, &snapshot, self.options.compare_index);
        let Some(reason) = self.notify_reason(&changes) else {
            tracing::debug!("No changes detected for {hostname}");
            return TickOutcome::Unchanged;
        };

        tracing::info!("Posting IP update for {hostname} ({reason})");
        let message = compose_message(
            self.state.hostname.as_deref(),
            &hostname,
            changes.hostname_changed,
            &snapshot,
        );
        let report = self.messengers.post_message(&message).await;

        if !self.accepted(&report) {
            tracing::error!(
                "Failed to post IP update (failed: {})",
                report.failed().collect::<Vec<_>>().join(", ")
            );
            return TickOutcome::DeliveryFailed(reason);
        }

        let failed: Vec<&str> = report.failed().collect();
        if !failed.is_empty() {
            tracing::warn!("Posted IP update, but not to: {}", failed.join(", "));
        }

        self.state.hostname = Some(hostname);
        self.state.snapshot = snapshot;
        self.state.last_updated = Some(self.clock.now_utc());

        if let Err(e) = self.store.save(&self.state).await {
            tracing::error!("Failed to save state: {e}");
        }

        TickOutcome::Delivered(reason)
    }

    /// Ticks every `interval` until `shutdown` completes.
    ///
    /// The first tick runs immediately. Shutdown is only observed between
    /// ticks, never in the middle of one.
    pub async fn run<Z, Q>(&mut self, interval: Duration, sleeper: &Z, shutdown: Q)
    where
        Z: Sleeper,
        Q: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            self.tick().await;

            tokio::select! {
                biased;

                () = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping...");
                    return;
                }

                () = sleeper.sleep(interval) => {}
            }
        }
    }

    fn observe(&self) -> Result<(String, InterfaceSnapshot), MonitorError> {
        let hostname = self.hostname.hostname()?;
        let snapshot = take_snapshot(&self.fetcher, &self.interfaces)?;
        Ok((hostname, snapshot))
    }

    fn notify_reason(&self, changes: &ChangeResult) -> Option<NotifyReason> {
        if self.options.force {
            return Some(NotifyReason::Forced);
        }
        if self.state.never_announced() {
            return Some(NotifyReason::FirstAnnouncement);
        }
        if changes.hostname_changed {
            return Some(NotifyReason::HostnameChanged);
        }
        if changes.any_interface_changed() {
            let names = changes.changed_interfaces().map(str::to_string).collect();
            return Some(NotifyReason::InterfacesChanged(names));
        }
        self.repost_due().then_some(NotifyReason::RepostDue)
    }

    fn repost_due(&self) -> bool {
        let (Some(interval), Some(last)) = (self.options.repost_interval, self.state.last_updated)
        else {
            return false;
        };
        elapsed_since(last, self.clock.now_utc()) >= interval
    }

    fn accepted(&self, report: &DeliveryReport) -> bool {
        if self.options.require_all_services {
            report.all_succeeded()
        } else {
            report.any_succeeded()
        }
    }
}
