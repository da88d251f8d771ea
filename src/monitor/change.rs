//! Change detection between the last announced state and a fresh snapshot.

use std::collections::BTreeMap;

use crate::network::InterfaceSnapshot;
use crate::state::PersistedState;

/// What differs between the persisted state and the current observation.
///
/// Detection never decides whether to notify; the poller combines this
/// with the force flag, the repost cadence and the announcement history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeResult {
    /// True if the host name differs from the stored one, or none was stored.
    pub hostname_changed: bool,
    /// Per-interface change flag, keyed by the configured interface name.
    ///
    /// Interfaces missing from the current snapshot have no entry.
    pub interface_changed: BTreeMap<String, bool>,
}

impl ChangeResult {
    /// Returns true if any interface changed.
    #[must_use]
    pub fn any_interface_changed(&self) -> bool {
        self.interface_changed.values().any(|changed| *changed)
    }

    /// Returns true if the host name or any interface changed.
    #[must_use]
    pub fn any_change(&self) -> bool {
        self.hostname_changed || self.any_interface_changed()
    }

    /// Names of the interfaces flagged as changed.
    pub fn changed_interfaces(&self) -> impl Iterator<Item = &str> {
        self.interface_changed
            .iter()
            .filter(|(_, changed)| **changed)
            .map(|(name, _)| name.as_str())
    }
}

/// Compares `current` against what `previous` last announced.
///
/// - No stored host name counts as a host name change.
/// - An interface with no stored record is always a change.
/// - Stored records compare field by field through
///   [`AdapterSnapshot::same_as`](crate::network::AdapterSnapshot::same_as),
///   addresses in OS order; the interface index only when `compare_index`.
#[must_use]
pub fn detect(
    previous: &PersistedState,
    current_hostname: &str,
    current: &InterfaceSnapshot,
    compare_index: bool,
) -> ChangeResult {
    let hostname_changed = previous.hostname.as_deref() != Some(current_hostname);

    let mut interface_changed = BTreeMap::new();
    for name in previous.interfaces_of_interest.iter() {
        let Some(now) = current.get(name) else {
            tracing::debug!("Interface {name} missing from this snapshot, not compared");
            continue;
        };

        let changed = match previous.snapshot.get(name) {
            Some(before) => !before.same_as(now, compare_index),
            None => {
                tracing::debug!("No previous record for interface {name}");
                true
            }
        };
        interface_changed.insert(name.to_string(), changed);
    }

    ChangeResult {
        hostname_changed,
        interface_changed,
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
