//! Taking a snapshot of the monitored interfaces.

use super::{AddressFetcher, FetchError, InterfaceSet, InterfaceSnapshot};

/// Takes a snapshot of every interface in `interfaces`.
///
/// Each configured name is matched against the adapter's OS name or nice
/// name. A name with no matching adapter is logged as a warning and left
/// out of the snapshot; it may show up again on a later tick.
///
/// # Errors
///
/// Returns [`FetchError`] if the OS query itself fails.
pub fn take_snapshot<F>(fetcher: &F, interfaces: &InterfaceSet) -> Result<InterfaceSnapshot, FetchError>
where
    F: AddressFetcher + ?Sized,
{
    let adapters = fetcher.fetch()?;
    let mut snapshot = InterfaceSnapshot::new();

    for interface in interfaces.iter() {
        let Some(adapter) = adapters.iter().find(|a| a.answers_to(interface)) else {
            tracing::warn!("Interface {interface} not found.");
            continue;
        };

        for entry in adapter.entries(interface) {
            tracing::debug!(
                "Found address for interface {interface}: {} ({})",
                entry.address,
                entry.family
            );
        }
        snapshot.push(interface, adapter.clone());
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{AdapterAddress, AdapterSnapshot, AddressFamily};

    struct StaticFetcher(Vec<AdapterSnapshot>);

    impl AddressFetcher for StaticFetcher {
        fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingFetcher;

    impl AddressFetcher for FailingFetcher {
        fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
            Err(FetchError::Platform {
                message: "netlink unavailable".to_string(),
            })
        }
    }

    fn host() -> StaticFetcher {
        StaticFetcher(vec![
            AdapterSnapshot::new(
                "eth0",
                "eth0",
                2,
                vec![AdapterAddress::new("10.0.0.5".parse().unwrap(), 24)],
            ),
            AdapterSnapshot::new(
                "{4D36E972-E325}",
                "Wi-Fi",
                9,
                vec![
                    AdapterAddress::new("192.168.0.7".parse().unwrap(), 24),
                    AdapterAddress::new("fe80::7".parse().unwrap(), 64),
                ],
            ),
            AdapterSnapshot::new("wg0", "wg0", 4, vec![]),
        ])
    }

    fn set(names: &[&str]) -> InterfaceSet {
        names.iter().copied().collect()
    }

    #[test]
    fn snapshot_follows_selection_order() {
        let snapshot = take_snapshot(&host(), &set(&["wg0", "eth0"])).unwrap();

        let names: Vec<_> = snapshot.iter().map(|m| m.interface.as_str()).collect();
        assert_eq!(names, vec!["wg0", "eth0"]);
    }

    #[test]
    fn missing_interface_is_omitted() {
        let snapshot = take_snapshot(&host(), &set(&["eth0", "eth9"])).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get("eth9").is_none());
    }

    #[test]
    fn nice_name_selects_adapter() {
        let snapshot = take_snapshot(&host(), &set(&["Wi-Fi"])).unwrap();

        let adapter = snapshot.get("Wi-Fi").unwrap();
        assert_eq!(adapter.name, "{4D36E972-E325}");
        assert_eq!(adapter.addresses.len(), 2);
    }

    #[test]
    fn address_less_interface_keeps_none_sentinel() {
        let snapshot = take_snapshot(&host(), &set(&["wg0"])).unwrap();
        let entries = snapshot.entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].address, "None");
        assert_eq!(entries[0].family, AddressFamily::None);
    }

    #[test]
    fn multi_address_interface_yields_one_entry_per_address() {
        let snapshot = take_snapshot(&host(), &set(&["Wi-Fi"])).unwrap();

        assert_eq!(snapshot.entries().len(), 2);
    }

    #[test]
    fn fetch_error_propagates() {
        let result = take_snapshot(&FailingFetcher, &set(&["eth0"]));

        assert!(matches!(result, Err(FetchError::Platform { .. })));
    }
}
