//! Core network types for adapter and snapshot representation.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Protocol family of a single interface address.
///
/// `None` is the placeholder family for an interface that has no usable
/// address at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// IPv4 address.
    #[serde(rename = "IPv4")]
    V4,
    /// IPv6 address.
    #[serde(rename = "IPv6")]
    V6,
    /// No address bound.
    None,
}

impl AddressFamily {
    /// Returns the family of an IP address.
    #[must_use]
    pub const fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::None => write!(f, "None"),
        }
    }
}

/// One address bound to an adapter, with its network prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdapterAddress {
    /// The IP address.
    pub ip: IpAddr,
    /// On-link prefix length (e.g. 24 for a /24).
    pub prefix: u8,
}

impl AdapterAddress {
    /// Creates a new adapter address.
    #[must_use]
    pub const fn new(ip: IpAddr, prefix: u8) -> Self {
        Self { ip, prefix }
    }

    /// Returns the protocol family of this address.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.ip)
    }
}

impl fmt::Display for AdapterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ip, self.prefix)
    }
}

/// A snapshot of a single network adapter at a point in time.
///
/// Only semantic fields are kept: the OS name, the human-readable name,
/// the interface index, and the bound addresses in OS order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterSnapshot {
    /// The OS name of the adapter (e.g. "eth0", or a GUID on Windows).
    pub name: String,
    /// The human-readable name (e.g. "Wi-Fi"); equals `name` where the OS has no separate label.
    pub nice_name: String,
    /// The OS interface index.
    pub index: u32,
    /// All addresses bound to this adapter, in the order the OS reported them.
    pub addresses: Vec<AdapterAddress>,
}

impl AdapterSnapshot {
    /// Creates a new adapter snapshot.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        nice_name: impl Into<String>,
        index: u32,
        addresses: Vec<AdapterAddress>,
    ) -> Self {
        Self {
            name: name.into(),
            nice_name: nice_name.into(),
            index,
            addresses,
        }
    }

    /// Returns true if `wanted` is either the OS name or the nice name of this adapter.
    #[must_use]
    pub fn answers_to(&self, wanted: &str) -> bool {
        self.name == wanted || self.nice_name == wanted
    }

    /// Returns true if this adapter has any addresses.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }

    /// Compares two adapter records field by field.
    ///
    /// Addresses are compared pairwise in OS order and are never sorted
    /// first, so a reordered address list counts as a difference. The
    /// interface index only takes part when `compare_index` is set.
    #[must_use]
    pub fn same_as(&self, other: &Self, compare_index: bool) -> bool {
        self.name == other.name
            && self.nice_name == other.nice_name
            && self.addresses == other.addresses
            && (!compare_index || self.index == other.index)
    }

    /// Flattens this adapter into displayable address entries labelled `interface`.
    ///
    /// An adapter without addresses yields exactly one `"None"` entry.
    #[must_use]
    pub fn entries(&self, interface: &str) -> Vec<InterfaceAddress> {
        if self.addresses.is_empty() {
            return vec![InterfaceAddress::none(interface)];
        }

        self.addresses
            .iter()
            .map(|addr| InterfaceAddress::new(interface, addr.to_string(), addr.family()))
            .collect()
    }
}

/// One address bound to one monitored interface, in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceAddress {
    /// Interface name as configured.
    #[serde(rename = "name")]
    pub interface_name: String,
    /// Address in `ip/prefix` form, or `"None"`.
    #[serde(rename = "addr")]
    pub address: String,
    /// Address family.
    #[serde(rename = "protocol")]
    pub family: AddressFamily,
}

impl InterfaceAddress {
    /// Sentinel address string for an interface with no usable address.
    pub const NO_ADDRESS: &'static str = "None";

    /// Creates a new interface address entry.
    #[must_use]
    pub fn new(
        interface_name: impl Into<String>,
        address: impl Into<String>,
        family: AddressFamily,
    ) -> Self {
        Self {
            interface_name: interface_name.into(),
            address: address.into(),
            family,
        }
    }

    /// Creates the placeholder entry for an interface with no address.
    #[must_use]
    pub fn none(interface_name: impl Into<String>) -> Self {
        Self::new(interface_name, Self::NO_ADDRESS, AddressFamily::None)
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.interface_name, self.address)
    }
}

/// A monitored interface as it was observed: the configured name plus the adapter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredInterface {
    /// The name this interface was selected by.
    pub interface: String,
    /// The adapter record observed for it.
    pub adapter: AdapterSnapshot,
}

/// The addresses observed on the monitored interfaces during one poll tick.
///
/// Interfaces appear in selection order; interfaces that were missing on the
/// host are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceSnapshot {
    interfaces: Vec<MonitoredInterface>,
}

impl InterfaceSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interfaces: Vec::new(),
        }
    }

    /// Appends a monitored interface.
    pub fn push(&mut self, interface: impl Into<String>, adapter: AdapterSnapshot) {
        self.interfaces.push(MonitoredInterface {
            interface: interface.into(),
            adapter,
        });
    }

    /// Builder-style variant of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, interface: impl Into<String>, adapter: AdapterSnapshot) -> Self {
        self.push(interface, adapter);
        self
    }

    /// Returns the adapter record stored for `interface`, if any.
    #[must_use]
    pub fn get(&self, interface: &str) -> Option<&AdapterSnapshot> {
        self.interfaces
            .iter()
            .find(|m| m.interface == interface)
            .map(|m| &m.adapter)
    }

    /// Iterates over the monitored interfaces in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &MonitoredInterface> {
        self.interfaces.iter()
    }

    /// Returns the number of interfaces observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Returns true if no interface was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Flattens the snapshot into one display entry per bound address.
    #[must_use]
    pub fn entries(&self) -> Vec<InterfaceAddress> {
        self.interfaces
            .iter()
            .flat_map(|m| m.adapter.entries(&m.interface))
            .collect()
    }
}
