//! Network layer for fetching and representing interface information.
//!
//! This module provides types and traits for:
//! - Representing adapters and their addresses ([`AdapterSnapshot`], [`AdapterAddress`])
//! - Representing per-tick observations ([`InterfaceSnapshot`], [`InterfaceAddress`])
//! - Selecting interfaces to monitor ([`InterfaceSelector`], [`InterfaceSet`])
//! - Fetching adapter information ([`AddressFetcher`], [`take_snapshot`])
//! - Host name lookup ([`HostnameSource`])
//! - Platform-specific implementations ([`platform`])

mod adapter;
mod fetcher;
mod hostname;
pub mod platform;
mod selection;
mod snapshot;

pub use adapter::{
    AdapterAddress, AdapterSnapshot, AddressFamily, InterfaceAddress, InterfaceSnapshot,
    MonitoredInterface,
};
pub use fetcher::{AddressFetcher, FetchError};
pub use hostname::{HostnameError, HostnameSource, SystemHostname};
pub use selection::{InterfaceSelector, InterfaceSet};
pub use snapshot::take_snapshot;
