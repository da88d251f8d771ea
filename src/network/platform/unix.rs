//! Unix network adapter fetching using `getifaddrs(3)`.

use std::ffi::CStr;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::network::{AdapterAddress, AdapterSnapshot, AddressFetcher, FetchError};

/// Unix implementation of [`AddressFetcher`] using `getifaddrs`.
///
/// Every interface the kernel reports is returned, including interfaces
/// that currently have no IPv4/IPv6 address. Unix has no separate display
/// label, so `nice_name` equals `name`.
///
/// # Example
///
/// ```no_run
/// use ip_poster::network::{AddressFetcher, platform::UnixFetcher};
///
/// let fetcher = UnixFetcher::new();
/// for adapter in fetcher.fetch().expect("getifaddrs failed") {
///     println!("{}: {:?}", adapter.name, adapter.addresses);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixFetcher {
    _private: (),
}

impl UnixFetcher {
    /// Creates a new Unix adapter fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AddressFetcher for UnixFetcher {
    fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
        fetch_adapters()
    }
}

/// Owns the linked list returned by `getifaddrs` and frees it on drop.
struct IfAddrs(*mut libc::ifaddrs);

impl Drop for IfAddrs {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a successful getifaddrs call and is freed exactly once.
        unsafe { libc::freeifaddrs(self.0) };
    }
}

/// Walks the `getifaddrs` list, grouping entries by interface name in list order.
fn fetch_adapters() -> Result<Vec<AdapterSnapshot>, FetchError> {
    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();

    // SAFETY: getifaddrs writes a list head into `head` on success.
    if unsafe { libc::getifaddrs(&raw mut head) } != 0 {
        return Err(FetchError::os_error(
            "getifaddrs",
            std::io::Error::last_os_error(),
        ));
    }
    let list = IfAddrs(head);

    let mut adapters: Vec<AdapterSnapshot> = Vec::new();
    let mut current = list.0;

    while !current.is_null() {
        // SAFETY: `current` points into the list owned by `list`, which outlives this loop.
        let entry = unsafe { &*current };
        current = entry.ifa_next;

        if entry.ifa_name.is_null() {
            continue;
        }
        // SAFETY: ifa_name is a NUL-terminated string owned by the list.
        let name = unsafe { CStr::from_ptr(entry.ifa_name) }
            .to_string_lossy()
            .into_owned();

        let position = if let Some(i) = adapters.iter().position(|a| a.name == name) {
            i
        } else {
            // SAFETY: ifa_name is a valid C string for the lifetime of the list.
            let index = unsafe { libc::if_nametoindex(entry.ifa_name) };
            adapters.push(AdapterSnapshot::new(name.clone(), name, index, Vec::new()));
            adapters.len() - 1
        };

        if let Some(address) = parse_address(entry) {
            adapters[position].addresses.push(address);
        }
    }

    Ok(adapters)
}

/// Extracts an IPv4 or IPv6 address with its prefix length from one list entry.
///
/// Link-layer and other families yield `None`.
#[allow(clippy::cast_ptr_alignment)]
fn parse_address(entry: &libc::ifaddrs) -> Option<AdapterAddress> {
    // SAFETY: ifa_addr is either null or points to a sockaddr owned by the list.
    let sockaddr = unsafe { entry.ifa_addr.as_ref() }?;

    match i32::from(sockaddr.sa_family) {
        libc::AF_INET => {
            // SAFETY: the family is AF_INET, so the storage is a sockaddr_in.
            let sin = unsafe { &*entry.ifa_addr.cast::<libc::sockaddr_in>() };
            let ip = Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr));
            let prefix = ipv4_prefix(entry.ifa_netmask);
            Some(AdapterAddress::new(IpAddr::V4(ip), prefix))
        }
        libc::AF_INET6 => {
            // SAFETY: the family is AF_INET6, so the storage is a sockaddr_in6.
            let sin6 = unsafe { &*entry.ifa_addr.cast::<libc::sockaddr_in6>() };
            let ip = Ipv6Addr::from(sin6.sin6_addr.s6_addr);
            let prefix = ipv6_prefix(entry.ifa_netmask);
            Some(AdapterAddress::new(IpAddr::V6(ip), prefix))
        }
        _ => None,
    }
}

/// Counts the set bits of an IPv4 netmask; a missing mask means a host route.
#[allow(clippy::cast_ptr_alignment)]
fn ipv4_prefix(netmask: *mut libc::sockaddr) -> u8 {
    if netmask.is_null() {
        return 32;
    }
    // SAFETY: the netmask of an AF_INET entry is laid out as a sockaddr_in.
    let mask = unsafe { &*netmask.cast::<libc::sockaddr_in>() };
    mask_bits(&mask.sin_addr.s_addr.to_ne_bytes())
}

/// Counts the set bits of an IPv6 netmask; a missing mask means a host route.
#[allow(clippy::cast_ptr_alignment)]
fn ipv6_prefix(netmask: *mut libc::sockaddr) -> u8 {
    if netmask.is_null() {
        return 128;
    }
    // SAFETY: the netmask of an AF_INET6 entry is laid out as a sockaddr_in6.
    let mask = unsafe { &*netmask.cast::<libc::sockaddr_in6>() };
    mask_bits(&mask.sin6_addr.s6_addr)
}

fn mask_bits(bytes: &[u8]) -> u8 {
    let bits: u32 = bytes.iter().map(|b| b.count_ones()).sum();
    u8::try_from(bits).unwrap_or(u8::MAX)
}
