//! Windows network adapter fetching using `GetAdaptersAddresses`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_BUFFER_OVERFLOW, ERROR_NO_DATA, NO_ERROR, WIN32_ERROR,
};
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6, SOCKET_ADDRESS,
};

use crate::network::{AdapterAddress, AdapterSnapshot, AddressFetcher, FetchError};

/// Starting buffer size in bytes; the API reports the real size when it is too small.
const INITIAL_BUFFER_BYTES: u32 = 15_000;

/// The adapter list can grow between the sizing call and the real one.
const MAX_ATTEMPTS: usize = 3;

/// Windows implementation of [`AddressFetcher`] using `GetAdaptersAddresses`.
///
/// `name` is the adapter GUID, `nice_name` the friendly name shown in
/// Control Panel (e.g. "Wi-Fi"); either can be used to select the adapter.
///
/// # Example
///
/// ```no_run
/// use ip_poster::network::{AddressFetcher, platform::WindowsFetcher};
///
/// for adapter in WindowsFetcher::new().fetch().expect("adapter query failed") {
///     println!("{} ({}): {:?}", adapter.nice_name, adapter.name, adapter.addresses);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsFetcher {
    _private: (),
}

impl WindowsFetcher {
    /// Creates a new Windows adapter fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AddressFetcher for WindowsFetcher {
    fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
        let buffer = query_adapters()?;
        if buffer.is_empty() {
            return Ok(Vec::new());
        }

        let mut adapters = Vec::new();
        let mut current = buffer.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

        // SAFETY: the list lives inside `buffer`, which outlives this loop;
        // the u64 backing keeps every node 8-byte aligned.
        while let Some(adapter) = unsafe { current.as_ref() } {
            current = adapter.Next.cast_const();
            if let Some(snapshot) = parse_adapter(adapter) {
                adapters.push(snapshot);
            }
        }

        Ok(adapters)
    }
}

/// Runs `GetAdaptersAddresses` until the buffer is large enough.
///
/// Returns an empty buffer when the host has no adapters at all.
#[cfg(not(tarpaulin_include))]
fn query_adapters() -> Result<Vec<u64>, FetchError> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let mut size = INITIAL_BUFFER_BYTES;

    for _ in 0..MAX_ATTEMPTS {
        let mut buffer = vec![0u64; (size as usize).div_ceil(8)];

        // SAFETY: `buffer` holds at least `size` writable bytes; the call
        // updates `size` with the required length on overflow.
        let status = WIN32_ERROR(unsafe {
            GetAdaptersAddresses(
                u32::from(AF_UNSPEC.0),
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut size,
            )
        });

        match status {
            NO_ERROR => return Ok(buffer),
            ERROR_BUFFER_OVERFLOW => {}
            ERROR_NO_DATA => return Ok(Vec::new()),
            ERROR_ACCESS_DENIED => {
                return Err(FetchError::PermissionDenied {
                    context: "GetAdaptersAddresses".to_string(),
                });
            }
            other => return Err(windows::core::Error::from(other).into()),
        }
    }

    Err(FetchError::Platform {
        message: format!("adapter list still growing after {MAX_ATTEMPTS} attempts"),
    })
}

/// Builds a snapshot from one adapter node; `None` if its names are unreadable.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<AdapterSnapshot> {
    // SAFETY: both names are NUL-terminated strings inside the adapter buffer.
    let (name, nice_name) = unsafe {
        (
            adapter.AdapterName.to_string().ok()?,
            adapter.FriendlyName.to_string().ok()?,
        )
    };
    // SAFETY: GetAdaptersAddresses always fills the IfIndex view of this union.
    let index = unsafe { adapter.Anonymous1.Anonymous.IfIndex };

    let mut addresses = Vec::new();
    let mut current = adapter.FirstUnicastAddress.cast_const();

    // SAFETY: the unicast list is owned by the same buffer as `adapter`.
    while let Some(unicast) = unsafe { current.as_ref() } {
        current = unicast.Next.cast_const();
        if let Some(ip) = socket_ip(&unicast.Address) {
            addresses.push(AdapterAddress::new(ip, unicast.OnLinkPrefixLength));
        }
    }

    Some(AdapterSnapshot::new(name, nice_name, index, addresses))
}

/// Decodes an IPv4 or IPv6 socket address; other families yield `None`.
#[allow(clippy::cast_ptr_alignment)]
fn socket_ip(address: &SOCKET_ADDRESS) -> Option<IpAddr> {
    let sockaddr = address.lpSockaddr.cast_const();
    // SAFETY: lpSockaddr is null or points to a sockaddr in the adapter buffer.
    let family = unsafe { sockaddr.as_ref() }?.sa_family;

    if family == AF_INET {
        // SAFETY: the family is AF_INET, so the storage is a SOCKADDR_IN.
        let sin = unsafe { &*sockaddr.cast::<SOCKADDR_IN>() };
        // SAFETY: all views of IN_ADDR cover the same four network-order bytes.
        let raw = unsafe { sin.sin_addr.S_un.S_addr };
        Some(IpAddr::V4(Ipv4Addr::from(raw.to_ne_bytes())))
    } else if family == AF_INET6 {
        // SAFETY: the family is AF_INET6, so the storage is a SOCKADDR_IN6.
        let sin6 = unsafe { &*sockaddr.cast::<SOCKADDR_IN6>() };
        // SAFETY: all views of IN6_ADDR cover the same sixteen bytes.
        Some(IpAddr::V6(Ipv6Addr::from(unsafe { sin6.sin6_addr.u.Byte })))
    } else {
        None
    }
}
