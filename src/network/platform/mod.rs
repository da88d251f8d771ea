//! Platform-specific network adapter fetcher implementations.
//!
//! # Platform Support
//!
//! - **Unix** (Linux, macOS, BSD): `getifaddrs(3)` via `libc`.
//! - **Windows**: `GetAdaptersAddresses` API via the `windows` crate.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher;

// Re-export platform-specific fetcher as PlatformFetcher for convenience
#[cfg(unix)]
pub use unix::UnixFetcher as PlatformFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher as PlatformFetcher;
