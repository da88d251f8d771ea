//! Notification text.

use crate::network::InterfaceSnapshot;

/// Builds the multi-line notification body.
///
/// ```text
/// Hostname change detected: host-A -> host-B
/// IP Address Update for host-B:
/// - eth0: 10.0.0.5/24
/// - wg0: None
/// ```
///
/// The first line only appears when `hostname_changed`; an unknown previous
/// name is shown as `unknown`. Every snapshot entry gets one line, in
/// snapshot order.
#[must_use]
pub fn compose_message(
    previous_hostname: Option<&str>,
    hostname: &str,
    hostname_changed: bool,
    snapshot: &InterfaceSnapshot,
) -> String {
    let mut lines = Vec::with_capacity(snapshot.len() + 2);

    if hostname_changed {
        lines.push(format!(
            "Hostname change detected: {} -> {hostname}",
            previous_hostname.unwrap_or("unknown")
        ));
    }
    lines.push(format!("IP Address Update for {hostname}:"));
    lines.extend(snapshot.entries().iter().map(|entry| format!("- {entry}")));

    lines.join("\n")
}
