//! Application execution logic.
//!
//! This module wires the platform fetcher, state file and webhook
//! messengers into a [`Poller`] and drives it until shutdown.

use thiserror::Error;
use tokio::signal;

use ip_poster::config::{Secrets, Service, ValidatedConfig};
use ip_poster::monitor::{MonitorError, Poller, TickOutcome};
use ip_poster::network::platform::PlatformFetcher;
use ip_poster::network::{FetchError, HostnameError, HostnameSource, SystemHostname};
use ip_poster::state::FileStateStore;
use ip_poster::time::TokioSleeper;
use ip_poster::webhook::{
    DiscordMessenger, HttpClient, HttpError, MessengerGroup, ReqwestClient, SlackMessenger,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read the host name at startup.
    #[error("Failed to read host name: {0}")]
    Hostname(#[source] HostnameError),

    /// Failed to enumerate adapters while resolving `"all"`.
    #[error("Failed to resolve interfaces: {0}")]
    Interfaces(#[source] FetchError),

    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// Failed to load or initialize the state file.
    #[error("Failed to initialize: {0}")]
    Bootstrap(#[source] MonitorError),

    /// The single check requested by `--once` did not complete.
    #[error("Single check did not complete ({0})")]
    CheckFailed(String),
}

/// Executes the application.
///
/// This function:
/// 1. Resolves the interfaces to monitor and the host label
/// 2. Builds one messenger per configured webhook
/// 3. Loads (or initializes) the state file
/// 4. Runs a single check with `--once`, or checks periodically until
///    a shutdown signal (Ctrl+C / SIGTERM) arrives
///
/// # Errors
///
/// Returns an error if initialization fails, or if the `--once` check
/// was skipped or not delivered.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, secrets: Secrets) -> Result<(), RunError> {
    let fetcher = PlatformFetcher::new();

    let host = SystemHostname.hostname().map_err(RunError::Hostname)?;
    let interfaces = config
        .resolve_interfaces(&fetcher)
        .map_err(RunError::Interfaces)?;
    tracing::info!("Monitoring interfaces {interfaces} on {host}");

    let client = ReqwestClient::with_timeout(config.request_timeout)
        .map_err(RunError::HttpClient)?;
    let messengers = create_messengers(&secrets, &client, &host);

    let store = FileStateStore::new(&config.ip_store_file);
    tracing::debug!("State file: {}", store.path().display());

    let mut poller = Poller::new(
        fetcher,
        store,
        SystemHostname,
        messengers,
        interfaces,
        config.poll_options(),
    );
    poller.bootstrap().await.map_err(RunError::Bootstrap)?;

    if config.once {
        return once_result(poller.tick().await);
    }

    tracing::info!(
        "Checking every {}s, press Ctrl+C to stop",
        config.check_interval.as_secs()
    );
    poller
        .run(config.check_interval, &TokioSleeper, shutdown_signal())
        .await;
    Ok(())
}

/// Builds one messenger per destination, in the order of `secrets`.
///
/// Destinations without a URL still get a messenger; it reports a failed
/// delivery on every post.
fn create_messengers<H>(secrets: &Secrets, client: &H, host: &str) -> MessengerGroup
where
    H: HttpClient + Clone + 'static,
{
    let mut group = MessengerGroup::new();
    for destination in secrets.destinations() {
        let url = destination.url.clone();
        match destination.service {
            Service::Slack => group.add(SlackMessenger::new(client.clone(), host, url)),
            Service::Discord => group.add(DiscordMessenger::new(client.clone(), host, url)),
        }
    }
    group
}

/// Maps the outcome of a `--once` check to the process result.
fn once_result(outcome: TickOutcome) -> Result<(), RunError> {
    match outcome {
        TickOutcome::Unchanged | TickOutcome::Delivered(_) => Ok(()),
        TickOutcome::Skipped => Err(RunError::CheckFailed("host not observed".to_string())),
        TickOutcome::DeliveryFailed(reason) => Err(RunError::CheckFailed(format!(
            "delivery failed, {reason}"
        ))),
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// A handler that cannot be installed is logged and never fires.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
