//! Tests for the run module.

use super::*;

use std::path::Path;
use std::sync::{Arc, Mutex};

use ip_poster::monitor::NotifyReason;
use ip_poster::webhook::{HttpRequest, HttpResponse};

/// Answers every request with 200 and remembers the target URLs.
#[derive(Debug, Clone, Default)]
struct OkClient {
    urls: Arc<Mutex<Vec<String>>>,
}

impl HttpClient for OkClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.urls.lock().unwrap().push(req.url.to_string());
        Ok(HttpResponse::new(http::StatusCode::OK, Vec::new()))
    }
}

fn secrets(json: &str) -> Secrets {
    Secrets::parse(json, Path::new("secrets.json")).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn check_failed_displays_detail() {
        let error = RunError::CheckFailed("host not observed".to_string());
        assert_eq!(
            error.to_string(),
            "Single check did not complete (host not observed)"
        );
    }

    #[test]
    fn http_client_displays_source() {
        let error = RunError::HttpClient(HttpError::Timeout);
        assert!(error.to_string().starts_with("Failed to build HTTP client"));
    }

    #[test]
    fn interfaces_displays_source() {
        let error = RunError::Interfaces(FetchError::Platform {
            message: "getifaddrs failed".to_string(),
        });
        let message = error.to_string();
        assert!(message.contains("Failed to resolve interfaces"));
        assert!(message.contains("getifaddrs failed"));
    }
}

mod create_messengers {
    use super::*;

    #[test]
    fn registers_slack_before_discord() {
        let secrets = secrets(
            r#"{"discord_webhook_url": "https://discord.example/h",
                "slack_webhook_url": "https://hooks.slack.example/h"}"#,
        );

        let group = create_messengers(&secrets, &OkClient::default(), "host-A");

        assert_eq!(
            group.service_names().collect::<Vec<_>>(),
            ["slack", "discord"]
        );
    }

    #[test]
    fn registers_only_present_keys() {
        let secrets = secrets(r#"{"discord_webhook_url": "https://discord.example/h"}"#);

        let group = create_messengers(&secrets, &OkClient::default(), "host-A");

        assert_eq!(group.service_names().collect::<Vec<_>>(), ["discord"]);
    }

    #[tokio::test]
    async fn messengers_share_the_client() {
        let client = OkClient::default();
        let secrets = secrets(
            r#"{"slack_webhook_url": "https://hooks.slack.example/h",
                "discord_webhook_url": "https://discord.example/h"}"#,
        );

        let group = create_messengers(&secrets, &client, "host-A");
        let report = group.post_message("hello").await;

        assert!(report.all_succeeded());
        assert_eq!(
            *client.urls.lock().unwrap(),
            ["https://hooks.slack.example/h", "https://discord.example/h"]
        );
    }

    #[tokio::test]
    async fn destination_without_url_fails_without_request() {
        let client = OkClient::default();
        let secrets = secrets(
            r#"{"slack_webhook_url": "", "discord_webhook_url": "https://discord.example/h"}"#,
        );

        let group = create_messengers(&secrets, &client, "host-A");
        let report = group.post_message("hello").await;

        assert_eq!(report.get("slack"), Some(false));
        assert_eq!(report.get("discord"), Some(true));
        assert_eq!(client.urls.lock().unwrap().len(), 1);
    }
}

mod once_result {
    use super::*;

    #[test]
    fn unchanged_and_delivered_succeed() {
        assert!(once_result(TickOutcome::Unchanged).is_ok());
        assert!(once_result(TickOutcome::Delivered(NotifyReason::Forced)).is_ok());
    }

    #[test]
    fn skipped_fails() {
        assert!(matches!(
            once_result(TickOutcome::Skipped),
            Err(RunError::CheckFailed(_))
        ));
    }

    #[test]
    fn delivery_failure_names_reason() {
        let Err(error) = once_result(TickOutcome::DeliveryFailed(NotifyReason::HostnameChanged))
        else {
            panic!("Expected error");
        };
        assert!(error.to_string().contains("hostname changed"));
    }
}

mod blank_secret {
    use super::*;

    use ip_poster::monitor::PollOptions;
    use ip_poster::network::{AdapterAddress, AdapterSnapshot, AddressFetcher, InterfaceSet};
    use tempfile::TempDir;

    struct FixedHost;

    impl AddressFetcher for FixedHost {
        fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
            Ok(vec![AdapterSnapshot::new(
                "eth0",
                "eth0",
                2,
                vec![AdapterAddress::new("10.0.0.5".parse().unwrap(), 24)],
            )])
        }
    }

    impl HostnameSource for FixedHost {
        fn hostname(&self) -> Result<String, HostnameError> {
            Ok("host-A".to_string())
        }
    }

    #[tokio::test]
    async fn working_backend_is_told_once() {
        let dir = TempDir::new().unwrap();
        let client = OkClient::default();
        let secrets = secrets(
            r#"{"slack_webhook_url": "https://hooks.slack.example/h", "discord_webhook_url": ""}"#,
        );
        let interfaces: InterfaceSet = ["eth0"].into_iter().collect();
        let mut poller = Poller::new(
            FixedHost,
            FileStateStore::new(dir.path().join("ip_store.json")),
            FixedHost,
            create_messengers(&secrets, &client, "host-A"),
            interfaces,
            PollOptions::default(),
        );
        poller.bootstrap().await.unwrap();

        let mut outcomes = Vec::new();
        for _ in 0..5 {
            outcomes.push(poller.tick().await);
        }

        assert!(matches!(outcomes[0], TickOutcome::Delivered(_)));
        assert!(outcomes[1..].iter().all(|o| *o == TickOutcome::Unchanged));
        assert_eq!(client.urls.lock().unwrap().len(), 1);
    }
}
