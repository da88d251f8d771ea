//! Tests for validated configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use crate::network::{AdapterSnapshot, AddressFetcher, FetchError, InterfaceSelector};

use super::{Cli, ConfigError, LogLevel, ServiceConfig, ValidatedConfig};

fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["ip-poster"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

fn file(content: &str) -> ServiceConfig {
    ServiceConfig::parse_json(content, Path::new("service_config.json")).unwrap()
}

fn validate(content: &str) -> Result<ValidatedConfig, ConfigError> {
    ValidatedConfig::from_raw(&cli(&[]), file(content))
}

mod values {
    use super::*;

    #[test]
    fn defaults() {
        let config = validate("{}").unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_directory, PathBuf::from("."));
        assert_eq!(config.check_interval, Duration::from_secs(3600));
        assert_eq!(config.repost_interval, None);
        assert!(!config.force);
        assert_eq!(config.ip_store_file, PathBuf::from("ip_store.json"));
        assert_eq!(config.interfaces, InterfaceSelector::All);
        assert!(!config.compare_index);
        assert!(config.require_all_services);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.secrets_file, PathBuf::from("secrets.json"));
        assert!(!config.once);
    }

    #[test]
    fn positive_repost_interval_is_enabled() {
        let config = validate(r#"{"repost_interval": 600}"#).unwrap();

        assert_eq!(config.repost_interval, Some(Duration::from_secs(600)));
    }

    #[test]
    fn non_positive_repost_interval_disables() {
        assert_eq!(validate(r#"{"repost_interval": 0}"#).unwrap().repost_interval, None);
        assert_eq!(validate(r#"{"repost_interval": -5}"#).unwrap().repost_interval, None);
    }

    #[test]
    fn log_level_aliases() {
        let config = validate(r#"{"logs": {"level": "critical"}}"#).unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_check_interval_is_rejected() {
        let result = validate(r#"{"check_interval": 0}"#);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "check_interval",
                ..
            })
        ));
    }

    #[test]
    fn negative_check_interval_is_rejected() {
        assert!(validate(r#"{"check_interval": -60}"#).is_err());
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        let result = validate(r#"{"request_timeout": 0}"#);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "request_timeout",
                ..
            })
        ));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(matches!(
            validate(r#"{"logs": {"level": "LOUD"}}"#),
            Err(ConfigError::InvalidLogLevel { .. })
        ));
    }

    #[test]
    fn empty_interface_name_is_rejected() {
        assert!(matches!(
            validate(r#"{"interfaces_of_interest": ["eth0", ""]}"#),
            Err(ConfigError::EmptyInterfaceName)
        ));
        assert!(matches!(
            validate(r#"{"interfaces_of_interest": " "}"#),
            Err(ConfigError::EmptyInterfaceName)
        ));
    }
}

mod cli_merge {
    use super::*;

    #[test]
    fn cli_force_enables_force() {
        let config = ValidatedConfig::from_raw(&cli(&["--force"]), file("{}")).unwrap();

        assert!(config.force);
    }

    #[test]
    fn file_force_cannot_be_disabled_by_cli() {
        let config = ValidatedConfig::from_raw(&cli(&[]), file(r#"{"force": true}"#)).unwrap();

        assert!(config.force);
    }

    #[test]
    fn verbose_forces_debug() {
        let quiet = validate(r#"{"logs": {"level": "ERROR"}}"#).unwrap();
        let verbose = ValidatedConfig::from_raw(
            &cli(&["--verbose"]),
            file(r#"{"logs": {"level": "ERROR"}}"#),
        )
        .unwrap();

        assert_eq!(quiet.effective_log_level(), tracing::Level::ERROR);
        assert_eq!(verbose.effective_log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn once_and_secrets_come_from_cli() {
        let config =
            ValidatedConfig::from_raw(&cli(&["--once", "--secrets", "/run/s.json"]), file("{}"))
                .unwrap();

        assert!(config.once);
        assert_eq!(config.secrets_file, PathBuf::from("/run/s.json"));
    }
}

mod derived {
    use super::*;

    struct HostAdapters;

    impl AddressFetcher for HostAdapters {
        fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
            Ok(vec![
                AdapterSnapshot::new("lo", "lo", 1, vec![]),
                AdapterSnapshot::new("eth0", "eth0", 2, vec![]),
            ])
        }
    }

    struct BrokenHost;

    impl AddressFetcher for BrokenHost {
        fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
            Err(FetchError::Platform {
                message: "no netlink".to_string(),
            })
        }
    }

    #[test]
    fn poll_options_mirror_config() {
        let config = validate(
            r#"{"repost_interval": 60, "force": true, "compare_index": true, "require_all_services": false}"#,
        )
        .unwrap();

        let options = config.poll_options();

        assert_eq!(options.repost_interval, Some(Duration::from_secs(60)));
        assert!(options.force);
        assert!(options.compare_index);
        assert!(!options.require_all_services);
    }

    #[test]
    fn all_resolves_against_host() {
        let config = validate("{}").unwrap();

        let set = config.resolve_interfaces(&HostAdapters).unwrap();

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["lo", "eth0"]);
    }

    #[test]
    fn explicit_names_do_not_query_host() {
        let config = validate(r#"{"interfaces_of_interest": ["wg0", "wg0"]}"#).unwrap();

        let set = config.resolve_interfaces(&BrokenHost).unwrap();

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["wg0"]);
    }

    #[test]
    fn all_propagates_fetch_errors() {
        let config = validate("{}").unwrap();

        assert!(config.resolve_interfaces(&BrokenHost).is_err());
    }

    #[test]
    fn display_summarizes_settings() {
        let config = validate(r#"{"repost_interval": 60, "interfaces_of_interest": "eth0"}"#).unwrap();

        let shown = config.to_string();

        assert!(shown.contains("check_interval: 3600s"));
        assert!(shown.contains("repost_interval: 60s"));
        assert!(shown.contains("interfaces: eth0"));
        assert!(shown.contains("log_level: INFO"));
    }
}

mod load {
    use super::*;

    #[test]
    fn reads_file_named_on_cli() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "check_interval = 30\nforce = true\n").unwrap();

        let config = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(config.check_interval, Duration::from_secs(30));
        assert!(config.force);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let result = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
