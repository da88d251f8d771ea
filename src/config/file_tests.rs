//! Tests for service configuration file parsing.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{ConfigError, ServiceConfig};
use crate::network::InterfaceSelector;

fn json(content: &str) -> Result<ServiceConfig, ConfigError> {
    ServiceConfig::parse_json(content, Path::new("service_config.json"))
}

mod json_format {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = json("{}").unwrap();

        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.logs.level, "INFO");
        assert_eq!(config.logs.log_directory, PathBuf::from("."));
        assert_eq!(config.check_interval, 3600);
        assert_eq!(config.repost_interval, -1);
        assert!(!config.force);
        assert_eq!(config.ip_store_file, PathBuf::from("ip_store.json"));
        assert_eq!(config.interfaces_of_interest, InterfaceSelector::All);
        assert!(!config.compare_index);
        assert!(config.require_all_services);
        assert_eq!(config.request_timeout, 30);
    }

    #[test]
    fn full_config() {
        let config = json(
            r#"{
                "logs": {"level": "DEBUG", "log_directory": "logs"},
                "check_interval": 60,
                "repost_interval": 86400,
                "force": true,
                "ip_store_file": "/var/lib/ip-poster/ip_store.json",
                "interfaces_of_interest": ["eth0", "wg0"],
                "compare_index": true,
                "require_all_services": false,
                "request_timeout": 10
            }"#,
        )
        .unwrap();

        assert_eq!(config.logs.level, "DEBUG");
        assert_eq!(config.logs.log_directory, PathBuf::from("logs"));
        assert_eq!(config.check_interval, 60);
        assert_eq!(config.repost_interval, 86400);
        assert!(config.force);
        assert_eq!(
            config.interfaces_of_interest,
            InterfaceSelector::List(vec!["eth0".to_string(), "wg0".to_string()])
        );
        assert!(config.compare_index);
        assert!(!config.require_all_services);
        assert_eq!(config.request_timeout, 10);
    }

    #[test]
    fn partial_logs_section_keeps_other_default() {
        let config = json(r#"{"logs": {"level": "WARNING"}}"#).unwrap();

        assert_eq!(config.logs.level, "WARNING");
        assert_eq!(config.logs.log_directory, PathBuf::from("."));
    }

    #[test]
    fn single_interface_name() {
        let config = json(r#"{"interfaces_of_interest": "eth0"}"#).unwrap();

        assert_eq!(
            config.interfaces_of_interest,
            InterfaceSelector::Named("eth0".to_string())
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = json(r#"{"check_intervall": 60}"#);

        assert!(matches!(result, Err(ConfigError::JsonParse { .. })));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = json("{\"check_interval\": ").unwrap_err();

        assert!(err.to_string().contains("service_config.json"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(json(r#"{"force": "yes"}"#).is_err());
    }
}

mod toml_format {
    use super::*;

    #[test]
    fn same_layout_as_json() {
        let config = ServiceConfig::parse_toml(
            r#"
                check_interval = 120
                interfaces_of_interest = "all"

                [logs]
                level = "ERROR"
            "#,
            Path::new("config.toml"),
        )
        .unwrap();

        assert_eq!(config.check_interval, 120);
        assert_eq!(config.interfaces_of_interest, InterfaceSelector::All);
        assert_eq!(config.logs.level, "ERROR");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = ServiceConfig::parse_toml("[webhook]\nurl = \"x\"", Path::new("c.toml"));

        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }
}

mod load {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service_config.json");

        let result = ServiceConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn json_extension_uses_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service_config.json");
        std::fs::write(&path, r#"{"check_interval": 5}"#).unwrap();

        assert_eq!(ServiceConfig::load(&path).unwrap().check_interval, 5);
    }

    #[test]
    fn toml_extension_uses_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service_config.TOML");
        std::fs::write(&path, "check_interval = 7\n").unwrap();

        assert_eq!(ServiceConfig::load(&path).unwrap().check_interval, 7);
    }

    #[test]
    fn other_extensions_use_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service_config.conf");
        std::fs::write(&path, "check_interval = 7\n").unwrap();

        assert!(matches!(
            ServiceConfig::load(&path),
            Err(ConfigError::JsonParse { .. })
        ));
    }
}
