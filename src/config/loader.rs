// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::ConfigError;
use crate::logging::LogLevel;

/// Tracing configuration for one endpoint.
///
/// Typically loaded from a YAML file. Everything except the endpoint name
/// has a default.
///
/// # Fields
/// * `endpoint_name` - Bound to every audit event as `ProcessingEndpoint`
/// * `minimum_level` - Audit events below this level are dropped (default `information`)
/// * `message_audit` - Register the received/sent message stages (default `true`)
/// * `saga_audit` - Register the saga capture stages (default `true`)
/// * `originating_machine` - Machine name stamped on outgoing messages
/// * `routes` - Destinations per message type, used by `send`
///
/// # Example
/// ```yaml
/// endpoint_name: Sales
/// minimum_level: information
/// saga_audit: true
/// routes:
///   Confirm: [billing]
///   ShipOrder: [shipping, warehouse]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TracingConfig {
    pub endpoint_name: String,
    #[serde(default)]
    pub minimum_level: LogLevel,
    #[serde(default = "enabled")]
    pub message_audit: bool,
    #[serde(default = "enabled")]
    pub saga_audit: bool,
    #[serde(default)]
    pub originating_machine: Option<String>,
    #[serde(default)]
    pub routes: HashMap<String, Vec<String>>,
}

fn enabled() -> bool {
    true
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TracingConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: TracingConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a config from a YAML file and reject it if it is not usable.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<TracingConfig, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_minimal_config_uses_defaults() {
        let cfg: TracingConfig = serde_yaml::from_str("endpoint_name: Sales").unwrap();

        assert_eq!(cfg.endpoint_name, "Sales");
        assert_eq!(cfg.minimum_level, LogLevel::Information);
        assert!(cfg.message_audit);
        assert!(cfg.saga_audit);
        assert!(cfg.originating_machine.is_none());
        assert!(cfg.routes.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
endpoint_name: Sales
minimum_level: warning
message_audit: false
originating_machine: sales-01
routes:
  Confirm: [billing]
  ShipOrder: [shipping, warehouse]
"#;

        let cfg: TracingConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.minimum_level, LogLevel::Warning);
        assert!(!cfg.message_audit);
        assert!(cfg.saga_audit);
        assert_eq!(cfg.originating_machine.as_deref(), Some("sales-01"));
        assert_eq!(cfg.routes["ShipOrder"], vec!["shipping", "warehouse"]);
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_config("endpoint_name: Sales\nroutes:\n  Confirm: [billing]\n");

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.routes["Confirm"], vec!["billing"]);
    }

    #[test]
    fn test_load_and_validate_rejects_invalid_config() {
        let file = write_config("endpoint_name: '  '\nroutes:\n  Confirm: []\n");

        match load_and_validate_config(file.path()) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::EmptyEndpointName));
                assert!(errors.contains(&ValidationError::EmptyRouteDestination {
                    message_type: "Confirm".to_string()
                }));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_errors() {
        let missing = load_config("/definitely/not/here/tracing.yaml");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let file = write_config("endpoint_name: [not, a, string]");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }
}
