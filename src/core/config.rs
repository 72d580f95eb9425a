use std::env;

use chrono_tz::Tz;

use crate::errors::DemoError;
use crate::logging::LogLevel;

pub const DEFAULT_SERVICE_NAME: &str = "service_undefined";
pub const DEFAULT_API_URL_PARAMETER: &str = "/lambda-powertools-typescript/API_URL";
pub const DEFAULT_API_KEY_SECRET_ID: &str = "PowertoolsApiKeySecret";
pub const DEFAULT_MESSAGE_PATH: &str = "middy/message";
pub const DEFAULT_HTTPBIN_BASE_URL: &str = "https://httpbin.org";
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Edmonton;
pub const DEFAULT_TABLE_NAME: &str = "messagesFromHttpBin";

fn service_name(lookup: &impl Fn(&str) -> Option<String>) -> String {
    lookup("POWERTOOLS_SERVICE_NAME")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string())
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> bool {
    lookup(name).is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
}

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Settings for the SQS logging demo.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub service_name: String,
    pub aws_region: String,
    pub log_level: LogLevel,
    pub log_event: bool,
    pub simulate_failure: bool,
}

impl LoggerConfig {
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoError> {
        let log_level = match lookup("LOG_LEVEL").or_else(|| lookup("POWERTOOLS_LOG_LEVEL")) {
            Some(raw) => raw
                .parse::<LogLevel>()
                .map_err(|e| DemoError::ConfigError(format!("LOG_LEVEL: {e}")))?,
            None => LogLevel::Info,
        };

        Ok(Self {
            service_name: service_name(&lookup),
            aws_region: lookup("AWS_REGION").unwrap_or_default(),
            log_level,
            log_event: flag(&lookup, "POWERTOOLS_LOGGER_LOG_EVENT"),
            simulate_failure: flag(&lookup, "SIMULATE_FAILURE"),
        })
    }
}

/// Settings for the API Gateway tracing demo.
#[derive(Debug, Clone)]
pub struct TracerConfig {
    pub service_name: String,
    pub api_url_parameter: String,
    pub api_key_secret_id: String,
    pub message_path: String,
    pub httpbin_base_url: String,
    pub time_zone: Tz,
}

impl TracerConfig {
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoError> {
        let time_zone = match lookup("DISPLAY_TIME_ZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| DemoError::ConfigError(format!("DISPLAY_TIME_ZONE: {e}")))?,
            None => DEFAULT_TIME_ZONE,
        };

        Ok(Self {
            service_name: service_name(&lookup),
            api_url_parameter: lookup("API_URL_PARAMETER")
                .unwrap_or_else(|| DEFAULT_API_URL_PARAMETER.to_string()),
            api_key_secret_id: lookup("API_KEY_SECRET_ID")
                .unwrap_or_else(|| DEFAULT_API_KEY_SECRET_ID.to_string()),
            message_path: lookup("MESSAGE_PATH")
                .unwrap_or_else(|| DEFAULT_MESSAGE_PATH.to_string()),
            httpbin_base_url: lookup("HTTPBIN_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_HTTPBIN_BASE_URL.to_string()),
            time_zone,
        })
    }

    /// SSM path that resolves the API key through Secrets Manager.
    #[must_use]
    pub fn api_key_parameter(&self) -> String {
        format!("/aws/reference/secretsmanager/{}", self.api_key_secret_id)
    }

    /// The three GET endpoints, in issue order.
    #[must_use]
    pub fn endpoints(&self) -> [String; 3] {
        let base = &self.httpbin_base_url;
        [
            format!("{base}/base64/TXIuIEVwaWMgc2F5cyBoaSDwn5Go8J+Pu+KAjfCfkrs="),
            format!("{base}/uuid"),
            format!("{base}/status/418"),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub table_name: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoError> {
        Ok(Self {
            table_name: lookup("TABLE_NAME")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_logger_config_defaults() {
        let config = LoggerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.service_name, DEFAULT_SERVICE_NAME);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.log_event);
        assert!(!config.simulate_failure);
    }

    #[test]
    fn test_logger_config_reads_level_and_flags() {
        let config = LoggerConfig::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "debug"),
            ("POWERTOOLS_SERVICE_NAME", "logger-staging"),
            ("POWERTOOLS_LOGGER_LOG_EVENT", "true"),
            ("SIMULATE_FAILURE", "1"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.service_name, "logger-staging");
        assert!(config.log_event);
        assert!(config.simulate_failure);
    }

    #[test]
    fn test_logger_config_rejects_unknown_level() {
        let err = LoggerConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "chatty")])).unwrap_err();
        assert!(matches!(err, DemoError::ConfigError(_)));
    }

    #[test]
    fn test_tracer_config_endpoints_use_base_url() {
        let config =
            TracerConfig::from_lookup(lookup_from(&[("HTTPBIN_BASE_URL", "http://localhost:9000/")]))
                .unwrap();
        let endpoints = config.endpoints();
        assert_eq!(endpoints[1], "http://localhost:9000/uuid");
        assert_eq!(endpoints[2], "http://localhost:9000/status/418");
        assert_eq!(
            config.api_key_parameter(),
            "/aws/reference/secretsmanager/PowertoolsApiKeySecret"
        );
    }

    #[test]
    fn test_tracer_config_rejects_bad_time_zone() {
        let err = TracerConfig::from_lookup(lookup_from(&[("DISPLAY_TIME_ZONE", "Mars/Olympus")]))
            .unwrap_err();
        assert!(matches!(err, DemoError::ConfigError(_)));
    }
}
