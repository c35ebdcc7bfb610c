use paybridge_types::BraintreeOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_api_url() -> String {
    "https://api.recurly.com/js/v1".to_string()
}
fn default_sdk_version() -> String {
    "3.8.0".to_string()
}
fn default_script_base_url() -> String {
    "https://js.braintreegateway.com/web".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Backend API endpoint used for the token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL (defaults to `https://api.recurly.com/js/v1`).
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Public key sent as `key` with every request.
    #[serde(default)]
    pub public_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            public_key: None,
        }
    }
}

/// Braintree client library settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraintreeConfig {
    #[serde(default)]
    pub client_authorization: Option<String>,
    /// Braintree web SDK version (defaults to `3.8.0`).
    #[serde(default = "default_sdk_version")]
    pub sdk_version: String,
    #[serde(default = "default_script_base_url")]
    pub script_base_url: String,
    /// Per-script load timeout. Absent means wait indefinitely.
    #[serde(default)]
    pub load_timeout_secs: Option<u64>,
}

impl Default for BraintreeConfig {
    fn default() -> Self {
        Self {
            client_authorization: None,
            sdk_version: default_sdk_version(),
            script_base_url: default_script_base_url(),
            load_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings; `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub braintree: BraintreeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
    }

    /// The Braintree scripts this configuration points at.
    #[must_use]
    pub fn script_set(&self) -> ScriptSet {
        ScriptSet::new(&self.braintree.script_base_url, &self.braintree.sdk_version)
    }

    #[must_use]
    pub fn load_timeout(&self) -> Option<Duration> {
        self.braintree.load_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn braintree_options(&self) -> BraintreeOptions {
        BraintreeOptions {
            client_authorization: self.braintree.client_authorization.clone(),
        }
    }
}

/// URLs of the three Braintree web SDK scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptSet {
    /// Core client; must finish before the other two are requested.
    pub client: String,
    pub paypal: String,
    pub data_collector: String,
}

impl ScriptSet {
    #[must_use]
    pub fn new(base_url: &str, version: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let url = |name: &str| format!("{base}/{version}/js/{name}.min.js");
        Self {
            client: url("client"),
            paypal: url("paypal"),
            data_collector: url("data-collector"),
        }
    }

    /// All three URLs in load order.
    #[must_use]
    pub fn in_load_order(&self) -> [&str; 3] {
        [&self.client, &self.paypal, &self.data_collector]
    }
}

impl Default for ScriptSet {
    fn default() -> Self {
        Config::default().script_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const SAMPLE_YAML: &str = r#"
api:
  public_key: "ewr1-test"
braintree:
  client_authorization: "sandbox_abc"
  sdk_version: "3.9.1"
  load_timeout_secs: 15
log:
  level: debug
  format: json
"#;

    #[test]
    fn test_default_config() {
        let c = Config::default();
        assert_eq!(c.api.url, "https://api.recurly.com/js/v1");
        assert!(c.api.public_key.is_none());
        assert_eq!(c.braintree.sdk_version, "3.8.0");
        assert!(c.braintree.client_authorization.is_none());
        assert!(c.load_timeout().is_none());
        assert_eq!(c.log.level, "info");
        assert_eq!(c.log.format, LogFormat::Text);
    }

    #[test]
    fn test_from_yaml_overrides() {
        let c = Config::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(c.api.public_key.as_deref(), Some("ewr1-test"));
        assert_eq!(c.braintree.sdk_version, "3.9.1");
        assert_eq!(c.load_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(c.log.format, LogFormat::Json);
        assert_eq!(
            c.braintree_options().client_authorization.as_deref(),
            Some("sandbox_abc")
        );
    }

    #[test]
    fn test_from_yaml_defaults_applied() {
        let c = Config::from_yaml("braintree:\n  sdk_version: \"3.10.0\"").unwrap();
        assert_eq!(c.braintree.sdk_version, "3.10.0");
        assert_eq!(c.braintree.script_base_url, "https://js.braintreegateway.com/web");
        assert_eq!(c.api.url, "https://api.recurly.com/js/v1");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_YAML.as_bytes()).unwrap();
        let c = Config::from_file(file.path()).unwrap();
        assert_eq!(c.log.level, "debug");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Config::from_yaml("braintree: [").is_err());
    }

    #[test]
    fn test_script_set_layout() {
        let s = ScriptSet::default();
        assert_eq!(
            s.client,
            "https://js.braintreegateway.com/web/3.8.0/js/client.min.js"
        );
        assert_eq!(
            s.paypal,
            "https://js.braintreegateway.com/web/3.8.0/js/paypal.min.js"
        );
        assert_eq!(
            s.data_collector,
            "https://js.braintreegateway.com/web/3.8.0/js/data-collector.min.js"
        );
    }

    #[test]
    fn test_script_set_trailing_slash() {
        let s = ScriptSet::new("https://cdn.example.com/bt/", "3.8.0");
        assert_eq!(s.client, "https://cdn.example.com/bt/3.8.0/js/client.min.js");
        assert_eq!(s.in_load_order()[0], s.client);
    }
}
