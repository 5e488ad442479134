use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub registration: RegistrationSettings,
    #[serde(default)]
    pub privileges: PrivilegeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            registration: RegistrationSettings::default(),
            privileges: PrivilegeSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Account registration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationSettings {
    /// Minimum password length accepted at registration.
    #[serde(default = "default_pass_min_length")]
    pub pass_min_length: usize,

    /// Whether the e-mail confirmation flow is enabled for new accounts.
    #[serde(default)]
    pub need_email_for_registering: bool,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            pass_min_length: default_pass_min_length(),
            need_email_for_registering: false,
        }
    }
}

/// Privilege table: privilege name → rank name or policy selector.
///
/// Values are the wire names of access ranks ("registered", "admin", ...)
/// or the policy selectors "nobody" / "anonymous". Interpretation happens
/// in the access model; this type only stores the strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivilegeSettings(BTreeMap<String, String>);

impl PrivilegeSettings {
    /// Looks up the configured value for a privilege name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Sets a privilege value. Used by startup code and tests; requests
    /// only ever read.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Iterates over all configured privilege entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base log level: error, warn, info, debug or trace.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: compact or json.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
