use super::types::ServerConfig;
use std::fs;
use std::path::Path;

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: ServerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration settings.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.registration.pass_min_length == 0 {
            return Err(anyhow::anyhow!("pass_min_length cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        Ok(())
    }
}
