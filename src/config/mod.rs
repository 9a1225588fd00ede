mod types;

pub use types::*;

use anyhow::{Context, Result};
use edgecount_db::ConnectionDescriptor;
use std::collections::HashSet;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./edgecount.toml", "~/.config/edgecount/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.targets.is_empty() {
        anyhow::bail!("Config defines no targets");
    }

    let mut seen = HashSet::new();
    for target in &config.targets {
        if target.name.trim().is_empty() {
            anyhow::bail!("Target with url '{}' has an empty name", target.url);
        }
        if !seen.insert(target.name.as_str()) {
            anyhow::bail!("Duplicate target name '{}'", target.name);
        }
        target
            .url
            .parse::<ConnectionDescriptor>()
            .with_context(|| format!("Target '{}' has an invalid url", target.name))?;
    }

    Ok(())
}
