use crate::config::types::{Config, RawConfig};
use crate::error::{EnvReplaceError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| EnvReplaceError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let raw: RawConfig =
		serde_json::from_str(content).map_err(|source| EnvReplaceError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})?;

	let config = raw.into_config()?;
	log::debug!(
		"loaded {} with {} file mapping(s)",
		path.display(),
		config.files.len()
	);

	Ok(config)
}
