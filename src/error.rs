use std::path::PathBuf;

/// Library-level structured errors for envreplace.
///
/// Every failure is terminal for the run. The binary prints the message and
/// exits non-zero; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum EnvReplaceError {
	#[error("Invalid variable pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to read config file: {}", path.display())]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {}", path.display())]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error(
		"Invalid destination for '{source_file}': expected a string or an array of strings, got {value}"
	)]
	InvalidConfigValue { source_file: String, value: String },

	#[error("Failed to read file '{}'", path.display())]
	SourceRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write destination '{}'", path.display())]
	DestinationWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("The env var '{name}' is not found in the environment.")]
	EnvVarNotFound { name: String },

	#[error(
		"Error: Env var '{name}' found as '{matched}' in file '{}' is not set in the environment.",
		source_file.display()
	)]
	UnresolvedVariable {
		name: String,
		matched: String,
		source_file: PathBuf,
	},

	#[error("Failed to write output")]
	Output(#[source] std::io::Error),
}

/// Result type alias using EnvReplaceError.
pub type Result<T> = std::result::Result<T, EnvReplaceError>;
