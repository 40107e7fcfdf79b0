use crate::error::EnvReplaceError;
use serde::Deserialize;
use serde_json::Value;

/// Configuration loaded from a JSON config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
	/// Pattern whose group 1 names the variable. `None` means the default.
	pub variable_regex: Option<String>,

	/// Source to destination mappings, in document order.
	pub files: Vec<FileMapping>,

	/// Directory that relative paths resolve against. Relative values are
	/// themselves resolved against the config file's directory.
	pub base_path: Option<String>,
}

/// One entry of the `files` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
	/// Source path as written in the config.
	pub source: String,

	/// Where the transformed source is written.
	pub destination: Destination,
}

/// A `files` value: one destination or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
	Single(String),
	Multiple(Vec<String>),
}

impl Destination {
	/// Interpret a raw JSON value for the source `source_file`.
	///
	/// Anything other than a string or a non-empty array of strings is
	/// rejected.
	pub fn from_value(source_file: &str, value: Value) -> Result<Self, EnvReplaceError> {
		let invalid = |value: &Value| EnvReplaceError::InvalidConfigValue {
			source_file: source_file.to_string(),
			value: value.to_string(),
		};

		match value {
			Value::String(path) => Ok(Destination::Single(path)),
			Value::Array(ref items) if !items.is_empty() => {
				let paths = items
					.iter()
					.map(|item| item.as_str().map(str::to_string))
					.collect::<Option<Vec<_>>>()
					.ok_or_else(|| invalid(&value))?;
				Ok(Destination::Multiple(paths))
			}
			other => Err(invalid(&other)),
		}
	}

	/// The destinations as a slice, in order. Never empty.
	pub fn paths(&self) -> &[String] {
		match self {
			Destination::Single(path) => std::slice::from_ref(path),
			Destination::Multiple(paths) => paths,
		}
	}
}

/// The on-disk shape of a config file, before `files` values are checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfig {
	#[serde(default)]
	pub variable_regex: Option<String>,

	pub files: serde_json::Map<String, Value>,

	#[serde(default)]
	pub base_path: Option<String>,
}

impl RawConfig {
	/// Check every `files` value and build the typed config.
	pub(crate) fn into_config(self) -> Result<Config, EnvReplaceError> {
		let files = self
			.files
			.into_iter()
			.map(|(source, value)| {
				let destination = Destination::from_value(&source, value)?;
				Ok(FileMapping {
					source,
					destination,
				})
			})
			.collect::<Result<Vec<_>, EnvReplaceError>>()?;

		Ok(Config {
			variable_regex: self.variable_regex,
			files,
			base_path: self.base_path,
		})
	}
}
