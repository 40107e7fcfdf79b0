use crate::error::{EnvReplaceError, Result};
use crate::replace::pattern::Match;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

/// Source of variable values.
///
/// Values are raw bytes so they can be spliced into non-UTF-8 buffers as-is.
/// `ProcessEnv` is the only implementation that reads process-wide state;
/// tests substitute a `HashMap`.
pub trait Environment {
	/// Look up a variable. `Some(vec![])` means set but empty.
	fn lookup(&self, name: &str) -> Option<Vec<u8>>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
	fn lookup(&self, name: &str) -> Option<Vec<u8>> {
		if name.is_empty() || name.contains(['=', '\0']) {
			return None;
		}
		std::env::var_os(name).map(os_bytes)
	}
}

#[cfg(unix)]
fn os_bytes(value: OsString) -> Vec<u8> {
	use std::os::unix::ffi::OsStringExt;
	value.into_vec()
}

#[cfg(not(unix))]
fn os_bytes(value: OsString) -> Vec<u8> {
	value.to_string_lossy().into_owned().into_bytes()
}

impl Environment for HashMap<String, String> {
	fn lookup(&self, name: &str) -> Option<Vec<u8>> {
		self.get(name).map(|value| value.as_bytes().to_vec())
	}
}

/// How a missing variable is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
	/// `The env var 'X' is not found in the environment.`
	Plain,

	/// Names the matched text and the source file as well.
	Qualified,
}

/// Per-file resolver that turns matches into environment values.
pub struct EnvResolver<'a> {
	env: &'a dyn Environment,
	source_file: &'a Path,
	style: ErrorStyle,
	trace: Option<&'a mut dyn Write>,
	replacements: usize,
}

impl<'a> EnvResolver<'a> {
	pub fn new(env: &'a dyn Environment, source_file: &'a Path, style: ErrorStyle) -> Self {
		EnvResolver {
			env,
			source_file,
			style,
			trace: None,
			replacements: 0,
		}
	}

	/// Emit a `replaced` line to `out` for every successful resolution.
	pub fn with_trace(mut self, out: &'a mut dyn Write) -> Self {
		self.trace = Some(out);
		self
	}

	/// Resolve the variable named by capture group 1 of `found`.
	pub fn resolve(&mut self, found: &Match<'_>) -> Result<Vec<u8>> {
		let Some(value) = self.env.lookup(&found.name()) else {
			return Err(self.unresolved(found));
		};

		self.replacements += 1;
		if let Some(out) = self.trace.as_mut() {
			writeln!(
				out,
				"  replaced '{}' with '{}'",
				found.text(),
				String::from_utf8_lossy(&value)
			)
			.map_err(EnvReplaceError::Output)?;
		}

		Ok(value)
	}

	/// Number of successful resolutions so far.
	pub fn replacements(&self) -> usize {
		self.replacements
	}

	fn unresolved(&self, found: &Match<'_>) -> EnvReplaceError {
		let name = found.name().into_owned();
		match self.style {
			ErrorStyle::Plain => EnvReplaceError::EnvVarNotFound { name },
			ErrorStyle::Qualified => EnvReplaceError::UnresolvedVariable {
				name,
				matched: found.text().into_owned(),
				source_file: self.source_file.to_path_buf(),
			},
		}
	}
}
