use crate::error::{EnvReplaceError, Result};
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;

/// Pattern used when neither the command line nor the config supplies one.
///
/// Matches tokens like `#DATABASE_URL#`; group 1 is the variable name.
pub const DEFAULT_PATTERN: &str = "#([A-Z0-9_]+)#";

/// A compiled variable pattern.
///
/// Matching runs over raw bytes, so sources need not be UTF-8. Capture
/// group 1 names the variable to resolve. A pattern without it is accepted,
/// but every match then resolves an empty variable name.
#[derive(Debug, Clone)]
pub struct Pattern {
	regex: Regex,
}

/// One token found in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
	/// The whole matched bytes.
	pub full: &'t [u8],

	/// Captured groups, group 0 (the whole match) first. Groups that did not
	/// participate in the match are empty.
	pub groups: Vec<&'t [u8]>,

	/// Byte offset of the first matched byte.
	pub start: usize,

	/// Byte offset one past the last matched byte.
	pub end: usize,
}

impl Match<'_> {
	/// The variable name, taken from capture group 1.
	///
	/// Bytes that are not UTF-8 are replaced with U+FFFD.
	pub fn name(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(self.groups.get(1).copied().unwrap_or_default())
	}

	/// The whole match as text, for messages and traces.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(self.full)
	}

	fn from_captures<'t>(caps: &Captures<'t>) -> Match<'t> {
		let whole = caps.get_match();
		Match {
			full: whole.as_bytes(),
			groups: caps
				.iter()
				.map(|group| group.map_or(&b""[..], |m| m.as_bytes()))
				.collect(),
			start: whole.start(),
			end: whole.end(),
		}
	}
}

impl Pattern {
	/// Compile a pattern string.
	pub fn compile(pattern: &str) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| EnvReplaceError::InvalidPattern {
			pattern: pattern.to_string(),
			source,
		})?;

		if regex.captures_len() < 2 {
			log::warn!("pattern '{pattern}' has no capture group; variable names will be empty");
		}

		Ok(Pattern { regex })
	}

	/// The pattern source text.
	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Number of capture positions, including the whole match.
	pub fn capture_count(&self) -> usize {
		self.regex.captures_len()
	}

	/// Iterate over all non-overlapping matches in `buffer`, left to right.
	///
	/// The iterator is lazy; calling this again yields the same sequence.
	pub fn matches<'t>(&self, buffer: &'t [u8]) -> impl Iterator<Item = Match<'t>> {
		self.regex
			.captures_iter(buffer)
			.map(|caps| Match::from_captures(&caps))
	}
}

impl Default for Pattern {
	fn default() -> Self {
		Pattern {
			regex: Regex::new(DEFAULT_PATTERN).expect("default pattern is valid"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_compile_valid_pattern() {
		let pattern = Pattern::compile(r"\$\{env\.(.*?)\}").unwrap();
		assert_eq!(pattern.capture_count(), 2);
		assert_eq!(pattern.as_str(), r"\$\{env\.(.*?)\}");
	}

	#[test]
	fn test_compile_invalid_pattern() {
		let result = Pattern::compile(r"#([A-Z#");
		match result.unwrap_err() {
			EnvReplaceError::InvalidPattern { pattern, .. } => {
				assert_eq!(pattern, "#([A-Z#");
			}
			other => panic!("Expected InvalidPattern error, got {other:?}"),
		}
	}

	#[test]
	fn test_default_pattern_matches_hash_tokens() {
		let pattern = Pattern::default();
		let found: Vec<_> = pattern.matches(b"a #FOO# b #BAR_2# c #lower#").collect();

		assert_eq!(found.len(), 2);
		assert_eq!(found[0].full, b"#FOO#");
		assert_eq!(found[0].groups, vec![&b"#FOO#"[..], &b"FOO"[..]]);
		assert_eq!(found[0].name(), "FOO");
		assert_eq!((found[0].start, found[0].end), (2, 7));
		assert_eq!(found[1].name(), "BAR_2");
	}

	#[test]
	fn test_matches_in_non_utf8_buffer() {
		let pattern = Pattern::default();
		let found: Vec<_> = pattern.matches(b"caf\xe9 #FOO# \xff\xfe").collect();

		assert_eq!(found.len(), 1);
		assert_eq!(found[0].name(), "FOO");
		assert_eq!((found[0].start, found[0].end), (5, 10));
	}

	#[test]
	fn test_matches_do_not_overlap() {
		// "#A#B#" could match "#A#" or "#B#"; the leftmost wins and consumes the
		// shared '#'.
		let pattern = Pattern::default();
		let found: Vec<_> = pattern.matches(b"#A#B#").collect();

		assert_eq!(found.len(), 1);
		assert_eq!(found[0].name(), "A");
	}

	#[test]
	fn test_matches_is_restartable() {
		let pattern = Pattern::default();
		let buffer = b"#X# and #Y#";

		let first: Vec<_> = pattern.matches(buffer).collect();
		let second: Vec<_> = pattern.matches(buffer).collect();
		assert_eq!(first, second);
	}

	#[test]
	fn test_unmatched_optional_group_is_empty() {
		let pattern = Pattern::compile(r"\{(\w+)(?::(\w+))?\}").unwrap();
		let found: Vec<_> = pattern.matches(b"{HOST}").collect();

		assert_eq!(found[0].groups, vec![&b"{HOST}"[..], &b"HOST"[..], &b""[..]]);
	}

	#[test]
	fn test_pattern_without_group_yields_empty_name() {
		let pattern = Pattern::compile("#[A-Z]+#").unwrap();
		assert_eq!(pattern.capture_count(), 1);

		let found: Vec<_> = pattern.matches(b"#FOO#").collect();
		assert_eq!(found[0].name(), "");
	}
}
