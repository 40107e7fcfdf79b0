use crate::replace::pattern::{Match, Pattern};

/// Output of a substitution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
	/// The reassembled buffer.
	pub output: Vec<u8>,

	/// Number of matches replaced.
	pub count: usize,
}

/// Replace every match of `pattern` in `buffer` with the output of `resolve`.
///
/// Bytes between matches are copied through verbatim, whatever their
/// encoding. `resolve` runs exactly once per match, in match order. The first
/// error it returns aborts the pass and is handed back unchanged; no partial
/// buffer escapes.
///
/// Resolved values are not scanned again, so a value that itself looks like a
/// token stays in the output as-is.
pub fn substitute<F, E>(buffer: &[u8], pattern: &Pattern, mut resolve: F) -> Result<Substituted, E>
where
	F: FnMut(&Match<'_>) -> Result<Vec<u8>, E>,
{
	let mut output = Vec::with_capacity(buffer.len());
	let mut cursor = 0;
	let mut count = 0;

	for found in pattern.matches(buffer) {
		output.extend_from_slice(&buffer[cursor..found.start]);
		output.extend_from_slice(&resolve(&found)?);
		cursor = found.end;
		count += 1;
	}
	output.extend_from_slice(&buffer[cursor..]);

	Ok(Substituted { output, count })
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::convert::Infallible;

	fn lookup<'a>(
		vars: &'a HashMap<&str, &str>,
	) -> impl FnMut(&Match<'_>) -> Result<Vec<u8>, String> + 'a {
		move |m: &Match<'_>| {
			vars.get(&*m.name())
				.map(|v| v.as_bytes().to_vec())
				.ok_or_else(|| m.name().into_owned())
		}
	}

	#[test]
	fn test_no_matches_is_identity() {
		let pattern = Pattern::default();
		let buffer = b"nothing to see here\n# not a token #\n";

		let result = substitute(buffer, &pattern, |_| -> Result<Vec<u8>, Infallible> {
			panic!("resolver must not run")
		})
		.unwrap();

		assert_eq!(result.output, buffer);
		assert_eq!(result.count, 0);
	}

	#[test]
	fn test_empty_buffer() {
		let pattern = Pattern::default();
		let result = substitute(b"", &pattern, |_| Ok::<_, Infallible>(b"x".to_vec())).unwrap();
		assert_eq!(result, Substituted { output: Vec::new(), count: 0 });
	}

	#[test]
	fn test_preserves_unmatched_spans() {
		let vars = HashMap::from([("FOO", "test1"), ("BAR", "test2")]);
		let pattern = Pattern::default();

		let result = substitute(b"a=#FOO#\nb=#BAR#, again #FOO#.", &pattern, lookup(&vars)).unwrap();

		assert_eq!(result.output, b"a=test1\nb=test2, again test1.");
		assert_eq!(result.count, 3);
	}

	#[test]
	fn test_adjacent_tokens_and_edges() {
		let vars = HashMap::from([("A", "1"), ("B", "22")]);
		let pattern = Pattern::default();

		let result = substitute(b"#A##B#", &pattern, lookup(&vars)).unwrap();
		assert_eq!(result.output, b"122");
		assert_eq!(result.count, 2);
	}

	#[test]
	fn test_output_length_accounts_for_replacements() {
		let vars = HashMap::from([("SHORT", ""), ("LONG", "a much longer value")]);
		let pattern = Pattern::default();
		let buffer = b"x #SHORT# y #LONG# z #LONG#";

		let matched: usize = pattern.matches(buffer).map(|m| m.full.len()).sum();
		let replaced: usize = pattern
			.matches(buffer)
			.map(|m| vars[&*m.name()].len())
			.sum();

		let result = substitute(buffer, &pattern, lookup(&vars)).unwrap();
		assert_eq!(result.output.len(), buffer.len() - matched + replaced);
	}

	#[test]
	fn test_resolver_called_once_per_match_in_order() {
		let pattern = Pattern::default();
		let mut seen = Vec::new();

		let result = substitute(b"#C# #A# #B# #A#", &pattern, |m| {
			seen.push((m.name().into_owned(), m.start));
			Ok::<_, Infallible>(m.name().to_lowercase().into_bytes())
		})
		.unwrap();

		assert_eq!(result.output, b"c a b a");
		assert_eq!(
			seen,
			vec![
				("C".to_string(), 0),
				("A".to_string(), 4),
				("B".to_string(), 8),
				("A".to_string(), 12),
			]
		);
	}

	#[test]
	fn test_first_resolver_error_aborts() {
		let vars = HashMap::from([("FOO", "ok")]);
		let pattern = Pattern::default();
		let mut calls = 0;
		let mut resolve = lookup(&vars);

		let result = substitute(b"#FOO# #MISSING# #FOO# #OTHER#", &pattern, |m| {
			calls += 1;
			resolve(m)
		});

		assert_eq!(result.unwrap_err(), "MISSING");
		assert_eq!(calls, 2);
	}

	#[test]
	fn test_custom_pattern_uses_group_one() {
		let vars = HashMap::from([("HOME_DIR", "/home/me")]);
		let pattern = Pattern::compile(r"\$\{env\.(.*?)\}").unwrap();

		let result = substitute(b"path=${env.HOME_DIR}/bin", &pattern, lookup(&vars)).unwrap();
		assert_eq!(result.output, b"path=/home/me/bin");
	}

	#[test]
	fn test_single_pass_is_not_idempotent_when_values_look_like_tokens() {
		// A value shaped like a token survives the first pass and is picked up by
		// a second one.
		let vars = HashMap::from([("OUTER", "#INNER#"), ("INNER", "done")]);
		let pattern = Pattern::default();

		let first = substitute(b"v=#OUTER#", &pattern, lookup(&vars)).unwrap();
		assert_eq!(first.output, b"v=#INNER#");
		assert_eq!(first.count, 1);

		let second = substitute(&first.output, &pattern, lookup(&vars)).unwrap();
		assert_eq!(second.output, b"v=done");
	}

	#[test]
	fn test_multibyte_text_is_preserved() {
		let vars = HashMap::from([("NAME", "wörld")]);
		let pattern = Pattern::default();

		let result = substitute("héllo #NAME# ✓".as_bytes(), &pattern, lookup(&vars)).unwrap();
		assert_eq!(result.output, "héllo wörld ✓".as_bytes());
	}

	#[test]
	fn test_non_utf8_bytes_are_preserved() {
		let vars = HashMap::from([("FOO", "bar")]);
		let pattern = Pattern::default();

		let result = substitute(b"caf\xe9=#FOO#\n\xff\x00end", &pattern, lookup(&vars)).unwrap();
		assert_eq!(result.output, b"caf\xe9=bar\n\xff\x00end");
		assert_eq!(result.count, 1);
	}
}
