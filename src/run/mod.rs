//! Running a substitution from start to finish.
//!
//! This module handles:
//! - Loading the config and resolving jobs for an invocation
//! - Reading, substituting and fanning out each job in order
//! - Verbose trace lines and the final summary

pub mod writer;

use crate::config::parse_config_file;
use crate::error::{EnvReplaceError, Result};
use crate::jobs::{Job, absolutize, config_base_dir, resolve_jobs};
use crate::replace::{EnvResolver, Environment, ErrorStyle, Pattern, substitute};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use writer::write_destinations;

/// What the user asked to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
	/// One source written to one destination.
	Pair { source: String, destination: String },

	/// A JSON config file mapping sources to destinations.
	ConfigFile(PathBuf),
}

/// Flags that shape a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
	/// Variable pattern; overrides the config's `variableRegex`.
	pub regex: Option<String>,

	/// Emit per-file, per-replacement and per-destination trace lines.
	pub verbose: bool,

	/// Suppress the summary line.
	pub silent: bool,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	/// Number of source files processed.
	pub files: usize,

	/// Total substitutions across all files.
	pub replacements: usize,
}

impl fmt::Display for Summary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Successfully processed {} files and made {} replacements",
			self.files, self.replacements
		)
	}
}

/// Resolved work for a run.
struct Plan {
	pattern: Pattern,
	jobs: Vec<Job>,
	style: ErrorStyle,
}

impl Plan {
	fn build(invocation: &Invocation, options: &Options, cwd: &Path) -> Result<Self> {
		match invocation {
			Invocation::Pair {
				source,
				destination,
			} => Ok(Plan {
				pattern: compile_pattern(options.regex.as_deref())?,
				jobs: vec![Job::from_pair(source, destination, cwd)],
				style: ErrorStyle::Plain,
			}),
			Invocation::ConfigFile(path) => {
				let config_path = absolutize(path, cwd);
				let config = parse_config_file(&config_path)?;
				let config_dir = config_path.parent().unwrap_or(cwd);
				let base_dir = config_base_dir(&config, config_dir);

				let regex = options
					.regex
					.as_deref()
					.or(config.variable_regex.as_deref());

				Ok(Plan {
					pattern: compile_pattern(regex)?,
					jobs: resolve_jobs(&config, &base_dir),
					style: ErrorStyle::Qualified,
				})
			}
		}
	}
}

fn compile_pattern(regex: Option<&str>) -> Result<Pattern> {
	match regex {
		Some(regex) => Pattern::compile(regex),
		None => Ok(Pattern::default()),
	}
}

/// Process every job of `invocation`, stopping at the first error.
///
/// Relative paths resolve against `cwd`. Trace lines and the summary go to
/// `out`; errors are returned, never written.
pub fn run(
	invocation: &Invocation,
	options: &Options,
	cwd: &Path,
	env: &dyn Environment,
	out: &mut dyn Write,
) -> Result<Summary> {
	let plan = Plan::build(invocation, options, cwd)?;
	log::debug!(
		"running {} job(s) with pattern '{}'",
		plan.jobs.len(),
		plan.pattern.as_str()
	);

	let mut summary = Summary::default();
	for job in &plan.jobs {
		let count = process_job(job, &plan, options.verbose, env, &mut *out)?;
		summary.files += 1;
		summary.replacements += count;
	}

	if !options.silent {
		writeln!(out, "{summary}").map_err(EnvReplaceError::Output)?;
	}

	Ok(summary)
}

/// Read, substitute and write one job. Returns the number of replacements.
fn process_job(
	job: &Job,
	plan: &Plan,
	verbose: bool,
	env: &dyn Environment,
	out: &mut dyn Write,
) -> Result<usize> {
	if verbose {
		writeln!(out, "Processing file passed in as '{}'", job.label)
			.and_then(|()| writeln!(out, "  Reading file '{}'", job.source.display()))
			.map_err(EnvReplaceError::Output)?;
	}

	let buffer = std::fs::read(&job.source).map_err(|source| EnvReplaceError::SourceRead {
		path: job.source.clone(),
		source,
	})?;
	log::debug!("read {} bytes from {}", buffer.len(), job.source.display());

	let mut resolver = EnvResolver::new(env, &job.source, plan.style);
	if verbose {
		resolver = resolver.with_trace(&mut *out);
	}
	let substituted = substitute(&buffer, &plan.pattern, |found| resolver.resolve(found))?;
	let count = resolver.replacements();
	debug_assert_eq!(count, substituted.count);

	let trace = if verbose { Some(out) } else { None };
	write_destinations(&substituted.output, &job.destinations, count, trace)?;

	Ok(count)
}
