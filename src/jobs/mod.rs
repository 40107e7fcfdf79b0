//! Turning invocations into substitution jobs.
//!
//! This module handles:
//! - Resolving the base directory for a config file
//! - Making source and destination paths absolute
//! - Fanning a source out to every destination it maps to

pub mod path;

use crate::config::Config;
use std::path::{Path, PathBuf};

pub use path::{absolutize, clean};

/// One source file and the destinations that receive its transformed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
	/// The source path as the user wrote it.
	pub label: String,

	/// Absolute source path.
	pub source: PathBuf,

	/// Absolute destination paths, in write order. Never empty.
	pub destinations: Vec<PathBuf>,
}

impl Job {
	/// Build the single job for an explicit source/destination pair.
	pub fn from_pair(source: &str, destination: &str, cwd: &Path) -> Self {
		Job {
			label: source.to_string(),
			source: absolutize(source, cwd),
			destinations: vec![absolutize(destination, cwd)],
		}
	}
}

/// Directory that a config's relative paths resolve against.
///
/// `basePath` wins when present; a relative `basePath` is taken relative to
/// `config_dir`.
pub fn config_base_dir(config: &Config, config_dir: &Path) -> PathBuf {
	match config.base_path.as_deref() {
		Some(base) => absolutize(base, config_dir),
		None => clean(config_dir),
	}
}

/// Build one job per `files` entry, in config order.
pub fn resolve_jobs(config: &Config, base_dir: &Path) -> Vec<Job> {
	let jobs: Vec<Job> = config
		.files
		.iter()
		.map(|mapping| Job {
			label: mapping.source.clone(),
			source: absolutize(&mapping.source, base_dir),
			destinations: mapping
				.destination
				.paths()
				.iter()
				.map(|dest| absolutize(dest, base_dir))
				.collect(),
		})
		.collect();

	log::debug!(
		"resolved {} job(s) against {}",
		jobs.len(),
		base_dir.display()
	);
	jobs
}
