use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use envreplace::replace::ProcessEnv;
use envreplace::run::{Invocation, Options, run};

/// Flags that may also be spelled with a single leading dash.
const SINGLE_DASH_FLAGS: &[&str] = &["regex", "verbose", "silent", "help", "version"];

#[derive(Parser, Debug)]
#[command(name = "envreplace")]
#[command(
	version,
	about = "Replace placeholder tokens in files with values from the environment",
	override_usage = "envreplace [OPTIONS] <configFile>\n       envreplace [OPTIONS] <srcFile> <destFile>",
	disable_help_flag = true
)]
struct Cli {
	/// Pattern whose first capture group names the variable [default: #([A-Z0-9_]+)#]
	#[arg(long, value_name = "PATTERN", allow_hyphen_values = true)]
	regex: Option<String>,

	/// Trace every file, replacement and destination
	#[arg(long)]
	verbose: bool,

	/// Do not print the summary line
	#[arg(long)]
	silent: bool,

	/// Print usage
	#[arg(long, short = 'h')]
	help: bool,

	/// A config file, or a source and destination file
	#[arg(value_name = "FILES")]
	files: Vec<String>,
}

impl Cli {
	fn invocation(&self) -> Option<Invocation> {
		match self.files.as_slice() {
			[config] => Some(Invocation::ConfigFile(PathBuf::from(config))),
			[source, destination] => Some(Invocation::Pair {
				source: source.clone(),
				destination: destination.clone(),
			}),
			_ => None,
		}
	}
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	match run_cli() {
		Ok(code) => code,
		Err(e) => {
			println!("{e:#}");
			ExitCode::FAILURE
		}
	}
}

fn run_cli() -> Result<ExitCode> {
	let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
		Ok(cli) => cli,
		Err(e) if e.kind() == ErrorKind::DisplayVersion => {
			print!("{e}");
			return Ok(ExitCode::SUCCESS);
		}
		Err(e) => {
			print!("{e}");
			return Ok(ExitCode::FAILURE);
		}
	};

	let invocation = match cli.invocation() {
		Some(invocation) if !cli.help => invocation,
		_ => {
			println!("{}", Cli::command().render_help());
			return Ok(ExitCode::FAILURE);
		}
	};

	let options = Options {
		regex: cli.regex,
		verbose: cli.verbose,
		silent: cli.silent,
	};
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let mut stdout = std::io::stdout().lock();

	run(&invocation, &options, &cwd, &ProcessEnv, &mut stdout)?;
	Ok(ExitCode::SUCCESS)
}

/// Rewrite `-verbose`, `-regex=P` and friends to their `--` form.
///
/// Arguments after a `--` terminator, and the value following `-regex`, are
/// left alone.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
	let mut normalized = Vec::new();
	let mut passthrough = false;
	let mut expect_value = false;

	for arg in args {
		if passthrough || expect_value {
			expect_value = false;
			normalized.push(arg);
			continue;
		}

		let Some(text) = arg.to_str() else {
			normalized.push(arg);
			continue;
		};

		if text == "--" {
			passthrough = true;
			normalized.push(arg);
			continue;
		}

		match single_dash_flag(text) {
			Some(name) => {
				expect_value = name == "regex" && !text.contains('=');
				normalized.push(OsString::from(format!("-{text}")));
			}
			None => {
				expect_value = text == "--regex";
				normalized.push(arg);
			}
		}
	}

	normalized
}

/// The flag name if `arg` is a single-dash spelling of a known long flag.
fn single_dash_flag(arg: &str) -> Option<&'static str> {
	let rest = arg.strip_prefix('-')?;
	if rest.starts_with('-') {
		return None;
	}
	let name = rest.split_once('=').map_or(rest, |(name, _)| name);
	SINGLE_DASH_FLAGS.iter().copied().find(|flag| *flag == name)
}
