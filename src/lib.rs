//! envreplace - replace placeholder tokens in files with environment values.
//!
//! This library provides the core functionality for envreplace, including:
//! - Pattern matching with capture-group extraction
//! - Ordered, single-pass substitution with fail-fast variable lookup
//! - JSON config parsing and job resolution
//! - Writing one transformed buffer to several destinations
//!
//! # Example
//!
//! ```no_run
//! use envreplace::replace::{EnvResolver, ErrorStyle, Pattern, ProcessEnv, substitute};
//! use std::path::Path;
//!
//! let pattern = Pattern::default();
//! let mut resolver = EnvResolver::new(&ProcessEnv, Path::new("app.conf"), ErrorStyle::Plain);
//!
//! let result = substitute(b"home=#HOME#", &pattern, |m| resolver.resolve(m)).unwrap();
//! println!("{} ({} replacements)", String::from_utf8_lossy(&result.output), result.count);
//! ```

pub mod config;
pub mod error;
pub mod jobs;
pub mod replace;
pub mod run;

pub use error::{EnvReplaceError, Result};
