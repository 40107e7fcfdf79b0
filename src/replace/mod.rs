//! Token discovery and substitution.
//!
//! This module handles:
//! - Compiling variable patterns and enumerating matches
//! - Splicing resolved values into a buffer
//! - Resolving variable names against the environment

pub mod engine;
pub mod env;
pub mod pattern;

pub use engine::{Substituted, substitute};
pub use env::{EnvResolver, Environment, ErrorStyle, ProcessEnv};
pub use pattern::{DEFAULT_PATTERN, Match, Pattern};
