//! Configuration loading and parsing for envreplace.
//!
//! This module handles:
//! - JSON config file parsing
//! - Checking that every `files` value is a destination or list of them

pub mod parser;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, Destination, FileMapping};
