//! Command-line front end for the PDF document extractor.
//!
//! The binary in `main.rs` only parses arguments and installs logging;
//! commands live here so they can be driven from tests.

pub mod cmd;
pub mod config;
pub mod render;

pub use config::Config;
