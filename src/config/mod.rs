//! Configuration model for lockable.
//!
//! This module defines the Config struct that represents the optional
//! `.lockable.yaml` file at the repository root. It supports forward-compatible
//! YAML parsing (unknown fields are ignored), defaults for every field, and
//! validation of config values.

mod model;
mod operations;
pub mod types;


pub use model::Config;
