//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves the platform directories used for configuration and trace
//! output, and expands user-supplied `~` paths.

pub mod paths;

pub use paths::{default_config_file, expand_tilde, get_data_dir};
