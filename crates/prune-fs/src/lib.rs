//! Filesystem layer for Block Pruner
//!
//! Loads files into line buffers, writes them back atomically and stores
//! prune plans in TOML, JSON or YAML.

pub mod config;
pub mod error;
pub mod io;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use io::{read_lines, read_text, write_atomic, write_lines};
