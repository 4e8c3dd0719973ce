//! Configuration sources, lowest precedence first.

pub mod config_file;
pub mod environment;
