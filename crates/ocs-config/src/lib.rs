//! Configuration management for the ocs inspection tool.
//!
//! This crate handles loading and saving `.ocs/config.yaml` files,
//! discovering `.ocs/` directories in the filesystem, and providing
//! typed access to configuration values.

pub mod config;
pub mod ocs_dir;
