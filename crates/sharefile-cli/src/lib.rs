//! # ShareFile CLI
//!
//! Command line front end for [`sharefile_client`]. Each command authenticates,
//! runs a single API operation and prints the result.

pub mod config;
pub mod render;

pub use config::CliConfig;
