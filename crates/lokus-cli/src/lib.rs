//! # lokus-cli
//!
//! Command-line front end for the Lokus plugin manifest gate.
//!
//! ## Commands
//!
//! - `lokus-manifest check <path>` — Validate a manifest file
//! - `lokus-manifest init` — Write a starter `plugin.json`
//! - `lokus-manifest schema` — Print the recognized schema tables

pub mod commands;
pub mod config;

pub use commands::{CheckOutcome, Cli, InitRequest, check_manifest, schema_document, write_template};
pub use config::CliConfig;
