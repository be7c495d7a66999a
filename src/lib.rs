//! vdife - localization consistency checks for ngconsole
//!
//! vdife checks the `localize` attributes of ngconsole HTML views against the
//! language pack of the matching ngconsole_resources branch, keeps that pack
//! in sync, and flags deprecated ngconsole API calls in scripts.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, diagnostics, language pack cache and document sessions
//! - `error`: Engine error taxonomy
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod mcp;
