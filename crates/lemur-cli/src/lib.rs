//! # lemur-cli
//!
//! Command-line interface for reconciling certificates against a Lemur
//! certificate authority.
//!
//! ## Features
//!
//! - **Find-or-create**: apply a desired-state TOML file, issuing only when no
//!   active certificate matches
//! - **Change detection**: a JSON state file records the last resolved id so
//!   artifacts are refetched only after rotation
//! - **Exports**: PKCS#12, CRT, JKS keystore and truststore bundles
//! - **Multiple output formats**: Pretty tables, JSON, YAML

pub mod cli;
pub mod config;
pub mod output;
pub mod state;

pub use cli::run;
