//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use lemur::ExportFormat;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Reconcile certificates against a Lemur certificate authority
///
/// Certificates are looked up before anything is issued, so running the same
/// command twice never creates a duplicate.
#[derive(Parser, Debug)]
#[command(name = "lemur")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Lemur host URL (or set LEMUR_HOST env var)
    #[arg(long, env = "LEMUR_HOST", global = true)]
    pub host: Option<String>,

    /// Login username
    #[arg(short = 'u', long, env = "LEMUR_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "LEMUR_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Bearer token; skips login
    #[arg(long, env = "LEMUR_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log requests at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find, issue and export certificates
    #[command(alias = "cert")]
    Certificate(CertificateArgs),

    /// Look up a certificate authority and its signing certificate
    Authority(AuthorityArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Certificate command
// ============================================================================

#[derive(Args, Debug)]
pub struct CertificateArgs {
    #[command(subcommand)]
    pub command: CertificateCommands,
}

#[derive(Subcommand, Debug)]
pub enum CertificateCommands {
    /// Find the certificate described by a TOML file, issuing it if missing
    Apply {
        /// Desired-state TOML file
        desired: PathBuf,

        /// State file recording the last resolved id
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Look up by common name instead of name
        #[arg(long)]
        by_common_name: bool,
    },

    /// Check whether an active certificate matches a TOML file by name
    Exists {
        /// Desired-state TOML file
        desired: PathBuf,
    },

    /// Print the PEM body, chain and private key of a certificate
    Show {
        /// Certificate id
        id: u64,
    },

    /// Export a certificate as a keystore or bundle
    Export {
        /// Certificate id
        id: u64,

        /// Export format (pkcs12, crt, jks-keystore, jks-truststore)
        #[arg(short, long, default_value = "pkcs12")]
        format: ExportFormat,
    },

    /// Find or issue by common name and export as PKCS#12
    Pkcs {
        /// Desired-state TOML file
        desired: PathBuf,
    },
}

// ============================================================================
// Authority command
// ============================================================================

#[derive(Args, Debug)]
pub struct AuthorityArgs {
    /// Authority name
    pub name: String,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., host, token, jks_passphrase)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
