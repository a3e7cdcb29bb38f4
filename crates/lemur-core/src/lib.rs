//! Core types and errors for the Lemur certificate reconciliation client.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: the desired-state input ([`DesiredCertificate`]), resolved
//!   results, and strongly-typed schemas for every Lemur API response
//! - **Errors**: the [`LemurError`] taxonomy shared by every layer
//!
//! # Example
//!
//! ```rust,ignore
//! use lemur_core::{DesiredCertificate, CreateCertificateRequest};
//!
//! let desired = DesiredCertificate::new("internal-ca", "team@example.com")
//!     .with_name("svc-a")
//!     .with_common_name("svc-a.internal")
//!     .with_validity_years(2);
//!
//! let request = CreateCertificateRequest::from(&desired);
//! assert!(request.rotation && request.notify);
//! ```

#![doc(html_root_url = "https://docs.rs/lemur-core/0.3.0")]

mod error;
pub mod types;

pub use error::{LemurError, Result};
pub use types::*;
