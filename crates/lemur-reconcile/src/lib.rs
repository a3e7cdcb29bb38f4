//! Find-or-create reconciliation and artifact export for Lemur certificates.
//!
//! The engine is a set of small components borrowing a [`LemurClient`]:
//!
//! - [`Locator`] searches for an active certificate matching a desired certificate
//! - [`Issuer`] requests issuance of a new certificate
//! - [`Reconciler`] combines the two into find-or-create, and resolves authorities
//! - [`ArtifactFetcher`] retrieves PEM body, chain and private key
//! - [`ExportRequestor`] requests PKCS#12, CRT and JKS exports
//!
//! On top of those sit the caller-facing surfaces: [`CertificateResource`]
//! (lookup by name, with change detection on the certificate id),
//! [`PkcsDataSource`] (lookup by common name) and [`AuthorityDataSource`].
//!
//! Every call is awaited before the next dependent call starts and nothing is
//! retried. The engine keeps no cache; callers hold [`CertificateState`].
//!
//! [`LemurClient`]: lemur_client::LemurClient

#![doc(html_root_url = "https://docs.rs/lemur-reconcile/0.3.0")]

mod exporter;
mod fetcher;
mod issuer;
mod locator;
mod reconciler;
mod resource;
mod sources;

#[cfg(test)]
mod test_support;

pub use exporter::{ExportRequestor, ExportSettings};
pub use fetcher::ArtifactFetcher;
pub use issuer::Issuer;
pub use locator::{select_by_common_name, select_by_name, Locator, LookupMode};
pub use reconciler::{select_authority, Reconciled, Reconciler};
pub use resource::{CertificateRecord, CertificateResource, CertificateState};
pub use sources::{AuthorityDataSource, AuthorityRecord, PkcsDataSource, PkcsRecord};
