//! Find-or-create reconciliation against the Lemur certificate authority.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lemur::{DesiredCertificate, ExportSettings, LemurClient, CertificateResource};
//!
//! #[tokio::main]
//! async fn main() -> lemur::Result<()> {
//!     let client = LemurClient::builder("https://lemur.example.com")
//!         .login("svc-deployer", "secret")
//!         .await?;
//!
//!     let desired = DesiredCertificate::new("internal-ca", "team@example.com")
//!         .with_name("svc-a")
//!         .with_common_name("svc-a.internal")
//!         .with_validity_years(2);
//!
//!     let settings = ExportSettings::default().with_jks_passphrase("changeit");
//!     let record = CertificateResource::new(&client, &settings)
//!         .create(&desired, None)
//!         .await?;
//!
//!     println!("Certificate: {}", record.certificate.id);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/lemur/0.3.0")]

// Re-export core types
pub use lemur_core::*;

// Re-export client
pub use lemur_client::{ClientConfig, LemurClient, LemurClientBuilder};

// Re-export the engine
pub use lemur_reconcile::*;

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
