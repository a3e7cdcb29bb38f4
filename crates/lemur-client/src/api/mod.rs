//! API endpoint modules.

mod auth;
mod authorities;
mod certificates;

pub use auth::AuthApi;
pub use authorities::AuthorityApi;
pub use certificates::CertificateApi;
