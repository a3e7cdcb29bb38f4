//! PEM artifact retrieval.

use lemur_client::LemurClient;
use lemur_core::{CertificateArtifacts, CertificateId, PublicCertificate, Result};
use tracing::debug;

/// Fetches the PEM material of a resolved certificate
pub struct ArtifactFetcher<'a> {
    client: &'a LemurClient,
}

impl<'a> ArtifactFetcher<'a> {
    /// Create a fetcher using the given client
    pub const fn new(client: &'a LemurClient) -> Self {
        Self { client }
    }

    /// Fetch the certificate body and chain
    pub async fn fetch_public(&self, id: CertificateId) -> Result<PublicCertificate> {
        let detail = self.client.certificates().get(id).await?;
        let mut public = detail.public_certificate();
        public.chain = public.chain.filter(|c| !c.is_empty());
        Ok(public)
    }

    /// Fetch the private key
    pub async fn fetch_private(&self, id: CertificateId) -> Result<String> {
        debug!(id = %id, "fetching private key");
        Ok(self.client.certificates().key(id).await?.key)
    }

    /// Fetch body, chain and private key, in that order
    pub async fn fetch_all(&self, id: CertificateId) -> Result<CertificateArtifacts> {
        let public = self.fetch_public(id).await?;
        let private_key = self.fetch_private(id).await?;

        Ok(CertificateArtifacts {
            chain: public.chain,
            public_certificate: public.body,
            private_key,
        })
    }
}
