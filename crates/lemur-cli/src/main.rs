//! lemur - Lemur certificate reconciliation CLI

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    lemur_cli::run().await
}
