//! State file kept between `certificate apply` runs.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use lemur::{CertificateId, CertificateState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Last resolved certificate for a desired-state file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    /// Certificate id resolved on the last run
    pub certificate_id: CertificateId,

    /// Lookup key used on the last run
    pub key: String,

    /// When the state was written
    pub updated_at: DateTime<Utc>,
}

impl StateFile {
    pub fn new(certificate_id: CertificateId, key: impl Into<String>) -> Self {
        Self {
            certificate_id,
            key: key.into(),
            updated_at: Utc::now(),
        }
    }

    /// Read state from `path`; a missing file is `None`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading state file {}", path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("parsing state file {}", path.display()))?;
        Ok(Some(state))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing state file {}", path.display()))?;
        debug!(path = %path.display(), id = %self.certificate_id, "saved certificate state");
        Ok(())
    }

    /// Read the state recorded for `key`; a file written for another key is an error.
    pub fn load_for(path: &Path, key: &str) -> Result<Option<CertificateState>> {
        let Some(state) = Self::load(path)? else {
            debug!(path = %path.display(), "no state file, starting fresh");
            return Ok(None);
        };

        if state.key != key {
            anyhow::bail!(
                "State file {} belongs to '{}', not '{}'.\n\
                 Use a separate --state file per certificate.",
                path.display(),
                state.key,
                key
            );
        }

        debug!(
            path = %path.display(),
            id = %state.certificate_id,
            "loaded previous certificate state"
        );
        Ok(Some(state.certificate_state()))
    }

    pub const fn certificate_state(&self) -> CertificateState {
        CertificateState {
            certificate_id: self.certificate_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_state_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(StateFile::load(&dir.path().join("state.json")).unwrap().is_none());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("svc-a.state.json");

        let state = StateFile::new(CertificateId(42), "svc-a");
        state.save(&path).unwrap();

        let loaded = StateFile::load(&path).unwrap().unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.certificate_state().certificate_id, CertificateId(42));

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["certificate_id"], 42);
    }

    #[test]
    fn state_for_matching_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("svc-a.state.json");

        assert!(StateFile::load_for(&path, "svc-a").unwrap().is_none());

        StateFile::new(CertificateId(42), "svc-a").save(&path).unwrap();
        let state = StateFile::load_for(&path, "svc-a").unwrap().unwrap();
        assert_eq!(state.certificate_id, CertificateId(42));
    }

    #[test]
    fn state_for_another_key_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        StateFile::new(CertificateId(42), "svc-a").save(&path).unwrap();

        let err = StateFile::load_for(&path, "svc-b").unwrap_err();
        assert!(err.to_string().contains("belongs to 'svc-a'"));
    }

    #[test]
    fn corrupt_state_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(StateFile::load(&path).is_err());
    }
}
