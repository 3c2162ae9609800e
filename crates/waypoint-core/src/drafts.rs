//! Draft envelopes and a JSON file store for resuming flows.
//!
//! A draft is the partial record handed over on early exit, stamped with the
//! flow it belongs to, the record schema version and the save time. Resuming
//! a draft seeds a new session's record; step position and completion are
//! never restored.

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{IoResultExt, Result, WizardError},
    record::Record,
};

/// A saved partial record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Draft<R> {
    pub flow: String,
    pub schema_version: u32,
    pub saved_at: Timestamp,
    pub data: R,
}

impl<R: Record> Draft<R> {
    /// Wrap `data` for `flow`, stamped now.
    pub fn new(flow: impl Into<String>, data: R) -> Self {
        Self {
            flow: flow.into(),
            schema_version: R::SCHEMA_VERSION,
            saved_at: Timestamp::now(),
            data,
        }
    }

    /// Check that this draft can seed a session of `flow`.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::DraftFlowMismatch`] or
    /// [`WizardError::DraftVersion`].
    pub fn validate_for(&self, flow: &str) -> Result<()> {
        if self.flow != flow {
            return Err(WizardError::DraftFlowMismatch {
                found: self.flow.clone(),
                expected: flow.to_string(),
            });
        }
        if self.schema_version != R::SCHEMA_VERSION {
            return Err(WizardError::DraftVersion {
                flow: self.flow.clone(),
                found: self.schema_version,
                expected: R::SCHEMA_VERSION,
            });
        }
        Ok(())
    }
}

/// Directory of drafts, one JSON file per flow.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at `dir`, or at the XDG default when `dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::XdgDirectory`] if the default directory cannot
    /// be created.
    pub fn open(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Ok(Self::new(dir)),
            None => Self::default_dir().map(Self::new),
        }
    }

    /// `$XDG_DATA_HOME/waypoint/drafts`
    fn default_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .create_data_directory("drafts")
            .map_err(|e| WizardError::XdgDirectory(e.to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, flow: &str) -> PathBuf {
        self.dir.join(format!("{flow}.json"))
    }

    /// Write `draft`, replacing any earlier draft of the same flow.
    pub fn save<R: Record>(&self, draft: &Draft<R>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).at_path(&self.dir)?;
        let path = self.path_for(&draft.flow);
        let json = serde_json::to_string_pretty(draft)?;
        fs::write(&path, json).at_path(&path)?;
        debug!("saved draft for {} to {}", draft.flow, path.display());
        Ok(path)
    }

    /// Read the draft of `flow`, if one was saved.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, malformed JSON, or a draft that does not
    /// match `flow` and `R::SCHEMA_VERSION`.
    pub fn load<R: Record>(&self, flow: &str) -> Result<Option<Draft<R>>> {
        let path = self.path_for(flow);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).at_path(&path)?;
        let draft: Draft<R> = serde_json::from_str(&json)?;
        draft.validate_for(flow)?;
        Ok(Some(draft))
    }

    /// Delete the draft of `flow`. Returns whether one existed.
    pub fn discard(&self, flow: &str) -> Result<bool> {
        let path = self.path_for(flow);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).at_path(&path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::record::Fields;

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = DraftStore::new(temp_dir.path().join("drafts"));

        let draft = Draft::new("hotel", Fields::new().with("propertyType", "hotel"));
        let path = store.save(&draft).unwrap();
        assert!(path.ends_with("hotel.json"));

        let loaded: Draft<Fields> = store.load("hotel").unwrap().unwrap();
        assert_eq!(loaded.data.str("propertyType"), Some("hotel"));
        assert_eq!(loaded.schema_version, Fields::SCHEMA_VERSION);
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = DraftStore::new(temp_dir.path());
        assert!(store.load::<Fields>("package").unwrap().is_none());
        assert!(!store.discard("package").unwrap());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = DraftStore::new(temp_dir.path());

        let mut draft = Draft::new("hotel", Fields::new());
        draft.schema_version = 99;
        store.save(&draft).unwrap();

        let err = store.load::<Fields>("hotel").unwrap_err();
        assert!(matches!(err, WizardError::DraftVersion { found: 99, .. }));
    }

    #[test]
    fn test_flow_mismatch_rejected() {
        let draft = Draft::new("hotel", Fields::new());
        assert!(matches!(
            draft.validate_for("package"),
            Err(WizardError::DraftFlowMismatch { .. })
        ));
    }

    #[test]
    fn test_discard_removes_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = DraftStore::new(temp_dir.path());
        store.save(&Draft::new("onboarding", Fields::new())).unwrap();
        assert!(store.discard("onboarding").unwrap());
        assert!(!store.path_for("onboarding").exists());
    }
}
