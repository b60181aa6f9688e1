//! Local state file: the resources this CLI manages, keyed by address.
//!
//! ```json
//! { "version": 1, "resources": { "zia_rule_labels.web": { "id": "7", "attributes": { .. } } } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CliError;

pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub version: u32,
    #[serde(default)]
    pub resources: BTreeMap<String, StateEntry>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            resources: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// `type.name` address of a managed resource.
pub fn address(type_name: &str, name: &str) -> String {
    format!("{type_name}.{name}")
}

/// Split an address into its type and local name.
pub fn split_address(address: &str) -> Result<(&str, &str), CliError> {
    address
        .split_once('.')
        .filter(|(ty, name)| !ty.is_empty() && !name.is_empty())
        .ok_or_else(|| CliError::Validation {
            field: "address".into(),
            reason: format!("expected <type>.<name>, got '{address}'"),
        })
}

/// State file with its path, saved explicitly after each mutation.
#[derive(Debug)]
pub struct StateFile {
    path: PathBuf,
    pub state: State,
}

impl StateFile {
    /// Load `path`; a missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let state = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| CliError::State {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => State::default(),
            Err(e) => return Err(e.into()),
        };
        if state.version != STATE_VERSION {
            return Err(CliError::State {
                path: path.display().to_string(),
                reason: format!("unsupported version {}", state.version),
            });
        }
        Ok(Self {
            path: path.to_owned(),
            state,
        })
    }

    /// Write the state through a sibling temp file and rename.
    pub fn save(&self) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&self.state)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), resources = self.state.resources.len(), "state saved");
        Ok(())
    }

    pub fn get(&self, address: &str) -> Option<&StateEntry> {
        self.state.resources.get(address)
    }

    pub fn put(&mut self, address: String, id: String, attributes: Map<String, Value>) {
        self.state.resources.insert(address, StateEntry { id, attributes });
    }

    pub fn remove(&mut self, address: &str) -> Option<StateEntry> {
        self.state.resources.remove(address)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::load(&dir.path().join("zia.state.json")).unwrap();
        assert!(file.state.resources.is_empty());
        assert_eq!(file.state.version, STATE_VERSION);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("zia.state.json");

        let mut file = StateFile::load(&path).unwrap();
        let attrs = json!({"name": "web"}).as_object().cloned().unwrap();
        file.put(address("zia_rule_labels", "web"), "7".into(), attrs.clone());
        file.save().unwrap();

        let reloaded = StateFile::load(&path).unwrap();
        let entry = reloaded.get("zia_rule_labels.web").unwrap();
        assert_eq!(entry.id, "7");
        assert_eq!(entry.attributes, attrs);
    }

    #[test]
    fn corrupt_or_future_state_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zia.state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(StateFile::load(&path), Err(CliError::State { .. })));

        std::fs::write(&path, r#"{"version": 9, "resources": {}}"#).unwrap();
        assert!(matches!(StateFile::load(&path), Err(CliError::State { .. })));
    }

    #[test]
    fn addresses_split_on_first_dot() {
        assert_eq!(split_address("zia_rule_labels.web").unwrap(), ("zia_rule_labels", "web"));
        assert_eq!(split_address("zia_static_ip.a.b").unwrap(), ("zia_static_ip", "a.b"));
        assert!(split_address("zia_rule_labels").is_err());
        assert!(split_address(".web").is_err());
    }
}
