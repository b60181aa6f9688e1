//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, `--yes` is mandatory.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read an attribute file for `-f`; the extension picks the format
/// (`.yaml`/`.yml`, `.toml`, anything else JSON).
pub fn read_attribute_file(path: &Path) -> Result<Map<String, Value>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let value: Value = match extension.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str(&contents)?,
        Some("toml") => toml::from_str(&contents)?,
        _ => serde_json::from_str(&contents)?,
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(CliError::Validation {
            field: "file".into(),
            reason: format!("{} must contain an object of attributes", path.display()),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_every_supported_format() {
        let dir = tempfile::tempdir().unwrap();
        let expected = json!({"name": "web", "locations": [{"id": [1, 2]}]});

        let json_file = write(dir.path(), "a.json", &expected.to_string());
        let yaml_file = write(
            dir.path(),
            "a.yaml",
            "name: web\nlocations:\n  - id: [1, 2]\n",
        );
        let toml_file = write(
            dir.path(),
            "a.toml",
            "name = \"web\"\n[[locations]]\nid = [1, 2]\n",
        );

        for path in [json_file, yaml_file, toml_file] {
            assert_eq!(Value::Object(read_attribute_file(&path).unwrap()), expected);
        }
    }

    #[test]
    fn rejects_non_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "list.json", "[1, 2]");
        assert!(matches!(
            read_attribute_file(&path),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn yes_flag_skips_the_prompt() {
        assert!(confirm("Delete?", "destroy", true).unwrap());
    }
}
