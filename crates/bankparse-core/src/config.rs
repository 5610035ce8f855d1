use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BankparseError, InputKind};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const REFERENCE_FILE_NAME: &str = "result.csv";

/// Where a run finds its inputs.
///
/// By default a target `t` reads `<data_dir>/t/t sample.pdf` and
/// `<data_dir>/t/result.csv`. Entries in `targets` replace either path for
/// one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: default_data_dir(),
            targets: BTreeMap::new(),
        }
    }
}

/// Resolved input paths for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    pub target: String,
    pub document: PathBuf,
    pub reference: PathBuf,
}

impl TargetPaths {
    /// Fail with `MissingInput` unless both inputs exist. Every absent
    /// input is listed, document first.
    pub fn ensure_exist(&self) -> Result<(), BankparseError> {
        let missing: Vec<(InputKind, PathBuf)> = [
            (InputKind::Document, &self.document),
            (InputKind::Reference, &self.reference),
        ]
        .into_iter()
        .filter(|(_, path)| !path.is_file())
        .map(|(kind, path)| (kind, path.clone()))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BankparseError::MissingInput { missing })
        }
    }
}

impl Settings {
    /// Resolve the document and reference paths for `target`.
    ///
    /// Target names are case-insensitive.
    pub fn resolve(&self, target: &str) -> TargetPaths {
        let target = target.trim().to_lowercase();
        let target_dir = self.data_dir.join(&target);
        let entry = self.targets.get(&target);

        let document = entry
            .and_then(|o| o.document.clone())
            .unwrap_or_else(|| target_dir.join(format!("{} sample.pdf", target)));
        let reference = entry
            .and_then(|o| o.reference.clone())
            .unwrap_or_else(|| target_dir.join(REFERENCE_FILE_NAME));

        TargetPaths {
            target,
            document,
            reference,
        }
    }
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<Settings, BankparseError> {
    let content = std::fs::read_to_string(path).map_err(|e| BankparseError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_settings(&content, path)
}

/// Parse settings from a JSON string. Target names are lowercased.
pub fn parse_settings(json: &str, source: &Path) -> Result<Settings, BankparseError> {
    let mut settings: Settings =
        serde_json::from_str(json).map_err(|e| BankparseError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut targets = BTreeMap::new();
    for (name, entry) in std::mem::take(&mut settings.targets) {
        let key = name.trim().to_lowercase();
        if targets.insert(key, entry).is_some() {
            return Err(BankparseError::ConfigInvalid(format!(
                "target '{}' is listed more than once",
                name
            )));
        }
    }
    settings.targets = targets;

    validate_settings(&settings)?;
    Ok(settings)
}

/// Validate that settings are well-formed.
pub fn validate_settings(settings: &Settings) -> Result<(), BankparseError> {
    if settings.data_dir.as_os_str().is_empty() {
        return Err(BankparseError::ConfigInvalid(
            "data_dir must not be empty".into(),
        ));
    }

    for (name, entry) in &settings.targets {
        if name.is_empty() {
            return Err(BankparseError::ConfigInvalid(
                "target name must not be empty".into(),
            ));
        }

        let paths = [("document", &entry.document), ("reference", &entry.reference)];
        for (field, path) in paths {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(BankparseError::ConfigInvalid(format!(
                    "target '{}' has an empty {} path",
                    name, field
                )));
            }
        }
    }

    Ok(())
}
