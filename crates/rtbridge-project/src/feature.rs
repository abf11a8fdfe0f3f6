//! Default-feature selection on the generated wrapper manifest.

use std::fs;

use toml::{Table, Value};

use crate::error::{ProjectError, Result};
use crate::synthesize::WrapperHandle;

/// Add `feature` to the wrapper's `[features] default` list.
///
/// The default list behaves as a set: selecting a feature that is already
/// present changes nothing. A feature not yet declared in `[features]` is
/// declared as forwarding to the runtime-support crate. Returns whether the
/// manifest was modified.
pub fn select_feature(wrapper: &WrapperHandle, feature: &str) -> Result<bool> {
    let path = wrapper.manifest_path();
    if !path.is_file() {
        return Err(ProjectError::NotPrepared {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    let mut manifest: Table =
        toml::from_str(&content).map_err(|source| ProjectError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    let invalid = |detail: &str| ProjectError::InvalidFeatures {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    };

    let features = manifest
        .entry("features")
        .or_insert(Value::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| invalid("`features` is not a table"))?;

    let mut changed = false;
    if !features.contains_key(feature) {
        let forward = format!("{}/{feature}", wrapper.runtime_crate());
        features.insert(feature.to_string(), Value::Array(vec![Value::String(forward)]));
        changed = true;
    }

    let default = features
        .entry("default")
        .or_insert(Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| invalid("`features.default` is not an array"))?;

    if !default.iter().any(|v| v.as_str() == Some(feature)) {
        default.push(Value::String(feature.to_string()));
        changed = true;
    }

    if changed {
        let text = toml::to_string_pretty(&manifest)?;
        fs::write(path, text).map_err(|e| ProjectError::io(path, e))?;
        log::info!("selected feature '{feature}'");
    } else {
        log::debug!("feature '{feature}' already selected");
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::SubProject;
    use crate::layout::ProjectLayout;
    use crate::synthesize::synthesize;

    fn prepared() -> (tempfile::TempDir, WrapperHandle) {
        let dir = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(dir.path(), dir.path().join("apps"));
        let app = SubProject {
            name: "app_a".into(),
            dir: dir.path().join("apps/app_a"),
        };
        let handle = synthesize(&layout, &[app]).unwrap();
        (dir, handle)
    }

    fn load(handle: &WrapperHandle) -> Table {
        toml::from_str(&fs::read_to_string(handle.manifest_path()).unwrap()).unwrap()
    }

    fn defaults(handle: &WrapperHandle) -> Vec<String> {
        load(handle)["features"]["default"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn selecting_twice_keeps_one_entry() {
        let (_dir, handle) = prepared();
        assert!(select_feature(&handle, "smp").unwrap());
        assert!(!select_feature(&handle, "smp").unwrap());
        assert_eq!(defaults(&handle), vec!["smp"]);
    }

    #[test]
    fn features_accumulate_in_order() {
        let (_dir, handle) = prepared();
        select_feature(&handle, "smp").unwrap();
        select_feature(&handle, "log").unwrap();
        select_feature(&handle, "smp").unwrap();
        assert_eq!(defaults(&handle), vec!["smp", "log"]);
    }

    #[test]
    fn undeclared_feature_forwards_to_runtime() {
        let (_dir, handle) = prepared();
        select_feature(&handle, "smp").unwrap();
        let manifest = load(&handle);
        assert_eq!(manifest["features"]["smp"][0].as_str(), Some("rt_rust/smp"));
        // the rest of the manifest survives the edit
        assert!(manifest["dependencies"].get("app_a").is_some());
    }

    #[test]
    fn existing_declaration_is_kept() {
        let (_dir, handle) = prepared();
        let mut text = fs::read_to_string(handle.manifest_path()).unwrap();
        text.push_str("\n[features]\nsmp = []\n");
        fs::write(handle.manifest_path(), text).unwrap();

        select_feature(&handle, "smp").unwrap();
        let manifest = load(&handle);
        assert!(manifest["features"]["smp"].as_array().unwrap().is_empty());
        assert_eq!(defaults(&handle), vec!["smp"]);
    }

    #[test]
    fn unprepared_manifest_is_reported() {
        let (dir, handle) = prepared();
        fs::remove_file(handle.manifest_path()).unwrap();
        let err = select_feature(&handle, "smp").unwrap_err();
        assert!(matches!(err, ProjectError::NotPrepared { .. }));
        drop(dir);
    }

    #[test]
    fn malformed_features_table() {
        let (_dir, handle) = prepared();
        let mut text = fs::read_to_string(handle.manifest_path()).unwrap();
        text.push_str("\n[features]\ndefault = \"smp\"\n");
        fs::write(handle.manifest_path(), text).unwrap();

        let err = select_feature(&handle, "log").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFeatures { .. }));
    }
}
