//! Patching of the copied package manifest.
//!
//! After the template is materialized, its `package.json` still carries the
//! template's own name, version, and template-pinned versions of the two
//! libraries this tool re-installs explicitly. The patch touches exactly
//! three aspects and nothing else:
//!
//! 1. `name` is set to the validated project name
//! 2. `version` is reset to [`INITIAL_VERSION`](crate::constants::INITIAL_VERSION)
//! 3. the connectkit and viem entries are removed from `dependencies`, to be
//!    added back at controlled versions by the installer stage
//!
//! Key order is preserved (serde_json's `preserve_order` feature) and the
//! file is re-serialized with two-space indentation, matching how the
//! templates were authored.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

use crate::constants::{CONNECTKIT_PACKAGE, INITIAL_VERSION};
use crate::core::ScaffoldError;

/// Dependency keys stripped from the template manifest.
///
/// `viem` is stripped under its bare name here but re-added pinned to major
/// version 2 by the installer.
const STRIPPED_DEPENDENCIES: [&str; 2] = [CONNECTKIT_PACKAGE, "viem"];

/// Apply the manifest patch to `<target>/package.json`.
///
/// A missing manifest, malformed JSON, or a manifest without a
/// `dependencies` mapping is fatal: every template is required to ship a
/// complete manifest at its root.
pub fn patch(target: &Path, project_name: &str) -> Result<()> {
    let manifest_path = target.join("package.json");

    let raw = fs::read_to_string(&manifest_path).map_err(|_| ScaffoldError::ManifestNotFound {
        path: manifest_path.display().to_string(),
    })?;

    let mut manifest: Value =
        serde_json::from_str(&raw).map_err(|e| ScaffoldError::ManifestParseError {
            path: manifest_path.display().to_string(),
            reason: e.to_string(),
        })?;

    let root = manifest.as_object_mut().ok_or_else(|| ScaffoldError::ManifestInvalid {
        path: manifest_path.display().to_string(),
        reason: "top-level value is not an object".to_string(),
    })?;

    root.insert("name".to_string(), json!(project_name));
    root.insert("version".to_string(), json!(INITIAL_VERSION));

    let dependencies = root
        .get_mut("dependencies")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ScaffoldError::ManifestInvalid {
            path: manifest_path.display().to_string(),
            reason: "missing \"dependencies\" mapping".to_string(),
        })?;

    for key in STRIPPED_DEPENDENCIES {
        if dependencies.shift_remove(key).is_some() {
            tracing::debug!("stripped template dependency {key}");
        }
    }

    let serialized = serde_json::to_string_pretty(&manifest)?;
    fs::write(&manifest_path, serialized)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn patch_fixture(contents: &str, name: &str) -> Result<String> {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), contents).unwrap();
        patch(dir.path(), name)?;
        Ok(fs::read_to_string(dir.path().join("package.json")).unwrap())
    }

    #[test]
    fn patches_name_version_and_strips_pinned_dependencies() {
        let input = r#"{"name":"tmpl","version":"9.9.9","dependencies":{"@particle-network/connectkit":"*","viem":"*","react":"*"}}"#;
        let output = patch_fixture(input, "my-app").unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["name"], "my-app");
        assert_eq!(value["version"], "0.1.0");
        let deps = value["dependencies"].as_object().unwrap();
        assert!(!deps.contains_key("@particle-network/connectkit"));
        assert!(!deps.contains_key("viem"));
        assert_eq!(deps["react"], "*");
    }

    #[test]
    fn leaves_unrelated_fields_and_key_order_intact() {
        let input = r#"{
  "name": "tmpl",
  "version": "0.0.1",
  "private": true,
  "scripts": {
    "dev": "next dev"
  },
  "dependencies": {
    "next": "14.1.0",
    "viem": "^2.7.0",
    "react": "^18"
  },
  "devDependencies": {
    "typescript": "^5"
  }
}"#;
        let output = patch_fixture(input, "ordered-app").unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["private"], true);
        assert_eq!(value["scripts"]["dev"], "next dev");
        assert_eq!(value["devDependencies"]["typescript"], "^5");

        // Top-level key order survives the round trip.
        let keys: Vec<&str> =
            value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["name", "version", "private", "scripts", "dependencies", "devDependencies"]
        );
    }

    #[test]
    fn output_uses_two_space_indentation() {
        let input = r#"{"name":"t","version":"1.0.0","dependencies":{"react":"*"}}"#;
        let output = patch_fixture(input, "indent-check").unwrap();
        assert!(output.contains("\n  \"name\": \"indent-check\""));
        assert!(output.contains("\n    \"react\": \"*\""));
    }

    #[test]
    fn patch_is_idempotent_on_the_fields_it_touches() {
        let input = r#"{"name":"tmpl","version":"9.9.9","dependencies":{"viem":"*","react":"*"}}"#;
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), input).unwrap();

        patch(dir.path(), "my-app").unwrap();
        let first = fs::read_to_string(dir.path().join("package.json")).unwrap();
        patch(dir.path(), "my-app").unwrap();
        let second = fs::read_to_string(dir.path().join("package.json")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = patch(dir.path(), "my-app").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = patch_fixture("{not json", "my-app").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::ManifestParseError { .. })
        ));
    }

    #[test]
    fn missing_dependencies_mapping_is_fatal() {
        let err = patch_fixture(r#"{"name":"t","version":"1.0.0"}"#, "my-app").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::ManifestInvalid { .. })
        ));
    }
}
