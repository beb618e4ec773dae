use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "empdoc.json";

/// Top-level empdoc.json schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpdocConfig {
    /// Directory holding the markdown pages, relative to the repo root.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Page manifest, relative to `docs_dir`.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// `.em` file index, relative to `docs_dir`.
    #[serde(default = "default_index")]
    pub index: String,

    /// Static site output directory, relative to the repo root.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Group the runner uses when none is given. `all` means no filter.
    #[serde(default = "default_group")]
    pub default_group: String,
}

impl Default for EmpdocConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            manifest: default_manifest(),
            index: default_index(),
            out_dir: default_out_dir(),
            default_group: default_group(),
        }
    }
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_manifest() -> String {
    "manifest.json".to_string()
}
fn default_index() -> String {
    "em_index.json".to_string()
}
fn default_out_dir() -> String {
    "dist".to_string()
}
fn default_group() -> String {
    "all".to_string()
}

impl EmpdocConfig {
    pub fn docs_path(&self, root: &Path) -> PathBuf {
        root.join(&self.docs_dir)
    }

    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        self.docs_path(root).join(&self.manifest)
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        self.docs_path(root).join(&self.index)
    }

    pub fn out_path(&self, root: &Path) -> PathBuf {
        root.join(&self.out_dir)
    }
}

/// Load config from an empdoc.json file, or return defaults if missing.
pub fn load_config(root: &Path) -> Result<EmpdocConfig> {
    let config_path = root.join(CONFIG_FILE);

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: EmpdocConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        log::debug!("loaded {}", config_path.display());
        Ok(config)
    } else {
        log::debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
        Ok(EmpdocConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "docsDir": "documentation",
            "manifest": "pages.json",
            "index": "sources.json",
            "outDir": "public",
            "defaultGroup": "tests"
        }"#;

        let config: EmpdocConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.docs_dir, "documentation");
        assert_eq!(config.default_group, "tests");

        let root = Path::new("/repo");
        assert_eq!(
            config.manifest_path(root),
            PathBuf::from("/repo/documentation/pages.json")
        );
        assert_eq!(
            config.index_path(root),
            PathBuf::from("/repo/documentation/sources.json")
        );
        assert_eq!(config.out_path(root), PathBuf::from("/repo/public"));
    }

    #[test]
    fn test_defaults() {
        let json = r#"{}"#;
        let config: EmpdocConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.docs_dir, "docs");
        assert_eq!(config.manifest, "manifest.json");
        assert_eq!(config.index, "em_index.json");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.default_group, "all");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join("empdoc-config-test-missing");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let config = load_config(&dir).unwrap();
        assert_eq!(config.docs_dir, "docs");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = std::env::temp_dir().join("empdoc-config-test-invalid");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), "{ not json").unwrap();
        let err = load_config(&dir).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
