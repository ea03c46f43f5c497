use crate::error::{MinerError, Result};
use crate::types::config::MinerConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "gemminer.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".gemminer/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/gemminer/config.toml";

pub fn load_config(root: &Path) -> Result<MinerConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Merges global, repo, and local layers in that order; later layers win.
///
/// With no layer present the built-in defaults apply.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<MinerConfig> {
    if !root.exists() {
        return Err(MinerError::PathNotFound(root.display().to_string()));
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: MinerConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| MinerError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "merging config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| MinerError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::TieBreak;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert_eq!(cfg.ranking_limits().total_limit, 250);
        assert_eq!(cfg.score_weights().momentum_weight, 20.0);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = load_config_with_global(&dir.path().join("nope"), None)
            .expect_err("missing root should fail");
        assert!(err.to_string().contains("path does not exist"));
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[ranking]
hype_limit = 40
total_limit = 200

[scoring]
base_activity = 12.0
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[ranking]
total_limit = 150
tie_break = "full_name"

[languages]
targets = ["Rust", "Zig"]
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".gemminer")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[ranking]
hype_limit = 30
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed");

        let limits = cfg.ranking_limits();
        assert_eq!(limits.hype_limit, 30);
        assert_eq!(limits.total_limit, 150);
        assert_eq!(limits.tie_break, TieBreak::FullName);
        assert_eq!(cfg.score_weights().base_activity, 12.0);
        assert_eq!(cfg.language_policy().targets, vec!["Rust", "Zig"]);
    }

    #[test]
    fn invalid_merged_config_is_rejected() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[ranking]
hype_limit = 300
"#,
        )
        .expect("repo config should write");
        let err = load_config_with_global(root.path(), None).expect_err("should fail validation");
        assert!(err.to_string().contains("invalid config value"));
    }

    #[test]
    fn malformed_toml_reports_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[ranking\n")
            .expect("repo config should write");
        let err = load_config_with_global(root.path(), None).expect_err("should fail to parse");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
