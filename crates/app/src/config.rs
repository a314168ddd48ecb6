use std::path::PathBuf;

use anyhow::{Context, bail};

pub const DATA_DIR_VAR: &str = "ROSTER_DATA_DIR";
pub const STORAGE_FILE_VAR: &str = "ROSTER_STORAGE_FILE";
pub const RESET_VAR: &str = "ROSTER_RESET";

const DEFAULT_STORAGE_FILE: &str = "storage.json";

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_file: String,
    /// Clear local storage before hydrating.
    pub reset: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let storage_file = lookup(STORAGE_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_FILE.to_string());
        if storage_file.contains(['/', '\\']) {
            bail!("{STORAGE_FILE_VAR} must be a file name, got {storage_file:?}");
        }

        let reset = match lookup(RESET_VAR) {
            Some(raw) => parse_flag(&raw).with_context(|| format!("invalid {RESET_VAR}"))?,
            None => false,
        };

        Ok(Self {
            data_dir,
            storage_file,
            reset,
        })
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage_file)
    }
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .context("failed to resolve a data directory; set ROSTER_DATA_DIR")?;
    Ok(base.join("roster"))
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "" | "0" | "false" | "no" => Ok(false),
        other => bail!("expected a boolean flag, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn explicit_values_are_used() {
        let cfg = config(&[
            (DATA_DIR_VAR, "/tmp/roster-test"),
            (STORAGE_FILE_VAR, "people.json"),
            (RESET_VAR, "TRUE"),
        ])
        .unwrap();

        assert_eq!(cfg.storage_path(), PathBuf::from("/tmp/roster-test/people.json"));
        assert!(cfg.reset);
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[(DATA_DIR_VAR, "/data")]).unwrap();
        assert_eq!(cfg.storage_file, "storage.json");
        assert!(!cfg.reset);
    }

    #[test]
    fn invalid_reset_flag_is_rejected() {
        let err = config(&[(DATA_DIR_VAR, "/data"), (RESET_VAR, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(RESET_VAR));
    }

    #[test]
    fn storage_file_must_not_be_a_path() {
        assert!(config(&[(DATA_DIR_VAR, "/data"), (STORAGE_FILE_VAR, "a/b.json")]).is_err());
    }
}
