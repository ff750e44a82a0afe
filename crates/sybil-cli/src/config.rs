//! `sybil.toml` overlay onto `Settings::default()`: a default-then-file
//! config layer, read once at startup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sybil_types::Settings;

/// Resolves the config path precedence: an explicit `--config` path, else
/// `$XDG_CONFIG_HOME/sybil/sybil.toml` (or the platform equivalent via
/// `dirs::config_dir`), else no file at all.
pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| dirs::config_dir().map(|dir| dir.join("sybil").join("sybil.toml")))
}

/// Loads `Settings`, overlaying a `sybil.toml` file on top of the defaults
/// when one exists at the resolved path. A missing file is not an error —
/// the defaults from §3 stand on their own.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let settings: Settings = toml::from_str(&raw)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    settings.validate().map_err(anyhow::Error::from)?;
    Ok(settings)
}

/// Serializes `Settings::default()` to TOML and writes it to `path`,
/// creating parent directories as needed. Refuses to clobber an existing
/// file unless `force` is set.
pub fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to overwrite", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }
    let toml = toml::to_string_pretty(&Settings::default())
        .context("serializing default settings to TOML")?;
    std::fs::write(path, toml).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let settings = load(Some(Path::new("/nonexistent/sybil.toml"))).unwrap();
        assert_eq!(settings.threshold, Settings::default().threshold);
    }

    #[test]
    fn write_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sybil.toml");
        write_default(&path, false).unwrap();
        let settings = load(Some(&path)).unwrap();
        assert_eq!(settings.min_cluster_size, Settings::default().min_cluster_size);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sybil.toml");
        write_default(&path, false).unwrap();
        assert!(write_default(&path, false).is_err());
        assert!(write_default(&path, true).is_ok());
    }
}
