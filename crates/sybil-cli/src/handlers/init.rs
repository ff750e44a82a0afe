use std::path::PathBuf;

use anyhow::Result;

use crate::config;

pub fn handle(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = config::resolve_path(config_path)
        .ok_or_else(|| anyhow::anyhow!("could not resolve a config directory on this platform"))?;
    config::write_default(&path, force)?;
    println!("wrote {}", path.display());
    Ok(())
}
