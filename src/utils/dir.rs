use std::{env, io, path::PathBuf};

use anyhow::{Context, Result};

pub const APPLICATION_NAME: &str = "fitlog";

/// Resolves the directory holding entries and logs, creating it when missing.
pub fn create_application_default_path() -> Result<PathBuf> {
    ensure_dir(application_default_path(|name| env::var(name).ok())?)
}

/// Picks the platform state directory using `var` to look up environment variables.
fn application_default_path(var: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    let mut path = {
        #[cfg(windows)]
        {
            var("APPDATA")
                .map(PathBuf::from)
                .context("APPDATA should be present on Windows")?
        }
        #[cfg(not(windows))]
        {
            var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".local/state")))
                .context("Couldn't find neither XDG_STATE_HOME nor HOME")?
        }
    };
    path.push(APPLICATION_NAME);
    Ok(path)
}

pub fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}
