use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use tokio::{
    fs::{self, File},
    io::{self, AsyncWriteExt},
};

/// Replaces the contents of `path` with `contents`. Data is written into a sibling temporary file
/// first and then renamed over the target, so an interrupted write leaves the previous file in
/// place.
pub async fn replace_file_contents(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    if let Some(parent) = path.parent().filter(|v| !v.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = temporary_sibling(path);
    let result = async {
        let mut file = File::create(&temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await
    }
    .await;

    if result.is_err() {
        // Leftover temp file is harmless, but there is no reason to keep it around
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|v| v.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}
