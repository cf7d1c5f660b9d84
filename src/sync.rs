//! Folder-level synchronization helpers
//!
//! Bulk operations built on top of the client: uploading a local directory
//! tree while preserving its structure, and downloading a remote folder
//! (optionally filtered by a name pattern) into a local directory.

use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::client::SharePoint;
use crate::elapsed::ElapsedTime;
use crate::errors::{Result, SharePointError};

/// Outcome of an [`upload_tree`] run
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Number of files uploaded successfully
    pub uploaded: usize,
    /// Local paths whose upload exhausted its retries
    pub failed: Vec<PathBuf>,
}

/// Uploads every regular file under `local_root.join(sub_path)` to the
/// document library, mirroring the path relative to `local_root`
///
/// Individual failures are logged and collected in the report; the walk
/// continues past them. Files are visited in name order so runs are
/// deterministic.
pub async fn upload_tree(
    client: &SharePoint,
    local_root: &Path,
    sub_path: &str,
) -> Result<UploadReport> {
    let base = local_root.join(sub_path);
    let timer = ElapsedTime::start();

    let files: Vec<PathBuf> = WalkDir::new(&base)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    let total = files.len();

    let mut report = UploadReport::default();
    for (idx, path) in files.iter().enumerate() {
        tracing::info!("file: {} ({}/{})", path.display(), idx + 1, total);
        let target = relative_target(path, local_root)?;
        match client.upload_file(path, &target).await {
            Ok(()) => report.uploaded += 1,
            Err(e) => {
                tracing::error!("skipping {}: {e}", path.display());
                report.failed.push(path.clone());
            }
        }
    }

    tracing::info!("elapsed time: {}", timer.elapsed());
    Ok(report)
}

fn relative_target(path: &Path, local_root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(local_root)
        .map_err(|_| SharePointError::InvalidPath(path.display().to_string()))?;
    // Remote paths always use forward slashes.
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Downloads every file of a remote folder into `dest_dir`
///
/// Returns the number of files written.
pub async fn download_folder(client: &SharePoint, folder: &str, dest_dir: &Path) -> Result<usize> {
    download_where(client, folder, dest_dir, |_| true).await
}

/// Downloads the files of a remote folder whose names match `pattern`
///
/// The pattern must match at the start of the file name.
pub async fn download_matching(
    client: &SharePoint,
    folder: &str,
    pattern: &Regex,
    dest_dir: &Path,
) -> Result<usize> {
    download_where(client, folder, dest_dir, |name| {
        pattern.find(name).is_some_and(|m| m.start() == 0)
    })
    .await
}

async fn download_where(
    client: &SharePoint,
    folder: &str,
    dest_dir: &Path,
    keep: impl Fn(&str) -> bool,
) -> Result<usize> {
    let files = client.list_files(folder).await?;
    tokio::fs::create_dir_all(dest_dir).await?;

    let mut count = 0;
    for file in files {
        if !keep(&file.name) {
            continue;
        }
        let content = client.download_file(&file.name, folder).await?;
        tokio::fs::write(dest_dir.join(&file.name), &content).await?;
        count += 1;
    }
    Ok(count)
}
