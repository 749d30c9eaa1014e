//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Warn when the dashboard directory is missing and make sure the parent
/// directory of a file-backed SQLite database exists.
pub async fn ensure_env(frontend_dir: &str, database_url: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; dashboard will 404");
    }
    if let Some(parent) = sqlite_file_parent(database_url) {
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}

/// Directory holding the database file for `sqlite://path/to/db?mode=rwc`,
/// or `None` for in-memory databases and bare file names.
fn sqlite_file_parent(database_url: &str) -> Option<std::path::PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
