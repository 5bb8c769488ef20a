//! Filesystem helpers for witchat.
//!
//! Resolves the data directory and writes transcript exports. All I/O goes
//! through `tokio::fs`.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use witchat_types::transcript::InterleavedEntry;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "WITCHAT_DATA_DIR";

/// Resolve the witchat data directory.
///
/// Uses `WITCHAT_DATA_DIR` if set, otherwise `~/.witchat`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".witchat");
    }

    PathBuf::from(".witchat")
}

/// Default export location for a session: `{data_dir}/exports/{session_id}.json`.
pub fn default_export_path(data_dir: &Path, session_id: &Uuid) -> PathBuf {
    data_dir.join("exports").join(format!("{session_id}.json"))
}

/// Serialize the interleaved transcript as pretty JSON.
///
/// The layout is an array of `[is_user, text]` pairs, newest first.
pub fn transcript_json(entries: &[InterleavedEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

/// Write the interleaved transcript to `path`, creating parent directories.
pub async fn write_transcript_export(
    path: &Path,
    entries: &[InterleavedEntry],
) -> Result<(), std::io::Error> {
    let json = transcript_json(entries).map_err(std::io::Error::other)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, json).await?;

    tracing::debug!(path = %path.display(), entries = entries.len(), "transcript exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_export_creates_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        let entries = vec![
            InterleavedEntry(false, "greet".to_string()),
            InterleavedEntry(true, "hola".to_string()),
        ];

        write_transcript_export(&path, &entries).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<InterleavedEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, entries);
    }

    #[tokio::test]
    async fn test_write_empty_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        write_transcript_export(&path, &[]).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_default_export_path() {
        let id = Uuid::nil();
        let path = default_export_path(Path::new("/home/user/.witchat"), &id);
        assert_eq!(
            path,
            PathBuf::from("/home/user/.witchat/exports/00000000-0000-0000-0000-000000000000.json")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-witchat");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-witchat"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
