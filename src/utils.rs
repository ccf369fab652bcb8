use crate::error::Res;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Res<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))
}

/// Read a file to a `String`.
pub(crate) async fn read(path: &Path) -> Res<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub(crate) async fn deserialize<T>(path: &Path) -> Res<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Serialize `value` as pretty JSON and write it to `path`.
///
/// The data is written to a sibling temp file first and then renamed over `path` so that a
/// failed write never leaves a truncated file behind.
pub(crate) async fn serialize<T>(path: &Path, value: &T) -> Res<()>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Unable to serialize data for {}", path.display()))?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    write(&tmp, json).await?;
    rename(&tmp, path).await
}

/// Basically move a file. Renames `from` -> `to`.
pub(crate) async fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Res<()> {
    tokio::fs::rename(from.as_ref(), to.as_ref())
        .await
        .with_context(|| {
            format!(
                "Unable to move file from '{}' to '{}'",
                from.as_ref().to_string_lossy(),
                to.as_ref().to_string_lossy()
            )
        })
}

/// Create a directory and any missing parents.
pub(crate) async fn make_dir(path: &Path) -> Res<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Unable to create directory at {}", path.to_string_lossy()))
}

pub(crate) async fn canonicalize(path: &Path) -> Res<PathBuf> {
    tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Unable to canonicalize the path {}", path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_serialize_then_deserialize_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.json");
        serialize(&path, &vec![1, 2, 3]).await.unwrap();
        serialize(&path, &vec![4]).await.unwrap();
        let read_back: Vec<u8> = deserialize(&path).await.unwrap();
        assert_eq!(read_back, vec![4]);
        assert!(!dir.path().join("x.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_has_path_in_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let err = read(&path).await.unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
