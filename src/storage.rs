use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Write the uploaded bytes and return the stored path, relative to the
    /// server working directory, to be recorded alongside the registration.
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String>;
}

/// Local content directory backing for uploaded profile pictures.
#[derive(Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn ensure_dir(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("create content directory {}", self.root.display()))?;
        Ok(())
    }
}

// Millisecond timestamp plus a short random suffix; the original extension is
// kept so the stored file serves with a sensible content type.
fn storage_name(original: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix = Uuid::new_v4().simple().to_string();
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", millis, &suffix[..8], ext),
        None => format!("{}-{}", millis, &suffix[..8]),
    }
}

#[async_trait]
impl UploadStore for DiskStorage {
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String> {
        let name = storage_name(original_name);
        let dest = self.root.join(&name);
        tokio::fs::write(&dest, &body)
            .await
            .with_context(|| format!("write upload {}", dest.display()))?;
        Ok(dest.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("registrar-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn storage_name_keeps_extension() {
        let name = storage_name("me.png");
        assert!(name.ends_with(".png"));
        let bare = storage_name("no-extension");
        assert!(!bare.contains('.'));
    }

    #[test]
    fn storage_name_is_unique_per_call() {
        assert_ne!(storage_name("a.jpg"), storage_name("a.jpg"));
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_path() {
        let root = temp_root();
        let store = DiskStorage::new(&root);
        store.ensure_dir().await.expect("create dir");

        let path = store
            .save("portrait.jpg", Bytes::from_static(b"fake image bytes"))
            .await
            .expect("save upload");

        assert!(path.ends_with(".jpg"));
        let written = tokio::fs::read(&path).await.expect("read back");
        assert_eq!(written, b"fake image bytes");

        tokio::fs::remove_dir_all(&root).await.ok();
    }

    #[tokio::test]
    async fn save_fails_when_directory_is_missing() {
        let store = DiskStorage::new(temp_root().join("never-created"));
        let err = store
            .save("portrait.jpg", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("write upload"));
    }
}
