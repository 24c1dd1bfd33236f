//! Filesystem-backed media store

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::error::{MediaError, Result};
use crate::store::MediaStore;

/// Default upload size limit: 5 MiB.
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Accepted raster image content types and their file extensions.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Media store that writes payloads into a local uploads directory.
///
/// References have the shape `/uploads/<millis>-<uuid>.<ext>`; the timestamp
/// prefix keeps directory listings roughly chronological and the UUID makes
/// collisions impossible even within one millisecond.
pub struct FsMediaStore {
    root: PathBuf,
    max_bytes: usize,
}

impl FsMediaStore {
    /// Create a store rooted at the given uploads directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Override the payload size limit.
    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Uploads directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn extension_for(content_type: &str) -> Result<&'static str> {
        ALLOWED_TYPES
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| MediaError::UnsupportedMediaType {
                content_type: content_type.to_string(),
            })
    }

    /// Resolve a reference back to a path inside the uploads directory.
    ///
    /// Rejects anything that is not a plain `/uploads/<filename>` reference so
    /// a corrupted record can never escape the root.
    fn resolve(&self, media_ref: &str) -> Result<PathBuf> {
        let name = media_ref
            .strip_prefix("/uploads/")
            .ok_or_else(|| MediaError::InvalidRef(media_ref.to_string()))?;
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(MediaError::InvalidRef(media_ref.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(&self, data: Bytes, content_type: &str) -> Result<String> {
        let ext = Self::extension_for(content_type)?;

        if data.len() > self.max_bytes {
            return Err(MediaError::TooLarge {
                size: data.len(),
                limit: self.max_bytes,
            });
        }

        let filename = format!(
            "{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            ext
        );

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&filename), &data).await?;

        debug!(filename = %filename, size = data.len(), "Stored media payload");
        Ok(format!("/uploads/{filename}"))
    }

    async fn read(&self, media_ref: &str) -> Result<Bytes> {
        let path = self.resolve(media_ref)?;
        let data = tokio::fs::read(path).await?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, media_ref: &str) -> Result<()> {
        let path = self.resolve(media_ref)?;
        tokio::fs::remove_file(path).await?;
        debug!(media_ref = %media_ref, "Deleted media payload");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in_tempdir() -> (tempfile::TempDir, FsMediaStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_store_and_read_roundtrip() {
        let (_dir, store) = store_in_tempdir();

        let payload = Bytes::from_static(b"fake png bytes");
        let media_ref = store.store(payload.clone(), "image/png").await.unwrap();

        assert!(media_ref.starts_with("/uploads/"));
        assert!(media_ref.ends_with(".png"));

        let read_back = store.read(&media_ref).await.unwrap();
        assert_eq!(read_back, payload);
    }

    #[tokio::test]
    async fn test_rejects_unsupported_content_type() {
        let (_dir, store) = store_in_tempdir();

        let result = store
            .store(Bytes::from_static(b"<svg/>"), "image/svg+xml")
            .await;

        assert!(matches!(
            result,
            Err(MediaError::UnsupportedMediaType { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_oversized_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path()).max_bytes(8);

        let result = store
            .store(Bytes::from_static(b"way too many bytes"), "image/jpeg")
            .await;

        assert!(matches!(result, Err(MediaError::TooLarge { size: 18, .. })));
    }

    #[tokio::test]
    async fn test_delete_removes_file() {
        let (_dir, store) = store_in_tempdir();

        let media_ref = store
            .store(Bytes::from_static(b"gone soon"), "image/gif")
            .await
            .unwrap();

        store.delete(&media_ref).await.unwrap();
        assert!(store.read(&media_ref).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_traversal_refs() {
        let (_dir, store) = store_in_tempdir();

        for bad in ["/uploads/../etc/passwd", "/etc/passwd", "/uploads/", "x"] {
            assert!(matches!(
                store.delete(bad).await,
                Err(MediaError::InvalidRef(_))
            ));
        }
    }
}
