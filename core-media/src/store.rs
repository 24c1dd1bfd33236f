//! Media store trait definition

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Blob storage interface for carousel image payloads.
///
/// Implementations accept a binary payload and hand back a stable, opaque
/// reference string. References are the only thing persisted with gallery
/// records, so swapping the backing store never touches the database schema.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store a payload and return its reference.
    ///
    /// # Errors
    /// Returns an error if the payload is rejected (type or size) or if the
    /// underlying write fails. A failed store leaves no partial file behind
    /// that a later `store` call could collide with.
    async fn store(&self, data: Bytes, content_type: &str) -> Result<String>;

    /// Read a previously stored payload.
    async fn read(&self, media_ref: &str) -> Result<Bytes>;

    /// Delete a stored payload.
    ///
    /// Callers treat deletion as best-effort: gallery record removal has
    /// already committed by the time this runs, so failures are logged and
    /// swallowed upstream rather than surfaced.
    async fn delete(&self, media_ref: &str) -> Result<()>;
}
