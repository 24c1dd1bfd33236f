//! # Sequence Store
//!
//! Single owner of the `sequence` field. All mutations of the gallery order
//! go through [`SequenceStore`], which serializes them and finishes every one
//! with the same corrective pass: read the full live list in display order and
//! rewrite `sequence` to the dense range `0..n`.
//!
//! ## Why recompute from scratch
//!
//! The persistence layer offers per-record atomicity only, so a resequencing
//! loop can fail partway through. A failure mid-pass leaves a transient gap,
//! never a duplicate: every corrective write targets a value no other live
//! record holds, and a reorder routes the moved record through an out-of-range
//! parking value so displaced survivors can walk through its old slot. The
//! next successful mutation recomputes positions from the sorted list rather
//! than trusting stored values, healing whatever the previous pass left
//! behind. Incremental fixups would compound earlier damage instead.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use core_media::MediaStore;

use crate::error::{GalleryError, Result};
use crate::models::{GalleryImage, ImagePatch};
use crate::repositories::ImageRepository;

/// Outcome of a committed mutation, carrying enough context for callers to
/// remap any index-based state (e.g. the rotation pointer).
#[derive(Debug, Clone)]
pub struct OrderChange {
    /// Item IDs in display order before the mutation
    pub previous: Vec<String>,
    /// Full items in display order after the mutation
    pub current: Vec<GalleryImage>,
}

impl OrderChange {
    /// Item IDs in display order after the mutation.
    pub fn current_ids(&self) -> Vec<String> {
        self.current.iter().map(|i| i.id.clone()).collect()
    }
}

/// Authoritative owner of the gallery display order.
pub struct SequenceStore {
    repo: Arc<dyn ImageRepository>,
    media: Arc<dyn MediaStore>,
    /// Serializes mutations so two resequencing passes never interleave.
    write_lock: Mutex<()>,
}

impl SequenceStore {
    /// Create a store over the given repository and media store.
    pub fn new(repo: Arc<dyn ImageRepository>, media: Arc<dyn MediaStore>) -> Self {
        Self {
            repo,
            media,
            write_lock: Mutex::new(()),
        }
    }

    /// List all images in display order. Read-only, no resequencing.
    pub async fn list(&self) -> Result<Vec<GalleryImage>> {
        self.repo.list_ordered().await
    }

    /// Append a new image at the end of the display order.
    ///
    /// The new record is written with `sequence = live count`; a failed write
    /// leaves no partial state because it is a single new record. On success
    /// the standard resequencing pass runs, so a gap left by an earlier
    /// failed mutation is healed here too.
    ///
    /// Returns the stored image and the resulting order change.
    pub async fn insert(
        &self,
        title: String,
        description: Option<String>,
        media_ref: String,
    ) -> Result<(GalleryImage, OrderChange)> {
        let _guard = self.write_lock.lock().await;

        let before = self.repo.list_ordered().await?;
        let previous: Vec<String> = before.iter().map(|i| i.id.clone()).collect();

        let image = GalleryImage::new(title, description, media_ref, before.len() as i64);
        self.repo.insert(&image).await?;

        let current = self.resequence().await?;
        info!(id = %image.id, count = current.len(), "Inserted gallery image");

        let stored = current
            .iter()
            .find(|i| i.id == image.id)
            .cloned()
            .unwrap_or(image);

        Ok((stored, OrderChange { previous, current }))
    }

    /// Apply a partial update to an image's metadata or media.
    ///
    /// Display order is untouched. When the patch replaces the media, the old
    /// payload is deleted best-effort after the record update has committed.
    pub async fn update(&self, id: &str, patch: ImagePatch) -> Result<GalleryImage> {
        let _guard = self.write_lock.lock().await;

        let mut image = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| GalleryError::NotFound { id: id.to_string() })?;

        let replaced_media = match &patch.media_ref {
            Some(new_ref) if *new_ref != image.media_ref => {
                Some(std::mem::replace(&mut image.media_ref, new_ref.clone()))
            }
            _ => None,
        };
        if let Some(title) = patch.title {
            image.title = title;
        }
        if let Some(description) = patch.description {
            image.description = Some(description);
        }
        image.updated_at = chrono::Utc::now().timestamp();

        self.repo.update(&image).await?;

        if let Some(old_ref) = replaced_media {
            self.delete_media_best_effort(&old_ref).await;
        }

        info!(id = %image.id, "Updated gallery image");
        Ok(image)
    }

    /// Remove an image and close the gap it leaves in the display order.
    ///
    /// The record delete commits first; the blob delete that follows is
    /// best-effort and never escalated, since the record-level change has
    /// already taken effect. Survivors are then resequenced. A failure during
    /// resequencing leaves a transient gap that the next successful mutation
    /// heals.
    pub async fn remove(&self, id: &str) -> Result<OrderChange> {
        let _guard = self.write_lock.lock().await;

        let before = self.repo.list_ordered().await?;
        let removed = before
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| GalleryError::NotFound { id: id.to_string() })?;
        let previous: Vec<String> = before.iter().map(|i| i.id.clone()).collect();

        if !self.repo.delete(id).await? {
            return Err(GalleryError::NotFound { id: id.to_string() });
        }

        self.delete_media_best_effort(&removed.media_ref).await;

        let current = self.resequence().await?;
        info!(id = %id, count = current.len(), "Removed gallery image");

        Ok(OrderChange { previous, current })
    }

    /// Move an image to `target_position`, shifting the items between its old
    /// and new position by one slot (list-splice semantics).
    ///
    /// # Errors
    /// - `NotFound` if `id` is not in the collection
    /// - `InvalidPosition` if `target_position >= len`
    pub async fn reorder(&self, id: &str, target_position: usize) -> Result<OrderChange> {
        let _guard = self.write_lock.lock().await;

        // Heal first so the splice below starts from a dense list; from a
        // dense list its writes never collide.
        let items = self.resequence().await?;
        let previous: Vec<String> = items.iter().map(|i| i.id.clone()).collect();

        let old_position = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| GalleryError::NotFound { id: id.to_string() })?;

        if target_position >= items.len() {
            return Err(GalleryError::InvalidPosition {
                position: target_position,
                len: items.len(),
            });
        }

        let current = if target_position == old_position {
            items
        } else {
            self.write_spliced_sequences(items, old_position, target_position)
                .await?
        };

        info!(
            id = %id,
            from = old_position,
            to = target_position,
            "Reordered gallery image"
        );

        Ok(OrderChange { previous, current })
    }

    /// Corrective pass: re-read the live list in display order and rewrite
    /// sequences to `0..n`.
    async fn resequence(&self) -> Result<Vec<GalleryImage>> {
        let items = self.repo.list_ordered().await?;
        self.write_dense_sequences(items).await
    }

    /// Rewrite sequences for a single-item move over an already-dense list.
    ///
    /// The moved record is parked at the out-of-range value `len` first, the
    /// displaced survivors are then rewritten walking toward the vacated slot,
    /// and the moved record lands at its target last. Every write targets a
    /// value no other record holds, so an interrupted move leaves gaps only.
    async fn write_spliced_sequences(
        &self,
        mut items: Vec<GalleryImage>,
        origin: usize,
        target: usize,
    ) -> Result<Vec<GalleryImage>> {
        let moved = items.remove(origin);
        items.insert(target, moved);

        self.repo
            .update_sequence(&items[target].id, items.len() as i64)
            .await?;

        if target < origin {
            // Displaced survivors shift toward the back; rewrite back-to-front
            // so each lands in the slot the previous write just vacated.
            for position in (target + 1..=origin).rev() {
                self.repo
                    .update_sequence(&items[position].id, position as i64)
                    .await?;
                items[position].sequence = position as i64;
            }
        } else {
            for position in origin..target {
                self.repo
                    .update_sequence(&items[position].id, position as i64)
                    .await?;
                items[position].sequence = position as i64;
            }
        }

        self.repo
            .update_sequence(&items[target].id, target as i64)
            .await?;
        items[target].sequence = target as i64;

        Ok(items)
    }

    /// Rewrite `sequence` to match the positions of `items`, patching only
    /// records whose stored value differs. A no-op on an already-dense list.
    ///
    /// Safe from any gaps-only state: stored values read back in display order
    /// are strictly increasing and at least their index, so each ascending
    /// write lands at or below the record's own stored value and never on
    /// another record's.
    async fn write_dense_sequences(
        &self,
        mut items: Vec<GalleryImage>,
    ) -> Result<Vec<GalleryImage>> {
        let mut rewritten = 0usize;
        for (position, item) in items.iter_mut().enumerate() {
            let position = position as i64;
            if item.sequence != position {
                self.repo.update_sequence(&item.id, position).await?;
                item.sequence = position;
                rewritten += 1;
            }
        }

        if rewritten > 0 {
            debug!(rewritten, total = items.len(), "Resequenced gallery order");
        }

        Ok(items)
    }

    async fn delete_media_best_effort(&self, media_ref: &str) {
        if let Err(e) = self.media.delete(media_ref).await {
            warn!(media_ref = %media_ref, error = %e, "Failed to delete media payload");
        }
    }
}
