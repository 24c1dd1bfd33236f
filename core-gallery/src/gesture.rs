//! # Reorder Gesture
//!
//! The uncommitted half of a drag-reorder. While the user drags, positions
//! are tracked purely in memory to drive live preview; nothing reaches the
//! store until release. Releasing over the origin commits nothing, and
//! cancellation simply drops the gesture with zero store interaction.
//!
//! One gesture is in flight at a time; the UI layer enforces that.

use crate::error::{GalleryError, Result};
use crate::models::GalleryImage;

/// An in-flight drag of one image over the ordered collection.
#[derive(Debug, Clone)]
pub struct ReorderGesture {
    /// Committed order at gesture start (IDs only)
    order: Vec<String>,
    image_id: String,
    origin: usize,
    candidate: usize,
}

impl ReorderGesture {
    /// Pick up the image with `id` from the given committed ordering.
    ///
    /// # Errors
    /// Returns `NotFound` if `id` is not part of the ordering.
    pub fn begin(order: &[GalleryImage], id: &str) -> Result<Self> {
        let origin = order
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| GalleryError::NotFound { id: id.to_string() })?;

        Ok(Self {
            order: order.iter().map(|i| i.id.clone()).collect(),
            image_id: id.to_string(),
            origin,
            candidate: origin,
        })
    }

    /// ID of the image being dragged.
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    /// Position the image was picked up from.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Position the image currently hovers over.
    pub fn candidate(&self) -> usize {
        self.candidate
    }

    /// Track the drag over a new position.
    ///
    /// # Errors
    /// Returns `InvalidPosition` if `position` is outside the collection.
    pub fn drag_over(&mut self, position: usize) -> Result<()> {
        if position >= self.order.len() {
            return Err(GalleryError::InvalidPosition {
                position,
                len: self.order.len(),
            });
        }
        self.candidate = position;
        Ok(())
    }

    /// Candidate ordering for live preview: the committed order with the
    /// dragged image spliced to its candidate position.
    pub fn preview(&self) -> Vec<String> {
        let mut ids = self.order.clone();
        let moved = ids.remove(self.origin);
        ids.insert(self.candidate, moved);
        ids
    }

    /// Finish the gesture.
    ///
    /// Returns the `(id, target_position)` the caller must commit through the
    /// store, or `None` when the image was released over its origin and no
    /// call should be issued at all.
    pub fn release(self) -> Option<(String, usize)> {
        if self.candidate == self.origin {
            None
        } else {
            Some((self.image_id, self.candidate))
        }
    }

    /// Abort the gesture, discarding the candidate ordering.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> Vec<GalleryImage> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                let mut img = GalleryImage::new(
                    format!("img-{id}"),
                    None,
                    format!("/uploads/{id}.jpg"),
                    i as i64,
                );
                img.id = id.to_string();
                img
            })
            .collect()
    }

    #[test]
    fn test_begin_unknown_id_is_not_found() {
        let result = ReorderGesture::begin(&order(&["a", "b"]), "z");
        assert!(matches!(result, Err(GalleryError::NotFound { .. })));
    }

    #[test]
    fn test_preview_tracks_candidate_without_commit() {
        let committed = order(&["a", "b", "c"]);
        let mut gesture = ReorderGesture::begin(&committed, "c").unwrap();

        assert_eq!(gesture.preview(), ["a", "b", "c"]);

        gesture.drag_over(0).unwrap();
        assert_eq!(gesture.preview(), ["c", "a", "b"]);

        gesture.drag_over(1).unwrap();
        assert_eq!(gesture.preview(), ["a", "c", "b"]);
    }

    #[test]
    fn test_drag_over_out_of_range() {
        let committed = order(&["a", "b"]);
        let mut gesture = ReorderGesture::begin(&committed, "a").unwrap();

        let result = gesture.drag_over(2);
        assert!(matches!(
            result,
            Err(GalleryError::InvalidPosition { position: 2, len: 2 })
        ));
        // Candidate unchanged after the rejected move.
        assert_eq!(gesture.candidate(), 0);
    }

    #[test]
    fn test_release_over_origin_commits_nothing() {
        let committed = order(&["a", "b", "c"]);
        let mut gesture = ReorderGesture::begin(&committed, "b").unwrap();

        gesture.drag_over(2).unwrap();
        gesture.drag_over(1).unwrap();

        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn test_release_yields_single_commit() {
        let committed = order(&["a", "b", "c"]);
        let mut gesture = ReorderGesture::begin(&committed, "a").unwrap();

        gesture.drag_over(2).unwrap();
        assert_eq!(gesture.release(), Some(("a".to_string(), 2)));
    }

    #[test]
    fn test_cancel_discards_candidate() {
        let committed = order(&["a", "b"]);
        let mut gesture = ReorderGesture::begin(&committed, "a").unwrap();
        gesture.drag_over(1).unwrap();
        gesture.cancel();
        // Nothing to assert beyond it consuming the gesture; the committed
        // ordering was never touched.
    }
}
