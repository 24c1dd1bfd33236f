//! Domain models for the carousel gallery

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One carousel image plus its position in the display/rotation order.
///
/// `sequence` is owned exclusively by the sequence store: after every
/// committed mutation the live values form the dense range `0..n`. Nothing
/// else may write the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GalleryImage {
    /// Unique identifier (UUID string, assigned at creation)
    pub id: String,
    /// Display title
    pub title: String,
    /// Optional caption shown under the title
    pub description: Option<String>,
    /// Opaque reference into the media store
    pub media_ref: String,
    /// Zero-based position in the display order
    pub sequence: i64,
    /// When first added (unix seconds); stable tie-break for ambiguous sequences
    pub created_at: i64,
    /// Last update time (unix seconds)
    pub updated_at: i64,
}

impl GalleryImage {
    /// Create a new image at the given position.
    pub fn new(
        title: String,
        description: Option<String>,
        media_ref: String,
        sequence: i64,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            media_ref,
            sequence,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate image data
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Image title cannot be empty".to_string());
        }

        if self.media_ref.is_empty() {
            return Err("Image media reference cannot be empty".to_string());
        }

        if self.sequence < 0 {
            return Err("Image sequence cannot be negative".to_string());
        }

        Ok(())
    }
}

/// Partial update for an existing image; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagePatch {
    /// Replacement title
    pub title: Option<String>,
    /// Replacement description
    pub description: Option<String>,
    /// Replacement media reference (new payload already stored)
    pub media_ref: Option<String>,
}

impl ImagePatch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.media_ref.is_none()
    }
}
