//! Image repository trait and SQLite implementation

use crate::error::{GalleryError, Result};
use crate::models::GalleryImage;
use async_trait::async_trait;
use sqlx::{query, query_as, SqlitePool};

/// Image repository interface for data access operations.
///
/// Every method is a single-record read or write; the sequence store layers
/// the multi-record consistency rules on top.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Find an image by its ID
    ///
    /// # Returns
    /// - `Ok(Some(image))` if found
    /// - `Ok(None)` if not found
    /// - `Err` if a database error occurs
    async fn find_by_id(&self, id: &str) -> Result<Option<GalleryImage>>;

    /// Insert a new image record
    ///
    /// # Errors
    /// Returns an error if an image with the same ID already exists,
    /// validation fails, or a database error occurs.
    async fn insert(&self, image: &GalleryImage) -> Result<()>;

    /// Update an existing image record in full
    ///
    /// # Errors
    /// Returns `NotFound` if the image does not exist.
    async fn update(&self, image: &GalleryImage) -> Result<()>;

    /// Rewrite only the sequence field of one record.
    ///
    /// This is the primitive the resequencing pass is built on; each call is
    /// an independent atomic write.
    async fn update_sequence(&self, id: &str, sequence: i64) -> Result<()>;

    /// Delete an image by ID
    ///
    /// # Returns
    /// - `Ok(true)` if the image was deleted
    /// - `Ok(false)` if the image was not found
    async fn delete(&self, id: &str) -> Result<bool>;

    /// List all images in display order.
    ///
    /// Ordering is `sequence ASC` with `created_at ASC, id ASC` as the stable
    /// tie-break. Equal sequences only exist after a partial resequencing
    /// failure; the tie-break keeps reads deterministic until the next
    /// mutation heals them. Storage scan order is never relied on.
    async fn list_ordered(&self) -> Result<Vec<GalleryImage>>;

    /// Count live images
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of [`ImageRepository`]
pub struct SqliteImageRepository {
    pool: SqlitePool,
}

impl SqliteImageRepository {
    /// Create a new SqliteImageRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for SqliteImageRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<GalleryImage>> {
        let image = query_as::<_, GalleryImage>("SELECT * FROM images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(image)
    }

    async fn insert(&self, image: &GalleryImage) -> Result<()> {
        image.validate().map_err(|e| GalleryError::InvalidInput {
            field: "GalleryImage".to_string(),
            message: e,
        })?;

        query(
            r#"
            INSERT INTO images (
                id, title, description, media_ref, sequence, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&image.id)
        .bind(&image.title)
        .bind(&image.description)
        .bind(&image.media_ref)
        .bind(image.sequence)
        .bind(image.created_at)
        .bind(image.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, image: &GalleryImage) -> Result<()> {
        image.validate().map_err(|e| GalleryError::InvalidInput {
            field: "GalleryImage".to_string(),
            message: e,
        })?;

        let result = query(
            r#"
            UPDATE images
            SET title = ?, description = ?, media_ref = ?, sequence = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&image.title)
        .bind(&image.description)
        .bind(&image.media_ref)
        .bind(image.sequence)
        .bind(image.updated_at)
        .bind(&image.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound {
                id: image.id.clone(),
            });
        }

        Ok(())
    }

    async fn update_sequence(&self, id: &str, sequence: i64) -> Result<()> {
        let result = query("UPDATE images SET sequence = ? WHERE id = ?")
            .bind(sequence)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound { id: id.to_string() });
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_ordered(&self) -> Result<Vec<GalleryImage>> {
        let images = query_as::<_, GalleryImage>(
            "SELECT * FROM images ORDER BY sequence ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = query_as("SELECT COUNT(*) as count FROM images")
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        Ok(count)
    }
}
