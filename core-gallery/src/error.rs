use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Image not found: {id}")]
    NotFound { id: String },

    #[error("Invalid position {position} for collection of {len} items")]
    InvalidPosition { position: usize, len: usize },

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Migration failed: {0}")]
    Migration(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
