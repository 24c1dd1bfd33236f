use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Gallery error: {0}")]
    Gallery(#[from] core_gallery::GalleryError),

    #[error("Media error: {0}")]
    Media(#[from] core_media::MediaError),

    #[error("Rotation error: {0}")]
    Rotation(#[from] core_rotation::RotationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
