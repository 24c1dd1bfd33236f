use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("Index {index} out of range for collection of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RotationError>;
