//! # Repository Pattern Implementation
//!
//! Persistence layer for gallery images. The repository offers per-record
//! atomic writes only - there are no multi-row transactions - which is exactly
//! the contract the sequence store is designed around.
//!
//! ## Architecture
//!
//! - [`ImageRepository`] defines the interface
//! - [`SqliteImageRepository`] implements it with sqlx
//! - All operations return `Result<T>` for error handling

pub mod image;

pub use image::{ImageRepository, SqliteImageRepository};
