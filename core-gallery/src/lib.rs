//! # Gallery Management Module
//!
//! Owns the canonical carousel gallery database and the sequence-consistency
//! rules that keep display order dense while items are inserted, removed, and
//! dragged around.
//!
//! ## Overview
//!
//! This module manages:
//! - SQLite schema and migrations for gallery images
//! - Repository pattern for image persistence (per-record atomic writes only)
//! - [`SequenceStore`] - the single owner of the `sequence` field, with
//!   self-healing resequencing after every mutation
//! - [`ReorderGesture`] - the uncommitted, client-side half of a drag-reorder

pub mod db;
pub mod error;
pub mod gesture;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::{GalleryError, Result};
pub use gesture::ReorderGesture;
pub use models::{GalleryImage, ImagePatch};
pub use store::{OrderChange, SequenceStore};
