//! # Media Storage Module
//!
//! Owns binary image payloads for the carousel. The rest of the core never
//! touches the filesystem directly; it stores bytes through [`MediaStore`] and
//! keeps only the opaque reference string alongside each gallery record.
//!
//! ## Overview
//!
//! - [`MediaStore`] - platform-agnostic trait for storing/deleting payloads
//! - [`FsMediaStore`] - native implementation backed by an uploads directory
//! - Upload validation (raster-image allowlist, size cap) happens here, at the
//!   boundary, so stored references are always backed by an accepted payload

pub mod error;
pub mod fs;
pub mod store;

pub use error::{MediaError, Result};
pub use fs::FsMediaStore;
pub use store::MediaStore;
