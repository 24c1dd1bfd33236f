//! # Rotation Module
//!
//! Governs which gallery item is "current" and how that pointer survives
//! mutations of the underlying collection.
//!
//! ## Overview
//!
//! - [`RotationController`] - the Playing/Paused state machine and the
//!   index-remapping rules applied after every committed order change
//! - [`RotationTicker`] - the single background timer driving `tick`, with
//!   strict cancel-before-restart discipline
//! - [`RotationConfig`] - interval configuration

pub mod config;
pub mod controller;
pub mod error;
pub mod ticker;

pub use config::RotationConfig;
pub use controller::{PlayState, RotationController};
pub use error::{Result, RotationError};
pub use ticker::RotationTicker;
