//! Image Adjuster - library crate.
//!
//! Brightness / contrast / grayscale adjustment of RGBA images and the
//! session that keeps the rendered result in sync with the sliders.

pub mod adjust;
pub mod error;
pub mod image_io;
pub mod session;

pub use error::AdjustError;
