use thiserror::Error;

use crate::adjust::Param;

#[derive(Debug, Error)]
pub enum AdjustError {
    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Failed to decode image: {0}")]
    DecodeFailure(#[source] image::ImageError),

    #[error("Invalid {} value: {value}", .param.name())]
    InvalidParameter { param: Param, value: f32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Platform(String),
}
