//! Error types for the annotation core.
//!
//! None of these are fatal: every failure leaves the in-memory store and
//! selection consistent, and only costs the durability or export guarantee of
//! the one operation that failed.

use thiserror::Error;

/// A snapshot or hydration payload could not be decoded into a region mapping.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Payload is not a valid region mapping: {0}")]
    Shape(#[from] serde_json::Error),
}

/// The durable key-value backend could not be read or written.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("Failed to encode snapshot for storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An export of the annotation snapshot failed.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write snapshot file: {0}")]
    Write(#[from] std::io::Error),
}

/// The map could not be rasterized or the image could not be written.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Map has no regions to capture")]
    EmptyScene,

    #[error("Capture area is too small ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image file: {0}")]
    Write(#[from] std::io::Error),
}

/// The region atlas could not be read.
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Failed to read atlas file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Atlas is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Atlas has no feature list")]
    MissingFeatures,
}
