// error.rs - Error types
//
// Shatter failures are recoverable: the stage keeps its previous state
// and waits for the next click.

/// Errors reported by a [`crate::shatter::Triangulate`] implementation or
/// detected while validating its output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriangulationError {
    /// Fewer than three points were supplied.
    #[error("need at least 3 points to triangulate, got {0}")]
    TooFewPoints(usize),

    /// A point had a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    /// The index list length is not a multiple of 3.
    #[error("index list of length {len} does not describe whole triangles")]
    MalformedIndices { len: usize },

    /// An index referenced a point that does not exist.
    #[error("index {index} out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors that abort a single shatter attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShatterError {
    #[error("triangulation failed: {0}")]
    Triangulation(#[from] TriangulationError),

    /// No image has been placed on the stage yet.
    #[error("no image to shatter")]
    NoImage,

    /// Raster data does not match the configured image dimensions.
    #[error("image is {actual:?}, expected {expected:?}")]
    ImageSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
