//! Error types for drawing pad operations.

use thiserror::Error;

/// Result type for drawing pad operations.
pub type PadResult<T> = Result<T, PadError>;

/// Errors that can occur in drawing pad operations.
#[derive(Debug, Error)]
pub enum PadError {
    /// The pad was already generated; generation is one-time only.
    #[error("This drawing pad is already generated")]
    AlreadyGenerated,

    /// A layer handle carries no `data-layer` tag.
    #[error("Layer element has no data-layer attribute")]
    MissingLayerTag,

    /// A layer handle carries a tag that is not a layer index.
    #[error("Invalid data-layer attribute: {0}")]
    InvalidLayerTag(String),

    /// Layer index outside the panel.
    #[error("Layer {index} out of range (layer count {count})")]
    LayerOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of layers in the panel.
        count: usize,
    },

    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// An unknown tool identifier.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An unknown line shape identifier.
    #[error("Unknown line shape: {0}")]
    UnknownShape(String),

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
