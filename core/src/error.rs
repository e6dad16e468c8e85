//! Error types for layer exchange operations.

use thiserror::Error;

use crate::host::{ElementKind, LayerKind};

/// Errors that can occur while reading or writing mesh layers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    /// The named layer does not exist on the mesh.
    #[error("{kind} layer not found: {name}")]
    LayerNotFound {
        /// Kind of layer that was looked up.
        kind: LayerKind,
        /// Name that failed to resolve.
        name: String,
    },
    /// Color to weight was asked to average zero channels.
    #[error("channel mask is empty, no channel to average")]
    EmptyMask,
    /// Auto-level found every weight equal, so the range cannot be scaled.
    #[error("weights span no range (all equal to {value})")]
    DegenerateRange {
        /// The single value shared by all weights.
        value: f32,
    },
    /// The host reported an element index beyond its own element count.
    #[error("{kind} index {index} out of range (count {len})")]
    IndexOutOfRange {
        kind: ElementKind,
        index: usize,
        len: usize,
    },
    /// Undo or redo could not be performed.
    #[error("edit history: {0}")]
    Edit(String),
}

/// Result type for exchange operations.
pub type ExchangeResult<T = ()> = Result<T, ExchangeError>;

/// A channel letter outside of `r`, `g`, `b`, `a`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid channel '{0}', expected one of r, g, b, a")]
pub struct ParseChannelError(pub char);
