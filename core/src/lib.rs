//! # Weight/Color Exchange Core
//!
//! Converts between per-vertex weight layers and per-loop color layers of a
//! mesh, and rescales weight layers.
//!
//! The host mesh is reached through the narrow traits in [`host`]; the
//! in-memory [`MemoryMesh`](mesh::MemoryMesh) implements them for tests and
//! tools. Operations are plain functions in [`transform`], dispatched by
//! [`ExchangeCommand`] and made undoable by [`edit::EditHistory`].
//!
//! ```ignore
//! use wcex_core::{ChannelMask, WeightToColorParams, copy_weight_to_color};
//!
//! let params = WeightToColorParams::new("Group", "Col")
//!     .with_mask(ChannelMask::R)
//!     .with_clean_others(false);
//! copy_weight_to_color(&mut mesh, &params)?;
//! ```

pub mod channel;
pub mod command;
pub mod edit;
pub mod error;
pub mod host;
pub mod mesh;
pub mod profiling;
pub mod reader;
pub mod transform;

pub use channel::{Channel, ChannelMask, Color};
pub use command::ExchangeCommand;
pub use error::{ExchangeError, ExchangeResult, ParseChannelError};
pub use host::{
    ColorLayers, ElementKind, LayerKind, LoopIndex, MeshHost, MeshLoop, MeshTopology, VertexIndex,
    WeightLayers,
};
pub use reader::{LayerValues, RepresentativeColor, read_colors, read_weights};
pub use transform::{
    AutoLevelParams, ChannelCopyParams, ColorToWeightParams, ExchangeReport, LevelFormula,
    WeightCopyParams, WeightToColorParams, auto_level_weight, copy_color_channel,
    copy_color_to_weight, copy_weight_to_color, copy_weight_to_weight,
};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
