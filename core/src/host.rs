//! Collaborator interfaces onto the host mesh.
//!
//! The transforms never see a concrete mesh type. They borrow a host through
//! three narrow capabilities:
//!
//! - [`MeshTopology`] - vertex count and the loop to vertex mapping
//! - [`WeightLayers`] - named per-vertex scalar layers
//! - [`ColorLayers`] - named per-loop color layers
//!
//! [`MeshHost`] is implemented automatically for anything providing all three.
//! [`MemoryMesh`](crate::mesh::MemoryMesh) is the in-memory implementation.

use std::fmt;

use crate::channel::Color;
use crate::error::ExchangeResult;

/// Index of a vertex, unique per mesh.
pub type VertexIndex = usize;

/// Index of a loop (face corner), unique per mesh.
pub type LoopIndex = usize;

/// A face corner and the vertex it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshLoop {
    pub index: LoopIndex,
    pub vertex: VertexIndex,
}

impl MeshLoop {
    pub fn new(index: LoopIndex, vertex: VertexIndex) -> Self {
        Self { index, vertex }
    }
}

/// The two kinds of named layer a mesh carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Per-vertex scalar.
    Weight,
    /// Per-loop RGBA.
    Color,
}

impl LayerKind {
    /// The element a layer of this kind is indexed by.
    pub fn element(self) -> ElementKind {
        match self {
            Self::Weight => ElementKind::Vertex,
            Self::Color => ElementKind::Loop,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weight => write!(f, "weight"),
            Self::Color => write!(f, "color"),
        }
    }
}

/// Mesh elements that layers are indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Loop,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Loop => write!(f, "loop"),
        }
    }
}

/// Read access to mesh connectivity.
pub trait MeshTopology {
    /// Number of vertices. Vertex indices run from `0` to `vertex_count() - 1`.
    fn vertex_count(&self) -> usize;

    /// Number of loops.
    fn loop_count(&self) -> usize;

    /// Every loop of the mesh in host iteration order.
    ///
    /// Iteration order matters: the color reader's `Last` and `First`
    /// policies pick a representative loop by position in this sequence.
    fn loops(&self) -> impl Iterator<Item = MeshLoop> + '_;
}

/// Named per-vertex weight layers.
pub trait WeightLayers {
    /// Names of all weight layers, in host order.
    fn weight_layer_names(&self) -> Vec<String>;

    /// Whether a weight layer called `name` exists.
    fn has_weight_layer(&self, name: &str) -> bool {
        self.weight_layer_names().iter().any(|n| n == name)
    }

    /// Read the weight of `vertex`. `Ok(None)` means the vertex has no entry.
    fn read_weight(&self, layer: &str, vertex: VertexIndex) -> ExchangeResult<Option<f32>>;

    /// Store `value` for `vertex`, replacing any previous entry.
    fn write_weight(&mut self, layer: &str, vertex: VertexIndex, value: f32) -> ExchangeResult;

    /// Drop the entry of `vertex`. Removing an absent entry is not an error.
    fn remove_weight(&mut self, layer: &str, vertex: VertexIndex) -> ExchangeResult;
}

/// Named per-loop color layers.
pub trait ColorLayers {
    /// Names of all color layers, in host order.
    fn color_layer_names(&self) -> Vec<String>;

    /// Whether a color layer called `name` exists.
    fn has_color_layer(&self, name: &str) -> bool {
        self.color_layer_names().iter().any(|n| n == name)
    }

    /// Read the color stored at `loop_index`.
    fn read_color(&self, layer: &str, loop_index: LoopIndex) -> ExchangeResult<Color>;

    /// Replace the color stored at `loop_index`.
    fn write_color(&mut self, layer: &str, loop_index: LoopIndex, color: Color) -> ExchangeResult;
}

/// Everything a transform needs from the host.
pub trait MeshHost: MeshTopology + WeightLayers + ColorLayers {
    /// Whether a layer of `kind` called `name` exists.
    fn has_layer(&self, kind: LayerKind, name: &str) -> bool {
        match kind {
            LayerKind::Weight => self.has_weight_layer(name),
            LayerKind::Color => self.has_color_layer(name),
        }
    }

    /// Layer names of `kind`, in host order.
    fn layer_names(&self, kind: LayerKind) -> Vec<String> {
        match kind {
            LayerKind::Weight => self.weight_layer_names(),
            LayerKind::Color => self.color_layer_names(),
        }
    }
}

impl<T: MeshTopology + WeightLayers + ColorLayers> MeshHost for T {}
