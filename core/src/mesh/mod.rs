//! In-memory mesh host and generators.
//!
//! - [`MemoryMesh`] - A self-contained [`MeshHost`](crate::host::MeshHost)
//!   holding connectivity and named layers
//! - Generators for test and demo meshes (grid)

pub mod generators;
mod memory;

pub use memory::MemoryMesh;
