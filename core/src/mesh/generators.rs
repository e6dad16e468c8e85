//! Mesh generators for test and demo meshes.

use super::MemoryMesh;
use crate::error::ExchangeResult;

/// Generate a flat grid of `columns` x `rows` quads.
///
/// Vertices are laid out row by row, `(columns + 1) * (rows + 1)` in total.
/// Every quad contributes four loops in counter-clockwise order, so interior
/// vertices are shared by four loops, edge vertices by two and corners by one.
/// The mesh carries no layers.
pub fn generate_grid(columns: usize, rows: usize) -> ExchangeResult<MemoryMesh> {
    let stride = columns + 1;
    let mut mesh =
        MemoryMesh::new(stride * (rows + 1)).with_label(format!("grid_{columns}x{rows}"));

    for row in 0..rows {
        for column in 0..columns {
            let current = row * stride + column;
            let next = current + stride;
            mesh.add_face(&[current, current + 1, next + 1, next])?;
        }
    }
    Ok(mesh)
}
