//! # Weight/Color Exchange Demos
//!
//! ## Available Demos
//!
//! - `exchange_demo` - Runs one exchange command on a generated grid and
//!   logs the affected layers

use wcex_core::mesh::MemoryMesh;
use wcex_core::mesh::generators::generate_grid;
use wcex_core::{
    Color, ExchangeResult, LayerKind, MeshHost, MeshTopology, read_colors, read_weights,
};

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Weight layer holding a left to right gradient.
pub const GRADIENT_LAYER: &str = "Gradient";
/// Empty weight layer.
pub const EMPTY_LAYER: &str = "Empty";
/// Color layer with a distinct color on every loop.
pub const PAINT_LAYER: &str = "Paint";
/// Color layer filled with opaque white.
pub const WHITE_LAYER: &str = "White";

/// Build a `size` x `size` grid carrying the demo layers.
pub fn demo_mesh(size: usize) -> ExchangeResult<MemoryMesh> {
    let mut mesh = generate_grid(size, size)?;
    mesh.add_weight_layer(GRADIENT_LAYER);
    mesh.add_weight_layer(EMPTY_LAYER);
    mesh.add_color_layer(PAINT_LAYER, Color::ZERO);
    mesh.add_color_layer(WHITE_LAYER, Color::WHITE);

    let stride = size + 1;
    let span = size.max(1) as f32;
    for vertex in 0..mesh.vertex_count() {
        let column = vertex % stride;
        mesh.set_weight(GRADIENT_LAYER, vertex, column as f32 / span)?;
    }

    let loops = mesh.loop_count().max(1) as f32;
    for loop_index in 0..mesh.loop_count() {
        let t = loop_index as f32 / loops;
        mesh.set_color(PAINT_LAYER, loop_index, Color::new(t, 1.0 - t, 0.5, 1.0))?;
    }
    Ok(mesh)
}

/// One line per vertex describing a layer, as vertex-keyed values.
pub fn describe_layer<H: MeshHost>(
    host: &H,
    kind: LayerKind,
    name: &str,
) -> ExchangeResult<Vec<String>> {
    let lines = match kind {
        LayerKind::Weight => read_weights(host, name)?
            .into_iter()
            .map(|(vertex, weight)| format!("v{vertex}: {weight:.4}"))
            .collect(),
        LayerKind::Color => read_colors(host, name, Default::default())?
            .into_iter()
            .map(|(vertex, c)| {
                format!("v{vertex}: ({:.4}, {:.4}, {:.4}, {:.4})", c.r, c.g, c.b, c.a)
            })
            .collect(),
    };
    Ok(lines)
}
