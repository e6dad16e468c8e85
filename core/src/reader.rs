//! Layer reader: pulls a whole named layer into a vertex-keyed mapping.
//!
//! Weight layers map one-to-one onto vertices. Color layers live on loops,
//! so several colors may land on the same vertex; [`RepresentativeColor`]
//! decides which one (or which blend) survives.

use std::collections::BTreeMap;

use crate::channel::Color;
use crate::error::{ExchangeError, ExchangeResult};
use crate::host::{LayerKind, MeshHost, VertexIndex};

/// Values of one layer keyed by vertex index.
pub type LayerValues<T> = BTreeMap<VertexIndex, T>;

/// How the loops of a vertex collapse into one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepresentativeColor {
    /// The loop visited last wins.
    #[default]
    Last,
    /// The loop visited first wins.
    First,
    /// Per-channel mean over every loop of the vertex.
    Average,
}

/// Fails with [`ExchangeError::LayerNotFound`] unless the layer exists.
pub fn ensure_layer<H: MeshHost>(host: &H, kind: LayerKind, name: &str) -> ExchangeResult {
    if host.has_layer(kind, name) {
        Ok(())
    } else {
        Err(ExchangeError::LayerNotFound {
            kind,
            name: name.to_owned(),
        })
    }
}

/// Read a weight layer, one entry per vertex.
///
/// Vertices without an entry in the layer read as `0.0`.
pub fn read_weights<H: MeshHost>(host: &H, layer: &str) -> ExchangeResult<LayerValues<f32>> {
    ensure_layer(host, LayerKind::Weight, layer)?;

    let mut values = LayerValues::new();
    for vertex in 0..host.vertex_count() {
        let weight = match host.read_weight(layer, vertex)? {
            Some(weight) => weight,
            None => {
                log::trace!("vertex {vertex} has no weight in '{layer}', reading as 0");
                0.0
            }
        };
        values.insert(vertex, weight);
    }
    Ok(values)
}

/// Read a color layer, one entry per vertex referenced by at least one loop.
///
/// Vertices no loop references are absent from the result.
pub fn read_colors<H: MeshHost>(
    host: &H,
    layer: &str,
    policy: RepresentativeColor,
) -> ExchangeResult<LayerValues<Color>> {
    ensure_layer(host, LayerKind::Color, layer)?;

    // (running color or channel sum, loops seen)
    let mut gathered: LayerValues<(Color, usize)> = LayerValues::new();
    for mesh_loop in host.loops() {
        let color = host.read_color(layer, mesh_loop.index)?;
        let entry = gathered.entry(mesh_loop.vertex).or_insert((Color::ZERO, 0));
        entry.0 = match policy {
            RepresentativeColor::Last => color,
            RepresentativeColor::First if entry.1 == 0 => color,
            RepresentativeColor::First => entry.0,
            RepresentativeColor::Average => Color::new(
                entry.0.r + color.r,
                entry.0.g + color.g,
                entry.0.b + color.b,
                entry.0.a + color.a,
            ),
        };
        entry.1 += 1;
    }

    let shared = gathered.values().filter(|(_, count)| *count > 1).count();
    if shared > 0 {
        log::debug!(
            "color layer '{layer}': {shared} vertices shared by several loops, kept {policy:?}"
        );
    }

    Ok(gathered
        .into_iter()
        .map(|(vertex, (color, count))| {
            let color = match policy {
                RepresentativeColor::Average => {
                    let n = count as f32;
                    Color::new(color.r / n, color.g / n, color.b / n, color.a / n)
                }
                _ => color,
            };
            (vertex, color)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MemoryMesh;

    /// Two triangles sharing vertices 1 and 2.
    fn shared_edge_mesh() -> MemoryMesh {
        let mut mesh = MemoryMesh::new(4);
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.add_face(&[2, 1, 3]).unwrap();
        mesh.add_weight_layer("Group");
        mesh.add_color_layer("Col", Color::ZERO);
        mesh
    }

    #[test]
    fn missing_weights_read_as_zero() {
        let mut mesh = shared_edge_mesh();
        mesh.set_weight("Group", 1, 0.75).unwrap();

        let weights = read_weights(&mesh, "Group").unwrap();
        assert_eq!(weights.len(), 4);
        assert_eq!(weights[&0], 0.0);
        assert_eq!(weights[&1], 0.75);
        assert_eq!(weights[&3], 0.0);
    }

    #[test]
    fn unknown_layer_is_reported() {
        let mesh = shared_edge_mesh();
        assert_eq!(
            read_weights(&mesh, "Missing"),
            Err(ExchangeError::LayerNotFound {
                kind: LayerKind::Weight,
                name: "Missing".into()
            })
        );
        assert!(matches!(
            read_colors(&mesh, "Missing", RepresentativeColor::Last),
            Err(ExchangeError::LayerNotFound {
                kind: LayerKind::Color,
                ..
            })
        ));
    }

    #[test]
    fn weight_layer_name_is_not_a_color_layer() {
        let mesh = shared_edge_mesh();
        assert!(read_colors(&mesh, "Group", RepresentativeColor::Last).is_err());
    }

    fn painted_mesh() -> MemoryMesh {
        let mut mesh = shared_edge_mesh();
        // vertex 1 is referenced by loops 1 and 4
        mesh.set_color("Col", 1, Color::new(0.2, 0.0, 0.0, 1.0)).unwrap();
        mesh.set_color("Col", 4, Color::new(0.6, 1.0, 0.0, 1.0)).unwrap();
        mesh
    }

    #[test]
    fn last_loop_wins_by_default() {
        let mesh = painted_mesh();
        let colors = read_colors(&mesh, "Col", RepresentativeColor::default()).unwrap();
        assert_eq!(colors[&1], Color::new(0.6, 1.0, 0.0, 1.0));
    }

    #[test]
    fn first_loop_policy() {
        let mesh = painted_mesh();
        let colors = read_colors(&mesh, "Col", RepresentativeColor::First).unwrap();
        assert_eq!(colors[&1], Color::new(0.2, 0.0, 0.0, 1.0));
    }

    #[test]
    fn average_policy() {
        let mesh = painted_mesh();
        let colors = read_colors(&mesh, "Col", RepresentativeColor::Average).unwrap();
        let c = colors[&1];
        assert!((c.r - 0.4).abs() < 1e-6);
        assert!((c.g - 0.5).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn unreferenced_vertices_are_absent() {
        let mut mesh = MemoryMesh::new(3);
        mesh.add_face(&[0, 1]).unwrap();
        mesh.add_color_layer("Col", Color::WHITE);

        let colors = read_colors(&mesh, "Col", RepresentativeColor::Last).unwrap();
        assert_eq!(colors.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
    }
}
