use std::collections::BTreeMap;
use std::ops::Range;

use crate::channel::Color;
use crate::error::{ExchangeError, ExchangeResult};
use crate::host::{
    ColorLayers, ElementKind, LayerKind, LoopIndex, MeshLoop, MeshTopology, VertexIndex,
    WeightLayers,
};

#[derive(Debug, Clone)]
struct WeightLayer {
    name: String,
    values: BTreeMap<VertexIndex, f32>,
}

#[derive(Debug, Clone)]
struct ColorLayer {
    name: String,
    fill: Color,
    colors: Vec<Color>,
}

/// In-memory mesh with named weight and color layers.
///
/// Weight layers are sparse: a vertex only has an entry once something was
/// written for it. Color layers are dense: every loop has a color, starting
/// at the layer's fill color.
///
/// # Example
///
/// ```ignore
/// let mut mesh = MemoryMesh::new(4);
/// mesh.add_face(&[0, 1, 2, 3])?;
/// mesh.add_weight_layer("Group");
/// mesh.add_color_layer("Col", Color::WHITE);
/// mesh.set_weight("Group", 2, 0.5)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryMesh {
    vertex_count: usize,
    loop_vertices: Vec<VertexIndex>,
    weight_layers: Vec<WeightLayer>,
    color_layers: Vec<ColorLayer>,
    label: Option<String>,
}

impl MemoryMesh {
    /// Create a mesh with `vertex_count` vertices, no faces and no layers.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            ..Self::default()
        }
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Append a face, one loop per entry of `vertices`.
    ///
    /// Returns the range of the new loop indices. Existing color layers get
    /// their fill color on the new loops.
    pub fn add_face(&mut self, vertices: &[VertexIndex]) -> ExchangeResult<Range<LoopIndex>> {
        if let Some(&index) = vertices.iter().find(|&&v| v >= self.vertex_count) {
            return Err(ExchangeError::IndexOutOfRange {
                kind: ElementKind::Vertex,
                index,
                len: self.vertex_count,
            });
        }

        let start = self.loop_vertices.len();
        self.loop_vertices.extend_from_slice(vertices);
        let end = self.loop_vertices.len();
        for layer in &mut self.color_layers {
            layer.colors.resize(end, layer.fill);
        }
        Ok(start..end)
    }

    /// Add an empty weight layer. Does nothing if it already exists.
    pub fn add_weight_layer(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.weight_layers.iter().any(|l| l.name == name) {
            self.weight_layers.push(WeightLayer {
                name,
                values: BTreeMap::new(),
            });
        }
    }

    /// Add a color layer with every loop set to `fill`. Does nothing if it
    /// already exists.
    pub fn add_color_layer(&mut self, name: impl Into<String>, fill: Color) {
        let name = name.into();
        if !self.color_layers.iter().any(|l| l.name == name) {
            self.color_layers.push(ColorLayer {
                name,
                fill,
                colors: vec![fill; self.loop_vertices.len()],
            });
        }
    }

    /// Weight of `vertex`, or `None` if the layer or the entry is missing.
    pub fn weight(&self, layer: &str, vertex: VertexIndex) -> Option<f32> {
        self.weight_layers
            .iter()
            .find(|l| l.name == layer)
            .and_then(|l| l.values.get(&vertex).copied())
    }

    /// Color of `loop_index`, or `None` if the layer or the loop is missing.
    pub fn color(&self, layer: &str, loop_index: LoopIndex) -> Option<Color> {
        self.color_layers
            .iter()
            .find(|l| l.name == layer)
            .and_then(|l| l.colors.get(loop_index).copied())
    }

    /// Shorthand for [`WeightLayers::write_weight`].
    pub fn set_weight(&mut self, layer: &str, vertex: VertexIndex, value: f32) -> ExchangeResult {
        self.write_weight(layer, vertex, value)
    }

    /// Shorthand for [`ColorLayers::write_color`].
    pub fn set_color(
        &mut self,
        layer: &str,
        loop_index: LoopIndex,
        color: Color,
    ) -> ExchangeResult {
        self.write_color(layer, loop_index, color)
    }

    /// Colors of a layer in loop order.
    pub fn colors(&self, layer: &str) -> ExchangeResult<&[Color]> {
        Ok(&self.color_layer(layer)?.colors)
    }

    /// Raw bytes of a color layer, four `f32` per loop, ready for upload as
    /// a per-corner vertex attribute.
    pub fn color_layer_bytes(&self, layer: &str) -> ExchangeResult<&[u8]> {
        Ok(bytemuck::cast_slice(self.colors(layer)?))
    }

    fn weight_layer(&self, name: &str) -> ExchangeResult<&WeightLayer> {
        self.weight_layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| layer_not_found(LayerKind::Weight, name))
    }

    fn weight_layer_mut(&mut self, name: &str) -> ExchangeResult<&mut WeightLayer> {
        self.weight_layers
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| layer_not_found(LayerKind::Weight, name))
    }

    fn color_layer(&self, name: &str) -> ExchangeResult<&ColorLayer> {
        self.color_layers
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| layer_not_found(LayerKind::Color, name))
    }

    fn color_layer_mut(&mut self, name: &str) -> ExchangeResult<&mut ColorLayer> {
        self.color_layers
            .iter_mut()
            .find(|l| l.name == name)
            .ok_or_else(|| layer_not_found(LayerKind::Color, name))
    }

    fn check_vertex(&self, vertex: VertexIndex) -> ExchangeResult {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(ExchangeError::IndexOutOfRange {
                kind: ElementKind::Vertex,
                index: vertex,
                len: self.vertex_count,
            })
        }
    }
}

fn layer_not_found(kind: LayerKind, name: &str) -> ExchangeError {
    ExchangeError::LayerNotFound {
        kind,
        name: name.to_owned(),
    }
}

fn loop_out_of_range(index: LoopIndex, len: usize) -> ExchangeError {
    ExchangeError::IndexOutOfRange {
        kind: ElementKind::Loop,
        index,
        len,
    }
}

impl MeshTopology for MemoryMesh {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn loop_count(&self) -> usize {
        self.loop_vertices.len()
    }

    fn loops(&self) -> impl Iterator<Item = MeshLoop> + '_ {
        self.loop_vertices
            .iter()
            .enumerate()
            .map(|(index, &vertex)| MeshLoop::new(index, vertex))
    }
}

impl WeightLayers for MemoryMesh {
    fn weight_layer_names(&self) -> Vec<String> {
        self.weight_layers.iter().map(|l| l.name.clone()).collect()
    }

    fn read_weight(&self, layer: &str, vertex: VertexIndex) -> ExchangeResult<Option<f32>> {
        self.check_vertex(vertex)?;
        Ok(self.weight_layer(layer)?.values.get(&vertex).copied())
    }

    fn write_weight(&mut self, layer: &str, vertex: VertexIndex, value: f32) -> ExchangeResult {
        self.check_vertex(vertex)?;
        self.weight_layer_mut(layer)?.values.insert(vertex, value);
        Ok(())
    }

    fn remove_weight(&mut self, layer: &str, vertex: VertexIndex) -> ExchangeResult {
        self.check_vertex(vertex)?;
        self.weight_layer_mut(layer)?.values.remove(&vertex);
        Ok(())
    }
}

impl ColorLayers for MemoryMesh {
    fn color_layer_names(&self) -> Vec<String> {
        self.color_layers.iter().map(|l| l.name.clone()).collect()
    }

    fn read_color(&self, layer: &str, loop_index: LoopIndex) -> ExchangeResult<Color> {
        let colors = &self.color_layer(layer)?.colors;
        colors
            .get(loop_index)
            .copied()
            .ok_or_else(|| loop_out_of_range(loop_index, colors.len()))
    }

    fn write_color(&mut self, layer: &str, loop_index: LoopIndex, color: Color) -> ExchangeResult {
        let colors = &mut self.color_layer_mut(layer)?.colors;
        let len = colors.len();
        let slot = colors
            .get_mut(loop_index)
            .ok_or_else(|| loop_out_of_range(loop_index, len))?;
        *slot = color;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MeshHost;

    fn quad() -> MemoryMesh {
        let mut mesh = MemoryMesh::new(4).with_label("quad");
        mesh.add_face(&[0, 1, 2, 3]).unwrap();
        mesh
    }

    #[test]
    fn add_face_returns_loop_range() {
        let mut mesh = quad();
        assert_eq!(mesh.add_face(&[3, 2, 1]).unwrap(), 4..7);
        assert_eq!(mesh.loop_count(), 7);
        assert_eq!(mesh.loops().nth(5), Some(MeshLoop::new(5, 2)));
        assert_eq!(mesh.label(), Some("quad"));
    }

    #[test]
    fn add_face_rejects_unknown_vertex() {
        let mut mesh = quad();
        assert_eq!(
            mesh.add_face(&[0, 4]),
            Err(ExchangeError::IndexOutOfRange {
                kind: ElementKind::Vertex,
                index: 4,
                len: 4
            })
        );
        assert_eq!(mesh.loop_count(), 4);
    }

    #[test]
    fn color_layers_grow_with_faces() {
        let mut mesh = quad();
        mesh.add_color_layer("Col", Color::WHITE);
        mesh.add_face(&[0, 1, 2]).unwrap();
        assert_eq!(mesh.colors("Col").unwrap().len(), 7);
        assert_eq!(mesh.color("Col", 6), Some(Color::WHITE));
    }

    #[test]
    fn layers_keep_insertion_order() {
        let mut mesh = quad();
        mesh.add_weight_layer("B");
        mesh.add_weight_layer("A");
        mesh.add_weight_layer("B");
        mesh.add_color_layer("Col", Color::ZERO);
        assert_eq!(mesh.weight_layer_names(), vec!["B", "A"]);
        assert_eq!(mesh.layer_names(LayerKind::Color), vec!["Col"]);
        assert!(mesh.has_layer(LayerKind::Weight, "A"));
        assert!(!mesh.has_layer(LayerKind::Color, "A"));
    }

    #[test]
    fn weights_are_sparse_and_replaced() {
        let mut mesh = quad();
        mesh.add_weight_layer("Group");
        assert_eq!(mesh.read_weight("Group", 1).unwrap(), None);
        mesh.set_weight("Group", 1, 0.25).unwrap();
        mesh.set_weight("Group", 1, 0.5).unwrap();
        assert_eq!(mesh.weight("Group", 1), Some(0.5));
        mesh.remove_weight("Group", 1).unwrap();
        assert_eq!(mesh.weight("Group", 1), None);
        assert!(mesh.remove_weight("Group", 1).is_ok());
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut mesh = quad();
        mesh.add_weight_layer("Group");
        mesh.add_color_layer("Col", Color::ZERO);
        assert!(mesh.set_weight("Group", 9, 1.0).is_err());
        assert_eq!(
            mesh.read_color("Col", 4),
            Err(ExchangeError::IndexOutOfRange {
                kind: ElementKind::Loop,
                index: 4,
                len: 4
            })
        );
        assert!(mesh.set_color("Col", 4, Color::WHITE).is_err());
    }

    #[test]
    fn color_bytes_cover_every_loop() {
        let mut mesh = quad();
        mesh.add_color_layer("Col", Color::WHITE);
        assert_eq!(mesh.color_layer_bytes("Col").unwrap().len(), 4 * 16);
        assert!(mesh.color_layer_bytes("Missing").is_err());
    }
}
