use crate::channel::{ChannelMask, Color};
use crate::error::{ExchangeError, ExchangeResult};
use crate::host::{LayerKind, MeshHost};
use crate::profile_function;
use crate::reader::{RepresentativeColor, ensure_layer, read_colors};

use super::ExchangeReport;

/// Parameters of [`copy_color_to_weight`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorToWeightParams {
    /// Source color layer.
    pub color_layer: String,
    /// Target weight layer.
    pub weight_layer: String,
    /// Channels averaged into the weight. Must not be empty.
    pub mask: ChannelMask,
    /// How the loops of a vertex collapse into one color.
    pub representative: RepresentativeColor,
}

impl ColorToWeightParams {
    /// Average R, G and B of the last loop of each vertex.
    pub fn new(color_layer: impl Into<String>, weight_layer: impl Into<String>) -> Self {
        Self {
            color_layer: color_layer.into(),
            weight_layer: weight_layer.into(),
            mask: ChannelMask::default(),
            representative: RepresentativeColor::default(),
        }
    }

    /// Set the averaged channels.
    pub fn with_mask(mut self, mask: ChannelMask) -> Self {
        self.mask = mask;
        self
    }

    /// Set the loop collapsing policy.
    pub fn with_representative(mut self, representative: RepresentativeColor) -> Self {
        self.representative = representative;
        self
    }
}

/// Arithmetic mean of the channels selected by `mask`, `None` for an empty
/// mask.
pub fn mean_of_channels(color: Color, mask: ChannelMask) -> Option<f32> {
    let (sum, count) = mask
        .channels()
        .fold((0.0_f32, 0_usize), |(sum, count), channel| {
            (sum + color.channel(channel), count + 1)
        });
    (count > 0).then(|| sum / count as f32)
}

/// Write the mean of the selected channels of each vertex's representative
/// color into the target weight layer.
///
/// Only vertices referenced by at least one loop are written. Existing
/// weights of those vertices are replaced.
pub fn copy_color_to_weight<H: MeshHost>(
    host: &mut H,
    params: &ColorToWeightParams,
) -> ExchangeResult<ExchangeReport> {
    profile_function!();
    log::debug!(
        "color '{}' -> weight '{}' (mask {}, {:?} loop)",
        params.color_layer,
        params.weight_layer,
        params.mask,
        params.representative
    );

    if params.mask.is_empty() {
        return Err(ExchangeError::EmptyMask);
    }
    ensure_layer(host, LayerKind::Weight, &params.weight_layer)?;
    let colors = read_colors(host, &params.color_layer, params.representative)?;

    let updates: Vec<_> = colors
        .iter()
        .filter_map(|(&vertex, &color)| {
            mean_of_channels(color, params.mask).map(|weight| (vertex, weight))
        })
        .collect();

    let written = updates.len();
    for (vertex, weight) in updates {
        host.write_weight(&params.weight_layer, vertex, weight)?;
    }
    Ok(ExchangeReport::new(
        LayerKind::Weight,
        &params.weight_layer,
        written,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MemoryMesh;

    #[test]
    fn mean_in_fixed_order() {
        let color = Color::new(0.2, 0.8, 0.0, 1.0);
        let mean = mean_of_channels(color, ChannelMask::R | ChannelMask::G).unwrap();
        assert!((mean - 0.5).abs() < 1e-6);
        assert_eq!(mean_of_channels(color, ChannelMask::A), Some(1.0));
        assert_eq!(mean_of_channels(color, ChannelMask::empty()), None);
    }

    #[test]
    fn empty_mask_fails_even_without_layers() {
        let mut mesh = MemoryMesh::new(0);
        let params = ColorToWeightParams::new("Col", "Group").with_mask(ChannelMask::empty());
        assert_eq!(
            copy_color_to_weight(&mut mesh, &params),
            Err(ExchangeError::EmptyMask)
        );
    }

    #[test]
    fn replaces_existing_weights() {
        let mut mesh = MemoryMesh::new(2);
        mesh.add_face(&[0, 1]).unwrap();
        mesh.add_weight_layer("Group");
        mesh.add_color_layer("Col", Color::new(0.3, 0.3, 0.3, 1.0));
        mesh.set_weight("Group", 0, 0.9).unwrap();

        let report = copy_color_to_weight(&mut mesh, &ColorToWeightParams::new("Col", "Group"))
            .unwrap();

        assert_eq!(report.written, 2);
        assert!((mesh.weight("Group", 0).unwrap() - 0.3).abs() < 1e-6);
        assert!((mesh.weight("Group", 1).unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn unreferenced_vertices_keep_their_weight() {
        let mut mesh = MemoryMesh::new(3);
        mesh.add_face(&[0, 1]).unwrap();
        mesh.add_weight_layer("Group");
        mesh.add_color_layer("Col", Color::ZERO);
        mesh.set_weight("Group", 2, 0.7).unwrap();

        copy_color_to_weight(&mut mesh, &ColorToWeightParams::new("Col", "Group")).unwrap();

        assert_eq!(mesh.weight("Group", 2), Some(0.7));
        assert_eq!(mesh.weight("Group", 0), Some(0.0));
    }
}
