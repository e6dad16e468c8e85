use crate::channel::{Channel, ChannelMask, Color};
use crate::error::{ExchangeError, ExchangeResult};
use crate::host::{ElementKind, LayerKind, MeshHost};
use crate::profile_function;
use crate::reader::{ensure_layer, read_weights};

use super::ExchangeReport;

/// Parameters of [`copy_weight_to_color`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightToColorParams {
    /// Source weight layer.
    pub weight_layer: String,
    /// Target color layer.
    pub color_layer: String,
    /// Channels that receive the weight.
    pub mask: ChannelMask,
    /// Zero unselected channels instead of keeping their current values.
    pub clean_others: bool,
}

impl WeightToColorParams {
    /// Copy into R, G and B, zeroing alpha.
    pub fn new(weight_layer: impl Into<String>, color_layer: impl Into<String>) -> Self {
        Self {
            weight_layer: weight_layer.into(),
            color_layer: color_layer.into(),
            mask: ChannelMask::default(),
            clean_others: true,
        }
    }

    /// Set the channels that receive the weight.
    pub fn with_mask(mut self, mask: ChannelMask) -> Self {
        self.mask = mask;
        self
    }

    /// Set whether unselected channels are zeroed.
    pub fn with_clean_others(mut self, clean_others: bool) -> Self {
        self.clean_others = clean_others;
        self
    }
}

/// Build the new color of one loop.
///
/// Selected channels take `weight`. Unselected channels become `0` when
/// `clean_others` is set, otherwise they keep the value from `existing`.
pub fn fill_channels(existing: Color, weight: f32, mask: ChannelMask, clean_others: bool) -> Color {
    let mut color = existing;
    for channel in Channel::ALL {
        let value = if mask.selects(channel) {
            weight
        } else if clean_others {
            0.0
        } else {
            existing.channel(channel)
        };
        color.set_channel(channel, value);
    }
    color
}

/// Write each vertex weight into the selected channels of every loop of that
/// vertex.
///
/// Selected channels end up uniform across the loops of a vertex. Unselected
/// channels are zeroed or keep their per-loop values, see
/// [`WeightToColorParams::clean_others`]. Values are not clamped.
pub fn copy_weight_to_color<H: MeshHost>(
    host: &mut H,
    params: &WeightToColorParams,
) -> ExchangeResult<ExchangeReport> {
    profile_function!();
    log::debug!(
        "weight '{}' -> color '{}' (mask {}, clean others {})",
        params.weight_layer,
        params.color_layer,
        params.mask,
        params.clean_others
    );

    ensure_layer(host, LayerKind::Color, &params.color_layer)?;
    let weights = read_weights(host, &params.weight_layer)?;

    let mut updates = Vec::with_capacity(host.loop_count());
    for mesh_loop in host.loops() {
        let weight = *weights
            .get(&mesh_loop.vertex)
            .ok_or(ExchangeError::IndexOutOfRange {
                kind: ElementKind::Vertex,
                index: mesh_loop.vertex,
                len: weights.len(),
            })?;
        let existing = host.read_color(&params.color_layer, mesh_loop.index)?;
        updates.push((
            mesh_loop.index,
            fill_channels(existing, weight, params.mask, params.clean_others),
        ));
    }

    let written = updates.len();
    for (loop_index, color) in updates {
        host.write_color(&params.color_layer, loop_index, color)?;
    }
    Ok(ExchangeReport::new(
        LayerKind::Color,
        &params.color_layer,
        written,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MemoryMesh;

    #[test]
    fn fill_selected_and_clean() {
        let existing = Color::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(
            fill_channels(existing, 0.9, ChannelMask::R, true),
            Color::new(0.9, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn fill_selected_and_keep() {
        let existing = Color::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(
            fill_channels(existing, 0.9, ChannelMask::G | ChannelMask::A, false),
            Color::new(0.1, 0.9, 0.3, 0.9)
        );
    }

    #[test]
    fn fill_with_empty_mask() {
        let existing = Color::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(fill_channels(existing, 0.9, ChannelMask::empty(), true), Color::ZERO);
        assert_eq!(fill_channels(existing, 0.9, ChannelMask::empty(), false), existing);
    }

    #[test]
    fn params_defaults() {
        let params = WeightToColorParams::new("Group", "Col");
        assert_eq!(params.mask, ChannelMask::RGB);
        assert!(params.clean_others);
    }

    #[test]
    fn missing_color_layer_fails_before_writing() {
        let mut mesh = MemoryMesh::new(3);
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.add_weight_layer("Group");

        let err = copy_weight_to_color(&mut mesh, &WeightToColorParams::new("Group", "Col"))
            .unwrap_err();
        assert_eq!(
            err,
            ExchangeError::LayerNotFound {
                kind: LayerKind::Color,
                name: "Col".into()
            }
        );
    }

    #[test]
    fn weights_broadcast_to_every_loop() {
        let mut mesh = MemoryMesh::new(3);
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.add_face(&[2, 1, 0]).unwrap();
        mesh.add_weight_layer("Group");
        mesh.add_color_layer("Col", Color::WHITE);
        mesh.set_weight("Group", 0, 0.25).unwrap();

        let report = copy_weight_to_color(
            &mut mesh,
            &WeightToColorParams::new("Group", "Col").with_mask(ChannelMask::RGBA),
        )
        .unwrap();

        assert_eq!(report.written, 6);
        assert_eq!(mesh.color("Col", 0), Some(Color::splat(0.25)));
        assert_eq!(mesh.color("Col", 5), Some(Color::splat(0.25)));
        assert_eq!(mesh.color("Col", 1), Some(Color::ZERO));
    }
}
