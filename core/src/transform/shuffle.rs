//! Copies within one layer kind: weight to weight, color channel to color
//! channel.

use crate::channel::Channel;
use crate::error::ExchangeResult;
use crate::host::{LayerKind, MeshHost};
use crate::profile_function;
use crate::reader::{ensure_layer, read_weights};

use super::ExchangeReport;

/// Parameters of [`copy_weight_to_weight`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightCopyParams {
    pub source_layer: String,
    pub target_layer: String,
}

impl WeightCopyParams {
    pub fn new(source_layer: impl Into<String>, target_layer: impl Into<String>) -> Self {
        Self {
            source_layer: source_layer.into(),
            target_layer: target_layer.into(),
        }
    }
}

/// Parameters of [`copy_color_channel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCopyParams {
    pub source_layer: String,
    pub source_channel: Channel,
    pub target_layer: String,
    pub target_channel: Channel,
}

impl ChannelCopyParams {
    pub fn new(
        source_layer: impl Into<String>,
        source_channel: Channel,
        target_layer: impl Into<String>,
        target_channel: Channel,
    ) -> Self {
        Self {
            source_layer: source_layer.into(),
            source_channel,
            target_layer: target_layer.into(),
            target_channel,
        }
    }
}

/// Copy every vertex weight of one layer onto another.
///
/// Source vertices without an entry are written as `0.0`.
pub fn copy_weight_to_weight<H: MeshHost>(
    host: &mut H,
    params: &WeightCopyParams,
) -> ExchangeResult<ExchangeReport> {
    profile_function!();
    log::debug!(
        "weight '{}' -> weight '{}'",
        params.source_layer,
        params.target_layer
    );

    ensure_layer(host, LayerKind::Weight, &params.target_layer)?;
    let weights = read_weights(host, &params.source_layer)?;

    for (&vertex, &value) in &weights {
        host.write_weight(&params.target_layer, vertex, value)?;
    }
    Ok(ExchangeReport::new(
        LayerKind::Weight,
        &params.target_layer,
        weights.len(),
    ))
}

/// Copy one channel of a color layer into a channel of another, loop by loop.
///
/// The other three channels of the target are left untouched. Source and
/// target may be the same layer.
pub fn copy_color_channel<H: MeshHost>(
    host: &mut H,
    params: &ChannelCopyParams,
) -> ExchangeResult<ExchangeReport> {
    profile_function!();
    log::debug!(
        "color '{}'.{} -> color '{}'.{}",
        params.source_layer,
        params.source_channel,
        params.target_layer,
        params.target_channel
    );

    ensure_layer(host, LayerKind::Color, &params.source_layer)?;
    ensure_layer(host, LayerKind::Color, &params.target_layer)?;

    let mut updates = Vec::with_capacity(host.loop_count());
    for mesh_loop in host.loops() {
        let value = host
            .read_color(&params.source_layer, mesh_loop.index)?
            .channel(params.source_channel);
        let target = host.read_color(&params.target_layer, mesh_loop.index)?;
        updates.push((
            mesh_loop.index,
            target.with_channel(params.target_channel, value),
        ));
    }

    let written = updates.len();
    for (loop_index, color) in updates {
        host.write_color(&params.target_layer, loop_index, color)?;
    }
    Ok(ExchangeReport::new(
        LayerKind::Color,
        &params.target_layer,
        written,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Color;
    use crate::error::ExchangeError;
    use crate::mesh::MemoryMesh;

    #[test]
    fn weight_copy_fills_missing_with_zero() {
        let mut mesh = MemoryMesh::new(3);
        mesh.add_weight_layer("Source");
        mesh.add_weight_layer("Target");
        mesh.set_weight("Source", 0, 0.4).unwrap();
        mesh.set_weight("Target", 1, 0.9).unwrap();

        let report =
            copy_weight_to_weight(&mut mesh, &WeightCopyParams::new("Source", "Target")).unwrap();

        assert_eq!(report.written, 3);
        assert_eq!(mesh.weight("Target", 0), Some(0.4));
        assert_eq!(mesh.weight("Target", 1), Some(0.0));
        assert_eq!(mesh.weight("Target", 2), Some(0.0));
    }

    #[test]
    fn weight_copy_needs_target() {
        let mut mesh = MemoryMesh::new(1);
        mesh.add_weight_layer("Source");
        assert!(matches!(
            copy_weight_to_weight(&mut mesh, &WeightCopyParams::new("Source", "Target")),
            Err(ExchangeError::LayerNotFound { .. })
        ));
    }

    #[test]
    fn channel_copy_touches_one_channel() {
        let mut mesh = MemoryMesh::new(2);
        mesh.add_face(&[0, 1]).unwrap();
        mesh.add_color_layer("Source", Color::ZERO);
        mesh.add_color_layer("Target", Color::new(0.1, 0.2, 0.3, 0.4));
        mesh.set_color("Source", 0, Color::new(0.9, 0.0, 0.0, 0.0)).unwrap();
        mesh.set_color("Source", 1, Color::new(0.5, 0.0, 0.0, 0.0)).unwrap();

        copy_color_channel(
            &mut mesh,
            &ChannelCopyParams::new("Source", Channel::R, "Target", Channel::A),
        )
        .unwrap();

        assert_eq!(mesh.color("Target", 0), Some(Color::new(0.1, 0.2, 0.3, 0.9)));
        assert_eq!(mesh.color("Target", 1), Some(Color::new(0.1, 0.2, 0.3, 0.5)));
    }

    #[test]
    fn channel_swap_within_layer() {
        let mut mesh = MemoryMesh::new(1);
        mesh.add_face(&[0]).unwrap();
        mesh.add_color_layer("Col", Color::new(0.1, 0.2, 0.3, 0.4));

        copy_color_channel(
            &mut mesh,
            &ChannelCopyParams::new("Col", Channel::B, "Col", Channel::G),
        )
        .unwrap();

        assert_eq!(mesh.color("Col", 0), Some(Color::new(0.1, 0.3, 0.3, 0.4)));
    }
}
