//! Command dispatch over the transforms.
//!
//! [`ExchangeCommand`] is resolved once at the call boundary. Each variant
//! carries exactly the parameters its transform needs, so there is no
//! shared mode state to keep in sync.

use crate::error::{ExchangeError, ExchangeResult};
use crate::host::{LayerKind, MeshHost};
use crate::transform::{
    AutoLevelParams, ChannelCopyParams, ColorToWeightParams, ExchangeReport, WeightCopyParams,
    WeightToColorParams, auto_level_weight, copy_color_channel, copy_color_to_weight,
    copy_weight_to_color, copy_weight_to_weight,
};

/// One layer exchange operation with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeCommand {
    /// Vertex weights into loop color channels.
    WeightToColor(WeightToColorParams),
    /// Averaged loop color channels into vertex weights.
    ColorToWeight(ColorToWeightParams),
    /// Min-max rescale of a weight layer.
    AutoLevel(AutoLevelParams),
    /// Weight layer onto weight layer.
    CopyWeight(WeightCopyParams),
    /// Color channel onto color channel.
    CopyChannel(ChannelCopyParams),
}

impl ExchangeCommand {
    /// Checks that need no layer data, in the order the transform runs them.
    pub fn validate(&self) -> ExchangeResult {
        match self {
            Self::ColorToWeight(params) if params.mask.is_empty() => {
                Err(ExchangeError::EmptyMask)
            }
            _ => Ok(()),
        }
    }

    /// Run the command against `host`.
    pub fn execute<H: MeshHost>(&self, host: &mut H) -> ExchangeResult<ExchangeReport> {
        match self {
            Self::WeightToColor(params) => copy_weight_to_color(host, params),
            Self::ColorToWeight(params) => copy_color_to_weight(host, params),
            Self::AutoLevel(params) => auto_level_weight(host, params),
            Self::CopyWeight(params) => copy_weight_to_weight(host, params),
            Self::CopyChannel(params) => copy_color_channel(host, params),
        }
    }

    /// The layer this command writes.
    pub fn target(&self) -> (LayerKind, &str) {
        match self {
            Self::WeightToColor(params) => (LayerKind::Color, params.color_layer.as_str()),
            Self::ColorToWeight(params) => (LayerKind::Weight, params.weight_layer.as_str()),
            Self::AutoLevel(params) => (LayerKind::Weight, params.weight_layer.as_str()),
            Self::CopyWeight(params) => (LayerKind::Weight, params.target_layer.as_str()),
            Self::CopyChannel(params) => (LayerKind::Color, params.target_layer.as_str()),
        }
    }

    /// Short label for menus and the undo history.
    pub fn description(&self) -> &'static str {
        match self {
            Self::WeightToColor(_) => "Copy weight to color",
            Self::ColorToWeight(_) => "Copy color to weight",
            Self::AutoLevel(_) => "Auto level",
            Self::CopyWeight(_) => "Weight shuffle",
            Self::CopyChannel(_) => "Color shuffle",
        }
    }
}

impl From<WeightToColorParams> for ExchangeCommand {
    fn from(params: WeightToColorParams) -> Self {
        Self::WeightToColor(params)
    }
}

impl From<ColorToWeightParams> for ExchangeCommand {
    fn from(params: ColorToWeightParams) -> Self {
        Self::ColorToWeight(params)
    }
}

impl From<AutoLevelParams> for ExchangeCommand {
    fn from(params: AutoLevelParams) -> Self {
        Self::AutoLevel(params)
    }
}

impl From<WeightCopyParams> for ExchangeCommand {
    fn from(params: WeightCopyParams) -> Self {
        Self::CopyWeight(params)
    }
}

impl From<ChannelCopyParams> for ExchangeCommand {
    fn from(params: ChannelCopyParams) -> Self {
        Self::CopyChannel(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, ChannelMask, Color};
    use crate::mesh::MemoryMesh;

    #[test]
    fn target_follows_variant() {
        let command: ExchangeCommand = WeightToColorParams::new("Group", "Col").into();
        assert_eq!(command.target(), (LayerKind::Color, "Col"));

        let command: ExchangeCommand = ColorToWeightParams::new("Col", "Group").into();
        assert_eq!(command.target(), (LayerKind::Weight, "Group"));

        let command: ExchangeCommand =
            ChannelCopyParams::new("A", Channel::R, "B", Channel::G).into();
        assert_eq!(command.target(), (LayerKind::Color, "B"));
        assert_eq!(command.description(), "Color shuffle");
    }

    #[test]
    fn validate_rejects_only_empty_color_mask() {
        let command = ExchangeCommand::from(
            ColorToWeightParams::new("Col", "Group").with_mask(ChannelMask::empty()),
        );
        assert_eq!(command.validate(), Err(ExchangeError::EmptyMask));

        let command = ExchangeCommand::from(
            WeightToColorParams::new("Group", "Col").with_mask(ChannelMask::empty()),
        );
        assert_eq!(command.validate(), Ok(()));
        assert_eq!(
            ExchangeCommand::from(ColorToWeightParams::new("Col", "Group")).validate(),
            Ok(())
        );
    }

    #[test]
    fn execute_dispatches() {
        let mut mesh = MemoryMesh::new(1);
        mesh.add_face(&[0]).unwrap();
        mesh.add_weight_layer("Group");
        mesh.add_color_layer("Col", Color::ZERO);
        mesh.set_weight("Group", 0, 0.6).unwrap();

        let command = ExchangeCommand::from(
            WeightToColorParams::new("Group", "Col").with_mask(ChannelMask::G),
        );
        let report = command.execute(&mut mesh).unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(mesh.color("Col", 0), Some(Color::new(0.0, 0.6, 0.0, 0.0)));
    }
}
