//! Layer transforms.
//!
//! Every transform follows the same shape: validate, read the whole source
//! layer once, compute one output value per target element, then write the
//! results through the host in a single pass. Anything that can fail on the
//! source data fails before the first write.
//!
//! - [`copy_weight_to_color`] - broadcast vertex weights into loop colors
//! - [`copy_color_to_weight`] - average selected color channels into weights
//! - [`auto_level_weight`] - min-max rescale of a weight layer
//! - [`copy_weight_to_weight`] - copy one weight layer onto another
//! - [`copy_color_channel`] - copy one color channel between color layers

mod auto_level;
mod color_to_weight;
mod shuffle;
mod weight_to_color;

pub use auto_level::{AutoLevelParams, LevelFormula, auto_level_weight, level_range};
pub use color_to_weight::{ColorToWeightParams, copy_color_to_weight, mean_of_channels};
pub use shuffle::{ChannelCopyParams, WeightCopyParams, copy_color_channel, copy_weight_to_weight};
pub use weight_to_color::{WeightToColorParams, copy_weight_to_color, fill_channels};

use crate::host::LayerKind;

/// Outcome of a successful transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReport {
    /// Kind of the layer that was written.
    pub kind: LayerKind,
    /// Name of the layer that was written.
    pub target: String,
    /// Number of values written.
    pub written: usize,
}

impl ExchangeReport {
    pub(crate) fn new(kind: LayerKind, target: &str, written: usize) -> Self {
        log::info!("wrote {written} values to {kind} layer '{target}'");
        Self {
            kind,
            target: target.to_owned(),
            written,
        }
    }
}
