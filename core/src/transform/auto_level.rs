use crate::error::{ExchangeError, ExchangeResult};
use crate::host::{LayerKind, MeshHost};
use crate::profile_function;
use crate::reader::read_weights;

use super::ExchangeReport;

/// Rescaling formula used by [`auto_level_weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelFormula {
    /// `value / (max - min) - min`.
    ///
    /// Divides before subtracting, so the output only lands on `[0, 1]` when
    /// `min` is zero. Default, to reproduce layers leveled by earlier
    /// releases of the exchange tool.
    #[default]
    Literal,
    /// `(value - min) / (max - min)`, mapping the range onto `[0, 1]`.
    Conventional,
}

impl LevelFormula {
    /// Rescale one value given the layer's minimum and span.
    pub fn apply(self, value: f32, min: f32, scale: f32) -> f32 {
        match self {
            Self::Literal => value / scale - min,
            Self::Conventional => (value - min) / scale,
        }
    }
}

/// Parameters of [`auto_level_weight`].
#[derive(Debug, Clone, PartialEq)]
pub struct AutoLevelParams {
    /// Weight layer rewritten in place.
    pub weight_layer: String,
    pub formula: LevelFormula,
}

impl AutoLevelParams {
    pub fn new(weight_layer: impl Into<String>) -> Self {
        Self {
            weight_layer: weight_layer.into(),
            formula: LevelFormula::default(),
        }
    }

    /// Set the rescaling formula.
    pub fn with_formula(mut self, formula: LevelFormula) -> Self {
        self.formula = formula;
        self
    }
}

/// Minimum and maximum of `values`, `None` when empty.
pub fn level_range(values: impl IntoIterator<Item = f32>) -> Option<(f32, f32)> {
    values.into_iter().fold(None, |range, value| match range {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

/// Rescale every vertex weight of a layer by its min-max range.
///
/// Vertices without an entry read as `0.0` and take part in the range, so
/// after this call every vertex has an entry. A mesh without vertices is left
/// untouched. Fails with [`ExchangeError::DegenerateRange`] when all weights
/// are equal. Results are not clamped.
pub fn auto_level_weight<H: MeshHost>(
    host: &mut H,
    params: &AutoLevelParams,
) -> ExchangeResult<ExchangeReport> {
    profile_function!();
    log::debug!(
        "auto-level weight '{}' ({:?})",
        params.weight_layer,
        params.formula
    );

    let weights = read_weights(host, &params.weight_layer)?;
    let Some((min, max)) = level_range(weights.values().copied()) else {
        return Ok(ExchangeReport::new(LayerKind::Weight, &params.weight_layer, 0));
    };

    let scale = max - min;
    if scale == 0.0 {
        return Err(ExchangeError::DegenerateRange { value: min });
    }
    log::debug!("weight range [{min}, {max}], scale {scale}");

    for (&vertex, &value) in &weights {
        host.write_weight(
            &params.weight_layer,
            vertex,
            params.formula.apply(value, min, scale),
        )?;
    }
    Ok(ExchangeReport::new(
        LayerKind::Weight,
        &params.weight_layer,
        weights.len(),
    ))
}
