//! Reversible actions and layer snapshots.

use std::fmt;

use crate::channel::Color;
use crate::command::ExchangeCommand;
use crate::error::{ExchangeError, ExchangeResult};
use crate::host::{LayerKind, LoopIndex, MeshHost};
use crate::reader::ensure_layer;
use crate::transform::ExchangeReport;

/// A reversible edit on a mesh host.
///
/// Actions capture whatever they need to undo themselves. The trait is
/// dyn-compatible so different actions share one
/// [`EditHistory`](super::EditHistory) as `Box<dyn EditAction<H>>`.
pub trait EditAction<H: MeshHost>: fmt::Debug {
    /// Applies the action (forward / redo direction).
    fn apply(&mut self, target: &mut H) -> ExchangeResult;

    /// Restores the target to its state before [`apply`](Self::apply).
    fn undo(&mut self, target: &mut H) -> ExchangeResult;

    /// A short, human-readable description for the edit menu.
    fn description(&self) -> &str;
}

/// Saved contents of one layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSnapshot {
    /// One slot per vertex. `None` marks a vertex without an entry.
    Weights {
        layer: String,
        values: Vec<Option<f32>>,
    },
    /// One color per loop.
    Colors {
        layer: String,
        values: Vec<(LoopIndex, Color)>,
    },
}

impl LayerSnapshot {
    /// Copy the current contents of a layer.
    pub fn capture<H: MeshHost>(host: &H, kind: LayerKind, layer: &str) -> ExchangeResult<Self> {
        ensure_layer(host, kind, layer)?;
        let layer = layer.to_owned();
        match kind {
            LayerKind::Weight => {
                let values = (0..host.vertex_count())
                    .map(|vertex| host.read_weight(&layer, vertex))
                    .collect::<ExchangeResult<Vec<_>>>()?;
                Ok(Self::Weights { layer, values })
            }
            LayerKind::Color => {
                let values = host
                    .loops()
                    .map(|l| host.read_color(&layer, l.index).map(|color| (l.index, color)))
                    .collect::<ExchangeResult<Vec<_>>>()?;
                Ok(Self::Colors { layer, values })
            }
        }
    }

    /// Write the saved contents back, removing weight entries that did not
    /// exist at capture time.
    pub fn restore<H: MeshHost>(&self, host: &mut H) -> ExchangeResult {
        match self {
            Self::Weights { layer, values } => {
                for (vertex, value) in values.iter().enumerate() {
                    match value {
                        Some(value) => host.write_weight(layer, vertex, *value)?,
                        None => host.remove_weight(layer, vertex)?,
                    }
                }
            }
            Self::Colors { layer, values } => {
                for &(loop_index, color) in values {
                    host.write_color(layer, loop_index, color)?;
                }
            }
        }
        Ok(())
    }

    /// Name of the captured layer.
    pub fn layer(&self) -> &str {
        match self {
            Self::Weights { layer, .. } | Self::Colors { layer, .. } => layer,
        }
    }
}

/// An [`ExchangeCommand`] that can be undone.
///
/// Applying snapshots the command's target layer first. If the command
/// fails, the snapshot is written back before the error is returned.
#[derive(Debug)]
pub struct ExchangeAction {
    command: ExchangeCommand,
    snapshot: Option<LayerSnapshot>,
    report: Option<ExchangeReport>,
}

impl ExchangeAction {
    pub fn new(command: impl Into<ExchangeCommand>) -> Self {
        Self {
            command: command.into(),
            snapshot: None,
            report: None,
        }
    }

    pub fn command(&self) -> &ExchangeCommand {
        &self.command
    }

    /// Report of the last successful apply.
    pub fn report(&self) -> Option<&ExchangeReport> {
        self.report.as_ref()
    }

    /// Apply and return the transform's report.
    pub fn run<H: MeshHost>(&mut self, target: &mut H) -> ExchangeResult<ExchangeReport> {
        self.command.validate()?;
        let (kind, layer) = self.command.target();
        let snapshot = LayerSnapshot::capture(target, kind, layer)?;

        match self.command.execute(target) {
            Ok(report) => {
                self.snapshot = Some(snapshot);
                self.report = Some(report.clone());
                Ok(report)
            }
            Err(err) => {
                log::warn!(
                    "{} failed, restoring '{}': {err}",
                    self.command.description(),
                    snapshot.layer()
                );
                if let Err(restore_err) = snapshot.restore(target) {
                    log::error!("restoring '{}' failed: {restore_err}", snapshot.layer());
                }
                Err(err)
            }
        }
    }
}

impl<H: MeshHost> EditAction<H> for ExchangeAction {
    fn apply(&mut self, target: &mut H) -> ExchangeResult {
        self.run(target).map(|_| ())
    }

    fn undo(&mut self, target: &mut H) -> ExchangeResult {
        let snapshot = self
            .snapshot
            .take()
            .ok_or_else(|| ExchangeError::Edit("action was never applied".into()))?;
        snapshot.restore(target)
    }

    fn description(&self) -> &str {
        self.command.description()
    }
}
