//! Undo/redo action history.
//!
//! [`EditHistory`] manages a linear undo/redo stack of [`EditAction`] trait
//! objects. Executing a new action after undoing clears the redo stack.

use std::collections::VecDeque;
use std::fmt;

use super::action::{EditAction, ExchangeAction};
use crate::command::ExchangeCommand;
use crate::error::{ExchangeError, ExchangeResult};
use crate::host::MeshHost;
use crate::transform::ExchangeReport;

/// Default maximum number of undo steps.
pub const DEFAULT_MAX_UNDO: usize = 100;

/// Bounded undo/redo stack of actions on one mesh host.
///
/// When the undo stack exceeds `max_undo`, the oldest action is dropped.
///
/// # Example
///
/// ```ignore
/// let mut history = EditHistory::default();
/// history.run(WeightToColorParams::new("Group", "Col"), &mut mesh)?;
/// history.undo(&mut mesh)?;
/// history.redo(&mut mesh)?;
/// ```
pub struct EditHistory<H: MeshHost> {
    undo_stack: VecDeque<Box<dyn EditAction<H>>>,
    redo_stack: Vec<Box<dyn EditAction<H>>>,
    max_undo: usize,
}

impl<H: MeshHost> EditHistory<H> {
    /// Creates an empty history with the given maximum undo depth.
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo,
        }
    }

    /// Applies an action and pushes it onto the undo stack.
    ///
    /// If the action fails, it is not pushed and the redo stack is kept.
    pub fn execute(
        &mut self,
        mut action: Box<dyn EditAction<H>>,
        target: &mut H,
    ) -> ExchangeResult {
        action.apply(target)?;
        self.push(action);
        Ok(())
    }

    /// Runs an exchange command as an undoable action and returns its report.
    pub fn run(
        &mut self,
        command: impl Into<ExchangeCommand>,
        target: &mut H,
    ) -> ExchangeResult<ExchangeReport> {
        let mut action = ExchangeAction::new(command);
        let report = action.run(target)?;
        self.push(Box::new(action));
        Ok(report)
    }

    fn push(&mut self, action: Box<dyn EditAction<H>>) {
        log::debug!("recorded '{}'", action.description());
        self.redo_stack.clear();
        self.undo_stack.push_back(action);
        if self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
    }

    /// Undoes the most recent action.
    ///
    /// Returns an error if the undo stack is empty or the undo failed.
    pub fn undo(&mut self, target: &mut H) -> ExchangeResult {
        let mut action = self
            .undo_stack
            .pop_back()
            .ok_or_else(|| ExchangeError::Edit("nothing to undo".into()))?;
        action.undo(target)?;
        log::debug!("undid '{}'", action.description());
        self.redo_stack.push(action);
        Ok(())
    }

    /// Redoes the most recently undone action.
    ///
    /// Returns an error if the redo stack is empty or the redo failed.
    pub fn redo(&mut self, target: &mut H) -> ExchangeResult {
        let mut action = self
            .redo_stack
            .pop()
            .ok_or_else(|| ExchangeError::Edit("nothing to redo".into()))?;
        action.apply(target)?;
        log::debug!("redid '{}'", action.description());
        self.undo_stack.push_back(action);
        if self.undo_stack.len() > self.max_undo {
            self.undo_stack.pop_front();
        }
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo action descriptions, most recent first.
    pub fn undo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().rev().map(|a| a.description())
    }

    /// Redo action descriptions, most recent first.
    pub fn redo_descriptions(&self) -> impl Iterator<Item = &str> {
        self.redo_stack.iter().rev().map(|a| a.description())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_undo(&self) -> usize {
        self.max_undo
    }

    /// Clears both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<H: MeshHost> Default for EditHistory<H> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}

impl<H: MeshHost> fmt::Debug for EditHistory<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditHistory")
            .field("undo_count", &self.undo_stack.len())
            .field("redo_count", &self.redo_stack.len())
            .field("max_undo", &self.max_undo)
            .finish()
    }
}
