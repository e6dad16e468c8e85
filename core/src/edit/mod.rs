//! Undoable exchange operations.
//!
//! The transforms themselves are stateless. This module layers an editor
//! undo/redo stack on top of them:
//!
//! - [`EditAction`] - a reversible edit on a mesh host (Command pattern)
//! - [`ExchangeAction`] - an [`ExchangeCommand`](crate::ExchangeCommand) that
//!   snapshots its target layer so it can be undone
//! - [`LayerSnapshot`] - the saved contents of one layer
//! - [`EditHistory`] - bounded undo/redo stack

mod action;
mod history;

pub use action::{EditAction, ExchangeAction, LayerSnapshot};
pub use history::{DEFAULT_MAX_UNDO, EditHistory};
