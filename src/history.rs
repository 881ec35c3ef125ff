//! Linear undo/redo history over element commands.
//!
//! Every mutation of the plan is recorded as a [`Command`] holding the
//! element as it stands after the change and, for edits, the version before
//! it. Undo reverts the newest command and moves it to the redo stack; redo
//! re-applies it. Recording a new command discards the redo stack.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};

use crate::doc::{DocStore, Element};

/// What a command did to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// An element was placed.
    Add,
    /// An element was removed.
    Delete,
    /// An element's properties were edited (length, angle, rotation, text).
    Update,
    /// An element was dragged.
    Move,
}

/// A reversible change to one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    /// The element after the change (the removed element for `Delete`).
    pub element: Element,
    /// The element before the change, for `Update` and `Move`.
    pub prior: Option<Element>,
    /// List position the element occupied.
    pub index: usize,
}

impl Command {
    #[must_use]
    pub fn add(element: Element, index: usize) -> Self {
        Self { kind: CommandKind::Add, element, prior: None, index }
    }

    #[must_use]
    pub fn delete(element: Element, index: usize) -> Self {
        Self { kind: CommandKind::Delete, element, prior: None, index }
    }

    #[must_use]
    pub fn update(prior: Element, element: Element, index: usize) -> Self {
        Self { kind: CommandKind::Update, element, prior: Some(prior), index }
    }

    #[must_use]
    pub fn moved(prior: Element, element: Element, index: usize) -> Self {
        Self { kind: CommandKind::Move, element, prior: Some(prior), index }
    }

    /// Re-apply this command to `doc`.
    pub fn apply(&self, doc: &mut DocStore) {
        match self.kind {
            CommandKind::Add => doc.insert(self.index, self.element.clone()),
            CommandKind::Delete => {
                doc.remove(&self.element.id);
            }
            CommandKind::Update | CommandKind::Move => {
                doc.replace(self.element.clone());
            }
        }
    }

    /// Reverse this command's effect on `doc`.
    pub fn revert(&self, doc: &mut DocStore) {
        match self.kind {
            CommandKind::Add => {
                doc.remove(&self.element.id);
            }
            CommandKind::Delete => doc.insert(self.index, self.element.clone()),
            CommandKind::Update | CommandKind::Move => {
                if let Some(prior) = &self.prior {
                    doc.replace(prior.clone());
                }
            }
        }
    }
}

/// Undo and redo stacks, most recent command last.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new command. Clears the redo stack.
    pub fn push(&mut self, command: Command) {
        self.redo_stack.clear();
        self.undo_stack.push(command);
    }

    /// Pop the last command for undo
    pub fn pop_undo(&mut self) -> Option<Command> {
        self.undo_stack.pop()
    }

    /// Pop the last command for redo
    pub fn pop_redo(&mut self) -> Option<Command> {
        self.redo_stack.pop()
    }

    /// Push a command to the redo stack (used after undo)
    pub fn push_redo(&mut self, command: Command) {
        self.redo_stack.push(command);
    }

    /// Push a command to the undo stack (used after redo)
    pub fn push_undo(&mut self, command: Command) {
        self.undo_stack.push(command);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
