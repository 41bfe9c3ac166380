//! Command stack
//!
//! Linear undo/redo history with a cursor. Entries before the cursor are
//! undoable, entries at or after it are redoable. Pushing a new entry
//! discards the redo tail.
//!
//! After a command executes, the entry just before the cursor gets a chance
//! to absorb it (`merge`). An absorbed command is dropped, so a burst of
//! compatible commands yields one history entry whose undo restores the
//! state from before the burst.

use crate::command::{Command, CommandExecutionContext};

pub struct CommandStack {
    history: Vec<Box<dyn Command>>,
    cursor: usize,
    max_depth: usize,
}

impl CommandStack {
    /// Creates a stack keeping at most `max_depth` entries (0 = unbounded).
    pub fn new(max_depth: usize) -> Self {
        Self {
            history: Vec::new(),
            cursor: 0,
            max_depth,
        }
    }

    /// Executes `commands` in order, merging or pushing each one.
    pub fn execute(&mut self, commands: Vec<Box<dyn Command>>, context: &CommandExecutionContext) {
        for mut command in commands {
            let outcome = command.execute(context);
            if outcome.is_skipped() {
                tracing::debug!("Command '{}' skipped, target unavailable", command.kind());
                continue;
            }

            if self.cursor > 0 && self.history[self.cursor - 1].merge(command.as_ref(), context) {
                tracing::debug!("Command '{}' merged into history top", command.kind());
                self.truncate_redo_tail();
                continue;
            }

            if !command.is_pushable() {
                tracing::trace!("Command '{}' applied without history", command.kind());
                continue;
            }

            self.truncate_redo_tail();
            self.history.push(command);
            self.cursor += 1;

            if self.max_depth > 0 && self.history.len() > self.max_depth {
                let overflow = self.history.len() - self.max_depth;
                self.history.drain(..overflow);
                self.cursor -= overflow;
                tracing::debug!(
                    "Evicted {} oldest history entries (max depth {})",
                    overflow,
                    self.max_depth
                );
            }
        }
    }

    fn truncate_redo_tail(&mut self) {
        let dropped = self.history.len() - self.cursor;
        if dropped > 0 {
            self.history.truncate(self.cursor);
            tracing::debug!("Discarded {} redoable history entries", dropped);
        }
    }

    /// Undoes the entry before the cursor. Returns false at the start of history.
    pub fn undo(&mut self, context: &CommandExecutionContext) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let command = &mut self.history[self.cursor];
        tracing::debug!("Undo '{}'", command.kind());
        command.undo(context);
        true
    }

    /// Redoes the entry at the cursor. Returns false at the end of history.
    pub fn redo(&mut self, context: &CommandExecutionContext) -> bool {
        if self.cursor == self.history.len() {
            return false;
        }
        let command = &mut self.history[self.cursor];
        tracing::debug!("Redo '{}'", command.kind());
        command.redo(context);
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.history.len()
    }

    /// Number of undoable entries.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of redoable entries.
    pub fn redo_depth(&self) -> usize {
        self.history.len() - self.cursor
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drops all history without touching the model.
    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
    }
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new(diagramkit_core::constants::DEFAULT_HISTORY_DEPTH)
    }
}
