//! Document model combining a text buffer with its undo history.
//!
//! Every mutation goes through [`TextEdit::apply`] and is recorded exactly
//! once. Bulk programmatic changes are fenced with induced gaps so they never
//! merge with the keystrokes typed around them.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use timed_pad_mod_history::{Clock, HistoryConfig, HistoryManager, SystemClock};

use crate::buffer::{SharedBuffer, TextBuffer};
use crate::text_edit::TextEdit;

/// A single text document with its history.
pub struct Document<C: Clock = SystemClock> {
    /// The text buffer, shared with the recorded edits.
    buffer: SharedBuffer,
    /// Undo/redo history manager.
    history: HistoryManager<C>,
}

impl<C: Clock> std::fmt::Debug for Document<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("buffer", &self.buffer.borrow())
            .field("history", &self.history)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl Document {
    /// Creates an empty document.
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_history(HistoryManager::new(config))
    }
}

impl<C: Clock> Document<C> {
    /// Creates an empty document recording into `history`.
    pub fn with_history(history: HistoryManager<C>) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(TextBuffer::new())),
            history,
        }
    }

    /// Creates a document holding `text`. The initial text is not undoable.
    pub fn with_text(text: &str, history: HistoryManager<C>) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(TextBuffer::from(text))),
            history,
        }
    }

    pub fn history(&self) -> &HistoryManager<C> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryManager<C> {
        &mut self.history
    }

    /// Returns the whole text.
    pub fn text(&self) -> String {
        self.buffer.borrow().to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.borrow().len_chars()
    }

    pub fn len_lines(&self) -> usize {
        self.buffer.borrow().len_lines()
    }

    /// Inserts `text` at char index `pos`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is out of bounds.
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        self.replace(pos, pos, text)
    }

    /// Appends `text` at the end of the document.
    pub fn append(&mut self, text: &str) -> Result<()> {
        let end = self.len_chars();
        self.replace(end, end, text)
    }

    /// Deletes the char range `[start..end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or out of bounds.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<()> {
        self.replace(start, end, "")
    }

    /// Replaces the whole text as one isolated undo step.
    ///
    /// Used when the text is regenerated from another representation rather
    /// than typed. Does nothing if the text is unchanged.
    pub fn replace_all(&mut self, text: &str) -> Result<()> {
        if self.text() == text {
            return Ok(());
        }
        let end = self.len_chars();
        tracing::debug!(
            old_chars = end,
            new_chars = text.chars().count(),
            "replacing whole text"
        );
        self.history.induce_gap();
        let result = self.replace(0, end, text);
        self.history.induce_gap();
        result
    }

    /// Undoes one step. Returns `Ok(false)` if there was nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns an error if an edit in the step could not be reverted.
    pub fn undo(&mut self) -> Result<bool> {
        self.history.try_undo()
    }

    /// Redoes one step. Returns `Ok(false)` if there was nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns an error if an edit in the step could not be re-applied.
    pub fn redo(&mut self) -> Result<bool> {
        self.history.try_redo()
    }

    fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        if start == end && text.is_empty() {
            return Ok(());
        }
        let edit = TextEdit::apply(&self.buffer, start, end, text)?;
        self.history.record(Box::new(edit));
        Ok(())
    }
}
