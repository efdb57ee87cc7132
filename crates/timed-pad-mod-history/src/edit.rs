//! The reversible-edit capability and its timestamped wrapper.

use anyhow::Result;

/// A reversible unit of change over some external state.
///
/// Implementors are produced by an editing surface right after the change
/// has been applied, and handed to [`HistoryManager::record`]. From then on
/// the history owns the edit; it calls `undo` and `redo` to move through
/// time and `dispose` once the edit can never be reached again.
///
/// [`HistoryManager::record`]: crate::HistoryManager::record
pub trait Edit {
    /// Applies the inverse of the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the external state no longer allows the change
    /// to be reverted.
    fn undo(&mut self) -> Result<()>;

    /// Re-applies the change after an `undo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the external state no longer allows the change
    /// to be applied.
    fn redo(&mut self) -> Result<()>;

    /// Releases any resources held by the edit. Must not fail.
    fn dispose(self: Box<Self>) {}
}

/// An edit together with the logical time it was recorded at.
pub struct TimestampedEdit {
    edit: Box<dyn Edit>,
    time: i64,
}

impl std::fmt::Debug for TimestampedEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampedEdit")
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

impl TimestampedEdit {
    pub fn new(edit: Box<dyn Edit>, time: i64) -> Self {
        Self { edit, time }
    }

    /// Logical time in milliseconds.
    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn undo(&mut self) -> Result<()> {
        self.edit.undo()
    }

    pub fn redo(&mut self) -> Result<()> {
        self.edit.redo()
    }

    pub fn dispose(self) {
        self.edit.dispose();
    }
}
