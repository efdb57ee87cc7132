/// Undo history settings as stored in the application config file.
use serde::{Deserialize, Serialize};

/// Default grouping window in milliseconds.
pub const DEFAULT_INACTIVITY_MS: u64 = 1000;

/// Average number of atomic edits in one logical undo step.
///
/// Typed text produces one edit per character, and a typical line in the
/// documents this editor targets is about 62 characters long.
pub const DEFAULT_AVERAGE_EDIT_SIZE: usize = 62;

/// Number of logical undo steps users expect to keep.
pub const DEFAULT_EXPECTED_UNDO_STEPS: usize = 500;

/// Maximum number of atomic edits evicted in one trim pass.
pub const DEFAULT_TRIM_BATCH_CEILING: usize = 50;

/// The `undo` section of [`crate::AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UndoSettings {
    /// Edits recorded closer together than this many milliseconds
    /// are undone and redone as one step.
    pub inactivity_ms: u64,
    /// Average number of atomic edits per logical step.
    pub average_edit_size: usize,
    /// Number of logical steps to retain.
    pub expected_undo_steps: usize,
    /// Maximum number of atomic edits evicted per trim pass.
    pub trim_batch_ceiling: usize,
}

impl Default for UndoSettings {
    fn default() -> Self {
        Self {
            inactivity_ms: DEFAULT_INACTIVITY_MS,
            average_edit_size: DEFAULT_AVERAGE_EDIT_SIZE,
            expected_undo_steps: DEFAULT_EXPECTED_UNDO_STEPS,
            trim_batch_ceiling: DEFAULT_TRIM_BATCH_CEILING,
        }
    }
}

impl UndoSettings {
    /// Soft cap on the number of atomic edits kept in the undo history.
    pub fn past_limit(&self) -> usize {
        self.average_edit_size
            .saturating_mul(self.expected_undo_steps)
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        self.average_edit_size = self.average_edit_size.max(1);
        self.expected_undo_steps = self.expected_undo_steps.max(1);
        self.trim_batch_ceiling = self.trim_batch_ceiling.max(1);
        // i64 logical timestamps must be able to absorb the window.
        self.inactivity_ms = self.inactivity_ms.min(i64::MAX as u64 / 2);
    }
}
