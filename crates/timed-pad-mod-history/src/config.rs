//! Tuning parameters for a single history.

use timed_pad_config::UndoSettings;

/// Configuration owned by one `HistoryManager`.
///
/// All fields may be changed at runtime through
/// [`HistoryManager::config_mut`](crate::HistoryManager::config_mut).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Edits closer together than this (logical milliseconds) form one group.
    pub inactivity_ms: u64,
    /// Soft cap on the number of atomic edits kept in the past.
    pub past_limit: usize,
    /// Maximum atomic edits evicted by one trim pass, not counting the
    /// remainder of the group being evicted when the ceiling is hit.
    pub trim_batch_ceiling: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::from(&UndoSettings::default())
    }
}

impl From<&UndoSettings> for HistoryConfig {
    fn from(settings: &UndoSettings) -> Self {
        Self {
            inactivity_ms: settings.inactivity_ms,
            past_limit: settings.past_limit(),
            trim_batch_ceiling: settings.trim_batch_ceiling,
        }
    }
}

impl HistoryConfig {
    /// The inactivity window as a signed logical-time span.
    pub(crate) fn window(&self) -> i64 {
        i64::try_from(self.inactivity_ms).unwrap_or(i64::MAX)
    }
}
