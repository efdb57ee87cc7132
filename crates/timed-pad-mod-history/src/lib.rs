/// Coalescing, bounded-memory undo/redo history.
///
/// Provides a `HistoryManager` that records opaque reversible edits, groups
/// edits recorded in quick succession into a single undo/redo step, and
/// evicts the oldest history a little at a time once it grows past a limit.
///
/// The manager is single-threaded: it is not `Sync`, and callers must
/// serialize access externally if it is shared between threads.
pub mod clock;
pub mod config;
pub mod edit;
pub mod manager;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::HistoryConfig;
pub use edit::{Edit, TimestampedEdit};
pub use manager::HistoryManager;
