/// Core undo/redo manager with time-based grouping and incremental trimming.
///
/// Every recorded edit is stamped with a logical time (real time plus an
/// adjustable offset). Consecutive edits closer together than the inactivity
/// window form one group, and one undo or redo step moves a whole group.
/// Because undo and redo use the same gap test on the same timestamps, an
/// undo followed by a redo always lands exactly where it started.
use std::collections::VecDeque;

use anyhow::{bail, Result};

use crate::clock::{Clock, SystemClock};
use crate::config::HistoryConfig;
use crate::edit::{Edit, TimestampedEdit};

/// Manages the undo/redo history for a single editing surface.
///
/// Not thread-safe: callers must serialize access externally.
pub struct HistoryManager<C: Clock = SystemClock> {
    /// Applied edits, oldest first.
    past: VecDeque<TimestampedEdit>,
    /// Undone edits; the front is the next one to redo.
    future: VecDeque<TimestampedEdit>,
    /// Configuration parameters.
    config: HistoryConfig,
    /// Logical time of the last recorded edit.
    last_edit_time: i64,
    /// Added to real time to produce logical time.
    time_offset: i64,
    clock: C,
}

impl<C: Clock> std::fmt::Debug for HistoryManager<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("past_len", &self.past.len())
            .field("future_len", &self.future.len())
            .field("config", &self.config)
            .field("last_edit_time", &self.last_edit_time)
            .field("time_offset", &self.time_offset)
            .finish()
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl HistoryManager {
    /// Creates an empty history driven by the system clock.
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> HistoryManager<C> {
    /// Creates an empty history driven by `clock`.
    ///
    /// Logical time starts at 0 at the moment of construction.
    pub fn with_clock(config: HistoryConfig, clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            config,
            last_edit_time: 0,
            time_offset: now.saturating_neg(),
            clock,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Mutable access to the tuning parameters.
    ///
    /// A lowered `past_limit` is not enforced here; the next
    /// [`check_trim`](Self::check_trim) or [`record`](Self::record) works
    /// toward it incrementally.
    pub fn config_mut(&mut self) -> &mut HistoryConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: HistoryConfig) {
        self.config = config;
    }

    /// Current logical time.
    pub fn logical_now(&self) -> i64 {
        self.clock.now_ms().saturating_add(self.time_offset)
    }

    /// Logical time of the most recently recorded edit (0 before any).
    pub fn last_edit_time(&self) -> i64 {
        self.last_edit_time
    }

    pub fn time_offset(&self) -> i64 {
        self.time_offset
    }

    /// Number of atomic edits available to undo.
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of atomic edits available to redo.
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Logical times of the past, oldest first.
    pub fn past_times(&self) -> impl Iterator<Item = i64> + '_ {
        self.past.iter().map(TimestampedEdit::time)
    }

    /// Logical times of the future, next-to-redo first.
    pub fn future_times(&self) -> impl Iterator<Item = i64> + '_ {
        self.future.iter().map(TimestampedEdit::time)
    }

    /// Records an edit that has just been applied.
    ///
    /// Discards (and disposes) everything that could have been redone,
    /// then trims the oldest history if it has grown past the limit.
    pub fn record(&mut self, edit: Box<dyn Edit>) {
        let discarded = self.future.len();
        dispose_all(&mut self.future);

        // A wall clock stepping backwards must not reorder the past.
        let time = self.logical_now().max(self.last_edit_time);
        self.last_edit_time = time;
        self.past.push_back(TimestampedEdit::new(edit, time));

        let trimmed = self.check_trim();
        tracing::debug!(
            time,
            discarded,
            trimmed,
            past = self.past.len(),
            "recorded edit"
        );
    }

    /// Shifts logical time forward by one inactivity window.
    ///
    /// The next recorded edit is guaranteed to start a new group. Calling
    /// this before and after a batch of programmatic edits makes that batch
    /// its own undo step.
    pub fn induce_gap(&mut self) {
        self.time_offset = self.time_offset.saturating_add(self.config.window());
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Undoes one group if there is anything to undo.
    ///
    /// Returns `Ok(false)` without touching any state when the past is empty.
    ///
    /// # Errors
    ///
    /// Propagates the failure of any edit in the group; see [`undo`](Self::undo).
    pub fn try_undo(&mut self) -> Result<bool> {
        if !self.can_undo() {
            return Ok(false);
        }
        self.undo()?;
        Ok(true)
    }

    /// Redoes one group if there is anything to redo.
    ///
    /// Returns `Ok(false)` without touching any state when the future is empty.
    ///
    /// # Errors
    ///
    /// Propagates the failure of any edit in the group; see [`redo`](Self::redo).
    pub fn try_redo(&mut self) -> Result<bool> {
        if !self.can_redo() {
            return Ok(false);
        }
        self.redo()?;
        Ok(true)
    }

    /// Undoes the most recent group and returns how many edits it held.
    ///
    /// Edits are inverted newest first and pushed to the front of the
    /// future, so the future keeps them in their original order.
    ///
    /// # Errors
    ///
    /// Returns an error if the past is empty, or as soon as one edit fails
    /// to undo. Edits of the group already undone stay in the future; the
    /// failing edit is disposed, so the next undo moves past it. Nothing is
    /// rolled back.
    pub fn undo(&mut self) -> Result<usize> {
        let Some(mut current) = self.past.pop_back() else {
            bail!("nothing to undo");
        };
        let window = self.config.window();
        let mut moved = 0;
        loop {
            let joins_previous = self
                .past
                .back()
                .is_some_and(|prev| current.time() - prev.time() < window);
            self.rewind(current)?;
            moved += 1;
            if !joins_previous {
                break;
            }
            match self.past.pop_back() {
                Some(prev) => current = prev,
                None => break,
            }
        }
        tracing::debug!(moved, past = self.past.len(), "undo");
        Ok(moved)
    }

    /// Redoes the next group and returns how many edits it held.
    ///
    /// # Errors
    ///
    /// Returns an error if the future is empty, or as soon as one edit fails
    /// to redo. Edits of the group already redone stay in the past; the
    /// failing edit is disposed. Nothing is rolled back.
    pub fn redo(&mut self) -> Result<usize> {
        let Some(mut current) = self.future.pop_front() else {
            bail!("nothing to redo");
        };
        let window = self.config.window();
        let mut moved = 0;
        loop {
            let joins_next = self
                .future
                .front()
                .is_some_and(|next| next.time() - current.time() < window);
            self.replay(current)?;
            moved += 1;
            if !joins_next {
                break;
            }
            match self.future.pop_front() {
                Some(next) => current = next,
                None => break,
            }
        }
        tracing::debug!(moved, future = self.future.len(), "redo");
        Ok(moved)
    }

    /// Number of edits the next undo would move, without moving them.
    pub fn undo_group_len(&self) -> usize {
        leading_group_len(
            self.past.iter().rev().map(TimestampedEdit::time),
            self.config.window(),
        )
    }

    /// Number of edits the next redo would move, without moving them.
    pub fn redo_group_len(&self) -> usize {
        leading_group_len(
            self.future.iter().map(TimestampedEdit::time),
            self.config.window(),
        )
    }

    /// Evicts the oldest groups while the past is over its limit.
    ///
    /// Stops once `trim_batch_ceiling` edits have been removed, but always
    /// finishes the group it is in the middle of, so a group is never left
    /// half-evicted. A ceiling of 0 counts as 1. Returns how many edits were
    /// disposed.
    pub fn check_trim(&mut self) -> usize {
        let window = self.config.window();
        let mut removed = 0;
        while self.past.len() > self.config.past_limit
            && removed < self.config.trim_batch_ceiling.max(1)
        {
            let Some(mut current) = self.past.pop_front() else {
                break;
            };
            loop {
                let same_group = self
                    .past
                    .front()
                    .is_some_and(|next| next.time() - current.time() < window);
                let next = if same_group {
                    self.past.pop_front()
                } else {
                    None
                };
                current.dispose();
                removed += 1;
                match next {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
        if removed > 0 {
            tracing::debug!(removed, past = self.past.len(), "trimmed history");
        }
        removed
    }

    /// Disposes every edit in the past and the future.
    ///
    /// The logical clock is left as it is.
    pub fn clear(&mut self) {
        dispose_all(&mut self.past);
        dispose_all(&mut self.future);
    }

    fn rewind(&mut self, mut entry: TimestampedEdit) -> Result<()> {
        if let Err(err) = entry.undo() {
            let time = entry.time();
            entry.dispose();
            tracing::warn!(time, "edit failed to undo: {err:#}");
            return Err(err.context(format!("Failed to undo edit recorded at {time}ms")));
        }
        self.future.push_front(entry);
        Ok(())
    }

    fn replay(&mut self, mut entry: TimestampedEdit) -> Result<()> {
        if let Err(err) = entry.redo() {
            let time = entry.time();
            entry.dispose();
            tracing::warn!(time, "edit failed to redo: {err:#}");
            return Err(err.context(format!("Failed to redo edit recorded at {time}ms")));
        }
        self.past.push_back(entry);
        Ok(())
    }
}

impl<C: Clock> Drop for HistoryManager<C> {
    fn drop(&mut self) {
        self.clear();
    }
}

fn dispose_all(edits: &mut VecDeque<TimestampedEdit>) {
    for entry in edits.drain(..) {
        entry.dispose();
    }
}

/// Length of the group at the start of `times`, which must be ordered
/// from the end of history being consumed.
fn leading_group_len(mut times: impl Iterator<Item = i64>, window: i64) -> usize {
    let Some(mut prev) = times.next() else {
        return 0;
    };
    let mut len = 1;
    for time in times {
        if (time - prev).abs() >= window {
            break;
        }
        len += 1;
        prev = time;
    }
    len
}
