//! Reversible text replacements recorded into the history.

use std::rc::Rc;

use anyhow::{Context, Result};
use timed_pad_mod_history::Edit;

use crate::buffer::SharedBuffer;

/// One applied replacement: `deleted` was removed at `position` and
/// `inserted` put in its place. Pure insertions and deletions leave the
/// other side empty.
#[derive(Debug)]
pub struct TextEdit {
    buffer: SharedBuffer,
    /// Char index where the edit occurred.
    position: usize,
    /// Text that was inserted (empty for pure deletions).
    inserted: String,
    /// Text that was deleted (empty for pure insertions).
    deleted: String,
}

impl TextEdit {
    /// Replaces `[start..end)` with `text` and returns the edit describing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds; the buffer is then
    /// left unchanged.
    pub fn apply(buffer: &SharedBuffer, start: usize, end: usize, text: &str) -> Result<Self> {
        let deleted = {
            let mut buf = buffer.borrow_mut();
            let deleted = buf.slice(start, end)?.to_string();
            buf.remove(start, end)?;
            buf.insert(start, text)?;
            deleted
        };
        Ok(Self {
            buffer: Rc::clone(buffer),
            position: start,
            inserted: text.to_string(),
            deleted,
        })
    }

    /// Swaps `current` at `position` for `replacement`, checking the buffer
    /// still holds `current` there.
    fn swap(&self, current: &str, replacement: &str) -> Result<()> {
        let mut buf = self.buffer.borrow_mut();
        let end = self.position + current.chars().count();
        let found = buf
            .slice(self.position, end)
            .with_context(|| format!("Edit at {} no longer fits the buffer", self.position))?;
        if found != current {
            anyhow::bail!(
                "Buffer changed under edit at {}: expected {:?}, found {:?}",
                self.position,
                current,
                found.to_string()
            );
        }
        buf.remove(self.position, end)?;
        buf.insert(self.position, replacement)?;
        Ok(())
    }
}

impl Edit for TextEdit {
    fn undo(&mut self) -> Result<()> {
        self.swap(&self.inserted, &self.deleted)
    }

    fn redo(&mut self) -> Result<()> {
        self.swap(&self.deleted, &self.inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use std::cell::RefCell;

    fn shared(text: &str) -> SharedBuffer {
        Rc::new(RefCell::new(TextBuffer::from(text)))
    }

    #[test]
    fn test_apply_insert() {
        let buf = shared("hello");
        let mut edit = TextEdit::apply(&buf, 5, 5, " world").unwrap();
        assert_eq!(buf.borrow().to_string(), "hello world");

        edit.undo().unwrap();
        assert_eq!(buf.borrow().to_string(), "hello");
    }

    #[test]
    fn test_undo_redo_replacement() {
        let buf = shared("hello world");
        let mut edit = TextEdit::apply(&buf, 0, 5, "goodbye").unwrap();
        assert_eq!(buf.borrow().to_string(), "goodbye world");

        edit.undo().unwrap();
        assert_eq!(buf.borrow().to_string(), "hello world");
        edit.redo().unwrap();
        assert_eq!(buf.borrow().to_string(), "goodbye world");
    }

    #[test]
    fn test_undo_deletion_restores_text() {
        let buf = shared("a🌍b");
        let mut edit = TextEdit::apply(&buf, 1, 2, "").unwrap();
        assert_eq!(buf.borrow().to_string(), "ab");

        edit.undo().unwrap();
        assert_eq!(buf.borrow().to_string(), "a🌍b");
    }

    #[test]
    fn test_apply_out_of_bounds_leaves_buffer() {
        let buf = shared("abc");
        assert!(TextEdit::apply(&buf, 2, 9, "x").is_err());
        assert_eq!(buf.borrow().to_string(), "abc");
    }

    #[test]
    fn test_undo_fails_when_buffer_diverged() {
        let buf = shared("");
        let mut edit = TextEdit::apply(&buf, 0, 0, "abc").unwrap();
        buf.borrow_mut().remove(0, 3).unwrap();
        buf.borrow_mut().insert(0, "xyz").unwrap();

        let err = edit.undo().unwrap_err();
        assert!(err.to_string().contains("Buffer changed"));
        assert_eq!(buf.borrow().to_string(), "xyz");
    }

    #[test]
    fn test_undo_fails_when_buffer_shrank() {
        let buf = shared("");
        let mut edit = TextEdit::apply(&buf, 0, 0, "abc").unwrap();
        buf.borrow_mut().remove(0, 3).unwrap();
        assert!(edit.undo().is_err());
    }
}
