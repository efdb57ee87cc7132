//! Text editing surface for timed-pad.
//!
//! A rope-backed [`TextBuffer`], reversible [`TextEdit`]s against it, and a
//! [`Document`] that records every edit into a coalescing history.
pub mod buffer;
pub mod document;
pub mod text_edit;

pub use buffer::{SharedBuffer, TextBuffer};
pub use document::Document;
pub use text_edit::TextEdit;
pub use timed_pad_mod_history::{HistoryConfig, HistoryManager};
