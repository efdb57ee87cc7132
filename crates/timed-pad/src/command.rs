//! Parsing of the editor's one-line commands.

use anyhow::{bail, Context, Result};

/// A single editor command read from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { pos: usize, text: String },
    Delete { start: usize, end: usize },
    Append(String),
    /// Replace the whole text as one isolated step.
    Set(String),
    Gap,
    Undo,
    Redo,
    Print,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// Text arguments keep their inner spaces; `\n` and `\t` escapes are
    /// expanded so multi-line text can be entered on one line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands or malformed arguments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (name, rest) = match line.trim_start().split_once(' ') {
            Some((name, rest)) => (name, rest),
            None => (line.trim(), ""),
        };

        let command = match name {
            "i" | "insert" => {
                let (pos, text) = rest
                    .split_once(' ')
                    .context("usage: i <pos> <text>")?;
                Self::Insert {
                    pos: parse_index(pos)?,
                    text: unescape(text),
                }
            }
            "d" | "delete" => {
                let mut args = rest.split_whitespace();
                let (Some(start), Some(end), None) = (args.next(), args.next(), args.next())
                else {
                    bail!("usage: d <start> <end>");
                };
                Self::Delete {
                    start: parse_index(start)?,
                    end: parse_index(end)?,
                }
            }
            "a" | "append" => Self::Append(unescape(rest)),
            "set" => Self::Set(unescape(rest)),
            "gap" => Self::Gap,
            "u" | "undo" => Self::Undo,
            "r" | "redo" => Self::Redo,
            "p" | "print" => Self::Print,
            "s" | "status" => Self::Status,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => bail!("unknown command {other:?} (try `help`)"),
        };
        Ok(Some(command))
    }

    /// Whether running this command can change the text.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Insert { .. }
                | Self::Delete { .. }
                | Self::Append(_)
                | Self::Set(_)
                | Self::Undo
                | Self::Redo
        )
    }
}

pub const HELP: &str = "\
commands:
  i <pos> <text>    insert text at char index
  d <start> <end>   delete chars [start, end)
  a <text>          append text
  set <text>        replace everything (one undo step)
  gap               start a new undo step
  u / r             undo / redo
  p                 print text
  s                 print history status
  q                 quit";

fn parse_index(arg: &str) -> Result<usize> {
    arg.trim()
        .parse()
        .with_context(|| format!("invalid char index {arg:?}"))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
