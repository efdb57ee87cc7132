//! The interactive command loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use timed_pad_config::AppConfig;
use timed_pad_core::Document;
use timed_pad_mod_history::Clock;

use crate::command::{Command, HELP};

/// Reads commands from `input` until EOF or `q`, writing results to `output`.
///
/// Bad commands and failed edits are reported and the loop continues; only
/// I/O errors on `input`/`output` end it with an error.
pub fn run<C, R, W>(
    doc: &mut Document<C>,
    config: &AppConfig,
    input: R,
    mut output: W,
) -> Result<()>
where
    C: Clock,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        if config.show_prompt {
            write!(output, "> ")?;
            output.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {e:#}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match execute(doc, &command) {
            Ok(Some(message)) => writeln!(output, "{message}")?,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Command {command:?} failed: {e:#}");
                writeln!(output, "error: {e:#}")?;
            }
        }
        if config.echo_text && command.mutates() {
            writeln!(output, "{}", doc.text())?;
        }
    }
    Ok(())
}

/// Runs one command, returning a message to show if it has one.
fn execute<C: Clock>(doc: &mut Document<C>, command: &Command) -> Result<Option<String>> {
    let message = match command {
        Command::Insert { pos, text } => {
            doc.insert(*pos, text)?;
            None
        }
        Command::Delete { start, end } => {
            doc.delete(*start, *end)?;
            None
        }
        Command::Append(text) => {
            doc.append(text)?;
            None
        }
        Command::Set(text) => {
            doc.replace_all(text)?;
            None
        }
        Command::Gap => {
            doc.history_mut().induce_gap();
            None
        }
        Command::Undo => (!doc.undo()?).then(|| "nothing to undo".to_string()),
        Command::Redo => (!doc.redo()?).then(|| "nothing to redo".to_string()),
        Command::Print => Some(doc.text()),
        Command::Status => {
            let history = doc.history();
            Some(format!(
                "chars: {}, lines: {}, undo: {} edits (next step {}), redo: {} edits (next step {})",
                doc.len_chars(),
                doc.len_lines(),
                history.past_len(),
                history.undo_group_len(),
                history.future_len(),
                history.redo_group_len(),
            ))
        }
        Command::Help => Some(HELP.to_string()),
        Command::Quit => None,
    };
    Ok(message)
}
