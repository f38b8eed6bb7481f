//! Session command parsing
//!
//! One command per line: a verb followed by arguments. Values are the rest
//! of the line, so they may contain spaces. Blank lines and lines starting
//! with `#` are ignored.

use anyhow::{anyhow, bail, Result};
use mushroom_log_core::{BatchField, PhaseKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Show phases, or switch when a key is given
    Phase(Option<PhaseKey>),
    Targets,
    Form,
    Batch { field: BatchField, value: String },
    Set { column: String, value: String },
    Save,
    /// 1-based position as shown by `history`
    Delete(usize),
    Clear { assume_yes: bool },
    History,
    CopyLast,
    CopyAll,
    Csv,
    Quit,
}

/// Parse one input line; `Ok(None)` for blank and comment lines
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "phase" | "phases" => {
            if rest.is_empty() {
                Command::Phase(None)
            } else {
                Command::Phase(Some(rest.parse()?))
            }
        }
        "targets" => Command::Targets,
        "form" | "show" => Command::Form,
        "batch" => {
            let (field, value) = split_key_value(rest, "batch <field> <value>")?;
            Command::Batch {
                field: field.parse()?,
                value,
            }
        }
        "set" => {
            let (column, value) = split_key_value(rest, "set <column> <value>")?;
            Command::Set {
                column: column.to_string(),
                value,
            }
        }
        "save" => Command::Save,
        "delete" | "rm" => {
            let position: usize = rest
                .parse()
                .map_err(|_| anyhow!("usage: delete <n>  (n as listed by `history`)"))?;
            if position == 0 {
                bail!("entries are numbered from 1");
            }
            Command::Delete(position)
        }
        "clear" => Command::Clear {
            assume_yes: matches!(rest, "-y" | "--yes"),
        },
        "history" | "list" => Command::History,
        "copy-last" => Command::CopyLast,
        "copy-all" => Command::CopyAll,
        "csv" | "download" => Command::Csv,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}' (try `help`)", other),
    };

    Ok(Some(command))
}

/// `<key> [value...]`; a missing value means the empty string
fn split_key_value<'a>(rest: &'a str, usage: &str) -> Result<(&'a str, String)> {
    if rest.is_empty() {
        bail!("usage: {}", usage);
    }
    Ok(match rest.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim().to_string()),
        None => (rest, String::new()),
    })
}

pub const HELP: &str = "\
Commands:
  phase [colonization|fruiting|leather]  list phases or switch the active one
  targets                                target parameters of the active phase
  form                                   show batch info and today's entry
  batch <field> <value>                  tentId, species, startDate, sterilization
  set <column> <value>                   fill a column of today's entry
  save                                   save today's entry
  history                                list saved entries
  delete <n>                             delete saved entry n
  clear [-y]                             delete ALL entries and batch info
  copy-last                              copy header + last entry (TSV)
  copy-all                               copy header + all entries (TSV)
  csv                                    download all entries as CSV
  quit                                   leave (data is not kept)";
