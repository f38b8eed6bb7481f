//! Line-oriented session loop
//!
//! Reads commands from any `BufRead` (the terminal or a script file),
//! applies them to the session and prints results plus each newly
//! published notice. A `clear` without `-y` reads its confirmation from the
//! next input line.

use crate::commands::{self, Command, HELP};
use crate::render;
use anyhow::Result;
use mushroom_log_core::{ClearOutcome, Clipboard, MonitorError, Notice, Session};
use std::io::{BufRead, Write};

/// Options for one run of the loop
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    /// Print a prompt before each command
    pub interactive: bool,
    /// Answer yes to every clear-all confirmation
    pub assume_yes: bool,
}

/// What happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: usize,
    pub failures: usize,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, C: Clipboard, R: BufRead, W: Write> {
    session: &'a mut Session<C>,
    input: R,
    out: W,
    options: ShellOptions,
    shown_notices: u64,
}

impl<'a, C: Clipboard, R: BufRead, W: Write> Shell<'a, C, R, W> {
    pub fn new(session: &'a mut Session<C>, input: R, out: W, options: ShellOptions) -> Self {
        let shown_notices = session.notifier().published();
        Self {
            session,
            input,
            out,
            options,
            shown_notices,
        }
    }

    /// Process commands until `quit` or end of input
    pub fn run(mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        loop {
            if self.options.interactive {
                write!(self.out, "mushroom-log [{}]> ", self.session.store().active_phase())?;
                self.out.flush()?;
            }

            let Some(line) = self.read_line()? else {
                break;
            };

            let command = match commands::parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    summary.failures += 1;
                    self.session.notify(Notice::warning(e.to_string()));
                    self.show_notice()?;
                    continue;
                }
            };

            summary.commands += 1;
            log::debug!("Command: {:?}", command);
            let flow = match self.execute(command) {
                Ok(flow) => flow,
                Err(e) => {
                    summary.failures += 1;
                    log::debug!("Command failed: {}", e);
                    Flow::Continue
                }
            };
            self.show_notice()?;

            if let Flow::Quit = flow {
                break;
            }
        }

        log::info!(
            "Session ended: {} commands, {} failed, {} entries discarded",
            summary.commands,
            summary.failures,
            self.session.store().len()
        );
        Ok(summary)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Run one command. Store and export failures come back as `Err` after
    /// the session has published their notice.
    fn execute(&mut self, command: Command) -> std::result::Result<Flow, MonitorError> {
        match command {
            Command::Help => self.print(HELP)?,
            Command::Phase(None) => {
                let text = render::phases(self.session.store().active_phase());
                self.print(text.trim_end())?;
            }
            Command::Phase(Some(key)) => {
                self.session.select_phase(key);
                let phase = self.session.active_phase();
                let text = format!("{}\n{}", phase.title, render::targets(phase).trim_end());
                self.print(&text)?;
            }
            Command::Targets => {
                let text = render::targets(self.session.active_phase());
                self.print(text.trim_end())?;
            }
            Command::Form => {
                let text = render::form(&*self.session);
                self.print(&text)?;
            }
            Command::Batch { field, value } => self.session.set_batch_field(field, value),
            Command::Set { column, value } => {
                let phase = self.session.active_phase();
                if let Err(e) = phase.require_column(&column) {
                    self.session.notify(Notice::warning(e.to_string()));
                    return Err(e);
                }
                self.session.set_entry_field(column, value);
            }
            Command::Save => {
                self.session.save_entry()?;
            }
            Command::Delete(position) => self.session.delete_entry(position - 1)?,
            Command::Clear { assume_yes } => {
                let answer = if assume_yes || self.options.assume_yes {
                    true
                } else {
                    self.ask(mushroom_log_core::CLEAR_ALL_PROMPT)?
                };
                if self.session.clear_all(|_| answer) == ClearOutcome::ConfirmationDeclined {
                    self.print("Nothing deleted.")?;
                }
            }
            Command::History => {
                let text = render::history(self.session.store());
                self.print(&text)?;
            }
            Command::CopyLast => self.session.copy_last_entry()?,
            Command::CopyAll => {
                self.session.copy_all_entries()?;
            }
            Command::Csv => {
                let path = self.session.export_csv()?;
                self.print(&format!("Wrote {}", path.display()))?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Ask a yes/no question; the answer is the next input line
    fn ask(&mut self, prompt: &str) -> std::result::Result<bool, MonitorError> {
        write!(self.out, "{} [y/N] ", prompt)?;
        self.out.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        if !self.options.interactive {
            writeln!(self.out)?;
        }
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn print(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    fn show_notice(&mut self) -> std::io::Result<()> {
        let published = self.session.notifier().published();
        if published == self.shown_notices {
            return Ok(());
        }
        self.shown_notices = published;
        if let Some(notice) = self.session.notifier().latest() {
            writeln!(self.out, "{}", notice.text)?;
        }
        Ok(())
    }
}
