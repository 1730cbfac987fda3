// UI layer: a plain read-eval-print loop. Each line is either an exit
// keyword or a user id; ids are handed to `report::validate`. Bad input
// is reported and the prompt comes back, so the loop only ends on exit,
// interrupt or end of input.

use crate::api::ApiClient;
use crate::interrupt::Interrupt;
use crate::models::{ParseUserIdError, UserId};
use crate::report;
use anyhow::Result;
use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};
use std::str::FromStr;
use tracing::debug;

/// Prompt text. The input source appends the `: ` separator.
pub const PROMPT: &str = "Enter the user id (1–10) or 'exit'";

/// Words that end the session, compared case-insensitively.
pub const EXIT_KEYWORDS: [&str; 3] = ["sair", "exit", "q"];

const RULE_WIDTH: usize = 65;

/// What an input source produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Line(String),
    /// Ctrl-C while waiting for input.
    Interrupted,
    /// The input stream was closed.
    EndOfInput,
}

/// Where the loop gets its lines from. Sources that do not draw their own
/// prompt write it to `out`, the loop's console sink.
pub trait LineSource {
    fn read_line<W: Write>(&mut self, prompt: &str, out: &mut W) -> io::Result<Event>;
}

/// Interactive terminal input via `dialoguer`. Ctrl-C at the prompt
/// surfaces as `Event::Interrupted` instead of killing the process.
pub struct TerminalInput;

impl LineSource for TerminalInput {
    fn read_line<W: Write>(&mut self, prompt: &str, _out: &mut W) -> io::Result<Event> {
        match Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => Ok(Event::Line(line)),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(Event::Interrupted),
            Err(err) => Err(err),
        }
    }
}

/// Line-by-line input from any reader, used when stdin is a pipe or file.
/// The prompt is echoed to the output so transcripts look like a terminal
/// run.
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        ReaderInput { reader }
    }
}

impl<R: BufRead> LineSource for ReaderInput<R> {
    fn read_line<W: Write>(&mut self, prompt: &str, out: &mut W) -> io::Result<Event> {
        write!(out, "{}: ", prompt)?;
        out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Event::EndOfInput);
        }
        Ok(Event::Line(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
    }
}

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Lookup(UserId),
}

impl FromStr for Command {
    type Err = ParseUserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if EXIT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(trimmed)) {
            return Ok(Command::Exit);
        }
        trimmed.parse().map(Command::Lookup)
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Keyword,
    Interrupted,
    EndOfInput,
}

/// Main interactive loop on the real terminal (or stdin when piped).
/// Blocks until the session ends. Installs the process Ctrl-C handler.
pub fn main_menu(api: &ApiClient) -> Result<()> {
    let interrupt = Interrupt::install()?;
    let mut out = io::stdout();
    let exit = if io::stdin().is_terminal() {
        run(api, &mut TerminalInput, &interrupt, &mut out)?
    } else {
        run(api, &mut ReaderInput::new(io::stdin().lock()), &interrupt, &mut out)?
    };
    debug!(?exit, "session ended");
    Ok(())
}

/// Run the prompt loop against any input source and output sink.
///
/// Only failures to read input or write output are returned as errors;
/// everything that goes wrong inside a lookup is printed and the loop
/// continues. `interrupt` is checked after every read and every lookup.
pub fn run<S, W>(
    api: &ApiClient,
    input: &mut S,
    interrupt: &Interrupt,
    out: &mut W,
) -> io::Result<Exit>
where
    S: LineSource,
    W: Write,
{
    print_banner(api, out)?;

    loop {
        let event = input.read_line(PROMPT, out)?;
        if interrupt.is_triggered() {
            return interrupted(out);
        }
        let line = match event {
            Event::Line(line) => line,
            Event::Interrupted => return interrupted(out),
            Event::EndOfInput => {
                writeln!(out, "\n\n👋 End of input, shutting down...")?;
                return Ok(Exit::EndOfInput);
            }
        };

        match line.parse::<Command>() {
            Ok(Command::Exit) => {
                writeln!(out, "\n👋 Shutting down...")?;
                return Ok(Exit::Keyword);
            }
            Ok(Command::Lookup(id)) => {
                report::validate(api, &id, interrupt, out)?;
                if interrupt.is_triggered() {
                    return interrupted(out);
                }
            }
            Err(err) => {
                debug!(%err, "rejected input");
                writeln!(out, "⚠ Enter a valid number or 'exit'.")?;
            }
        }
        out.flush()?;
    }
}

fn interrupted<W: Write>(out: &mut W) -> io::Result<Exit> {
    writeln!(out, "\n\n👋 Program interrupted by user.")?;
    out.flush()?;
    Ok(Exit::Interrupted)
}

fn print_banner<W: Write>(api: &ApiClient, out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "API VALIDATION PROJECT")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "\nUsers: {}", api.settings().users_url)?;
    writeln!(out, "Posts: {}\n", api.settings().posts_url)?;
    out.flush()
}
