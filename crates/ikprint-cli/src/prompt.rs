//! Operator interaction over a line-based terminal.
//!
//! Everything here is generic over the input and output streams so the
//! interactive flow can be driven from tests.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use ikprint_core::{RefinementSession, SessionOutcome, SessionState};
use ikprint_ingest::document_label;
use ikprint_output::OutputSink;
use tracing::{debug, info};

use crate::logging::redact_value;

pub const NAME_PROMPT: &str = "Name: ";
pub const EDIT_PROMPT: &str = "[RETURN] quit;\n[+] add; [-] remove space separated list: ";

/// Width the file names are right-aligned to in the selection list.
const LABEL_WIDTH: usize = 50;

/// Writes `prompt` and reads one line.
///
/// Returns `None` at end of input. The line terminator is stripped.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{prompt}").context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("read input")?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Asks for the patient name used to find the admission document.
pub fn ask_patient_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    match read_line(input, output, NAME_PROMPT)? {
        Some(name) => Ok(name.to_lowercase()),
        None => bail!("no patient name given"),
    }
}

/// Why a selection entry was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionProblem {
    NotANumber,
    OutOfRange { count: usize },
}

impl fmt::Display for SelectionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "You must select a number"),
            Self::OutOfRange { count } => {
                write!(f, "Your selection must be within 1 and {count}")
            }
        }
    }
}

/// Parses a 1-based selection among `count` entries into a 0-based index.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, SelectionProblem> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(SelectionProblem::NotANumber);
    }
    match input.parse::<usize>() {
        Ok(choice) if (1..=count).contains(&choice) => Ok(choice - 1),
        _ => Err(SelectionProblem::OutOfRange { count }),
    }
}

/// Picks one document among several matches.
///
/// A single match is returned without asking.
pub fn select_document<R: BufRead, W: Write>(
    mut matches: Vec<PathBuf>,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf> {
    if matches.len() <= 1 {
        return matches.pop().context("no documents to choose from");
    }

    let count = matches.len();
    let listing: Vec<String> = matches
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let label = document_label(path);
            format!("[{:>2}]: {label:.>LABEL_WIDTH$}", idx + 1)
        })
        .collect();
    let prompt = format!("Select correct file (1-{count}): ");

    loop {
        for line in &listing {
            writeln!(output, "{line}").context("write selection list")?;
        }
        let Some(answer) = read_line(input, output, &prompt)? else {
            bail!("document selection aborted");
        };
        match parse_selection(&answer, count) {
            Ok(idx) => {
                let chosen = matches.swap_remove(idx);
                info!(
                    document = redact_value(&document_label(&chosen)),
                    "document selected"
                );
                return Ok(chosen);
            }
            Err(problem) => {
                writeln!(output, "!! {problem}").context("write selection error")?;
            }
        }
    }
}

/// Runs the edit loop until the operator enters an empty line.
///
/// Every rendering is shown through `preview` before the command prompt.
/// End of input finishes the session like an empty line.
pub fn run_refinement<R: BufRead, W: Write>(
    mut session: RefinementSession,
    input: &mut R,
    output: &mut W,
    preview: &mut dyn OutputSink,
) -> Result<SessionOutcome> {
    let mut rounds = 0usize;
    while !session.is_done() {
        preview
            .deliver(session.rendering())
            .context("show page preview")?;
        writeln!(output).context("write prompt")?;

        match read_line(input, output, EDIT_PROMPT)? {
            Some(line) => {
                rounds += 1;
                if session.submit(&line) == SessionState::Done {
                    break;
                }
                debug!(
                    round = rounds,
                    codes = redact_value(&session.codes().to_string()),
                    "code list updated"
                );
            }
            None => {
                writeln!(output).context("write prompt")?;
                session.finish();
            }
        }
    }
    Ok(session.into_outcome())
}
