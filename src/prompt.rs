//! Interactive Input
//!
//! Title picking and notes entry for the CLI. Readers and writers are
//! passed in so the prompts can be driven from tests.

use std::io::{BufRead, Write};

use thiserror::Error;

/// Errors while reading interactive input
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("candidates is empty")]
    NothingToChoose,

    #[error("cannot read index")]
    CannotReadIndex,

    #[error("invalid index: {0}")]
    InvalidIndex(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// List `candidates` with 1-based indexes and read a choice.
///
/// An empty answer picks the first candidate.
pub fn choose<R: BufRead, W: Write>(
    candidates: &[String],
    mut input: R,
    mut output: W,
) -> Result<String, PromptError> {
    if candidates.is_empty() {
        return Err(PromptError::NothingToChoose);
    }

    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(output, "{}: {}", i + 1, candidate)?;
    }
    write!(output, "Choose index (default 1): ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::CannotReadIndex);
    }

    let answer = line.trim();
    let index = if answer.is_empty() {
        1
    } else {
        answer
            .parse::<usize>()
            .map_err(|_| PromptError::InvalidIndex(answer.to_string()))?
    };

    if index < 1 || index > candidates.len() {
        return Err(PromptError::InvalidIndex(answer.to_string()));
    }

    Ok(candidates[index - 1].clone())
}

/// Read notes until EOF, one line per input line
pub fn read_notes<R: BufRead>(input: R) -> Result<String, PromptError> {
    let mut notes = String::new();
    for line in input.lines() {
        notes.push_str(&line?);
        notes.push('\n');
    }
    Ok(notes)
}
