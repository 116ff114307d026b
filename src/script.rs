//! Intent scripts
//!
//! A script is a stream of JSON5 objects, one intent per line:
//!
//! ```text
//! // banner.jts
//! {op: "fill_all", color: "blue"}
//! {op: "paint", row: 0, col: 3}
//! {op: "shift", direction: "left"}
//! ```
//!
//! Blank lines and lines starting with `//` are skipped.

use crate::session::{EditorSession, Intent, Outcome, SessionError};
use std::io::{BufRead, BufReader, Read};
use thiserror::Error;

/// Error type for script loading and execution.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Apply {
        line: usize,
        #[source]
        source: SessionError,
    },
}

/// An intent with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub line: usize,
    pub intent: Intent,
}

/// Parse a single JSON5 line into an intent.
pub fn parse_line(line: &str, line_number: usize) -> Result<Intent, ScriptError> {
    json5::from_str(line)
        .map_err(|e| ScriptError::Parse { line: line_number, message: e.to_string() })
}

/// Parse a whole script. Stops at the first malformed line.
pub fn parse_script<R: Read>(reader: R) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        let line_number = index + 1;
        steps.push(ScriptStep { line: line_number, intent: parse_line(trimmed, line_number)? });
    }
    Ok(steps)
}

/// Apply steps in order. Stops at the first rejected intent.
///
/// Returns the outcome of every applied step.
pub fn run_script(
    session: &mut EditorSession,
    steps: Vec<ScriptStep>,
) -> Result<Vec<Outcome>, ScriptError> {
    let mut outcomes = Vec::with_capacity(steps.len());
    for step in steps {
        let outcome = session
            .apply(step.intent)
            .map_err(|source| ScriptError::Apply { line: step.line, source })?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
