//! Post-processing hook run after every conform pass.
//!
//! A pipe sees the conformed value before it is stored and may keep it,
//! replace it, or reject the edit outright. Pipes run on the keystroke path:
//! they must be synchronous and cheap, and a failing pipe never blocks the
//! edit (the store logs the error and keeps the unpiped value).

use std::fmt;

/// What the conform pass produced, for pipes that need more than the value.
#[derive(Clone, Copy, Debug)]
pub struct PipeContext<'a> {
    /// The raw field value the pass started from.
    pub raw_value: &'a str,
    /// The value stored before this edit.
    pub previous_value: &'a str,
    /// Caret the conform pass computed, in characters.
    pub caret: usize,
    pub placeholder_char: char,
    pub guide: bool,
    /// Raw character offsets that made it into the conformed value.
    pub consumed_raw_indexes: &'a [usize],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipeOutcome {
    /// Use the conformed value unchanged.
    Keep,
    /// Use a different value. The caret is clamped to it.
    Replace(String),
    /// Use a different value that inserted characters at `piped_indexes`
    /// (character offsets in the new value). The caret moves past inserted
    /// characters that land before it.
    ReplaceTracked {
        value: String,
        piped_indexes: Vec<usize>,
    },
    /// Refuse the edit: the field keeps its previous value and caret.
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipeError {
    /// The pipe was configured with something it cannot interpret.
    InvalidFormat { format: String, token: String },
    /// The pipe could not process this value.
    Failed(String),
}

impl fmt::Display for PipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeError::InvalidFormat { format, token } => {
                write!(f, "unsupported token {token:?} in format {format:?}")
            }
            PipeError::Failed(msg) => write!(f, "pipe failed: {msg}"),
        }
    }
}

impl std::error::Error for PipeError {}

pub trait Pipe: Send + Sync {
    fn pipe(&self, conformed: &str, ctx: &PipeContext<'_>) -> Result<PipeOutcome, PipeError>;
}

impl<F> Pipe for F
where
    F: Fn(&str, &PipeContext<'_>) -> Result<PipeOutcome, PipeError> + Send + Sync,
{
    fn pipe(&self, conformed: &str, ctx: &PipeContext<'_>) -> Result<PipeOutcome, PipeError> {
        self(conformed, ctx)
    }
}
