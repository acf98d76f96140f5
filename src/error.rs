use std::io;
use thiserror::Error;

/// Stream position at the time an error was produced.
#[derive(Debug, Clone, Copy)]
pub struct IoContext {
    pub byte_pos: u64,
    pub fragment_num: u64,
}

/// Caller supplied an out-of-contract value. Checked before any I/O.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("binary quality scores must be at most 63, but found {0}")]
    ScoreOutOfRange(u8),
    #[error("fragment number must be greater than 0, but found {0}")]
    FragmentNumberNotPositive(u64),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("expected {expected} base readings in fragment at {ctx:?}, but found only {actual} before end of stream")]
    TruncatedFragment {
        expected: usize,
        actual: usize,
        ctx: IoContext,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ConvertError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn truncated(expected: usize, actual: usize, ctx: IoContext) -> Self {
        Self::TruncatedFragment {
            expected,
            actual,
            ctx,
        }
    }
}
