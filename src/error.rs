/// Error types for feed generation
///
/// `FeedError` covers every failure the generator can surface: sink I/O,
/// bad configuration, and the precondition on the output directory.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::decoder::DecodeError;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),

    #[error("invalid symbol {0:?}: must be 1-12 ASCII bytes")]
    InvalidSymbol(String),

    #[error("symbol catalog is empty")]
    EmptyCatalog,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    #[error("{0} invariant violations in generated feed")]
    Violations(usize),
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
