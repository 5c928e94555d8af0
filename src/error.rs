use std::{io, path::PathBuf};

use thiserror::Error;

use crate::types::FrameIndex;

/// Fatal failures. Everything else (missing frames, short joint lists,
/// malformed hands) is expected sparse data and never surfaces here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error("capture root must be an object mapping frame indices to records")]
    NotAnObject,

    #[error("frame key `{key}` is not a base-10 non-negative integer")]
    InvalidFrameIndex { key: String },

    #[error("frame key pattern failed to compile")]
    FrameKeyPattern(#[source] regex::Error),

    #[error("frame index {index} appears more than once")]
    DuplicateFrameIndex { index: FrameIndex },

    #[error("target rate must be a positive, finite number of frames per second no higher than 1e6 (got {rate})")]
    InvalidTargetRate { rate: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
