//! Crate error type
//!
//! The simulation itself never fails; errors only come from building a world
//! out of raw numbers or from reading configuration off disk.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Boundaries with an empty or inverted extent
    #[error("invalid boundaries: x [{xmin}, {xmax}], y [{ymin}, {ymax}]")]
    InvalidBounds {
        xmin: f32,
        xmax: f32,
        ymin: f32,
        ymax: f32,
    },

    /// A tuning value outside its allowed range
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
