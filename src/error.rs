//! Error type shared by decoding, planning, analysis and display.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualizerError {
    /// Malformed or truncated audio container
    #[error("Format error: {0}")]
    Format(String),

    /// Input file could not be read
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal could not be set up, drawn to or restored
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Degenerate parameters (zero sample rate, bad bin count, etc.)
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
