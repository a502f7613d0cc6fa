//! termbars library - Terminal spectrum visualizer for PCM audio

pub mod audio;
pub mod cli;
pub mod display;
pub mod error;
pub mod params;
pub mod visualizer;

pub use error::{Result, VisualizerError};
