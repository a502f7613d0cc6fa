//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "termbars")]
#[command(about = "Terminal spectrum bars for PCM WAV files", long_about = None)]
pub struct Args {
    /// PCM WAV file to visualize
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_positional_path() {
        let args = Args::try_parse_from(["termbars", "song.wav"]).unwrap();
        assert_eq!(args.path, PathBuf::from("song.wav"));
    }

    #[test]
    fn test_path_required() {
        assert!(Args::try_parse_from(["termbars"]).is_err());
    }

    #[test]
    fn test_no_flags_accepted() {
        assert!(Args::try_parse_from(["termbars", "--record", "5", "song.wav"]).is_err());
    }
}
