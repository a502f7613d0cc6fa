//! Analysis configuration and constants.

/// Spectrum analysis configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Smallest transform size the rate planner may return (samples)
    /// Below this the bars get too coarse to be useful
    pub min_window_len: usize,

    /// Channel index that gets visualized
    pub channel: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_window_len: analysis_constants::MIN_WINDOW_LEN,
            channel: 0,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration (window floor must be non-zero)
    pub fn validate(&self) -> Result<(), String> {
        if self.min_window_len == 0 {
            return Err("Minimum window length must be > 0".to_string());
        }
        Ok(())
    }
}

/// Container layout and analysis constants
pub mod analysis_constants {
    /// Default transform size floor (samples)
    pub const MIN_WINDOW_LEN: usize = 256;

    /// Time base of the refresh interval
    pub const MS_PER_SECOND: u32 = 1000;

    /// Size of the fixed header, up to and including the bits-per-sample field
    pub const HEADER_LEN: usize = 36;

    /// Byte offset of the channel count (u16 LE)
    pub const CHANNELS_OFFSET: usize = 22;

    /// Byte offset of the sample rate (u32 LE)
    pub const SAMPLE_RATE_OFFSET: usize = 24;

    /// Byte offset of the bits per sample (u16 LE)
    pub const BITS_PER_SAMPLE_OFFSET: usize = 34;

    /// Where the scan for the data sub-block tag starts (first sub-block ID)
    pub const SUBCHUNK_SCAN_START: usize = 12;

    /// Tag marking the PCM payload
    pub const DATA_TAG: &[u8; 4] = b"data";
}
