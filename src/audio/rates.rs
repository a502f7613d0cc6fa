//! Analysis window length and screen refresh interval from the sample rate.

use crate::error::{Result, VisualizerError};
use crate::params::{analysis_constants::MS_PER_SECOND, AnalysisConfig};

/// Samples analysed per frame and the time between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePlan {
    /// Transform size (samples)
    pub window_len: usize,

    /// Time one window covers (milliseconds)
    pub refresh_interval_ms: u64,
}

/// Plan with the default analysis configuration
pub fn plan(sample_rate: u32) -> Result<RatePlan> {
    plan_with(&AnalysisConfig::default(), sample_rate)
}

/// Reduce `sample_rate : 1000` to lowest terms, then double both
/// sides until the window reaches the configured floor.
///
/// `window_len / sample_rate` and `refresh_interval_ms / 1000` stay the same
/// duration exactly, so pacing never drifts against the audio.
pub fn plan_with(config: &AnalysisConfig, sample_rate: u32) -> Result<RatePlan> {
    config.validate().map_err(VisualizerError::Config)?;
    if sample_rate == 0 {
        return Err(VisualizerError::Config(
            "sample rate must be > 0".to_string(),
        ));
    }

    let g = gcd(MS_PER_SECOND, sample_rate);
    let mut window_len = (sample_rate / g) as usize;
    let mut refresh_interval_ms = u64::from(MS_PER_SECOND / g);

    while window_len < config.min_window_len {
        window_len *= 2;
        refresh_interval_ms *= 2;
    }

    Ok(RatePlan {
        window_len,
        refresh_interval_ms,
    })
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
