//! Frame loop tying decoding, analysis and rendering together.

mod pacing;

use log::{debug, info};
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::audio::{self, RatePlan, SpectralBinner};
use crate::display::{self, CrosstermSurface, TerminalGuard, TerminalSurface};
use crate::error::{Result, VisualizerError};
use crate::params::AnalysisConfig;

pub use pacing::{register_stop_signals, FramePacer, TerminalPacer};

/// Lifecycle of a visualization run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Initializing,
    Running,
    Terminated,
}

/// Frame loop over one channel's samples
pub struct Visualizer {
    plan: RatePlan,
    state: DriverState,
    binner: Option<SpectralBinner>,
}

impl Visualizer {
    pub fn new(plan: RatePlan) -> Self {
        Self {
            plan,
            state: DriverState::Idle,
            binner: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn plan(&self) -> RatePlan {
        self.plan
    }

    /// Plan the transform, then switch the terminal over via `enter`
    ///
    /// The value `enter` returns (normally a `TerminalGuard`) is handed back
    /// so the caller controls when the terminal is restored.
    pub fn initialize<G>(&mut self, enter: impl FnOnce() -> io::Result<G>) -> Result<G> {
        self.transition(DriverState::Initializing);
        self.binner = Some(SpectralBinner::new(self.plan.window_len)?);
        Ok(enter()?)
    }

    /// Run frames from the start of `samples` to the end
    ///
    /// The final window is zero-padded when `samples` is not a whole number
    /// of windows. Returns the number of frames drawn.
    pub fn run<S, P>(&mut self, samples: &[f64], surface: &mut S, pacer: &mut P) -> Result<usize>
    where
        S: TerminalSurface + ?Sized,
        P: FramePacer + ?Sized,
    {
        let mut binner = self.binner.take().ok_or_else(|| {
            VisualizerError::Config("visualizer must be initialized before running".to_string())
        })?;
        self.transition(DriverState::Running);

        let result = self.frame_loop(&mut binner, samples, surface, pacer);

        // Scratch buffers go with the binner
        drop(binner);
        self.transition(DriverState::Terminated);
        result
    }

    fn frame_loop<S, P>(
        &self,
        binner: &mut SpectralBinner,
        samples: &[f64],
        surface: &mut S,
        pacer: &mut P,
    ) -> Result<usize>
    where
        S: TerminalSurface + ?Sized,
        P: FramePacer + ?Sized,
    {
        let window_len = self.plan.window_len;
        let interval = Duration::from_millis(self.plan.refresh_interval_ms);

        let mut bins: Vec<u32> = Vec::new();
        let mut last_width: Option<u16> = None;
        let mut padded: Vec<f64> = Vec::new();
        let mut frames = 0;

        for offset in (0..samples.len()).step_by(window_len) {
            let (width, _) = surface.size()?;
            if last_width != Some(width) {
                let num_bars = usize::from(width).min(binner.max_bins());
                bins = vec![0; num_bars];
                last_width = Some(width);
                debug!("Terminal width {} -> {} bars", width, num_bars);
            }

            let end = offset + window_len;
            let window = if end <= samples.len() {
                &samples[offset..end]
            } else {
                padded.clear();
                padded.extend_from_slice(&samples[offset..]);
                padded.resize(window_len, 0.0);
                padded.as_slice()
            };

            if !bins.is_empty() {
                binner.bin_into(window, &mut bins)?;
            }
            display::render(surface, &bins)?;
            frames += 1;

            if !pacer.wait(interval)? {
                info!("Playback stopped at frame {}", frames);
                break;
            }
        }

        Ok(frames)
    }

    fn transition(&mut self, next: DriverState) {
        debug!("Visualizer: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Read, decode and visualize an audio file in the current terminal
///
/// Every failure before the frame loop (unreadable file, bad container,
/// degenerate rate) is returned before the terminal is touched.
pub fn visualize_file(path: &Path, config: &AnalysisConfig) -> Result<usize> {
    let bytes = std::fs::read(path).map_err(|source| VisualizerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = audio::decode(&bytes)?;
    drop(bytes);

    let metadata = decoded.metadata;
    info!(
        "Audio: {} Hz, {} channel(s), {}-bit, {:.2}s",
        metadata.sample_rate,
        metadata.num_channels,
        metadata.bits_per_sample,
        metadata.duration().as_secs_f64()
    );

    let samples = decoded.channel(config.channel).ok_or_else(|| {
        VisualizerError::Config(format!(
            "channel {} requested, file has {}",
            config.channel, metadata.num_channels
        ))
    })?;

    let plan = audio::plan_with(config, metadata.sample_rate)?;
    info!(
        "Analysis: {} samples per frame, {} ms refresh",
        plan.window_len, plan.refresh_interval_ms
    );

    // Signals must be caught before raw mode, or a kill skips the guard
    let stop = register_stop_signals()?;

    let mut visualizer = Visualizer::new(plan);
    let _guard = visualizer.initialize(TerminalGuard::acquire)?;
    let mut surface = CrosstermSurface::new(io::stdout().lock());
    visualizer.run(samples, &mut surface, &mut TerminalPacer::new(stop))
}
