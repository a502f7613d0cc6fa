//! Forward FFT and folding of the magnitude spectrum into display bins.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::error::{Result, VisualizerError};

/// FFT plan plus scratch buffers for one window length
///
/// Built once and reused every frame; nothing carries over between calls
/// except buffer allocations, which are fully overwritten.
pub struct SpectralBinner {
    window_len: usize,
    fft: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl SpectralBinner {
    /// Plan a forward transform of `window_len` samples
    pub fn new(window_len: usize) -> Result<Self> {
        if window_len < 2 {
            return Err(VisualizerError::Config(format!(
                "window length must be >= 2, got {}",
                window_len
            )));
        }

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(window_len);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Ok(Self {
            window_len,
            fft,
            buffer: vec![Complex::new(0.0, 0.0); window_len],
            scratch,
        })
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Most bins the lower half of the spectrum can fill (one coefficient each)
    pub fn max_bins(&self) -> usize {
        self.window_len / 2
    }

    /// Bin `window` into a freshly allocated array of `num_bins` bar heights
    pub fn bin(&mut self, window: &[f64], num_bins: usize) -> Result<Vec<u32>> {
        let mut bins = vec![0; num_bins];
        self.bin_into(window, &mut bins)?;
        Ok(bins)
    }

    /// Bin `window` into `bins`, one bar height per element
    ///
    /// Rectangular window, no normalization. Only the lower half of the
    /// spectrum is used; it is split into `bins.len()` equal groups and
    /// coefficients past the last whole group are dropped. Each bar is the
    /// mean magnitude of its group, truncated toward zero.
    pub fn bin_into(&mut self, window: &[f64], bins: &mut [u32]) -> Result<()> {
        if window.len() != self.window_len {
            return Err(VisualizerError::Config(format!(
                "window has {} samples, transform expects {}",
                window.len(),
                self.window_len
            )));
        }
        let num_bins = bins.len();
        if num_bins == 0 || num_bins > self.max_bins() {
            return Err(VisualizerError::Config(format!(
                "bin count must be in 1..={}, got {}",
                self.max_bins(),
                num_bins
            )));
        }

        for (slot, &sample) in self.buffer.iter_mut().zip(window) {
            *slot = Complex::new(sample, 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        // Upper half mirrors the lower half for real input
        let bin_space = self.max_bins() / num_bins;
        let groups = self.buffer[..num_bins * bin_space].chunks_exact(bin_space);
        for (bar, group) in bins.iter_mut().zip(groups) {
            let mean = group.iter().map(|c| c.norm()).sum::<f64>() / bin_space as f64;
            *bar = mean as u32;
        }

        Ok(())
    }
}
