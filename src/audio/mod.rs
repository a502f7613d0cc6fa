//! Audio decoding and spectrum analysis.
//!
//! Decodes PCM containers into per-channel buffers, plans the analysis
//! window against the sample rate, and folds FFT magnitudes into bars.

mod fft;
mod rates;
mod reader;
mod wav;

// Re-export public types
pub use fft::SpectralBinner;
pub use rates::{plan, plan_with, RatePlan};
pub use reader::ByteReader;
pub use wav::{decode, AudioMetadata, ChannelBuffer, DecodedAudio};
