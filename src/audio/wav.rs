//! PCM container decoding into per-channel sample buffers.

use log::{debug, warn};
use std::time::Duration;

use super::reader::ByteReader;
use crate::error::{Result, VisualizerError};
use crate::params::analysis_constants::{
    BITS_PER_SAMPLE_OFFSET, CHANNELS_OFFSET, DATA_TAG, HEADER_LEN, SAMPLE_RATE_OFFSET,
    SUBCHUNK_SCAN_START,
};

/// Normalized samples for one channel, range [-1, 1)
pub type ChannelBuffer = Vec<f64>;

/// Header information needed to interpret the PCM payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMetadata {
    /// Samples per second per channel (Hz)
    pub sample_rate: u32,

    /// Interleaved channel count
    pub num_channels: u16,

    /// Sample width: 8, 16, 24 or 32
    pub bits_per_sample: u16,

    /// PCM payload size across all channels (bytes)
    pub data_size_bytes: u32,
}

impl AudioMetadata {
    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.bits_per_sample / 8)
    }

    /// Bytes per interleaved frame (one sample for every channel)
    pub fn block_align(&self) -> usize {
        self.bytes_per_sample() * usize::from(self.num_channels)
    }

    /// Whole frames in the payload; a trailing partial frame is not counted
    pub fn samples_per_channel(&self) -> usize {
        self.data_size_bytes as usize / usize::from(self.num_channels) / self.bytes_per_sample()
    }

    /// Playback length of the payload
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples_per_channel() as f64 / f64::from(self.sample_rate))
    }
}

/// Decoded audio file: metadata plus one buffer per channel
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub metadata: AudioMetadata,
    /// Indexed by channel; all buffers share one length
    pub channels: Vec<ChannelBuffer>,
}

impl DecodedAudio {
    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }
}

/// Decode a PCM container held in memory
///
/// Header fields sit at fixed offsets; the payload is located by scanning
/// for the `data` tag, followed by its little-endian length.
pub fn decode(bytes: &[u8]) -> Result<DecodedAudio> {
    if bytes.len() < HEADER_LEN {
        return Err(VisualizerError::Format(format!(
            "file is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }

    let mut reader = ByteReader::new(bytes);
    let num_channels = reader.u16_at(CHANNELS_OFFSET)?;
    let sample_rate = reader.u32_at(SAMPLE_RATE_OFFSET)?;
    let bits_per_sample = reader.u16_at(BITS_PER_SAMPLE_OFFSET)?;

    if num_channels == 0 {
        return Err(VisualizerError::Format(
            "channel count must be > 0".to_string(),
        ));
    }
    if !matches!(bits_per_sample, 8 | 16 | 24 | 32) {
        return Err(VisualizerError::Format(format!(
            "unsupported sample width of {} bits",
            bits_per_sample
        )));
    }

    reader.seek(SUBCHUNK_SCAN_START)?;
    let tag_pos = reader
        .find_tag(DATA_TAG)
        .ok_or_else(|| VisualizerError::Format("no data chunk found".to_string()))?;
    let declared_size = reader.read_u32_le().map_err(|_| {
        VisualizerError::Format(format!(
            "data chunk at offset {} has no length field",
            tag_pos
        ))
    })?;

    let available = reader.remaining();
    let data_size_bytes = if declared_size as usize > available {
        warn!(
            "data chunk declares {} bytes but only {} are present, decoding what is there",
            declared_size, available
        );
        available as u32
    } else {
        declared_size
    };

    let metadata = AudioMetadata {
        sample_rate,
        num_channels,
        bits_per_sample,
        data_size_bytes,
    };
    debug!(
        "data chunk at offset {}: {:?}, {} samples per channel",
        tag_pos,
        metadata,
        metadata.samples_per_channel()
    );

    let payload = reader.take(data_size_bytes as usize)?;
    let channels = deinterleave(payload, &metadata);

    Ok(DecodedAudio { metadata, channels })
}

/// Split interleaved PCM frames into one normalized buffer per channel
fn deinterleave(payload: &[u8], metadata: &AudioMetadata) -> Vec<ChannelBuffer> {
    let bytes_per_sample = metadata.bytes_per_sample();
    let num_channels = usize::from(metadata.num_channels);
    let frames = metadata.samples_per_channel();

    let mut channels: Vec<ChannelBuffer> = (0..num_channels)
        .map(|_| Vec::with_capacity(frames))
        .collect();

    // chunks_exact drops the trailing partial frame
    for frame in payload.chunks_exact(metadata.block_align()).take(frames) {
        for (channel, group) in channels.iter_mut().zip(frame.chunks_exact(bytes_per_sample)) {
            channel.push(sample_to_f64(group));
        }
    }

    channels
}

/// Convert one little-endian sample group to [-1, 1)
///
/// 8-bit samples are unsigned with a 128 offset; wider samples are two's
/// complement at their own width.
fn sample_to_f64(group: &[u8]) -> f64 {
    let bits = (group.len() * 8) as u32;
    let raw = group
        .iter()
        .rev()
        .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));

    let value = if bits == 8 {
        raw as i32 - 128
    } else {
        let shift = 32 - bits;
        ((raw << shift) as i32) >> shift
    };

    f64::from(value) / f64::from(1u32 << (bits - 1))
}
