//! WAV file capture

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::adapter::{FrameResult, SidAdapter};
use crate::engine::SidEngine;
use crate::host::HostPlayer;
use crate::{BridgeError, Result};

/// Output channels of the engine (interleaved stereo)
const CHANNELS: u16 = 2;

/// 16-bit stereo WAV writer fed with engine frames
pub struct WavCapture {
    writer: hound::WavWriter<BufWriter<File>>,
    samples_written: u64,
}

impl WavCapture {
    /// Create a WAV file at `path`
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<Self> {
        let spec = hound::WavSpec {
            channels: CHANNELS,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = hound::WavWriter::create(path.as_ref(), spec)
            .map_err(|e| BridgeError::AudioFile(format!("Failed to create WAV file: {}", e)))?;

        Ok(WavCapture {
            writer,
            samples_written: 0,
        })
    }

    /// Append interleaved stereo samples
    pub fn append_frame(&mut self, samples: &[i16]) -> Result<()> {
        for &sample in samples {
            self.writer
                .write_sample(sample)
                .map_err(|e| BridgeError::AudioFile(format!("Failed to write sample: {}", e)))?;
        }
        self.samples_written += samples.len() as u64;
        Ok(())
    }

    /// Append the frame the adapter computed last
    pub fn append_from<E: SidEngine, H: HostPlayer>(
        &mut self,
        adapter: &SidAdapter<E, H>,
    ) -> Result<()> {
        self.append_frame(adapter.sound_buffer())
    }

    /// Samples written so far (both channels counted)
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Finish the file; returns the number of stereo sample pairs
    pub fn finalize(self) -> Result<u64> {
        let pairs = self.samples_written / u64::from(CHANNELS);
        self.writer
            .finalize()
            .map_err(|e| BridgeError::AudioFile(format!("Failed to finalize WAV file: {}", e)))?;
        Ok(pairs)
    }
}

/// Step a started track into a WAV file
///
/// Stops at the end of the song or after `max_frames` frames, whichever
/// comes first. The file is written at the engine's own rate. Returns the
/// number of frames recorded.
pub fn record_to_wav<E: SidEngine, H: HostPlayer, P: AsRef<Path>>(
    adapter: &mut SidAdapter<E, H>,
    output_path: P,
    max_frames: u64,
) -> Result<u64> {
    let rates = adapter.sample_rates().ok_or(BridgeError::NoSession)?;
    let mut capture = WavCapture::create(output_path.as_ref(), rates.engine)?;

    let mut frames = 0;
    while frames < max_frames {
        match adapter.step() {
            FrameResult::Continue(_) => {
                capture.append_from(adapter)?;
                frames += 1;
            }
            FrameResult::EndOfSong => break,
        }
    }

    let pairs = capture.finalize()?;
    log::info!(
        "recorded {} frames ({} samples) to {}",
        frames,
        pairs,
        output_path.as_ref().display()
    );
    Ok(frames)
}
