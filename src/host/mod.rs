//! Host Playback Driver Boundary
//!
//! The host owns the audio output: it calls [`crate::SidAdapter::step`] once
//! per output buffer, knows how large those buffers are and where in the
//! currently playing buffer the listener is.

use crate::adapter::SampleRates;

/// Samples per host tick
pub const TICK_SAMPLES: u32 = 256;

/// Position of the listener within the double-buffered host output
///
/// `buffer_index` selects the half of the double buffer that is playing,
/// `tick` counts [`TICK_SAMPLES`]-sample steps into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackCursor {
    /// Double buffer half (0 or 1)
    pub buffer_index: u8,
    /// Ticks into the playing buffer
    pub tick: u32,
}

impl PlaybackCursor {
    /// Create a cursor
    pub fn new(buffer_index: u8, tick: u32) -> Self {
        PlaybackCursor { buffer_index, tick }
    }

    /// Sample offset into the playing buffer
    pub fn sample_offset(&self) -> u32 {
        self.tick.saturating_mul(TICK_SAMPLES)
    }
}

/// Host audio pipeline as seen by the adapter
pub trait HostPlayer {
    /// Samples per output buffer (one engine frame)
    fn processor_buffer_size(&self) -> u32;

    /// Where the listener currently is
    fn playback_cursor(&self) -> PlaybackCursor;

    /// Native rate of the output device, if known
    fn native_sample_rate(&self) -> Option<u32>;

    /// Stop playback automatically after `millis`
    fn set_playback_timeout(&mut self, millis: u64);

    /// Set up resampling from the engine rate to the target rate
    fn configure_resampler(&mut self, rates: SampleRates);
}
