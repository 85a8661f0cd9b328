//! Per-buffer frame step

use std::time::Instant;

use super::{SessionState, SidAdapter};
use crate::engine::SidEngine;
use crate::host::HostPlayer;
use crate::metadata::ext_ascii_string;

/// Outcome of one frame step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResult {
    /// A frame was computed; carries the sample count
    Continue(u32),
    /// The track has ended; the host should stop stepping
    EndOfSong,
}

impl FrameResult {
    /// Host status code: 0 = keep going, 1 = song ended
    pub fn code(&self) -> u8 {
        match self {
            FrameResult::Continue(_) => 0,
            FrameResult::EndOfSong => 1,
        }
    }

    /// True at end of song
    pub fn is_end(&self) -> bool {
        matches!(self, FrameResult::EndOfSong)
    }
}

impl<E: SidEngine, H: HostPlayer> SidAdapter<E, H> {
    /// Compute one host buffer's worth of samples
    ///
    /// The samples are left in the engine's sound buffer
    /// ([`SidAdapter::sound_buffer`]). A sample count of zero or less from
    /// the engine ends the song for good; there are no retries. Outside the
    /// `Playing` state the engine is not called at all.
    pub fn step(&mut self) -> FrameResult {
        if self.state != SessionState::Playing {
            return FrameResult::EndOfSong;
        }

        self.hook.before_frame(&mut self.engine);

        let started = Instant::now();
        let samples = self.engine.compute_audio_samples();
        if samples <= 0 {
            self.digi.reset();
            self.state = SessionState::Ended;
            log::debug!("end of song after {} frames", self.frames);
            return FrameResult::EndOfSong;
        }
        self.timing.record(started.elapsed());
        self.frames += 1;

        let rate = f64::from(self.engine.digi_rate());
        let label = ext_ascii_string(self.engine.digi_type_desc());
        if let Some(status) = self.digi.observe(rate, &label) {
            self.digi_status = status;
        }

        FrameResult::Continue(samples as u32)
    }
}
