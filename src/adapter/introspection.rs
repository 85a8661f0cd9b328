//! Playback-synchronized introspection
//!
//! The host plays a buffer while the engine is already computing the next
//! one, so "the engine's current state" is up to one buffer ahead of what
//! the listener hears. The engine keeps per-tick snapshots for the playing
//! and the next buffer; these reads forward the host's [`PlaybackCursor`]
//! so that the engine can answer from the right snapshot. Nothing is cached
//! here.

use super::SidAdapter;
use crate::engine::SidEngine;
use crate::host::{HostPlayer, PlaybackCursor};

/// Scale from 16-bit trace samples to `-1.0..1.0`
const TRACE_SCALE: f32 = 32768.0;

/// Trace buffers of the last computed frame
///
/// The view borrows the adapter, so it cannot outlive the next
/// [`SidAdapter::step`]; copy samples out with [`TraceStreams::copy_stream`]
/// if they are needed longer.
#[derive(Debug, Clone)]
pub struct TraceStreams<'a> {
    streams: Vec<&'a [i16]>,
    cursor: PlaybackCursor,
    traced: bool,
}

impl<'a> TraceStreams<'a> {
    /// Number of streams (4 per chip: three voices plus digi output)
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// True when the engine exposes no streams
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Raw samples of one stream
    pub fn stream(&self, index: usize) -> Option<&'a [i16]> {
        self.streams.get(index).copied()
    }

    /// One sample scaled to `-1.0..1.0`
    pub fn read_float(&self, index: usize, sample: usize) -> Option<f32> {
        self.stream(index)
            .and_then(|s| s.get(sample))
            .map(|&v| v as f32 / TRACE_SCALE)
    }

    /// Copy a stream into `out`; returns the number of samples copied
    pub fn copy_stream(&self, index: usize, out: &mut [i16]) -> usize {
        match self.stream(index) {
            Some(samples) => {
                let n = samples.len().min(out.len());
                out[..n].copy_from_slice(&samples[..n]);
                n
            }
            None => 0,
        }
    }

    /// Iterate over all streams
    pub fn iter(&self) -> impl Iterator<Item = &'a [i16]> + '_ {
        self.streams.iter().copied()
    }

    /// Host cursor at the time the view was taken
    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// False if the track was started without tracing (buffers are stale)
    pub fn is_traced(&self) -> bool {
        self.traced
    }
}

impl<E: SidEngine, H: HostPlayer> SidAdapter<E, H> {
    /// SID register as heard at the host's current playback position
    pub fn sid_register(&self, sid_idx: u8, reg: u16) -> u16 {
        self.sid_register_at(sid_idx, reg, self.host.playback_cursor())
    }

    /// SID register at an explicit cursor
    pub fn sid_register_at(&self, sid_idx: u8, reg: u16, cursor: PlaybackCursor) -> u16 {
        self.engine
            .sid_register(sid_idx, reg, cursor.buffer_index, cursor.tick)
    }

    /// Voice output (envelope) level at the host's current playback position
    pub fn voice_level(&self, sid_idx: u8, voice_idx: u8) -> u16 {
        self.voice_level_at(sid_idx, voice_idx, self.host.playback_cursor())
    }

    /// Voice output (envelope) level at an explicit cursor
    pub fn voice_level_at(&self, sid_idx: u8, voice_idx: u8, cursor: PlaybackCursor) -> u16 {
        self.engine
            .voice_level(sid_idx, voice_idx, cursor.buffer_index, cursor.tick)
    }

    /// Number of trace streams the engine exposes
    pub fn trace_stream_count(&self) -> usize {
        self.engine.trace_stream_count()
    }

    /// Trace buffers of the last computed frame
    ///
    /// Only meaningful when the track was started with tracing enabled.
    pub fn trace_streams(&self) -> TraceStreams<'_> {
        if !self.trace_enabled {
            log::debug!("trace streams requested but tracing is off for this track");
        }
        let count = self.engine.trace_stream_count();
        let streams = (0..count)
            .map(|i| self.engine.trace_stream(i).unwrap_or(&[]))
            .collect();
        TraceStreams {
            streams,
            cursor: self.host.playback_cursor(),
            traced: self.trace_enabled,
        }
    }

    /// True if the running track records trace streams
    pub fn is_tracing(&self) -> bool {
        self.trace_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(streams: Vec<&'a [i16]>) -> TraceStreams<'a> {
        TraceStreams {
            streams,
            cursor: PlaybackCursor::new(1, 2),
            traced: true,
        }
    }

    #[test]
    fn test_read_float_scaling() {
        let voice = [0i16, 16384, -32768, 32767];
        let streams = view(vec![&voice[..]]);
        assert_eq!(streams.read_float(0, 0), Some(0.0));
        assert_eq!(streams.read_float(0, 1), Some(0.5));
        assert_eq!(streams.read_float(0, 2), Some(-1.0));
        assert_eq!(streams.read_float(0, 4), None);
        assert_eq!(streams.read_float(1, 0), None);
    }

    #[test]
    fn test_copy_stream() {
        let a = [1i16, 2, 3, 4];
        let b = [9i16; 2];
        let streams = view(vec![&a[..], &b[..]]);

        let mut out = [0i16; 3];
        assert_eq!(streams.copy_stream(0, &mut out), 3);
        assert_eq!(out, [1, 2, 3]);

        let mut out = [0i16; 4];
        assert_eq!(streams.copy_stream(1, &mut out), 2);
        assert_eq!(out, [9, 9, 0, 0]);
        assert_eq!(streams.copy_stream(5, &mut out), 0);
        assert_eq!(streams.len(), 2);
        assert_eq!(streams.cursor(), PlaybackCursor::new(1, 2));
    }
}
