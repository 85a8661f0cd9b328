//! Host supplied options
//!
//! Options arrive from the host as loosely typed key/value blobs; the field
//! names follow the host's conventions (`traceSID`, timeout in seconds).

use serde::{Deserialize, Serialize};

use crate::{BridgeError, Result};

/// Track value meaning "no explicit selection" (engine default track)
pub const NO_TRACK: i32 = -1;

/// Options for starting a track
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Track (subsong) to play
    pub track: Option<i32>,
    /// Record per-voice trace streams while playing
    #[serde(rename = "traceSID")]
    pub trace_sid: Option<bool>,
    /// Stop playback after this many seconds
    pub timeout: Option<f64>,
}

impl PlaybackOptions {
    /// Parse options from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let options: PlaybackOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Select a track
    pub fn with_track(mut self, track: i32) -> Self {
        self.track = Some(track);
        self
    }

    /// Enable or disable trace streams for this track
    pub fn with_trace_sid(mut self, trace: bool) -> Self {
        self.trace_sid = Some(trace);
        self
    }

    /// Set a playback timeout in seconds
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Track to start, [`NO_TRACK`] when none was given
    pub fn track_or_default(&self) -> i32 {
        self.track.unwrap_or(NO_TRACK)
    }

    /// Trace setting, falling back to the adapter wide scope flag
    pub fn trace_sid_or(&self, scope_enabled: bool) -> bool {
        self.trace_sid.unwrap_or(scope_enabled)
    }

    /// Timeout converted to milliseconds
    pub fn timeout_millis(&self) -> Option<u64> {
        self.timeout.map(|secs| (secs * 1000.0).round() as u64)
    }

    /// Check option values
    pub fn validate(&self) -> Result<()> {
        if let Some(secs) = self.timeout {
            if !secs.is_finite() || secs < 0.0 {
                return Err(BridgeError::Config(format!(
                    "timeout must be a non-negative number of seconds, got {}",
                    secs
                )));
            }
        }
        Ok(())
    }
}
