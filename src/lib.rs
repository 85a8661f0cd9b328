//! Host playback adapter for a frame-driven C64 SID emulation engine
//!
//! The emulation engine synthesizes audio one host buffer at a time and lives
//! behind the [`SidEngine`] trait. The host audio pipeline (the thing that
//! owns the output device and asks for buffers) lives behind [`HostPlayer`].
//! [`SidAdapter`] sits between the two: it stages ROM images and song data
//! into the engine heap, starts tracks, drives the per-frame protocol, smooths
//! the engine's digi-sample telemetry and exposes register, envelope and
//! trace-stream reads synchronized to what the listener is hearing right now.
//!
//! # Features
//! - Embedded ROM images (BASIC, character, KERNAL) decoded once with a strict size check
//! - Scoped staging of song and ROM buffers into engine memory
//! - Per-frame stepping with end-of-song detection and latency diagnostics
//! - Flicker-free digi-sample rate/type status over 20-frame windows
//! - Stereo panning for up to 10 SID chips, deferred until the engine is ready
//! - Playback-cursor synchronized SID register and voice level reads
//! - 6581 filter curve configuration and cutoff tables
//!
//! # Crate feature flags
//! - `export-wav` (opt-in): record engine output frames into a WAV file (`export`)
//!
//! # Quick start
//! ```no_run
//! # fn demo<E: rsid_bridge::SidEngine, H: rsid_bridge::HostPlayer>(engine: E, host: H) -> rsid_bridge::Result<()> {
//! use rsid_bridge::{FrameResult, PlaybackOptions, RomSet, SidAdapter};
//!
//! let roms = RomSet::decode(None, None, None);
//! let mut adapter = SidAdapter::new(engine, host, roms);
//! let song = std::fs::read("Commando.sid")?;
//! adapter.load(44_100, "Commando.sid", &song)?;
//! adapter.start(&PlaybackOptions::default())?;
//! while let FrameResult::Continue(_) = adapter.step() {
//!     let _frame = adapter.sound_buffer();
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod adapter; // Host-facing adapter (session, frames, introspection)
pub mod config; // Playback options and panning configuration
pub mod digi; // Digi-sample status smoothing
pub mod engine; // Engine call boundary
#[cfg(feature = "export-wav")]
pub mod export; // WAV capture
pub mod filter; // 6581 filter curve
pub mod host; // Host playback driver boundary
pub mod metadata; // Song info and text decoding
pub mod rom; // Embedded ROM images
pub mod timing; // Frame latency diagnostics

/// Maximum number of SID chips a song may use
pub const MAX_SIDS: usize = 10;

/// Number of voices per SID chip
pub const VOICES_PER_SID: usize = 3;

/// Error types for adapter operations
#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    /// Engine rejected the song or ROM data
    #[error("Engine failed to load song (status {status})")]
    LoadFailed {
        /// Nonzero status code reported by the engine
        status: u32,
    },

    /// Buffer could not be staged into engine memory
    #[error("Staging error: {0}")]
    Staging(String),

    /// Configuration rejected (e.g. malformed panning array)
    #[error("Configuration rejected: {0}")]
    ConfigRejected(String),

    /// Operation requires a loaded song
    #[error("No song loaded")]
    NoSession,

    /// Engine runtime has not finished initializing
    #[error("Engine not ready")]
    NotReady,

    /// Invalid host options
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error writing audio file
    #[error("Audio file write error: {0}")]
    AudioFile(String),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for BridgeError {
    /// Converts a String into `BridgeError::Other`.
    ///
    /// Prefer the specific variants (`Config`, `Staging`, ...) where the
    /// failure has a known category.
    fn from(msg: String) -> Self {
        BridgeError::Other(msg)
    }
}

impl From<&str> for BridgeError {
    /// Converts a string slice into `BridgeError::Other`.
    fn from(msg: &str) -> Self {
        BridgeError::Other(msg.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Config(err.to_string())
    }
}

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, BridgeError>;

// Public API exports
pub use adapter::{
    EngineLifecycle, FrameHook, FrameResult, HeadphoneMode, NoopHook, SampleRates, SessionState,
    SidAdapter, TraceStreams, VoiceMask,
};
pub use config::{AdapterConfig, PanningConfig, PlaybackOptions, PANNING_LEN};
pub use digi::{DigiClassifier, DigiStatus, DIGI_WINDOW_FRAMES};
pub use engine::{EnginePtr, LoadRequest, RawMusicInfo, SidEngine, StagingArea};
#[cfg(feature = "export-wav")]
pub use export::{record_to_wav, WavCapture};
pub use filter::{FilterConfig6581, CUTOFF_TABLE_LEN};
pub use host::{HostPlayer, PlaybackCursor};
pub use metadata::{ext_ascii_string, format_memory_dump, SongInfo};
pub use rom::{decode_rom, RomImage, RomSet, CHAR_ROM_SIZE, ROM_SIZE};
pub use timing::FrameTiming;
