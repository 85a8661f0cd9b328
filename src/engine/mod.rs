//! Engine Call Boundary
//!
//! The SID emulation engine is an external collaborator: a singleton that
//! owns its own addressable heap and is driven through plain procedure calls
//! taking integers, floats and heap addresses. [`SidEngine`] is the Rust face
//! of that boundary. Implementations wrap a WASM instance, an FFI binding or
//! a test double.

pub mod staging;

pub use staging::{with_staging, StagingArea};

use crate::filter::FilterConfig6581;
use crate::PANNING_LEN;

/// Address of a buffer inside engine memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnginePtr(pub u32);

impl EnginePtr {
    /// Raw address
    pub fn addr(self) -> u32 {
        self.0
    }
}

/// Buffer staged in engine memory: address plus length in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagedBuffer {
    /// Start address
    pub ptr: EnginePtr,
    /// Length in bytes
    pub len: usize,
}

/// Arguments of the engine's song load call
///
/// ROM slots are `None` when the adapter has no valid image; the engine
/// receives a null address for them.
#[derive(Debug, Clone)]
pub struct LoadRequest<'a> {
    /// Compute! Sidplayer (.mus/.str) data, which cannot be played in stereo
    pub is_mus: bool,
    /// Song file contents
    pub song: StagedBuffer,
    /// Requested output rate (0 lets the engine pick its default)
    pub sample_rate: u32,
    /// Original file name
    pub filename: &'a str,
    /// BASIC ROM
    pub basic_rom: Option<EnginePtr>,
    /// Character ROM
    pub char_rom: Option<EnginePtr>,
    /// KERNAL ROM
    pub kernal_rom: Option<EnginePtr>,
}

/// Song information exactly as the engine stores it
///
/// Text fields are raw, NUL-terminated extended ASCII.
#[derive(Debug, Clone, Copy)]
pub struct RawMusicInfo<'a> {
    /// C64 load address
    pub load_addr: i32,
    /// Play speed flags
    pub play_speed: i32,
    /// Number of subsongs
    pub max_subsong: i8,
    /// Active subsong
    pub actual_subsong: i8,
    /// Song name bytes
    pub name: &'a [u8],
    /// Author bytes
    pub author: &'a [u8],
    /// Release bytes
    pub released: &'a [u8],
}

/// Procedure-call surface of the SID emulation engine
pub trait SidEngine {
    /// True once the engine runtime has finished initializing
    fn is_ready(&self) -> bool;

    // ------------------------------------------------------------------
    // Heap
    // ------------------------------------------------------------------

    /// Allocate `len` bytes of engine memory
    fn malloc(&mut self, len: usize) -> Option<EnginePtr>;

    /// Copy `data` into engine memory at `ptr`
    fn write_heap(&mut self, ptr: EnginePtr, data: &[u8]);

    /// Release an allocation made with [`SidEngine::malloc`]
    fn free(&mut self, ptr: EnginePtr);

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Load a song; returns 0 on success
    fn load_sid_file(&mut self, request: &LoadRequest<'_>) -> u32;

    /// Output sample rate the engine settled on
    fn sample_rate(&self) -> u32;

    /// Start a track; `procBufSize` sizes the engine's internal buffers
    fn play_tune(&mut self, track: i32, trace_sid: bool, proc_buf_size: u32) -> u32;

    /// Emulate one host buffer; returns the sample count, <= 0 at song end
    fn compute_audio_samples(&mut self) -> i32;

    /// Interleaved stereo output of the last computed frame
    fn sound_buffer(&self) -> &[i16];

    /// Song information of the loaded file
    fn music_info(&self) -> RawMusicInfo<'_>;

    // ------------------------------------------------------------------
    // Digi telemetry
    // ------------------------------------------------------------------

    /// Numeric code of the digi technique detected in the last frame
    fn digi_type(&self) -> u8;

    /// Label of the digi technique detected in the last frame
    fn digi_type_desc(&self) -> &[u8];

    /// Digi sample rate detected in the last frame (0 if none)
    fn digi_rate(&self) -> u16;

    // ------------------------------------------------------------------
    // Panning and effects
    // ------------------------------------------------------------------

    /// Replace the panning of all voices of all chip slots
    fn init_panning_cfg(&mut self, panning: &[f32; PANNING_LEN]);

    /// Panning of a single voice (-1.0 for out of range indices)
    fn panning(&self, sid_idx: u8, voice_idx: u8) -> f32;

    /// Change the panning of a single voice
    fn set_panning(&mut self, sid_idx: u8, voice_idx: u8, panning: f32);

    /// Stereo enhance level (-1 disables stereo entirely)
    fn stereo_level(&self) -> i32;

    /// Set stereo enhance level
    fn set_stereo_level(&mut self, level: i32);

    /// Reverb level in percent
    fn reverb_level(&self) -> u16;

    /// Set reverb level in percent
    fn set_reverb_level(&mut self, level: u16);

    /// Headphone mode code (0 = headphones, 1 = external headphones)
    fn headphone_mode(&self) -> u8;

    /// Set headphone mode code
    fn set_headphone_mode(&mut self, mode: u8);

    // ------------------------------------------------------------------
    // 6581 filter
    // ------------------------------------------------------------------

    /// Replace the 6581 filter curve parameters
    fn set_filter_config_6581(&mut self, config: &FilterConfig6581) -> i32;

    /// Current 6581 filter curve parameters
    fn filter_config_6581(&self) -> FilterConfig6581;

    /// Precomputed cutoff table for a distortion level
    fn cutoffs_6581(&self, distort_level: i32) -> &[f64];

    // ------------------------------------------------------------------
    // Machine environment
    // ------------------------------------------------------------------

    /// True when emulating the 6581 (false: 8580)
    fn is_sid_6581(&self) -> bool;

    /// Select 6581 or 8580 emulation
    fn set_sid_6581(&mut self, is_6581: bool);

    /// True for NTSC timing
    fn is_ntsc(&self) -> bool;

    /// Select NTSC or PAL timing
    fn set_ntsc(&mut self, ntsc: bool);

    // ------------------------------------------------------------------
    // Chips, registers and memory
    // ------------------------------------------------------------------

    /// Number of SID chips the song uses
    fn count_sids(&self) -> u8;

    /// C64 base address of a SID chip
    fn sid_base_addr(&self, sid_idx: u8) -> u16;

    /// Register snapshot closest to `tick` within double buffer half `buf_idx`
    fn sid_register(&self, sid_idx: u8, reg: u16, buf_idx: u8, tick: u32) -> u16;

    /// Write a SID register
    fn set_sid_register(&mut self, sid_idx: u8, reg: u16, value: u8);

    /// Voice envelope level snapshot closest to `tick` within `buf_idx`
    fn voice_level(&self, sid_idx: u8, voice_idx: u8, buf_idx: u8, tick: u32) -> u16;

    /// Mute or unmute a voice
    fn enable_voice(&mut self, sid_idx: u8, voice_idx: u8, on: bool);

    /// Read C64 RAM
    fn ram(&self, addr: u16) -> u8;

    /// Write C64 RAM
    fn set_ram(&mut self, addr: u16, value: u8);

    // ------------------------------------------------------------------
    // Trace streams
    // ------------------------------------------------------------------

    /// Number of trace streams (4 per used chip)
    fn trace_stream_count(&self) -> usize;

    /// Trace buffer of the last computed frame
    fn trace_stream(&self, index: usize) -> Option<&[i16]>;
}
