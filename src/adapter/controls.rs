//! Engine settings and direct machine access
//!
//! Thin pass-throughs to the engine for GUI controls: chip model, video
//! standard, stereo effects, the 6581 filter curve, voice muting, RAM and
//! register pokes, song metadata and the last frame's output.

use bitflags::bitflags;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::SidAdapter;
use crate::engine::SidEngine;
use crate::filter::{FilterConfig6581, CUTOFF_TABLE_LEN};
use crate::host::HostPlayer;
use crate::metadata::{format_memory_dump, SongInfo};
use crate::VOICES_PER_SID;

/// Stereo completely disabled (no panning)
pub const STEREO_DISABLED: i32 = -1;
/// Panning only, no stereo enhancement
pub const STEREO_PANNING_ONLY: i32 = 0;
/// Low stereo enhancement
pub const STEREO_LOW: i32 = 16384;
/// Medium stereo enhancement
pub const STEREO_MEDIUM: i32 = 24576;
/// High stereo enhancement
pub const STEREO_HIGH: i32 = 32767;

/// Maximum reverb level (percent)
pub const MAX_REVERB_LEVEL: u16 = 100;

/// Speaker model used by the stereo enhancer
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum HeadphoneMode {
    /// Regular headphones
    Headphones = 0,
    /// External (speaker-like) headphones
    ExternalHeadphones = 1,
}

bitflags! {
    /// Voice enable mask for the first SID chip (legacy interface)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VoiceMask: u8 {
        /// Voice 1
        const VOICE_1 = 0x01;
        /// Voice 2
        const VOICE_2 = 0x02;
        /// Voice 3
        const VOICE_3 = 0x04;
    }
}

impl VoiceMask {
    /// Create a mask from a raw value, ignoring unknown bits
    pub fn from_raw(value: u8) -> Self {
        VoiceMask::from_bits_truncate(value)
    }

    /// Check whether a voice (0-2) is enabled
    pub fn is_voice_enabled(&self, voice_idx: usize) -> bool {
        voice_idx < VOICES_PER_SID && self.bits() & (1 << voice_idx) != 0
    }
}

impl<E: SidEngine, H: HostPlayer> SidAdapter<E, H> {
    // ------------------------------------------------------------------
    // 6581 filter
    // ------------------------------------------------------------------

    /// Replace the 6581 filter curve; returns the engine's status
    pub fn set_filter_config_6581(&mut self, config: &FilterConfig6581) -> i32 {
        self.engine.set_filter_config_6581(config)
    }

    /// Current 6581 filter curve
    pub fn filter_config_6581(&self) -> FilterConfig6581 {
        self.engine.filter_config_6581()
    }

    /// Length of a cutoff table
    pub fn cutoffs_len(&self) -> usize {
        CUTOFF_TABLE_LEN
    }

    /// Copy the cutoff table for `distort_level` into `dest`
    ///
    /// Returns the number of values copied (at most [`CUTOFF_TABLE_LEN`]).
    pub fn fetch_cutoffs_6581(&self, distort_level: i32, dest: &mut [f64]) -> usize {
        let table = self.engine.cutoffs_6581(distort_level);
        let n = table.len().min(dest.len()).min(CUTOFF_TABLE_LEN);
        dest[..n].copy_from_slice(&table[..n]);
        n
    }

    // ------------------------------------------------------------------
    // Machine environment
    // ------------------------------------------------------------------

    /// True when emulating the 6581
    pub fn is_sid_6581(&self) -> bool {
        self.engine.is_sid_6581()
    }

    /// Select 6581 (true) or 8580 (false)
    pub fn set_sid_6581(&mut self, is_6581: bool) {
        self.engine.set_sid_6581(is_6581);
    }

    /// True for NTSC timing
    pub fn is_ntsc(&self) -> bool {
        self.engine.is_ntsc()
    }

    /// Select NTSC (true) or PAL (false)
    pub fn set_ntsc(&mut self, ntsc: bool) {
        self.engine.set_ntsc(ntsc);
    }

    // ------------------------------------------------------------------
    // Stereo
    // ------------------------------------------------------------------

    /// Panning of one voice as the engine currently has it
    pub fn panning(&self, sid_idx: u8, voice_idx: u8) -> f32 {
        self.engine.panning(sid_idx, voice_idx)
    }

    /// Change the panning of one voice
    pub fn set_panning(&mut self, sid_idx: u8, voice_idx: u8, panning: f32) {
        self.engine
            .set_panning(sid_idx, voice_idx, panning.clamp(0.0, 1.0));
    }

    /// Stereo enhance level
    pub fn stereo_level(&self) -> i32 {
        self.engine.stereo_level()
    }

    /// Set stereo enhance level
    ///
    /// [`STEREO_DISABLED`] turns stereo off, [`STEREO_PANNING_ONLY`] keeps
    /// panning without enhancement, positive values up to [`STEREO_HIGH`]
    /// enable enhancement.
    pub fn set_stereo_level(&mut self, level: i32) {
        self.engine
            .set_stereo_level(level.clamp(STEREO_DISABLED, STEREO_HIGH));
    }

    /// Reverb level in percent
    pub fn reverb_level(&self) -> u16 {
        self.engine.reverb_level()
    }

    /// Set reverb level in percent (0-100)
    pub fn set_reverb_level(&mut self, level: u16) {
        self.engine.set_reverb_level(level.min(MAX_REVERB_LEVEL));
    }

    /// Speaker model; `None` for codes this crate does not know
    pub fn headphone_mode(&self) -> Option<HeadphoneMode> {
        HeadphoneMode::from_u8(self.engine.headphone_mode())
    }

    /// Select the speaker model
    pub fn set_headphone_mode(&mut self, mode: HeadphoneMode) {
        self.engine.set_headphone_mode(mode as u8);
    }

    // ------------------------------------------------------------------
    // Chips, voices and memory
    // ------------------------------------------------------------------

    /// Number of SID chips the song uses
    pub fn count_sids(&self) -> u8 {
        self.engine.count_sids()
    }

    /// C64 base address of a SID chip
    pub fn sid_base_addr(&self, sid_idx: u8) -> u16 {
        self.engine.sid_base_addr(sid_idx)
    }

    /// Write a SID register
    pub fn set_sid_register(&mut self, sid_idx: u8, reg: u16, value: u8) {
        self.engine.set_sid_register(sid_idx, reg, value);
    }

    /// Mute or unmute a voice
    pub fn enable_voice(&mut self, sid_idx: u8, voice_idx: u8, on: bool) {
        self.engine.enable_voice(sid_idx, voice_idx, on);
    }

    /// Enable the voices of the first chip according to `mask`
    pub fn enable_voices(&mut self, mask: VoiceMask) {
        for voice in 0..VOICES_PER_SID {
            self.engine
                .enable_voice(0, voice as u8, mask.is_voice_enabled(voice));
        }
    }

    /// Read C64 RAM
    pub fn ram(&self, addr: u16) -> u8 {
        self.engine.ram(addr)
    }

    /// Write C64 RAM
    pub fn set_ram(&mut self, addr: u16, value: u8) {
        self.engine.set_ram(addr, value);
    }

    /// Dump C64 RAM `start..=end` as a C array definition
    pub fn memory_dump(&self, name: &str, start: u16, end: u16) -> String {
        let bytes: Vec<u8> = (start..=end).map(|addr| self.engine.ram(addr)).collect();
        let dump = format_memory_dump(name, &bytes);
        log::debug!("{}", dump);
        dump
    }

    // ------------------------------------------------------------------
    // Output and metadata
    // ------------------------------------------------------------------

    /// Interleaved stereo samples of the last computed frame
    pub fn sound_buffer(&self) -> &[i16] {
        self.engine.sound_buffer()
    }

    /// Raw digi technique code of the last frame (unsmoothed)
    pub fn digi_type(&self) -> u8 {
        self.engine.digi_type()
    }

    /// Information about the loaded song
    pub fn song_info(&self) -> SongInfo {
        SongInfo::from_raw(&self.engine.music_info())
    }
}
