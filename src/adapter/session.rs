//! Song loading and track start

use super::{SampleRates, SessionState, SidAdapter};
use crate::config::PlaybackOptions;
use crate::engine::{with_staging, LoadRequest, SidEngine};
use crate::host::HostPlayer;
use crate::rom::RomImage;
use crate::{BridgeError, Result};

/// File suffixes of Compute! Sidplayer songs (no stereo support)
const MUS_SUFFIXES: [&str; 2] = [".mus", ".str"];

/// True for Compute! Sidplayer files
pub fn is_legacy_mus(filename: &str) -> bool {
    MUS_SUFFIXES.iter().any(|suffix| filename.ends_with(suffix))
}

impl<E: SidEngine, H: HostPlayer> SidAdapter<E, H> {
    /// Load a song into the engine
    ///
    /// Song data and ROM images are staged into engine memory for the call
    /// and released afterwards, whatever the outcome. On success the
    /// engine's output rate is read back and the host's resampler set up
    /// for `target_sample_rate`. A failed load leaves the adapter idle.
    pub fn load(&mut self, target_sample_rate: u32, filename: &str, song_data: &[u8]) -> Result<()> {
        self.require_ready()?;

        // Whatever was loaded before is gone once the engine sees a new song
        self.state = SessionState::Idle;
        self.rates = None;
        self.digi.reset();

        let is_mus = is_legacy_mus(filename);
        // Prefer the device's own rate so that no resampling is needed
        let requested_rate = self.host.native_sample_rate().unwrap_or(0);
        let roms = &self.roms;

        let status = with_staging(&mut self.engine, |engine, area| {
            let song = area.stage(engine, song_data)?;
            let basic_rom = area.stage_optional(engine, roms.basic.as_ref().map(RomImage::as_bytes))?;
            let char_rom =
                area.stage_optional(engine, roms.character.as_ref().map(RomImage::as_bytes))?;
            let kernal_rom =
                area.stage_optional(engine, roms.kernal.as_ref().map(RomImage::as_bytes))?;

            let request = LoadRequest {
                is_mus,
                song,
                sample_rate: requested_rate,
                filename,
                basic_rom,
                char_rom,
                kernal_rom,
            };
            Ok(engine.load_sid_file(&request))
        })?;

        if status != 0 {
            log::warn!("engine rejected '{}' (status {})", filename, status);
            return Err(BridgeError::LoadFailed { status });
        }

        let rates = SampleRates {
            engine: self.engine.sample_rate(),
            target: target_sample_rate,
        };
        self.host.configure_resampler(rates);
        self.rates = Some(rates);
        self.state = SessionState::Loaded;

        log::info!(
            "loaded '{}' ({} bytes, engine rate {} Hz, target {} Hz)",
            filename,
            song_data.len(),
            rates.engine,
            rates.target
        );
        Ok(())
    }

    /// Start a track of the loaded song
    ///
    /// Returns the engine's status code (0 on success). The engine sizes its
    /// internal buffers from the host's processor buffer size, since every
    /// frame it computes fills exactly one host buffer.
    pub fn start(&mut self, options: &PlaybackOptions) -> Result<u32> {
        self.require_ready()?;
        options.validate()?;
        if self.state == SessionState::Idle {
            return Err(BridgeError::NoSession);
        }

        if let Some(millis) = options.timeout_millis() {
            self.host.set_playback_timeout(millis);
        }

        let track = options.track_or_default();
        let trace = options.trace_sid_or(self.scope_enabled);
        self.digi.reset();

        let proc_buf_size = self.host.processor_buffer_size();
        let status = self.engine.play_tune(track, trace, proc_buf_size);

        self.track = track;
        self.trace_enabled = trace;
        self.frames = 0;
        if status == 0 {
            self.state = SessionState::Playing;
            log::debug!(
                "started track {} (trace {}, buffer {} samples)",
                track,
                trace,
                proc_buf_size
            );
        } else {
            self.state = SessionState::Loaded;
            log::warn!("engine refused to start track {} (status {})", track, status);
        }
        Ok(status)
    }

    /// Parse host options from JSON and start a track
    pub fn start_with_json(&mut self, json: &str) -> Result<u32> {
        let options = PlaybackOptions::from_json(json)?;
        self.start(&options)
    }
}
