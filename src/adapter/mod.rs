//! SID Engine Adapter
//!
//! [`SidAdapter`] connects a [`HostPlayer`] to a [`SidEngine`]. It owns both
//! collaborators, the decoded ROM images and all adapter-side playback state:
//!
//! - engine lifecycle (`Uninitialized` until the engine runtime reports ready)
//! - session state (`Idle` → `Loaded` → `Playing` → `Ended`)
//! - buffered panning waiting for the engine to become ready
//! - digi-sample smoothing and frame latency diagnostics
//!
//! The work is split by concern: [`session`] loads and starts songs,
//! [`frame`] runs the per-buffer step, [`introspection`] answers
//! cursor-synchronized reads and [`controls`] passes engine settings through.

pub mod controls;
pub mod frame;
pub mod introspection;
pub mod session;

pub use controls::{HeadphoneMode, VoiceMask};
pub use frame::FrameResult;
pub use introspection::TraceStreams;

use crate::config::{AdapterConfig, PanningConfig};
use crate::digi::{DigiClassifier, DigiStatus};
use crate::engine::SidEngine;
use crate::host::HostPlayer;
use crate::rom::RomSet;
use crate::timing::FrameTiming;
use crate::{BridgeError, Result};

/// Engine runtime lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineLifecycle {
    /// Runtime still initializing; engine calls are not allowed yet
    #[default]
    Uninitialized,
    /// Runtime initialized
    Ready,
}

/// Adapter-side view of the playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No song loaded
    #[default]
    Idle,
    /// Song loaded, no track started
    Loaded,
    /// Track running; `step()` computes frames
    Playing,
    /// Engine reported the end of the track
    Ended,
}

/// Output rates negotiated at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRates {
    /// Rate the engine renders at
    pub engine: u32,
    /// Rate the host wants
    pub target: u32,
}

impl SampleRates {
    /// Engine samples per target sample
    pub fn ratio(&self) -> f64 {
        if self.target == 0 {
            1.0
        } else {
            self.engine as f64 / self.target as f64
        }
    }

    /// True when the host has to resample
    pub fn needs_resampling(&self) -> bool {
        self.engine != self.target
    }
}

/// Callback run before every frame
///
/// Used for "interactive" playback where the host pokes registers or RAM
/// between frames. Closures taking `&mut E` implement it.
pub trait FrameHook<E> {
    /// Called right before the engine computes a frame
    fn before_frame(&mut self, engine: &mut E);
}

impl<E, F> FrameHook<E> for F
where
    F: FnMut(&mut E),
{
    fn before_frame(&mut self, engine: &mut E) {
        self(engine)
    }
}

/// Hook that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl<E> FrameHook<E> for NoopHook {
    fn before_frame(&mut self, _engine: &mut E) {}
}

/// Adapter between a host audio pipeline and the SID emulation engine
pub struct SidAdapter<E: SidEngine, H: HostPlayer> {
    engine: E,
    host: H,
    roms: RomSet,
    lifecycle: EngineLifecycle,
    /// Panning received before the engine was ready
    pending_panning: Option<PanningConfig>,
    /// Panning last handed to the engine
    panning: Option<PanningConfig>,
    scope_enabled: bool,
    state: SessionState,
    rates: Option<SampleRates>,
    track: i32,
    trace_enabled: bool,
    digi: DigiClassifier,
    digi_status: DigiStatus,
    timing: FrameTiming,
    frames: u64,
    hook: Box<dyn FrameHook<E>>,
}

impl<E: SidEngine, H: HostPlayer> SidAdapter<E, H> {
    /// Create an adapter
    ///
    /// If the engine runtime is already initialized the adapter becomes
    /// ready immediately, otherwise the host must call
    /// [`SidAdapter::notify_engine_ready`] once it is.
    pub fn new(engine: E, host: H, roms: RomSet) -> Self {
        let mut adapter = SidAdapter {
            engine,
            host,
            roms,
            lifecycle: EngineLifecycle::Uninitialized,
            pending_panning: None,
            panning: None,
            scope_enabled: false,
            state: SessionState::Idle,
            rates: None,
            track: crate::config::NO_TRACK,
            trace_enabled: false,
            digi: DigiClassifier::new(),
            digi_status: DigiStatus::default(),
            timing: FrameTiming::new(),
            frames: 0,
            hook: Box::new(NoopHook),
        };

        log::debug!("adapter created with {} ROM images", adapter.roms.count());

        if adapter.engine.is_ready() {
            adapter.notify_engine_ready();
        }
        adapter
    }

    /// Create an adapter and apply construction-time settings
    ///
    /// A malformed panning array is logged and ignored.
    pub fn with_config(engine: E, host: H, roms: RomSet, config: &AdapterConfig) -> Self {
        let mut adapter = Self::new(engine, host, roms);
        adapter.enable_scope(config.scope_enabled);
        if let Some(panning) = &config.panning {
            let _ = adapter.apply_panning(panning);
        }
        adapter
    }

    /// Install the pre-frame hook
    pub fn set_frame_hook(&mut self, hook: impl FrameHook<E> + 'static) {
        self.hook = Box::new(hook);
    }

    /// Signal that the engine runtime finished initializing
    ///
    /// Applies buffered panning. Only the first call has an effect; returns
    /// whether this call performed the transition.
    pub fn notify_engine_ready(&mut self) -> bool {
        if self.lifecycle == EngineLifecycle::Ready {
            return false;
        }
        self.lifecycle = EngineLifecycle::Ready;
        log::debug!("engine ready");

        if let Some(panning) = self.pending_panning.take() {
            self.forward_panning(panning);
        }
        true
    }

    /// Current engine lifecycle
    pub fn lifecycle(&self) -> EngineLifecycle {
        self.lifecycle
    }

    /// True once the engine runtime is initialized
    pub fn is_ready(&self) -> bool {
        self.lifecycle == EngineLifecycle::Ready
    }

    /// Validate and apply a panning array
    ///
    /// `values` must hold exactly 30 entries in `0.0..=1.0` (three voices for
    /// each of ten chip slots). A rejected array is logged and changes
    /// nothing; playback is unaffected. Before the engine is ready the array
    /// is kept and applied on [`SidAdapter::notify_engine_ready`].
    pub fn apply_panning(&mut self, values: &[f32]) -> Result<()> {
        let panning = match PanningConfig::from_slice(values) {
            Ok(panning) => panning,
            Err(e) => {
                log::warn!("ignoring panning configuration: {}", e);
                return Err(e);
            }
        };

        match self.lifecycle {
            EngineLifecycle::Ready => self.forward_panning(panning),
            EngineLifecycle::Uninitialized => {
                log::debug!("engine not ready, deferring panning configuration");
                self.pending_panning = Some(panning);
            }
        }
        Ok(())
    }

    fn forward_panning(&mut self, panning: PanningConfig) {
        self.engine.init_panning_cfg(panning.values());
        self.panning = Some(panning);
    }

    /// Panning last handed to the engine
    pub fn panning_config(&self) -> Option<&PanningConfig> {
        self.panning.as_ref()
    }

    /// Panning waiting for the engine to become ready
    pub fn pending_panning(&self) -> Option<&PanningConfig> {
        self.pending_panning.as_ref()
    }

    /// Default trace setting for tracks that do not specify one
    pub fn enable_scope(&mut self, enable: bool) {
        self.scope_enabled = enable;
    }

    /// Default trace setting
    pub fn is_scope_enabled(&self) -> bool {
        self.scope_enabled
    }

    /// Session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Rates negotiated by the last successful load
    pub fn sample_rates(&self) -> Option<SampleRates> {
        self.rates
    }

    /// Track passed to the engine by the last start
    pub fn track(&self) -> i32 {
        self.track
    }

    /// Smoothed digi status of the last completed window
    pub fn digi_status(&self) -> &DigiStatus {
        &self.digi_status
    }

    /// Smoothed digi label
    pub fn digi_type_desc(&self) -> &str {
        &self.digi_status.label
    }

    /// Smoothed digi rate
    pub fn digi_rate(&self) -> u32 {
        self.digi_status.rate
    }

    /// Current digi window
    pub fn digi_classifier(&self) -> &DigiClassifier {
        &self.digi
    }

    /// Frame latency diagnostics
    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Frames computed since the last start
    pub fn frames_computed(&self) -> u64 {
        self.frames
    }

    /// Decoded ROM images
    pub fn roms(&self) -> &RomSet {
        &self.roms
    }

    /// The engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine, mutably
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (E, H) {
        (self.engine, self.host)
    }

    fn require_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(BridgeError::NotReady)
        }
    }
}
