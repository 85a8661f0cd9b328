//! Audio export
//!
//! Records the engine's interleaved stereo output frame by frame.

pub mod wav;

pub use wav::{record_to_wav, WavCapture};
