//! Scoped staging of host buffers into engine memory
//!
//! Every buffer the adapter copies into the engine heap for a call is
//! released again once the call returns, on success and failure alike.

use super::{EnginePtr, SidEngine, StagedBuffer};
use crate::{BridgeError, Result};

/// Allocations made for a single engine call
#[derive(Debug, Default)]
pub struct StagingArea {
    staged: Vec<EnginePtr>,
}

impl StagingArea {
    /// Create an empty staging area
    pub fn new() -> Self {
        StagingArea { staged: Vec::new() }
    }

    /// Copy `data` into freshly allocated engine memory
    pub fn stage<E: SidEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        data: &[u8],
    ) -> Result<StagedBuffer> {
        let ptr = engine.malloc(data.len()).ok_or_else(|| {
            BridgeError::Staging(format!("engine allocation of {} bytes failed", data.len()))
        })?;
        self.staged.push(ptr);
        engine.write_heap(ptr, data);
        Ok(StagedBuffer {
            ptr,
            len: data.len(),
        })
    }

    /// Stage an optional buffer; `None` stays a null address
    pub fn stage_optional<E: SidEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        data: Option<&[u8]>,
    ) -> Result<Option<EnginePtr>> {
        match data {
            Some(bytes) => self.stage(engine, bytes).map(|buf| Some(buf.ptr)),
            None => Ok(None),
        }
    }

    /// Free everything staged so far, newest first
    pub fn release<E: SidEngine + ?Sized>(&mut self, engine: &mut E) -> usize {
        let count = self.staged.len();
        while let Some(ptr) = self.staged.pop() {
            engine.free(ptr);
        }
        count
    }

    /// Number of live allocations
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// True when nothing is staged
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            log::warn!(
                "staging area dropped with {} unreleased engine buffers",
                self.staged.len()
            );
        }
    }
}

/// Run `call` with a fresh staging area and release it afterwards
///
/// The area is released whatever `call` returns, including errors raised
/// halfway through staging.
pub fn with_staging<E, T, F>(engine: &mut E, call: F) -> Result<T>
where
    E: SidEngine + ?Sized,
    F: FnOnce(&mut E, &mut StagingArea) -> Result<T>,
{
    let mut area = StagingArea::new();
    let result = call(engine, &mut area);
    let released = area.release(engine);
    log::debug!("released {} staged engine buffers", released);
    result
}
