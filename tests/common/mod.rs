//! Test doubles for the engine and host boundaries

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use rsid_bridge::engine::{EnginePtr, LoadRequest, RawMusicInfo, SidEngine};
use rsid_bridge::{
    FilterConfig6581, HostPlayer, PlaybackCursor, RomImage, RomSet, SampleRates,
    CHAR_ROM_SIZE, CUTOFF_TABLE_LEN, MAX_SIDS, PANNING_LEN, ROM_SIZE, VOICES_PER_SID,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Snapshot of a load call, with staged buffers read back from the heap
#[derive(Debug, Clone)]
pub struct RecordedLoad {
    pub is_mus: bool,
    pub song: Vec<u8>,
    pub sample_rate: u32,
    pub filename: String,
    pub basic_rom: Option<Vec<u8>>,
    pub char_rom: Option<Vec<u8>>,
    pub kernal_rom: Option<Vec<u8>>,
}

/// One scripted engine frame
#[derive(Debug, Clone)]
pub struct ScriptedFrame {
    pub samples: i32,
    pub digi_rate: u16,
    pub digi_desc: Vec<u8>,
}

impl ScriptedFrame {
    pub fn plain(samples: i32) -> Self {
        ScriptedFrame {
            samples,
            digi_rate: 0,
            digi_desc: b"NONE\0".to_vec(),
        }
    }

    pub fn digi(samples: i32, rate: u16, desc: &str) -> Self {
        let mut digi_desc = desc.as_bytes().to_vec();
        digi_desc.push(0);
        ScriptedFrame {
            samples,
            digi_rate: rate,
            digi_desc,
        }
    }
}

/// In-memory engine recording every call the adapter makes
pub struct FakeEngine {
    pub ready: bool,
    heap: HashMap<u32, Vec<u8>>,
    next_addr: u32,
    /// Number of allocations that succeed before malloc starts failing
    pub malloc_budget: Option<usize>,
    pub mallocs: usize,
    pub frees: Vec<EnginePtr>,

    pub load_status: u32,
    pub loads: Vec<RecordedLoad>,
    pub engine_rate: u32,

    pub play_status: u32,
    pub play_calls: Vec<(i32, bool, u32)>,
    pub script: VecDeque<ScriptedFrame>,
    pub compute_calls: usize,
    digi_rate: u16,
    digi_desc: Vec<u8>,
    pub sound: Vec<i16>,

    pub panning_cfgs: Vec<[f32; PANNING_LEN]>,
    pub voice_panning: [f32; PANNING_LEN],
    pub stereo_level: i32,
    pub reverb_level: u16,
    pub headphone_mode: u8,
    pub filter: FilterConfig6581,
    pub filter_status: i32,
    pub cutoffs: Vec<f64>,
    pub cutoff_levels: std::cell::RefCell<Vec<i32>>,

    pub sid_6581: bool,
    pub ntsc: bool,
    pub sids: u8,
    pub registers: Vec<(u8, u16, u8)>,
    pub voices: [[bool; VOICES_PER_SID]; MAX_SIDS],
    pub ram: Vec<u8>,
    pub traces: Vec<Vec<i16>>,

    pub name: Vec<u8>,
    pub author: Vec<u8>,
    pub released: Vec<u8>,
}

impl FakeEngine {
    pub fn new() -> Self {
        FakeEngine {
            ready: true,
            heap: HashMap::new(),
            next_addr: 0x1000,
            malloc_budget: None,
            mallocs: 0,
            frees: Vec::new(),
            load_status: 0,
            loads: Vec::new(),
            engine_rate: 48_000,
            play_status: 0,
            play_calls: Vec::new(),
            script: VecDeque::new(),
            compute_calls: 0,
            digi_rate: 0,
            digi_desc: b"NONE\0".to_vec(),
            sound: vec![0; 8],
            panning_cfgs: Vec::new(),
            voice_panning: [0.5; PANNING_LEN],
            stereo_level: 0,
            reverb_level: 0,
            headphone_mode: 0,
            filter: FilterConfig6581::default(),
            filter_status: 0,
            cutoffs: (0..CUTOFF_TABLE_LEN).map(|i| i as f64 * 0.5).collect(),
            cutoff_levels: std::cell::RefCell::new(Vec::new()),
            sid_6581: true,
            ntsc: false,
            sids: 1,
            registers: Vec::new(),
            voices: [[true; VOICES_PER_SID]; MAX_SIDS],
            ram: vec![0; 0x10000],
            traces: Vec::new(),
            name: b"Commando\0".to_vec(),
            author: b"Rob Hubbard\0".to_vec(),
            released: b"1985 Elite\0".to_vec(),
        }
    }

    pub fn not_ready() -> Self {
        FakeEngine {
            ready: false,
            ..Self::new()
        }
    }

    /// Allocations not yet freed
    pub fn live_allocations(&self) -> usize {
        self.heap.len()
    }

    pub fn push_frames(&mut self, frames: impl IntoIterator<Item = ScriptedFrame>) {
        self.script.extend(frames);
    }

    fn read(&self, ptr: Option<EnginePtr>) -> Option<Vec<u8>> {
        ptr.and_then(|p| self.heap.get(&p.addr()).cloned())
    }
}

impl SidEngine for FakeEngine {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn malloc(&mut self, len: usize) -> Option<EnginePtr> {
        if let Some(budget) = self.malloc_budget {
            if self.mallocs >= budget {
                return None;
            }
        }
        self.mallocs += 1;
        let addr = self.next_addr;
        self.next_addr += len as u32 + 16;
        self.heap.insert(addr, vec![0; len]);
        Some(EnginePtr(addr))
    }

    fn write_heap(&mut self, ptr: EnginePtr, data: &[u8]) {
        if let Some(block) = self.heap.get_mut(&ptr.addr()) {
            block.copy_from_slice(data);
        }
    }

    fn free(&mut self, ptr: EnginePtr) {
        self.heap.remove(&ptr.addr());
        self.frees.push(ptr);
    }

    fn load_sid_file(&mut self, request: &LoadRequest<'_>) -> u32 {
        let load = RecordedLoad {
            is_mus: request.is_mus,
            song: self.read(Some(request.song.ptr)).unwrap_or_default(),
            sample_rate: request.sample_rate,
            filename: request.filename.to_string(),
            basic_rom: self.read(request.basic_rom),
            char_rom: self.read(request.char_rom),
            kernal_rom: self.read(request.kernal_rom),
        };
        self.loads.push(load);
        if request.sample_rate != 0 {
            self.engine_rate = request.sample_rate;
        }
        self.load_status
    }

    fn sample_rate(&self) -> u32 {
        self.engine_rate
    }

    fn play_tune(&mut self, track: i32, trace_sid: bool, proc_buf_size: u32) -> u32 {
        self.play_calls.push((track, trace_sid, proc_buf_size));
        self.play_status
    }

    fn compute_audio_samples(&mut self) -> i32 {
        self.compute_calls += 1;
        match self.script.pop_front() {
            Some(frame) => {
                self.digi_rate = frame.digi_rate;
                self.digi_desc = frame.digi_desc;
                frame.samples
            }
            None => 0,
        }
    }

    fn sound_buffer(&self) -> &[i16] {
        &self.sound
    }

    fn music_info(&self) -> RawMusicInfo<'_> {
        RawMusicInfo {
            load_addr: 0x1000,
            play_speed: 0,
            max_subsong: 19,
            actual_subsong: 1,
            name: &self.name,
            author: &self.author,
            released: &self.released,
        }
    }

    fn digi_type(&self) -> u8 {
        u8::from(self.digi_rate > 0)
    }

    fn digi_type_desc(&self) -> &[u8] {
        &self.digi_desc
    }

    fn digi_rate(&self) -> u16 {
        self.digi_rate
    }

    fn init_panning_cfg(&mut self, panning: &[f32; PANNING_LEN]) {
        self.panning_cfgs.push(*panning);
        self.voice_panning = *panning;
    }

    fn panning(&self, sid_idx: u8, voice_idx: u8) -> f32 {
        let idx = sid_idx as usize * VOICES_PER_SID + voice_idx as usize;
        self.voice_panning.get(idx).copied().unwrap_or(-1.0)
    }

    fn set_panning(&mut self, sid_idx: u8, voice_idx: u8, panning: f32) {
        let idx = sid_idx as usize * VOICES_PER_SID + voice_idx as usize;
        if let Some(slot) = self.voice_panning.get_mut(idx) {
            *slot = panning;
        }
    }

    fn stereo_level(&self) -> i32 {
        self.stereo_level
    }

    fn set_stereo_level(&mut self, level: i32) {
        self.stereo_level = level;
    }

    fn reverb_level(&self) -> u16 {
        self.reverb_level
    }

    fn set_reverb_level(&mut self, level: u16) {
        self.reverb_level = level;
    }

    fn headphone_mode(&self) -> u8 {
        self.headphone_mode
    }

    fn set_headphone_mode(&mut self, mode: u8) {
        self.headphone_mode = mode;
    }

    fn set_filter_config_6581(&mut self, config: &FilterConfig6581) -> i32 {
        self.filter = *config;
        self.filter_status
    }

    fn filter_config_6581(&self) -> FilterConfig6581 {
        self.filter
    }

    fn cutoffs_6581(&self, distort_level: i32) -> &[f64] {
        self.cutoff_levels.borrow_mut().push(distort_level);
        &self.cutoffs
    }

    fn is_sid_6581(&self) -> bool {
        self.sid_6581
    }

    fn set_sid_6581(&mut self, is_6581: bool) {
        self.sid_6581 = is_6581;
    }

    fn is_ntsc(&self) -> bool {
        self.ntsc
    }

    fn set_ntsc(&mut self, ntsc: bool) {
        self.ntsc = ntsc;
    }

    fn count_sids(&self) -> u8 {
        self.sids
    }

    fn sid_base_addr(&self, sid_idx: u8) -> u16 {
        0xD400 + u16::from(sid_idx) * 0x20
    }

    /// Encodes the requested snapshot so tests can see which one was asked for
    fn sid_register(&self, sid_idx: u8, reg: u16, buf_idx: u8, tick: u32) -> u16 {
        u16::from(sid_idx) * 10_000 + u16::from(buf_idx) * 1_000 + tick as u16 * 10 + reg
    }

    fn set_sid_register(&mut self, sid_idx: u8, reg: u16, value: u8) {
        self.registers.push((sid_idx, reg, value));
    }

    fn voice_level(&self, sid_idx: u8, voice_idx: u8, buf_idx: u8, tick: u32) -> u16 {
        u16::from(sid_idx) * 10_000 + u16::from(buf_idx) * 1_000 + tick as u16 * 10 + u16::from(voice_idx)
    }

    fn enable_voice(&mut self, sid_idx: u8, voice_idx: u8, on: bool) {
        self.voices[sid_idx as usize][voice_idx as usize] = on;
    }

    fn ram(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn set_ram(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    fn trace_stream_count(&self) -> usize {
        self.traces.len()
    }

    fn trace_stream(&self, index: usize) -> Option<&[i16]> {
        self.traces.get(index).map(Vec::as_slice)
    }
}

/// Host pipeline recording what the adapter asks of it
#[derive(Debug, Default)]
pub struct FakeHost {
    pub buffer_size: u32,
    pub cursor: PlaybackCursor,
    pub native_rate: Option<u32>,
    pub timeouts: Vec<u64>,
    pub resampler: Option<SampleRates>,
}

impl FakeHost {
    pub fn new() -> Self {
        FakeHost {
            buffer_size: 4096,
            ..Default::default()
        }
    }
}

impl HostPlayer for FakeHost {
    fn processor_buffer_size(&self) -> u32 {
        self.buffer_size
    }

    fn playback_cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    fn native_sample_rate(&self) -> Option<u32> {
        self.native_rate
    }

    fn set_playback_timeout(&mut self, millis: u64) {
        self.timeouts.push(millis);
    }

    fn configure_resampler(&mut self, rates: SampleRates) {
        self.resampler = Some(rates);
    }
}

/// A full ROM set with recognizable fill bytes
pub fn test_roms() -> RomSet {
    RomSet {
        basic: Some(RomImage::from_bytes(vec![0xB0; ROM_SIZE])),
        character: Some(RomImage::from_bytes(vec![0xC0; CHAR_ROM_SIZE])),
        kernal: Some(RomImage::from_bytes(vec![0xE0; ROM_SIZE])),
    }
}

pub fn panning_ramp() -> Vec<f32> {
    (0..PANNING_LEN).map(|i| i as f32 / (PANNING_LEN - 1) as f32).collect()
}
