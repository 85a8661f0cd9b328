//! Song Metadata
//!
//! Song name, author and release strings come out of the engine as raw C64
//! bytes. They are not UTF-8: bytes above 127 are PETSCII-ish extended ASCII
//! and are kept as numeric character references so the host can render them
//! however it likes.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::engine::RawMusicInfo;

/// Raw bytes considered per text field
pub const TEXT_FIELD_LEN: usize = 32;

/// Memory dump values per output line
const DUMP_BYTES_PER_LINE: usize = 12;

/// Song information of the loaded file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    /// C64 load address
    pub load_addr: i32,
    /// Play speed flags
    pub play_speed: i32,
    /// Number of subsongs
    pub max_subsong: i8,
    /// Active subsong
    pub actual_subsong: i8,
    /// Song name
    pub song_name: String,
    /// Author
    pub song_author: String,
    /// Release info
    pub song_released: String,
}

impl SongInfo {
    /// Decode the engine's raw record
    pub fn from_raw(raw: &RawMusicInfo<'_>) -> Self {
        SongInfo {
            load_addr: raw.load_addr,
            play_speed: raw.play_speed,
            max_subsong: raw.max_subsong,
            actual_subsong: raw.actual_subsong,
            song_name: ext_ascii_string(raw.name),
            song_author: ext_ascii_string(raw.author),
            song_released: ext_ascii_string(raw.released),
        }
    }
}

/// Decode a NUL-terminated extended ASCII field
///
/// Looks at no more than [`TEXT_FIELD_LEN`] bytes. Bytes >= 128 become
/// `&#N;` references.
pub fn ext_ascii_string(bytes: &[u8]) -> String {
    let mut text = String::new();
    for &b in bytes.iter().take(TEXT_FIELD_LEN) {
        if b == 0 {
            break;
        }
        if b < 128 {
            text.push(b as char);
        } else {
            let _ = write!(text, "&#{};", b);
        }
    }
    text
}

/// Format a memory range as a C array definition
///
/// Handy for lifting snippets of C64 memory into test fixtures.
pub fn format_memory_dump(name: &str, bytes: &[u8]) -> String {
    let mut text = format!("const unsigned char {}[] =\n{{\n", name);
    for line in bytes.chunks(DUMP_BYTES_PER_LINE) {
        for b in line {
            let _ = write!(text, "0x{:02X}, ", b);
        }
        text.push('\n');
    }
    text.push_str("}\n");
    text
}
