//! Embedded C64 ROM Images
//!
//! Some songs (BASIC tunes, RSIDs that call into the KERNAL) need the real
//! C64 ROMs. They are supplied to the adapter as base64 text, decoded once at
//! construction and staged into engine memory on every load.

pub mod decoder;

pub use decoder::decode_rom;

/// Size of the BASIC and KERNAL ROMs
pub const ROM_SIZE: usize = 0x2000;

/// Size of the character ROM
pub const CHAR_ROM_SIZE: usize = 0x1000;

/// Immutable, fully decoded ROM image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    bytes: Box<[u8]>,
}

impl RomImage {
    /// Wrap already decoded bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        RomImage {
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Raw ROM contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Image size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length image
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The three ROMs a C64 program may depend on
///
/// Each slot is optional; the engine copes with missing ROMs for songs that
/// do not need them.
#[derive(Debug, Clone, Default)]
pub struct RomSet {
    /// BASIC interpreter ROM ($A000-$BFFF)
    pub basic: Option<RomImage>,
    /// Character generator ROM ($D000-$DFFF)
    pub character: Option<RomImage>,
    /// KERNAL ROM ($E000-$FFFF)
    pub kernal: Option<RomImage>,
}

impl RomSet {
    /// Decode the embedded ROM texts, dropping any that fail the size check
    pub fn decode(basic: Option<&str>, character: Option<&str>, kernal: Option<&str>) -> Self {
        RomSet {
            basic: basic.and_then(|text| decode_rom(text, ROM_SIZE)),
            character: character.and_then(|text| decode_rom(text, CHAR_ROM_SIZE)),
            kernal: kernal.and_then(|text| decode_rom(text, ROM_SIZE)),
        }
    }

    /// Number of ROMs actually present
    pub fn count(&self) -> usize {
        [&self.basic, &self.character, &self.kernal]
            .iter()
            .filter(|rom| rom.is_some())
            .count()
    }
}
