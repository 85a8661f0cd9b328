//! ROM Image Decoder
//!
//! ROM images are embedded as base64 text. The decoder consumes the longest
//! run of alphabet symbols, tolerates a short trailing group and then applies
//! a strict size check: a ROM that does not decode to exactly the expected
//! number of bytes is treated as not supplied.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use super::RomImage;

/// Standard alphabet, no padding, lenient about unused bits in the last group
const ROM_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

fn is_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}

/// Length of the prefix that takes part in decoding.
///
/// Stops at the first non-alphabet character (including `=`). A lone
/// trailing symbol carries less than one byte and is dropped.
fn decodable_prefix(encoded: &str) -> &str {
    let end = encoded.find(|c: char| !is_symbol(c)).unwrap_or(encoded.len());
    let end = if end % 4 == 1 { end - 1 } else { end };
    &encoded[..end]
}

/// Decode an embedded ROM image
///
/// Returns `None` when the decoded length differs from `expected_size`.
pub fn decode_rom(encoded: &str, expected_size: usize) -> Option<RomImage> {
    let prefix = decodable_prefix(encoded);

    let bytes = match ROM_ENGINE.decode(prefix) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("ROM image rejected: {}", e);
            return None;
        }
    };

    if bytes.len() != expected_size {
        log::debug!(
            "ROM image size mismatch: decoded {} bytes, expected {}",
            bytes.len(),
            expected_size
        );
        return None;
    }

    Some(RomImage::from_bytes(bytes))
}
