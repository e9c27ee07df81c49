//! Text storage codec
//!
//! Encodes and decodes text into fixed-width register storage under a
//! selectable encoding and one of two length conventions, plus the
//! escape-sequence round-tripping the display layers use for non-printable
//! characters.
//!
//! Decoding is deliberately lenient: malformed sequences decode to
//! replacement characters and an unterminated zero-ended string yields
//! best-effort text over the whole buffer (reported via `tracing`), but the
//! codec never reads past the buffer. Encoding always produces a buffer of
//! exactly the declared length; text that does not fit is cut at a character
//! boundary and flagged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::types::StringLengthType;

// ============================================================================
// StringEncoding
// ============================================================================

/// Text codec tag for string storage.
///
/// The named variants are handled natively. Any other tag parses into
/// [`StringEncoding::Special`] — a deliberate escape hatch that fails with
/// `UnsupportedEncoding` when actually used, never a silent fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringEncoding {
    Utf8,
    Ascii,
    Latin1,
    Utf16Be,
    Utf16Le,
    Special(String),
}

impl StringEncoding {
    /// Parse a codec name. Case, `-` and `_` are ignored; unknown names are
    /// preserved as [`StringEncoding::Special`].
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let normalized = s.to_uppercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "UTF8" => Self::Utf8,
            "ASCII" | "USASCII" => Self::Ascii,
            "LATIN1" | "ISO88591" => Self::Latin1,
            "UTF16" | "UTF16BE" => Self::Utf16Be,
            "UTF16LE" => Self::Utf16Le,
            _ => Self::Special(s.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "ASCII",
            Self::Latin1 => "LATIN1",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Special(tag) => tag,
        }
    }

    /// Size in bytes of one code unit; the terminator occupies one unit.
    pub fn unit_len(&self) -> usize {
        match self {
            Self::Utf16Be | Self::Utf16Le => 2,
            _ => 1,
        }
    }

    fn unsupported(&self) -> CodecError {
        CodecError::unsupported_encoding(self.as_str())
    }
}

impl fmt::Display for StringEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for StringEncoding {
    fn default() -> Self {
        Self::Utf8
    }
}

// ============================================================================
// Encode
// ============================================================================

/// Result of encoding text into register storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    /// Exactly the declared length, zero-filled past the text.
    pub bytes: Vec<u8>,
    /// Set when the text was cut to fit the declared length.
    pub truncated: bool,
}

/// Append one character in the given encoding. Characters outside the
/// encoding's repertoire degrade to `?`.
fn push_char(out: &mut Vec<u8>, c: char, encoding: &StringEncoding) {
    match encoding {
        StringEncoding::Utf8 => {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
        StringEncoding::Ascii => out.push(if c.is_ascii() { c as u8 } else { b'?' }),
        StringEncoding::Latin1 => {
            let code = c as u32;
            out.push(if code <= 0xFF { code as u8 } else { b'?' });
        }
        StringEncoding::Utf16Be => {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.extend_from_slice(&unit.to_be_bytes());
            }
        }
        StringEncoding::Utf16Le => {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.extend_from_slice(&unit.to_le_bytes());
            }
        }
        StringEncoding::Special(_) => unreachable!("rejected before encoding"),
    }
}

/// Encode as many whole characters as fit into `capacity` bytes.
fn encode_bounded(text: &str, encoding: &StringEncoding, capacity: usize) -> (Vec<u8>, bool) {
    let mut out = Vec::with_capacity(capacity);
    for c in text.chars() {
        let mut piece = Vec::with_capacity(4);
        push_char(&mut piece, c, encoding);
        if out.len() + piece.len() > capacity {
            return (out, true);
        }
        out.extend_from_slice(&piece);
    }
    (out, false)
}

/// Encode text into a buffer of exactly `declared_len` bytes.
///
/// `ZeroEnded` reserves one code unit for the terminator and zero-fills the
/// remainder; `FullLength` cuts or zero-pads to the declared length with no
/// terminator. Text that does not fit is cut at a character boundary and the
/// result is flagged `truncated` — a non-fatal, reported condition.
pub fn encode_text(
    text: &str,
    encoding: &StringEncoding,
    length_type: StringLengthType,
    declared_len: usize,
) -> Result<EncodedText> {
    if matches!(encoding, StringEncoding::Special(_)) {
        return Err(encoding.unsupported());
    }
    let capacity = match length_type {
        StringLengthType::ZeroEnded => declared_len.saturating_sub(encoding.unit_len()),
        StringLengthType::FullLength => declared_len,
    };
    let (mut bytes, truncated) = encode_bounded(text, encoding, capacity);
    bytes.resize(declared_len, 0);
    if truncated {
        tracing::warn!(
            encoding = %encoding,
            declared_len,
            "text does not fit declared length, truncating"
        );
    }
    Ok(EncodedText { bytes, truncated })
}

// ============================================================================
// Decode
// ============================================================================

fn decode_units(bytes: &[u8], encoding: &StringEncoding) -> String {
    match encoding {
        StringEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        StringEncoding::Ascii => bytes
            .iter()
            .map(|&b| if b < 0x80 { b as char } else { '\u{FFFD}' })
            .collect(),
        StringEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        StringEncoding::Utf16Be | StringEncoding::Utf16Le => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| {
                    let pair = [pair[0], pair[1]];
                    if *encoding == StringEncoding::Utf16Be {
                        u16::from_be_bytes(pair)
                    } else {
                        u16::from_le_bytes(pair)
                    }
                })
                .collect();
            String::from_utf16_lossy(&units)
        }
        StringEncoding::Special(_) => unreachable!("rejected before decoding"),
    }
}

/// Position of the first all-zero code unit, scanning aligned units only.
fn find_terminator(bytes: &[u8], unit_len: usize) -> Option<usize> {
    bytes
        .chunks_exact(unit_len)
        .position(|unit| unit.iter().all(|&b| b == 0))
        .map(|idx| idx * unit_len)
}

/// Decode text out of register storage.
///
/// `ZeroEnded` takes everything before the first terminator unit; when no
/// terminator exists within the buffer the whole buffer decodes as
/// best-effort text (reported, never an out-of-bounds read). `FullLength`
/// decodes exactly `declared_len` bytes — or all available, if fewer — with
/// trailing zero padding stripped.
pub fn decode_text(
    bytes: &[u8],
    encoding: &StringEncoding,
    length_type: StringLengthType,
    declared_len: usize,
) -> Result<String> {
    if matches!(encoding, StringEncoding::Special(_)) {
        return Err(encoding.unsupported());
    }
    let unit = encoding.unit_len();
    let payload = match length_type {
        StringLengthType::ZeroEnded => match find_terminator(bytes, unit) {
            Some(end) => &bytes[..end],
            None => {
                tracing::warn!(
                    encoding = %encoding,
                    len = bytes.len(),
                    "no terminator within buffer, decoding unterminated text"
                );
                bytes
            }
        },
        StringLengthType::FullLength => {
            let mut slice = &bytes[..declared_len.min(bytes.len())];
            while slice.len() >= unit && slice[slice.len() - unit..].iter().all(|&b| b == 0) {
                slice = &slice[..slice.len() - unit];
            }
            slice
        }
    };
    Ok(decode_units(payload, encoding))
}

// ============================================================================
// Escape sequences
// ============================================================================

/// Render non-printable characters as escape sequences for display.
/// [`unescape_text`] is the exact inverse.
pub fn escape_text(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for c in src.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\x{:02X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Resolve escape sequences produced by [`escape_text`]. Unrecognized or
/// malformed escapes pass through unchanged; the function is total.
pub fn unescape_text(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some('0') => {
                chars.next();
                out.push('\0');
            }
            Some('t') => {
                chars.next();
                out.push('\t');
            }
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('r') => {
                chars.next();
                out.push('\r');
            }
            Some('x') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                let hi = lookahead.next().and_then(|d| d.to_digit(16));
                let lo = lookahead.next().and_then(|d| d.to_digit(16));
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    out.push(char::from((hi * 16 + lo) as u8));
                    chars = lookahead;
                } else {
                    out.push('\\');
                }
            }
            _ => out.push('\\'),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
