//! Value codec orchestration
//!
//! Converts raw register buffers to typed [`Value`]s and back, composing the
//! type catalog, the ordering engine and the text codec under one
//! [`ConversionParams`] record.
//!
//! The canonical (normalized) buffer is the value's little-endian byte
//! image with the least-significant register in lane 0. Decoding first
//! undoes the register permutation, then the per-register byte order;
//! encoding runs the same involutions in reverse. A standard big-endian wire
//! image corresponds to `(MostSignifiedFirst, R3R2R1R0)`.
//!
//! Radix formats (`Bin`/`Oct`/`Hex`) are display concerns over the canonical
//! integer: they decode to zero-padded digit strings of the full type width
//! and encode by parsing the text in the matching base.

use crate::error::{CodecError, Result};
use crate::order::{apply_data_order, swap_words32, swap_words64};
use crate::params::ConversionParams;
use crate::text::{decode_text, encode_text};
use crate::types::{DigitalFormat, Format};
use crate::value::Value;

// ============================================================================
// Decode
// ============================================================================

/// Decode a raw buffer into a typed value.
///
/// Pure function of its inputs; fails with the specific configuration error
/// rather than guessing past an invalid combination.
pub fn decode(bytes: &[u8], params: &ConversionParams) -> Result<Value> {
    params.validate()?;
    let needed = params.buffer_len();
    if bytes.len() < needed {
        return Err(CodecError::Truncated {
            expected: needed,
            got: bytes.len(),
        });
    }

    let value = match params.format {
        Format::Bool => Value::Bool(bytes[..needed].iter().any(|&b| b != 0)),
        Format::Bin16 | Format::Oct16 | Format::Dec16 | Format::UDec16 | Format::Hex16 => {
            let mut buf = [bytes[0], bytes[1]];
            apply_data_order(&mut buf, params.byte_order);
            let v = u16::from_le_bytes(buf);
            match params.format {
                Format::Bin16 => Value::Text(format!("{:016b}", v)),
                Format::Oct16 => Value::Text(format!("{:06o}", v)),
                Format::Dec16 => Value::I16(v as i16),
                Format::UDec16 => Value::U16(v),
                _ => Value::Text(format!("{:04X}", v)),
            }
        }
        Format::Bin32 | Format::Oct32 | Format::Dec32 | Format::UDec32 | Format::Hex32
        | Format::Float => {
            let mut buf = [bytes[0], bytes[1], bytes[2], bytes[3]];
            swap_words32(&mut buf, params.register_order);
            apply_data_order(&mut buf, params.byte_order);
            let v = u32::from_le_bytes(buf);
            match params.format {
                Format::Bin32 => Value::Text(format!("{:032b}", v)),
                Format::Oct32 => Value::Text(format!("{:011o}", v)),
                Format::Dec32 => Value::I32(v as i32),
                Format::UDec32 => Value::U32(v),
                Format::Hex32 => Value::Text(format!("{:08X}", v)),
                _ => Value::F32(f32::from_bits(v)),
            }
        }
        Format::Bin64 | Format::Oct64 | Format::Dec64 | Format::UDec64 | Format::Hex64
        | Format::Double => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[..8]);
            swap_words64(&mut buf, params.register_order);
            apply_data_order(&mut buf, params.byte_order);
            let v = u64::from_le_bytes(buf);
            match params.format {
                Format::Bin64 => Value::Text(format!("{:064b}", v)),
                Format::Oct64 => Value::Text(format!("{:022o}", v)),
                Format::Dec64 => Value::I64(v as i64),
                Format::UDec64 => Value::U64(v),
                Format::Hex64 => Value::Text(format!("{:016X}", v)),
                _ => Value::F64(f64::from_bits(v)),
            }
        }
        Format::ByteArray => {
            let mut buf = bytes[..needed].to_vec();
            apply_data_order(&mut buf, params.byte_order);
            Value::Bytes(buf)
        }
        Format::String => {
            let mut buf = bytes[..needed].to_vec();
            apply_data_order(&mut buf, params.byte_order);
            Value::Text(decode_text(
                &buf,
                &params.string_encoding,
                params.string_length_type,
                params.variable_length,
            )?)
        }
    };
    Ok(value)
}

// ============================================================================
// Encode
// ============================================================================

/// Encode a typed value into wire-order bytes.
///
/// Inverse of [`decode`]: `decode(&encode(&v, p)?, p)? == v` for every value
/// the format can represent.
pub fn encode(value: &Value, params: &ConversionParams) -> Result<Vec<u8>> {
    params.validate()?;

    let bytes = match params.format {
        Format::Bool => {
            if params.memory_type.is_bit() {
                vec![u8::from(value.as_bool())]
            } else {
                let mut buf = (u16::from(value.as_bool())).to_le_bytes();
                apply_data_order(&mut buf, params.byte_order);
                buf.to_vec()
            }
        }
        Format::Bin16 | Format::Oct16 | Format::Dec16 | Format::UDec16 | Format::Hex16 => {
            let mut buf = (numeric_input(value, params.format)? as u16).to_le_bytes();
            apply_data_order(&mut buf, params.byte_order);
            buf.to_vec()
        }
        Format::Bin32 | Format::Oct32 | Format::Dec32 | Format::UDec32 | Format::Hex32 => {
            let mut buf = (numeric_input(value, params.format)? as u32).to_le_bytes();
            apply_data_order(&mut buf, params.byte_order);
            swap_words32(&mut buf, params.register_order);
            buf.to_vec()
        }
        Format::Bin64 | Format::Oct64 | Format::Dec64 | Format::UDec64 | Format::Hex64 => {
            let mut buf = numeric_input(value, params.format)?.to_le_bytes();
            apply_data_order(&mut buf, params.byte_order);
            swap_words64(&mut buf, params.register_order);
            buf.to_vec()
        }
        Format::Float => {
            let mut buf = (float_input(value, params.format)? as f32)
                .to_bits()
                .to_le_bytes();
            apply_data_order(&mut buf, params.byte_order);
            swap_words32(&mut buf, params.register_order);
            buf.to_vec()
        }
        Format::Double => {
            let mut buf = float_input(value, params.format)?.to_bits().to_le_bytes();
            apply_data_order(&mut buf, params.byte_order);
            swap_words64(&mut buf, params.register_order);
            buf.to_vec()
        }
        Format::ByteArray => {
            let mut buf = match value {
                Value::Bytes(b) => b.clone(),
                Value::Text(s) => parse_byte_array(
                    s,
                    params.digital_format,
                    &params.byte_array_separator,
                )?,
                other => {
                    return Err(CodecError::value_mismatch(
                        params.format,
                        other.type_name(),
                    ))
                }
            };
            buf.resize(params.variable_length, 0);
            apply_data_order(&mut buf, params.byte_order);
            buf
        }
        Format::String => {
            let text = match value {
                Value::Text(s) => s.clone(),
                other => other.to_string(),
            };
            let encoded = encode_text(
                &text,
                &params.string_encoding,
                params.string_length_type,
                params.variable_length,
            )?;
            let mut buf = encoded.bytes;
            apply_data_order(&mut buf, params.byte_order);
            buf
        }
    };
    Ok(bytes)
}

/// Render the value to the canonical integer of the format.
///
/// Numeric values are taken through the signed/unsigned accessor matching
/// the format; text is parsed in the format's base.
fn numeric_input(value: &Value, format: Format) -> Result<u64> {
    if let Value::Text(s) = value {
        let s = s.trim();
        let parsed = match format {
            Format::Bin16 | Format::Bin32 | Format::Bin64 => u64::from_str_radix(s, 2).ok(),
            Format::Oct16 | Format::Oct32 | Format::Oct64 => u64::from_str_radix(s, 8).ok(),
            Format::Hex16 | Format::Hex32 | Format::Hex64 => u64::from_str_radix(s, 16).ok(),
            Format::Dec16 | Format::Dec32 | Format::Dec64 => s.parse::<i64>().ok().map(|v| v as u64),
            _ => s.parse::<u64>().ok(),
        };
        return parsed.ok_or_else(|| CodecError::value_mismatch(format, s));
    }
    Ok(match format {
        Format::Dec16 | Format::Dec32 | Format::Dec64 => value.as_i64() as u64,
        _ => value.as_u64(),
    })
}

/// Floating-point input; text is parsed as decimal.
fn float_input(value: &Value, format: Format) -> Result<f64> {
    if let Value::Text(s) = value {
        return s
            .trim()
            .parse::<f64>()
            .map_err(|_| CodecError::value_mismatch(format, s.trim()));
    }
    Ok(value.as_f64())
}

// ============================================================================
// Byte-array display
// ============================================================================

/// Render raw bytes for display, one token per byte in the requested base,
/// joined with the separator.
pub fn format_byte_array(bytes: &[u8], digital: DigitalFormat, separator: &str) -> String {
    let tokens: Vec<String> = bytes
        .iter()
        .map(|&b| match digital {
            DigitalFormat::Bin => format!("{:08b}", b),
            DigitalFormat::Oct => format!("{:03o}", b),
            DigitalFormat::Dec => format!("{}", b as i8),
            DigitalFormat::UDec => format!("{}", b),
            DigitalFormat::Hex => format!("{:02X}", b),
        })
        .collect();
    tokens.join(separator)
}

/// Parse a byte-array rendering back into raw bytes. Inverse of
/// [`format_byte_array`] for the same base and separator.
pub fn parse_byte_array(text: &str, digital: DigitalFormat, separator: &str) -> Result<Vec<u8>> {
    let mismatch = || CodecError::value_mismatch(Format::ByteArray, text);

    let tokens: Vec<&str> = if separator.is_empty() {
        let width = match digital {
            DigitalFormat::Bin => 8,
            DigitalFormat::Oct => 3,
            DigitalFormat::Hex => 2,
            // Decimal tokens have no fixed width; a separator is required.
            DigitalFormat::Dec | DigitalFormat::UDec => return Err(mismatch()),
        };
        if !text.is_ascii() || text.len() % width != 0 {
            return Err(mismatch());
        }
        text.as_bytes()
            .chunks(width)
            .map(|c| std::str::from_utf8(c).unwrap_or(""))
            .collect()
    } else {
        text.split(separator).filter(|t| !t.is_empty()).collect()
    };

    tokens
        .iter()
        .map(|token| {
            let token = token.trim();
            match digital {
                DigitalFormat::Bin => u8::from_str_radix(token, 2).ok(),
                DigitalFormat::Oct => u8::from_str_radix(token, 8).ok(),
                DigitalFormat::Dec => token.parse::<i8>().ok().map(|v| v as u8),
                DigitalFormat::UDec => token.parse::<u8>().ok(),
                DigitalFormat::Hex => u8::from_str_radix(token, 16).ok(),
            }
            .ok_or_else(mismatch)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::MemoryType;
    use crate::text::StringEncoding;
    use crate::types::{DataOrder, RegisterOrder, StringLengthType};

    #[test]
    fn test_uint32_register_order_permutations() {
        // 0x12345678 with the half-words swapped, register bytes in
        // transmission order.
        let params = ConversionParams::for_format(Format::UDec32)
            .with_register_order(RegisterOrder::R1R0R3R2);
        let bytes = encode(&Value::U32(0x1234_5678), &params).unwrap();
        assert_eq!(bytes, vec![0x34, 0x12, 0x78, 0x56]);
        assert_eq!(decode(&bytes, &params).unwrap(), Value::U32(0x1234_5678));

        // Same permutation with the register bytes most-significant-first.
        let params = params.with_byte_order(DataOrder::MostSignifiedFirst);
        let bytes = encode(&Value::U32(0x1234_5678), &params).unwrap();
        assert_eq!(bytes, vec![0x12, 0x34, 0x56, 0x78]);
        assert_eq!(decode(&bytes, &params).unwrap(), Value::U32(0x1234_5678));
    }

    #[test]
    fn test_big_endian_wire_image() {
        // (MostSignifiedFirst, R3R2R1R0) is the classic big-endian layout.
        let params = ConversionParams::for_format(Format::UDec32)
            .with_byte_order(DataOrder::MostSignifiedFirst)
            .with_register_order(RegisterOrder::R3R2R1R0);
        let bytes = encode(&Value::U32(0x1234_5678), &params).unwrap();
        assert_eq!(bytes, vec![0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_float_big_endian() {
        // 50.0 in IEEE 754 is 0x42480000.
        let params = ConversionParams::for_format(Format::Float)
            .with_byte_order(DataOrder::MostSignifiedFirst)
            .with_register_order(RegisterOrder::R3R2R1R0);
        let value = decode(&[0x42, 0x48, 0x00, 0x00], &params).unwrap();
        assert_eq!(value, Value::F32(50.0));
        assert_eq!(
            encode(&value, &params).unwrap(),
            vec![0x42, 0x48, 0x00, 0x00]
        );
    }

    #[test]
    fn test_double_round_trip_all_orders() {
        for register_order in [
            RegisterOrder::R0R1R2R3,
            RegisterOrder::R3R2R1R0,
            RegisterOrder::R1R0R3R2,
            RegisterOrder::R2R3R0R1,
        ] {
            for byte_order in [DataOrder::LessSignifiedFirst, DataOrder::MostSignifiedFirst] {
                let params = ConversionParams::for_format(Format::Double)
                    .with_byte_order(byte_order)
                    .with_register_order(register_order);
                let value = Value::F64(std::f64::consts::PI);
                let bytes = encode(&value, &params).unwrap();
                assert_eq!(bytes.len(), 8);
                assert_eq!(
                    decode(&bytes, &params).unwrap(),
                    value,
                    "{byte_order} {register_order}"
                );
            }
        }
    }

    #[test]
    fn test_dec16_signed() {
        let params = ConversionParams::for_format(Format::Dec16);
        let bytes = encode(&Value::I16(-2), &params).unwrap();
        assert_eq!(bytes, vec![0xFE, 0xFF]);
        assert_eq!(decode(&bytes, &params).unwrap(), Value::I16(-2));
    }

    #[test]
    fn test_radix_formats_decode_to_padded_text() {
        let params = ConversionParams::for_format(Format::Hex16);
        assert_eq!(
            decode(&[0x2A, 0x00], &params).unwrap(),
            Value::Text("002A".into())
        );

        let params = ConversionParams::for_format(Format::Bin16);
        assert_eq!(
            decode(&[0x05, 0x00], &params).unwrap(),
            Value::Text("0000000000000101".into())
        );

        let params = ConversionParams::for_format(Format::Oct16);
        assert_eq!(
            decode(&[0x08, 0x00], &params).unwrap(),
            Value::Text("000010".into())
        );
    }

    #[test]
    fn test_radix_text_encodes_back() {
        let params = ConversionParams::for_format(Format::Hex32);
        let bytes = encode(&Value::Text("0000002A".into()), &params).unwrap();
        assert_eq!(decode(&bytes, &params).unwrap(), Value::Text("0000002A".into()));

        let err = encode(&Value::Text("zz".into()), &params).unwrap_err();
        assert!(matches!(err, CodecError::ValueMismatch { .. }));
    }

    #[test]
    fn test_bool_on_coil() {
        let params = ConversionParams::for_format(Format::Bool)
            .with_memory_type(MemoryType::Coils);
        assert_eq!(encode(&Value::Bool(true), &params).unwrap(), vec![1]);
        assert_eq!(decode(&[0], &params).unwrap(), Value::Bool(false));
        assert_eq!(decode(&[1], &params).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_bool_on_register_zone() {
        let params = ConversionParams::for_format(Format::Bool);
        let bytes = encode(&Value::Bool(true), &params).unwrap();
        assert_eq!(bytes, vec![1, 0]);
        assert_eq!(decode(&bytes, &params).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_coil_rejects_wide_format() {
        let params = ConversionParams::for_format(Format::Double)
            .with_memory_type(MemoryType::DiscreteInputs);
        assert!(matches!(
            decode(&[0u8; 8], &params),
            Err(CodecError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_short_buffer_is_truncated_error() {
        let params = ConversionParams::for_format(Format::UDec32);
        assert!(matches!(
            decode(&[0x01, 0x02], &params),
            Err(CodecError::Truncated {
                expected: 4,
                got: 2
            })
        ));
    }

    #[test]
    fn test_string_full_length() {
        let params = ConversionParams::for_format(Format::String)
            .with_string_encoding(StringEncoding::Ascii)
            .with_string_length_type(StringLengthType::FullLength)
            .with_variable_length(4);
        let bytes = encode(&Value::Text("AB".into()), &params).unwrap();
        assert_eq!(bytes, vec![0x41, 0x42, 0x00, 0x00]);
        assert_eq!(decode(&bytes, &params).unwrap(), Value::Text("AB".into()));
    }

    #[test]
    fn test_byte_array_round_trip() {
        let params = ConversionParams::for_format(Format::ByteArray).with_variable_length(2);
        let bytes = encode(&Value::Bytes(vec![0xDE, 0xAD]), &params).unwrap();
        assert_eq!(bytes, vec![0xDE, 0xAD]);
        assert_eq!(
            decode(&bytes, &params).unwrap(),
            Value::Bytes(vec![0xDE, 0xAD])
        );
    }

    #[test]
    fn test_format_byte_array_display() {
        assert_eq!(
            format_byte_array(&[0xDE, 0xAD], DigitalFormat::Hex, " "),
            "DE AD"
        );
        assert_eq!(
            format_byte_array(&[0xDE, 0xAD], DigitalFormat::Bin, " "),
            "11011110 10101101"
        );
        assert_eq!(
            format_byte_array(&[0xDE, 0xAD], DigitalFormat::Dec, ", "),
            "-34, -83"
        );
        assert_eq!(
            format_byte_array(&[0xDE, 0xAD], DigitalFormat::UDec, " "),
            "222 173"
        );
    }

    #[test]
    fn test_parse_byte_array() {
        assert_eq!(
            parse_byte_array("DE AD", DigitalFormat::Hex, " ").unwrap(),
            vec![0xDE, 0xAD]
        );
        assert_eq!(
            parse_byte_array("DEAD", DigitalFormat::Hex, "").unwrap(),
            vec![0xDE, 0xAD]
        );
        assert_eq!(
            parse_byte_array("-34, -83", DigitalFormat::Dec, ", ").unwrap(),
            vec![0xDE, 0xAD]
        );
        assert!(parse_byte_array("XYZ", DigitalFormat::Hex, " ").is_err());
    }

    #[test]
    fn test_byte_array_text_input() {
        let params = ConversionParams::for_format(Format::ByteArray)
            .with_variable_length(2)
            .with_digital_format(DigitalFormat::Hex);
        let bytes = encode(&Value::Text("DE AD".into()), &params).unwrap();
        assert_eq!(bytes, vec![0xDE, 0xAD]);
    }
}
