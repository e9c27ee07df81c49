//! Modpoint Register Codec Library
//!
//! Register/value codec and address-notation engine for industrial field-bus
//! device tooling: converts raw fixed-width register memory into typed
//! application values and back, and translates device addresses between the
//! common numbering conventions.
//!
//! # Architecture
//!
//! - **Type catalog** ([`types`]): canonical data types, display formats and
//!   ordering policies with their static size tables
//! - **Address model** ([`address`]): memory zones, addresses and the
//!   Default/Modbus/IEC 61131-3 notations
//! - **Ordering engine** ([`order`]): byte swap within a register and the
//!   four register permutations for multi-register values
//! - **Text codec** ([`text`]): string storage under selectable encodings
//!   and length conventions, plus display escape sequences
//! - **Value codec** ([`codec`]): the orchestrator composing the above under
//!   one [`ConversionParams`] record
//!
//! The library is a pure, stateless computation layer: no I/O, no shared
//! mutable state, every operation synchronous and bounded by the value's
//! byte width. Callers may invoke it concurrently without coordination.
//!
//! # Example
//!
//! ```
//! use modpoint_codec::{decode, encode, ConversionParams, DataOrder, Format, RegisterOrder, Value};
//!
//! let params = ConversionParams::for_format(Format::Float)
//!     .with_byte_order(DataOrder::MostSignifiedFirst)
//!     .with_register_order(RegisterOrder::R3R2R1R0);
//!
//! let wire = encode(&Value::F32(50.0), &params)?;
//! assert_eq!(wire, vec![0x42, 0x48, 0x00, 0x00]);
//! assert_eq!(decode(&wire, &params)?, Value::F32(50.0));
//! # Ok::<(), modpoint_codec::CodecError>(())
//! ```

pub mod address;
pub mod codec;
pub mod error;
pub mod order;
pub mod params;
pub mod text;
pub mod types;
pub mod value;

// Re-export the functional surface
pub use address::{Address, AddressNotation, MemoryType};
pub use codec::{decode, encode, format_byte_array, parse_byte_array};
pub use error::{CodecError, Result};
pub use params::ConversionParams;
pub use text::{decode_text, encode_text, escape_text, unescape_text, EncodedText, StringEncoding};
pub use types::{DataOrder, DataType, DigitalFormat, Format, RegisterOrder, StringLengthType};
pub use value::Value;
