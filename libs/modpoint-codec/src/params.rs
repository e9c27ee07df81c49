//! Conversion parameters
//!
//! The full configuration record for one decode/encode call. This replaces
//! the loosely-typed key/variant settings maps of older tooling with an
//! explicit struct whose structural rules are checked up front by
//! [`ConversionParams::validate`].

use serde::{Deserialize, Serialize};

use crate::address::MemoryType;
use crate::error::{CodecError, Result};
use crate::text::StringEncoding;
use crate::types::{DataOrder, DataType, DigitalFormat, Format, RegisterOrder, StringLengthType};

/// Configuration for one value conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Base width/interpretation of the item.
    pub data_type: DataType,
    /// Display format driving the conversion.
    pub format: Format,
    /// Memory zone the value belongs to; constrains which formats are legal.
    pub memory_type: MemoryType,
    /// Byte order within each 16-bit register.
    pub byte_order: DataOrder,
    /// Register permutation for 32-/64-bit values.
    pub register_order: RegisterOrder,
    /// Display base for byte-array rendering.
    pub digital_format: DigitalFormat,
    /// Separator between rendered bytes of a byte array.
    pub byte_array_separator: String,
    /// Text codec for string storage.
    pub string_encoding: StringEncoding,
    /// Length convention for string storage.
    pub string_length_type: StringLengthType,
    /// Declared byte length for the variable-width formats.
    pub variable_length: usize,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            data_type: DataType::UInt16,
            format: Format::UDec16,
            memory_type: MemoryType::HoldingRegisters,
            byte_order: DataOrder::LessSignifiedFirst,
            register_order: RegisterOrder::R0R1R2R3,
            digital_format: DigitalFormat::Hex,
            byte_array_separator: " ".to_owned(),
            string_encoding: StringEncoding::Utf8,
            string_length_type: StringLengthType::ZeroEnded,
            variable_length: 0,
        }
    }
}

impl ConversionParams {
    /// Parameters for a format in the default holding-register zone, with
    /// the matching canonical data type.
    pub fn for_format(format: Format) -> Self {
        Self {
            data_type: format.data_type(),
            format,
            ..Self::default()
        }
    }

    pub fn with_memory_type(mut self, memory_type: MemoryType) -> Self {
        self.memory_type = memory_type;
        self
    }

    pub fn with_byte_order(mut self, byte_order: DataOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_register_order(mut self, register_order: RegisterOrder) -> Self {
        self.register_order = register_order;
        self
    }

    pub fn with_digital_format(mut self, digital_format: DigitalFormat) -> Self {
        self.digital_format = digital_format;
        self
    }

    pub fn with_byte_array_separator(mut self, separator: impl Into<String>) -> Self {
        self.byte_array_separator = separator.into();
        self
    }

    pub fn with_string_encoding(mut self, encoding: StringEncoding) -> Self {
        self.string_encoding = encoding;
        self
    }

    pub fn with_string_length_type(mut self, length_type: StringLengthType) -> Self {
        self.string_length_type = length_type;
        self
    }

    pub fn with_variable_length(mut self, length: usize) -> Self {
        self.variable_length = length;
        self
    }

    /// Byte length of the raw buffer this configuration works on.
    pub fn buffer_len(&self) -> usize {
        if self.memory_type.is_bit() && self.format == Format::Bool {
            return 1;
        }
        self.format.size_of().unwrap_or(self.variable_length)
    }

    /// Check the structural rules before any buffer work.
    ///
    /// Bit zones hold single bits, so only `Bool` is representable there;
    /// the variable-width formats need a declared length.
    pub fn validate(&self) -> Result<()> {
        if self.memory_type.is_bit() && self.format != Format::Bool {
            return Err(CodecError::FormatMismatch {
                format: self.format,
                memory_type: self.memory_type,
            });
        }
        if self.format.is_variable_length() && self.variable_length == 0 {
            return Err(CodecError::FormatMismatch {
                format: self.format,
                memory_type: self.memory_type,
            });
        }
        if self.format == Format::String && matches!(self.string_encoding, StringEncoding::Special(_))
        {
            return Err(CodecError::unsupported_encoding(
                self.string_encoding.as_str(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
