//! Data type and format catalog
//!
//! Static metadata for the codec: the canonical data types with their byte
//! widths, the display formats with their buffer sizes, and the byte/register
//! ordering policies for multi-register values.
//!
//! Everything here is a closed enum with an exhaustive match behind it; there
//! is no runtime reflection and no mutable state, so the tables are safe to
//! share across threads without synchronization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

// ============================================================================
// DataType
// ============================================================================

/// Canonical data types of a register item.
///
/// | Type | Bytes | Registers |
/// |------|-------|-----------|
/// | Bit | 1 | — (bit zones) |
/// | Int8/UInt8 | 1 | 1 |
/// | Int16/UInt16 | 2 | 1 |
/// | Int32/UInt32/Float32 | 4 | 2 |
/// | Int64/UInt64/Double64 | 8 | 4 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bit,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Double64,
}

impl DataType {
    /// Storage width in bytes. `Bit` is conceptually one bit but never
    /// occupies less than one byte.
    pub const fn size_of(self) -> usize {
        match self {
            Self::Bit | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Double64 => 8,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::Float32 | Self::Double64
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bit => "Bit",
            Self::Int8 => "Int8",
            Self::UInt8 => "UInt8",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Double64 => "Double64",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Bit" => Some(Self::Bit),
            "Int8" => Some(Self::Int8),
            "UInt8" => Some(Self::UInt8),
            "Int16" => Some(Self::Int16),
            "UInt16" => Some(Self::UInt16),
            "Int32" => Some(Self::Int32),
            "UInt32" => Some(Self::UInt32),
            "Int64" => Some(Self::Int64),
            "UInt64" => Some(Self::UInt64),
            "Float32" => Some(Self::Float32),
            "Double64" => Some(Self::Double64),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for DataType {
    fn default() -> Self {
        Self::UInt16
    }
}

// ============================================================================
// DigitalFormat
// ============================================================================

/// Numeric base used when rendering raw bytes or deriving a display format
/// from a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigitalFormat {
    Bin,
    Oct,
    Dec,
    UDec,
    Hex,
}

impl DigitalFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bin => "Bin",
            Self::Oct => "Oct",
            Self::Dec => "Dec",
            Self::UDec => "UDec",
            Self::Hex => "Hex",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Bin" => Some(Self::Bin),
            "Oct" => Some(Self::Oct),
            "Dec" => Some(Self::Dec),
            "UDec" => Some(Self::UDec),
            "Hex" => Some(Self::Hex),
            _ => None,
        }
    }
}

impl fmt::Display for DigitalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for DigitalFormat {
    fn default() -> Self {
        Self::Hex
    }
}

// ============================================================================
// Format
// ============================================================================

/// Display/encoding format of an item, orthogonal to [`DataType`].
///
/// The numeric formats carry their storage width in the name; `ByteArray` and
/// `String` are variable-length and require a caller-supplied byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Bool,
    Bin16,
    Oct16,
    Dec16,
    UDec16,
    Hex16,
    Bin32,
    Oct32,
    Dec32,
    UDec32,
    Hex32,
    Bin64,
    Oct64,
    Dec64,
    UDec64,
    Hex64,
    Float,
    Double,
    ByteArray,
    String,
}

impl Format {
    /// Buffer size in bytes for fixed-width formats. `None` means the length
    /// must be supplied by the caller (`ByteArray`, `String`).
    pub const fn size_of(self) -> Option<usize> {
        match self {
            Self::Bool => Some(2),
            Self::Bin16 | Self::Oct16 | Self::Dec16 | Self::UDec16 | Self::Hex16 => Some(2),
            Self::Bin32 | Self::Oct32 | Self::Dec32 | Self::UDec32 | Self::Hex32 | Self::Float => {
                Some(4)
            }
            Self::Bin64 | Self::Oct64 | Self::Dec64 | Self::UDec64 | Self::Hex64 | Self::Double => {
                Some(8)
            }
            Self::ByteArray | Self::String => None,
        }
    }

    /// Width in 16-bit registers, where fixed.
    pub const fn registers(self) -> Option<usize> {
        match self.size_of() {
            Some(bytes) => Some(bytes / 2),
            None => None,
        }
    }

    pub const fn is_variable_length(self) -> bool {
        matches!(self, Self::ByteArray | Self::String)
    }

    /// Canonical data type backing this format. Radix views (`Bin`/`Oct`/
    /// `Hex`) and `UDec` are unsigned; `Dec` is signed.
    pub const fn data_type(self) -> DataType {
        match self {
            Self::Bool => DataType::Bit,
            Self::Dec16 => DataType::Int16,
            Self::Bin16 | Self::Oct16 | Self::UDec16 | Self::Hex16 => DataType::UInt16,
            Self::Dec32 => DataType::Int32,
            Self::Bin32 | Self::Oct32 | Self::UDec32 | Self::Hex32 => DataType::UInt32,
            Self::Dec64 => DataType::Int64,
            Self::Bin64 | Self::Oct64 | Self::UDec64 | Self::Hex64 => DataType::UInt64,
            Self::Float => DataType::Float32,
            Self::Double => DataType::Double64,
            Self::ByteArray | Self::String => DataType::UInt8,
        }
    }

    /// Display format for a data type under a numeric base. 8-bit types are
    /// promoted to one full register. `None` base picks `Dec` for signed
    /// types and `UDec` for unsigned ones.
    pub fn from_data_type(data_type: DataType, base: Option<DigitalFormat>) -> Self {
        let base = base.unwrap_or(if data_type.is_signed() {
            DigitalFormat::Dec
        } else {
            DigitalFormat::UDec
        });
        match data_type {
            DataType::Bit => Self::Bool,
            DataType::Float32 => Self::Float,
            DataType::Double64 => Self::Double,
            DataType::Int8 | DataType::UInt8 | DataType::Int16 | DataType::UInt16 => match base {
                DigitalFormat::Bin => Self::Bin16,
                DigitalFormat::Oct => Self::Oct16,
                DigitalFormat::Dec => Self::Dec16,
                DigitalFormat::UDec => Self::UDec16,
                DigitalFormat::Hex => Self::Hex16,
            },
            DataType::Int32 | DataType::UInt32 => match base {
                DigitalFormat::Bin => Self::Bin32,
                DigitalFormat::Oct => Self::Oct32,
                DigitalFormat::Dec => Self::Dec32,
                DigitalFormat::UDec => Self::UDec32,
                DigitalFormat::Hex => Self::Hex32,
            },
            DataType::Int64 | DataType::UInt64 => match base {
                DigitalFormat::Bin => Self::Bin64,
                DigitalFormat::Oct => Self::Oct64,
                DigitalFormat::Dec => Self::Dec64,
                DigitalFormat::UDec => Self::UDec64,
                DigitalFormat::Hex => Self::Hex64,
            },
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Bin16 => "Bin16",
            Self::Oct16 => "Oct16",
            Self::Dec16 => "Dec16",
            Self::UDec16 => "UDec16",
            Self::Hex16 => "Hex16",
            Self::Bin32 => "Bin32",
            Self::Oct32 => "Oct32",
            Self::Dec32 => "Dec32",
            Self::UDec32 => "UDec32",
            Self::Hex32 => "Hex32",
            Self::Bin64 => "Bin64",
            Self::Oct64 => "Oct64",
            Self::Dec64 => "Dec64",
            Self::UDec64 => "UDec64",
            Self::Hex64 => "Hex64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Bool" => Some(Self::Bool),
            "Bin16" => Some(Self::Bin16),
            "Oct16" => Some(Self::Oct16),
            "Dec16" => Some(Self::Dec16),
            "UDec16" => Some(Self::UDec16),
            "Hex16" => Some(Self::Hex16),
            "Bin32" => Some(Self::Bin32),
            "Oct32" => Some(Self::Oct32),
            "Dec32" => Some(Self::Dec32),
            "UDec32" => Some(Self::UDec32),
            "Hex32" => Some(Self::Hex32),
            "Bin64" => Some(Self::Bin64),
            "Oct64" => Some(Self::Oct64),
            "Dec64" => Some(Self::Dec64),
            "UDec64" => Some(Self::UDec64),
            "Hex64" => Some(Self::Hex64),
            "Float" => Some(Self::Float),
            "Double" => Some(Self::Double),
            "ByteArray" => Some(Self::ByteArray),
            "String" => Some(Self::String),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::UDec16
    }
}

// ============================================================================
// DataOrder
// ============================================================================

/// Byte order within one 16-bit register.
///
/// `LessSignifiedFirst` keeps the codec's canonical little-endian lane
/// layout; `MostSignifiedFirst` swaps the two bytes of every register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataOrder {
    LessSignifiedFirst,
    MostSignifiedFirst,
}

impl DataOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LessSignifiedFirst => "LessSignifiedFirst",
            Self::MostSignifiedFirst => "MostSignifiedFirst",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LessSignifiedFirst" => Some(Self::LessSignifiedFirst),
            "MostSignifiedFirst" => Some(Self::MostSignifiedFirst),
            _ => None,
        }
    }
}

impl fmt::Display for DataOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for DataOrder {
    fn default() -> Self {
        Self::LessSignifiedFirst
    }
}

// ============================================================================
// RegisterOrder
// ============================================================================

/// Ordering of the 16-bit registers within a 32- or 64-bit value.
///
/// Exactly these four permutations are legal. `R0` names the
/// least-significant register of the value; `R0R1R2R3` is the canonical
/// layout (least-significant register first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterOrder {
    R0R1R2R3,
    R3R2R1R0,
    R1R0R3R2,
    R2R3R0R1,
}

impl RegisterOrder {
    /// Macro-order of the permutation: which half of the value leads.
    /// `R3R2R1R0` and `R1R0R3R2` put the more significant register of each
    /// pair first; the other two keep the canonical order.
    pub const fn to_data_order(self) -> DataOrder {
        match self {
            Self::R3R2R1R0 | Self::R1R0R3R2 => DataOrder::MostSignifiedFirst,
            Self::R0R1R2R3 | Self::R2R3R0R1 => DataOrder::LessSignifiedFirst,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::R0R1R2R3 => "R0R1R2R3",
            Self::R3R2R1R0 => "R3R2R1R0",
            Self::R1R0R3R2 => "R1R0R3R2",
            Self::R2R3R0R1 => "R2R3R0R1",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "R0R1R2R3" => Some(Self::R0R1R2R3),
            "R3R2R1R0" => Some(Self::R3R2R1R0),
            "R1R0R3R2" => Some(Self::R1R0R3R2),
            "R2R3R0R1" => Some(Self::R2R3R0R1),
            _ => None,
        }
    }
}

impl TryFrom<i32> for RegisterOrder {
    type Error = CodecError;

    /// Numeric configuration values map onto the four enumerants; anything
    /// else is a configuration error, reported before any buffer is touched.
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::R0R1R2R3),
            1 => Ok(Self::R3R2R1R0),
            2 => Ok(Self::R1R0R3R2),
            3 => Ok(Self::R2R3R0R1),
            other => Err(CodecError::invalid_order(other.to_string())),
        }
    }
}

impl TryFrom<&str> for RegisterOrder {
    type Error = CodecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value).ok_or_else(|| CodecError::invalid_order(value))
    }
}

impl fmt::Display for RegisterOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RegisterOrder {
    fn default() -> Self {
        Self::R0R1R2R3
    }
}

// ============================================================================
// StringLengthType
// ============================================================================

/// Length convention for string storage in registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringLengthType {
    /// String occupies the buffer up to a terminator unit; the remainder is
    /// undefined.
    ZeroEnded,
    /// String occupies exactly the declared length, no terminator.
    FullLength,
}

impl StringLengthType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZeroEnded => "ZeroEnded",
            Self::FullLength => "FullLength",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ZeroEnded" => Some(Self::ZeroEnded),
            "FullLength" => Some(Self::FullLength),
            _ => None,
        }
    }
}

impl fmt::Display for StringLengthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for StringLengthType {
    fn default() -> Self {
        Self::ZeroEnded
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_sizes() {
        let table = [
            (DataType::Bit, 1),
            (DataType::Int8, 1),
            (DataType::UInt8, 1),
            (DataType::Int16, 2),
            (DataType::UInt16, 2),
            (DataType::Int32, 4),
            (DataType::UInt32, 4),
            (DataType::Int64, 8),
            (DataType::UInt64, 8),
            (DataType::Float32, 4),
            (DataType::Double64, 8),
        ];
        for (dt, size) in table {
            assert_eq!(dt.size_of(), size, "{dt}");
        }
    }

    #[test]
    fn test_format_sizes() {
        assert_eq!(Format::Bool.size_of(), Some(2));
        assert_eq!(Format::Hex16.size_of(), Some(2));
        assert_eq!(Format::Dec32.size_of(), Some(4));
        assert_eq!(Format::Float.size_of(), Some(4));
        assert_eq!(Format::UDec64.size_of(), Some(8));
        assert_eq!(Format::Double.size_of(), Some(8));
        assert_eq!(Format::ByteArray.size_of(), None);
        assert_eq!(Format::String.size_of(), None);
    }

    #[test]
    fn test_format_registers() {
        assert_eq!(Format::Hex16.registers(), Some(1));
        assert_eq!(Format::Float.registers(), Some(2));
        assert_eq!(Format::Hex64.registers(), Some(4));
        assert_eq!(Format::String.registers(), None);
    }

    #[test]
    fn test_format_data_type_mapping() {
        assert_eq!(Format::Dec16.data_type(), DataType::Int16);
        assert_eq!(Format::Hex16.data_type(), DataType::UInt16);
        assert_eq!(Format::Dec64.data_type(), DataType::Int64);
        assert_eq!(Format::Float.data_type(), DataType::Float32);
        assert_eq!(Format::Bool.data_type(), DataType::Bit);

        assert_eq!(
            Format::from_data_type(DataType::Int32, None),
            Format::Dec32
        );
        assert_eq!(
            Format::from_data_type(DataType::UInt32, None),
            Format::UDec32
        );
        assert_eq!(
            Format::from_data_type(DataType::UInt16, Some(DigitalFormat::Hex)),
            Format::Hex16
        );
        assert_eq!(
            Format::from_data_type(DataType::Double64, Some(DigitalFormat::Bin)),
            Format::Double
        );
        assert_eq!(Format::from_data_type(DataType::Bit, None), Format::Bool);
    }

    #[test]
    fn test_register_order_to_data_order() {
        assert_eq!(
            RegisterOrder::R0R1R2R3.to_data_order(),
            DataOrder::LessSignifiedFirst
        );
        assert_eq!(
            RegisterOrder::R2R3R0R1.to_data_order(),
            DataOrder::LessSignifiedFirst
        );
        assert_eq!(
            RegisterOrder::R3R2R1R0.to_data_order(),
            DataOrder::MostSignifiedFirst
        );
        assert_eq!(
            RegisterOrder::R1R0R3R2.to_data_order(),
            DataOrder::MostSignifiedFirst
        );
    }

    #[test]
    fn test_register_order_from_int() {
        assert_eq!(
            RegisterOrder::try_from(0).unwrap(),
            RegisterOrder::R0R1R2R3
        );
        assert_eq!(
            RegisterOrder::try_from(3).unwrap(),
            RegisterOrder::R2R3R0R1
        );
        assert!(matches!(
            RegisterOrder::try_from(7),
            Err(CodecError::InvalidOrder(_))
        ));
        assert!(matches!(
            RegisterOrder::try_from(-1),
            Err(CodecError::InvalidOrder(_))
        ));
    }

    #[test]
    fn test_string_round_trips() {
        for f in [Format::Bool, Format::Hex32, Format::String] {
            assert_eq!(Format::from_str(f.as_str()), Some(f));
        }
        for o in [
            RegisterOrder::R0R1R2R3,
            RegisterOrder::R3R2R1R0,
            RegisterOrder::R1R0R3R2,
            RegisterOrder::R2R3R0R1,
        ] {
            assert_eq!(RegisterOrder::from_str(o.as_str()), Some(o));
        }
        assert_eq!(DataType::from_str("Float99"), None);
        assert_eq!(RegisterOrder::from_str("R9R9R9R9"), None);
    }
}
