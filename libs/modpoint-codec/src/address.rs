//! Device addresses and notation conversion
//!
//! An [`Address`] is one location in a field device's memory map: a zone
//! ([`MemoryType`]) plus a zero-based offset. The same address can be written
//! in several textual conventions ([`AddressNotation`]); conversion between
//! them is a pure function of the address, and parsing any rendered form
//! yields the address back.
//!
//! Numbering conventions:
//! - device-native combined integer: coil `offset+1`, discrete input
//!   `100001+offset`, input register `300001+offset`, holding register
//!   `400001+offset`;
//! - Modbus notation: zone digit plus 1-based five-digit decimal
//!   (`"400101"` is holding register offset 100);
//! - IEC 61131-3 notation: zone prefix `0x`/`1x`/`3x`/`4x` plus zero-based
//!   decimal (`"4x00100"`), or hexadecimal with an `h` suffix (`"4x0064h"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Suffix marking a hexadecimal IEC 61131-3 offset.
const IEC61131_HEX_SUFFIX: char = 'h';

// ============================================================================
// MemoryType
// ============================================================================

/// Addressable memory zones of a device. Each zone has an independent
/// address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryType {
    Coils,
    DiscreteInputs,
    InputRegisters,
    HoldingRegisters,
}

impl MemoryType {
    /// Leading digit of the zone in the combined-integer and Modbus forms.
    pub const fn zone_digit(self) -> char {
        match self {
            Self::Coils => '0',
            Self::DiscreteInputs => '1',
            Self::InputRegisters => '3',
            Self::HoldingRegisters => '4',
        }
    }

    /// IEC 61131-3 zone prefix.
    pub const fn iec_prefix(self) -> &'static str {
        match self {
            Self::Coils => "0x",
            Self::DiscreteInputs => "1x",
            Self::InputRegisters => "3x",
            Self::HoldingRegisters => "4x",
        }
    }

    /// Base of the zone in the combined-integer form.
    const fn int_base(self) -> i32 {
        match self {
            Self::Coils => 0,
            Self::DiscreteInputs => 100_000,
            Self::InputRegisters => 300_000,
            Self::HoldingRegisters => 400_000,
        }
    }

    /// Whether this zone stores single bits (coils, discrete inputs) rather
    /// than 16-bit registers.
    pub const fn is_bit(self) -> bool {
        matches!(self, Self::Coils | Self::DiscreteInputs)
    }

    /// Whether the zone is writable from the client side.
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Coils | Self::HoldingRegisters)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coils => "Coils",
            Self::DiscreteInputs => "DiscreteInputs",
            Self::InputRegisters => "InputRegisters",
            Self::HoldingRegisters => "HoldingRegisters",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Coils" | "0x" => Some(Self::Coils),
            "DiscreteInputs" | "1x" => Some(Self::DiscreteInputs),
            "InputRegisters" | "3x" => Some(Self::InputRegisters),
            "HoldingRegisters" | "4x" => Some(Self::HoldingRegisters),
            _ => None,
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for MemoryType {
    fn default() -> Self {
        Self::HoldingRegisters
    }
}

// ============================================================================
// AddressNotation
// ============================================================================

/// Textual convention for writing an address. A view selector, not state:
/// the same [`Address`] renders differently per notation and every rendering
/// parses back to the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressNotation {
    /// Device-native combined integer, no padding.
    Default,
    /// Zone digit plus 1-based five-digit decimal.
    Modbus,
    /// Zone prefix plus 0-based five-digit decimal.
    Iec61131,
    /// Zone prefix plus 0-based four-digit hexadecimal with `h` suffix.
    Iec61131Hex,
}

impl AddressNotation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Modbus => "Modbus",
            Self::Iec61131 => "IEC61131",
            Self::Iec61131Hex => "IEC61131Hex",
        }
    }

    /// Human-readable notation label.
    pub const fn fine_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Modbus => "Modbus",
            Self::Iec61131 => "IEC 61131-3",
            Self::Iec61131Hex => "IEC 61131-3 (Hex)",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Default" => Some(Self::Default),
            "Modbus" => Some(Self::Modbus),
            "IEC61131" => Some(Self::Iec61131),
            "IEC61131Hex" => Some(Self::Iec61131Hex),
            _ => None,
        }
    }
}

impl fmt::Display for AddressNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for AddressNotation {
    fn default() -> Self {
        Self::Modbus
    }
}

// ============================================================================
// Address
// ============================================================================

/// One addressable location: memory zone plus zero-based offset. Immutable
/// once constructed; the pair is the identity of the address within a
/// device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    memory_type: MemoryType,
    offset: u16,
}

impl Address {
    pub const fn new(memory_type: MemoryType, offset: u16) -> Self {
        Self {
            memory_type,
            offset,
        }
    }

    pub const fn memory_type(self) -> MemoryType {
        self.memory_type
    }

    pub const fn offset(self) -> u16 {
        self.offset
    }

    /// Device-native combined integer form.
    pub const fn to_int(self) -> i32 {
        self.memory_type.int_base() + self.offset as i32 + 1
    }

    /// Parse the combined integer form. Values outside the four zone ranges
    /// are invalid.
    pub fn from_int(value: i32) -> Result<Self, CodecError> {
        let (memory_type, number) = match value {
            1..=65_536 => (MemoryType::Coils, value),
            100_001..=165_536 => (MemoryType::DiscreteInputs, value - 100_000),
            300_001..=365_536 => (MemoryType::InputRegisters, value - 300_000),
            400_001..=465_536 => (MemoryType::HoldingRegisters, value - 400_000),
            _ => return Err(CodecError::invalid_address(value.to_string())),
        };
        Ok(Self::new(memory_type, (number - 1) as u16))
    }

    /// Render the address in the requested notation. Total for all valid
    /// addresses and notations.
    pub fn to_notation_string(self, notation: AddressNotation) -> String {
        match notation {
            AddressNotation::Default => self.to_int().to_string(),
            AddressNotation::Modbus => format!(
                "{}{:05}",
                self.memory_type.zone_digit(),
                u32::from(self.offset) + 1
            ),
            AddressNotation::Iec61131 => {
                format!("{}{:05}", self.memory_type.iec_prefix(), self.offset)
            }
            AddressNotation::Iec61131Hex => format!(
                "{}{:04X}{}",
                self.memory_type.iec_prefix(),
                self.offset,
                IEC61131_HEX_SUFFIX
            ),
        }
    }

    fn parse_iec(text: &str) -> Option<Self> {
        let prefix = text.get(..2)?;
        let rest = text.get(2..)?;
        let memory_type = match prefix {
            "0x" => MemoryType::Coils,
            "1x" => MemoryType::DiscreteInputs,
            "3x" => MemoryType::InputRegisters,
            "4x" => MemoryType::HoldingRegisters,
            _ => return None,
        };
        if rest.is_empty() {
            return None;
        }
        // Hex form carries the suffix marker; decimal form does not.
        let offset = match rest.strip_suffix(IEC61131_HEX_SUFFIX) {
            Some(hex) if !hex.is_empty() => u32::from_str_radix(hex, 16).ok()?,
            Some(_) => return None,
            None => rest.parse::<u32>().ok()?,
        };
        if offset > u32::from(u16::MAX) {
            return None;
        }
        Some(Self::new(memory_type, offset as u16))
    }
}

impl FromStr for Address {
    type Err = CodecError;

    /// Parse any recognized notation. Tries, in order: bare integer
    /// (covers the Default and Modbus numeric forms), IEC 61131-3 decimal,
    /// IEC 61131-3 hex. First successful parse wins.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Self::from_int(value);
        }
        Self::parse_iec(trimmed).ok_or_else(|| CodecError::invalid_address(text))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation_string(AddressNotation::Modbus))
    }
}

// ============================================================================
// Tests
// ============================================================================
