//! EEPROM commands
//!
//! Single-byte EEPROM access and the secure write trigger. Block writes are
//! composed from these and SRAM writes by
//! [`Device::write_eeprom_block`](crate::Device::write_eeprom_block).

use core::convert::Infallible;

use regiface::FromByteArray;

use super::{Opcode, StatusResponse};
use crate::events::Status;
use crate::{Command, ToByteArray};

/// Pattern that arms the secure EEPROM write
pub const SECURE_WRITE_PATTERN: [u8; 3] = [0xAA, 0xCC, 0xF0];

/// Maximum number of data bytes committed by one secure write
pub const SECURE_WRITE_MAX_LEN: usize = 7;

/// EEPROM programming time per byte, in milliseconds
pub const EEPROM_WRITE_TIME_MS: u32 = 10;

/// Write EEPROM command (0x09)
///
/// Writes one byte to the given EEPROM address.
#[derive(Debug, Clone, Copy)]
pub struct WriteEeprom {
    /// EEPROM address
    pub address: u16,
    /// Byte to write
    pub data: u8,
}

impl ToByteArray for WriteEeprom {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [high, low] = self.address.to_be_bytes();
        Ok([high, low, self.data])
    }
}

impl Command for WriteEeprom {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<4>;

    fn id() -> Self::IdType {
        Opcode::WriteEeprom as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Read EEPROM response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadEepromResponse {
    /// Device status from the first two response bytes
    pub status: Status,
    /// Byte read from the EEPROM, following two dummy bytes
    pub data: u8,
}

impl FromByteArray for ReadEepromResponse {
    type Error = Infallible;
    type Array = [u8; 5];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            status: Status::from_bytes([bytes[0], bytes[1]])?,
            data: bytes[4],
        })
    }
}

/// Read EEPROM command (0x0A)
///
/// Reads one byte from the given EEPROM address.
#[derive(Debug, Clone, Copy)]
pub struct ReadEeprom {
    /// EEPROM address
    pub address: u16,
}

impl ToByteArray for ReadEeprom {
    type Error = Infallible;
    type Array = [u8; 4];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let [high, low] = self.address.to_be_bytes();
        Ok([high, low, 0x00, 0x00])
    }
}

impl Command for ReadEeprom {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = ReadEepromResponse;

    fn id() -> Self::IdType {
        Opcode::ReadEeprom as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Trigger EEPROM Secure Write command (0x16)
///
/// Commits the data staged in the secure write SRAM area
/// (see [`crate::registers`]) to the EEPROM.
///
/// # Important Notes
/// - The chip only arms the write when [`SECURE_WRITE_PATTERN`] is received
/// - At most [`SECURE_WRITE_MAX_LEN`] bytes are committed per trigger
/// - Programming takes [`EEPROM_WRITE_TIME_MS`] per byte; no other command
///   should be issued meanwhile
#[derive(Debug, Clone, Copy)]
pub struct TriggerEepromSecureWrite;

impl ToByteArray for TriggerEepromSecureWrite {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(SECURE_WRITE_PATTERN)
    }
}

impl Command for TriggerEepromSecureWrite {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<4>;

    fn id() -> Self::IdType {
        Opcode::TriggerEepromSecureWrite as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}
