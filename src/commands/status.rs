//! Status commands
//!
//! This module contains commands for monitoring the transceiver:
//! - FIFO fill levels (RX data, TX data and RSSI support FIFO)
//! - Event bytes
//! - ROM and flash firmware versions
//! - Temperature and RSSI measurement readout
//!
//! None of these commands change the operating mode, so they can be issued in
//! any mode.

use core::convert::Infallible;

use regiface::FromByteArray;

use super::Opcode;
use crate::events::{Events, Status};
use crate::{Command, ToByteArray};

/// FIFO fill level response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FillLevelResponse {
    /// Device status from the first two response bytes
    pub status: Status,
    /// Number of bytes currently held by the FIFO
    pub fill_level: u8,
}

impl FromByteArray for FillLevelResponse {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            status: Status::from_bytes([bytes[0], bytes[1]])?,
            fill_level: bytes[2],
        })
    }
}

macro_rules! fill_level_command {
    ($(#[$meta:meta])* $name:ident, $opcode:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl ToByteArray for $name {
            type Error = Infallible;
            type Array = [u8; 2];

            fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                Ok([0x00; 2])
            }
        }

        impl Command for $name {
            type IdType = u8;
            type CommandParameters = Self;
            type ResponseParameters = FillLevelResponse;

            fn id() -> Self::IdType {
                Opcode::$opcode as u8
            }

            fn invoking_parameters(self) -> Self::CommandParameters {
                self
            }
        }
    };
}

fill_level_command!(
    /// Read Fill Level RX FIFO command (0x01)
    ///
    /// Returns the number of received data bytes waiting in the DFIFO.
    /// Use the result as the length of a following
    /// [`Device::read_rx_fifo`](crate::Device::read_rx_fifo).
    ReadFillLevelRxFifo,
    ReadFillLevelRxFifo
);

fill_level_command!(
    /// Read Fill Level TX FIFO command (0x02)
    ///
    /// Returns the number of data bytes still waiting to be transmitted.
    ReadFillLevelTxFifo,
    ReadFillLevelTxFifo
);

fill_level_command!(
    /// Read Fill Level RSSI FIFO command (0x03)
    ///
    /// Returns the fill level of the SFIFO in RX direction.
    ReadFillLevelRssiFifo,
    ReadFillLevelRssiFifo
);

/// Get Event Bytes command (0x04)
///
/// Returns all four event bytes.
///
/// # Important Notes
/// - The chip clears `system`, `trx` and `power` after this command
/// - `config` is kept; it describes the loaded service/channel
/// - The device snapshot is replaced by the returned bytes
#[derive(Debug, Clone, Copy)]
pub struct GetEventBytes;

impl ToByteArray for GetEventBytes {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([0x00; 3])
    }
}

impl Command for GetEventBytes {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = Events;

    fn id() -> Self::IdType {
        Opcode::GetEventBytes as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// ROM firmware version
///
/// The upper nibble is the major and the lower nibble the minor version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RomVersion(pub u8);

impl RomVersion {
    /// Major version (upper nibble)
    pub fn major(self) -> u8 {
        self.0 >> 4
    }

    /// Minor version (lower nibble)
    pub fn minor(self) -> u8 {
        self.0 & 0x0F
    }
}

/// Get Version ROM response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetVersionRomResponse {
    /// Device status from the first two response bytes
    pub status: Status,
    /// ROM version
    pub version: RomVersion,
}

impl FromByteArray for GetVersionRomResponse {
    type Error = Infallible;
    type Array = [u8; 3];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            status: Status::from_bytes([bytes[0], bytes[1]])?,
            version: RomVersion(bytes[2]),
        })
    }
}

/// Get Version ROM command (0x12)
#[derive(Debug, Clone, Copy)]
pub struct GetVersionRom;

impl ToByteArray for GetVersionRom {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([0x00; 2])
    }
}

impl Command for GetVersionRom {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = GetVersionRomResponse;

    fn id() -> Self::IdType {
        Opcode::GetVersionRom as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Get Version Flash response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GetVersionFlashResponse {
    /// Device status from the first two response bytes
    pub status: Status,
    /// ROM version
    pub rom: RomVersion,
    /// Flash firmware version, high byte first on the wire
    pub flash: u16,
    /// Customer specific version
    pub customer: u8,
}

impl FromByteArray for GetVersionFlashResponse {
    type Error = Infallible;
    type Array = [u8; 6];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            status: Status::from_bytes([bytes[0], bytes[1]])?,
            rom: RomVersion(bytes[2]),
            flash: u16::from_be_bytes([bytes[3], bytes[4]]),
            customer: bytes[5],
        })
    }
}

/// Get Version Flash command (0x13)
#[derive(Debug, Clone, Copy)]
pub struct GetVersionFlash;

impl ToByteArray for GetVersionFlash {
    type Error = Infallible;
    type Array = [u8; 5];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([0x00; 5])
    }
}

impl Command for GetVersionFlash {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = GetVersionFlashResponse;

    fn id() -> Self::IdType {
        Opcode::GetVersionFlash as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// 16-bit measurement response
///
/// Shared by the temperature and RSSI readout commands. The value is
/// transmitted big-endian in reply bytes 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementResponse {
    /// Device status from the first two response bytes
    pub status: Status,
    /// Raw measurement value
    pub value: u16,
}

impl FromByteArray for MeasurementResponse {
    type Error = Infallible;
    type Array = [u8; 4];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            status: Status::from_bytes([bytes[0], bytes[1]])?,
            value: u16::from_be_bytes([bytes[2], bytes[3]]),
        })
    }
}

/// Read Temperature Value command (0x19)
///
/// Returns the result of the latest temperature measurement
/// (`calib.sramTEMPH`/`calib.sramTEMPL`). A measurement is triggered with
/// [`CalibrateAndCheck`](super::CalibrateAndCheck).
#[derive(Debug, Clone, Copy)]
pub struct ReadTemperatureValue;

impl ToByteArray for ReadTemperatureValue {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([0x00; 3])
    }
}

impl Command for ReadTemperatureValue {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = MeasurementResponse;

    fn id() -> Self::IdType {
        Opcode::ReadTemperatureValue as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Get RSSI Value command (0x1C)
///
/// Returns the current RSSI average and peak value of the measurement
/// started with [`StartRssiMeasurement`](super::StartRssiMeasurement).
#[derive(Debug, Clone, Copy)]
pub struct GetRssiValue;

impl ToByteArray for GetRssiValue {
    type Error = Infallible;
    type Array = [u8; 3];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([0x00; 3])
    }
}

impl Command for GetRssiValue {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = MeasurementResponse;

    fn id() -> Self::IdType {
        Opcode::GetRssiValue as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}
