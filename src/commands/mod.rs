//! Transceiver command implementations
//!
//! Every ATA5831 telegram is full-duplex and length-symmetric: the host clocks
//! out the opcode, the parameters and as many dummy bytes as it wants to clock
//! in. The first two reply bytes are always the system and trx event bytes
//! (see [`Status`]).
//!
//! Commands with a fixed telegram length are modelled as [`Command`](crate::Command) types in
//! the categories below and executed through
//! [`Device::execute_command`](crate::Device::execute_command). Their request
//! parameters are always exactly one byte (the opcode) shorter than their
//! response.
//!
//! # Command Categories
//! - [`status`]: fill levels, event bytes, versions and measurement readout
//! - [`operational`]: system modes, calibration, resets and services
//! - [`eeprom`]: single-byte EEPROM access and the secure write trigger
//!
//! The FIFO and SRAM transfers have a variable telegram length and are
//! exposed directly as [`Device`](crate::Device) methods.
//!
//! # Important Notes
//! - SRAM and registers may only be accessed in IDLEMode
//! - The chip has no BUSY line; the fixed SPI timing envelope is the only
//!   flow control
//! - Replies are never validated; a disconnected chip yields garbage status

mod eeprom;
mod operational;
mod status;

pub use eeprom::*;
pub use operational::*;
pub use status::*;

use core::convert::Infallible;

use regiface::FromByteArray;

use crate::events::Status;

/// SPI command identifiers
///
/// `0x11` is not assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    /// Read Fill Level RX FIFO
    ReadFillLevelRxFifo = 0x01,
    /// Read Fill Level TX FIFO
    ReadFillLevelTxFifo = 0x02,
    /// Read Fill Level RSSI FIFO
    ReadFillLevelRssiFifo = 0x03,
    /// Get Event Bytes
    GetEventBytes = 0x04,
    /// Read RSSI FIFO
    ReadRssiFifo = 0x05,
    /// Read RX FIFO
    ReadRxFifo = 0x06,
    /// Write SRAM / Register
    WriteSram = 0x07,
    /// Read SRAM / Register
    ReadSram = 0x08,
    /// Write EEPROM
    WriteEeprom = 0x09,
    /// Read EEPROM
    ReadEeprom = 0x0A,
    /// Write TX FIFO
    WriteTxFifo = 0x0B,
    /// Write TX Preamble FIFO
    WriteTxPreambleFifo = 0x0C,
    /// Set System Mode
    SetSystemMode = 0x0D,
    /// Calibrate and Check
    CalibrateAndCheck = 0x0E,
    /// Patch SPI
    PatchSpi = 0x0F,
    /// System Reset ROM
    SystemResetRom = 0x10,
    /// Get Version ROM
    GetVersionRom = 0x12,
    /// Get Version Flash
    GetVersionFlash = 0x13,
    /// Customer Configurable Command
    CustomerConfigurable = 0x14,
    /// System Reset
    SystemReset = 0x15,
    /// Trigger EEPROM Secure Write
    TriggerEepromSecureWrite = 0x16,
    /// Set Voltage Monitor
    SetVoltageMonitor = 0x17,
    /// OFF Command
    Off = 0x18,
    /// Read Temperature Value
    ReadTemperatureValue = 0x19,
    /// Init SRAM Service
    InitSramService = 0x1A,
    /// Start RSSI Measurement
    StartRssiMeasurement = 0x1B,
    /// Get RSSI Value
    GetRssiValue = 0x1C,
    /// Read RX FIFO Byte Interrupt
    ReadRxFifoByteInt = 0x1D,
    /// Read RSSI FIFO Byte Interrupt
    ReadRssiFifoByteInt = 0x1E,
}

/// Reply of a command that returns nothing beyond the status bytes
///
/// `N` is the total telegram length; the trailing bytes are dummies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusResponse<const N: usize> {
    /// Status bytes from the first two reply bytes
    pub status: Status,
}

impl<const N: usize> FromByteArray for StatusResponse<N> {
    type Error = Infallible;
    type Array = [u8; N];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Status::from_bytes([bytes[0], bytes[1]]).map(|status| Self { status })
    }
}
