//! Operational mode commands
//!
//! This module contains commands for controlling the transceiver:
//! - Switching between IDLEMode, TXMode, RXMode and PollingMode
//! - Calibration, tuning and self check
//! - Service initialisation and RSSI measurement
//! - Resets, OFFMode and the customer extension hooks
//!
//! Only IDLEMode allows SRAM and register access, so configuration should be
//! finished before switching to any other mode.

use core::convert::Infallible;

use super::{Opcode, StatusResponse};
use crate::events::ServiceChannel;
use crate::{Command, ToByteArray};

/// Operating mode selected by the lower two bits of the system mode byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemMode {
    /// IDLEMode: SRAM and registers accessible
    Idle = 0x0,
    /// TXMode: transmit the TX FIFO content
    Tx = 0x1,
    /// RXMode: receive on the configured service/channel
    Rx = 0x2,
    /// PollingMode: cyclic self-polling over the enabled services
    Polling = 0x3,
}

/// System mode configuration byte
///
/// The lower two bits select the [`SystemMode`]; the upper nibble carries
/// mode options as described in the ATA5831 user guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemModeConfig(pub u8);

impl SystemModeConfig {
    /// Plain IDLEMode, also used to clear pending TX/RX state
    pub const IDLE: Self = Self(0x00);

    /// Builds a configuration from a mode and the option nibble
    pub fn new(mode: SystemMode, options: u8) -> Self {
        Self((options & 0xF0) | mode as u8)
    }

    /// Mode encoded in the lower two bits
    pub fn mode(self) -> SystemMode {
        match self.0 & 0x3 {
            0x0 => SystemMode::Idle,
            0x1 => SystemMode::Tx,
            0x2 => SystemMode::Rx,
            _ => SystemMode::Polling,
        }
    }
}

/// Set System Mode command (0x0D)
///
/// Switches between IDLEMode, TXMode, RXMode and PollingMode.
///
/// # Important Notes
/// - IDLEMode is the only mode that allows reading/writing SRAM and registers
/// - Switching to IDLEMode clears the TX/RX state of a finished telegram
/// - The service/channel byte is ignored for IDLEMode and PollingMode
#[derive(Debug, Clone, Copy)]
pub struct SetSystemMode {
    /// System mode configuration
    pub mode: SystemModeConfig,
    /// Service and channel used for TXMode/RXMode
    pub service_channel: ServiceChannel,
}

impl ToByteArray for SetSystemMode {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.mode.0, self.service_channel.to_byte()])
    }
}

impl Command for SetSystemMode {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<3>;

    fn id() -> Self::IdType {
        Opcode::SetSystemMode as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Calibrate and Check command (0x0E)
///
/// Triggers one of: antenna tuning, temperature measurement, SRC calibration,
/// FRC calibration, VCO tuning or self check. The selection is made with
/// the tune/check configuration byte.
///
/// # Important Notes
/// - Must be issued in IDLEMode
/// - The temperature result is read back with
///   [`ReadTemperatureValue`](super::ReadTemperatureValue)
#[derive(Debug, Clone, Copy)]
pub struct CalibrateAndCheck {
    /// Tune/check configuration byte
    pub tune_check: u8,
    /// Service and channel to calibrate for
    pub service_channel: ServiceChannel,
}

impl ToByteArray for CalibrateAndCheck {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.tune_check, self.service_channel.to_byte()])
    }
}

impl Command for CalibrateAndCheck {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<3>;

    fn id() -> Self::IdType {
        Opcode::CalibrateAndCheck as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Patch SPI command (0x0F)
///
/// Jumps to the customer function stored in `extif.flashPtr`, passing the
/// parameter in the SPDR register.
#[derive(Debug, Clone, Copy)]
pub struct PatchSpi {
    /// Parameter handed to the patch function
    pub parameter: u8,
}

impl ToByteArray for PatchSpi {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.parameter])
    }
}

impl Command for PatchSpi {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<2>;

    fn id() -> Self::IdType {
        Opcode::PatchSpi as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

macro_rules! no_parameter_command {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl ToByteArray for $name {
            type Error = Infallible;
            type Array = [u8; 1];

            fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                Ok([0x00])
            }
        }

        impl Command for $name {
            type IdType = u8;
            type CommandParameters = Self;
            type ResponseParameters = StatusResponse<2>;

            fn id() -> Self::IdType {
                Opcode::$name as u8
            }

            fn invoking_parameters(self) -> Self::CommandParameters {
                self
            }
        }
    };
}

no_parameter_command!(
    /// System Reset ROM command (0x10)
    ///
    /// Jumps directly to address 0x0000. Re-issue the power-on wait before
    /// sending further commands.
    SystemResetRom
);

no_parameter_command!(
    /// Customer Configurable Command (0x14)
    ///
    /// Calls the function stored in `customCmd.customPtr`.
    /// Not available on the ATA5833.
    CustomerConfigurable
);

no_parameter_command!(
    /// System Reset command (0x15)
    ///
    /// Configures the watchdog with its minimum timeout and waits for the
    /// watchdog reset.
    SystemReset
);

no_parameter_command!(
    /// OFF Command (0x18)
    ///
    /// Puts the transceiver into OFFMode.
    Off
);

/// Set Voltage Monitor command (0x17)
///
/// Writes the voltage monitor level to the VMCSR register.
#[derive(Debug, Clone, Copy)]
pub struct SetVoltageMonitor {
    /// Value for the voltage monitor control and status register
    pub vmcsr: u8,
}

impl ToByteArray for SetVoltageMonitor {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.vmcsr])
    }
}

impl Command for SetVoltageMonitor {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<2>;

    fn id() -> Self::IdType {
        Opcode::SetVoltageMonitor as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Init SRAM Service command (0x1A)
///
/// Loads `eepService[eeprom_service]` into `sramService[sram_service]`.
///
/// # Important Notes
/// - The copy runs in the chip main loop and takes about 200μs
/// - Only the trigger is set by this command
#[derive(Debug, Clone, Copy)]
pub struct InitSramService {
    /// Target SRAM service slot
    pub sram_service: u8,
    /// Source EEPROM service
    pub eeprom_service: u8,
}

impl ToByteArray for InitSramService {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.sram_service, self.eeprom_service])
    }
}

impl Command for InitSramService {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<3>;

    fn id() -> Self::IdType {
        Opcode::InitSramService as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}

/// Start RSSI Measurement command (0x1B)
///
/// Starts an RSSI measurement on the given service/channel. The result is
/// read with [`GetRssiValue`](super::GetRssiValue).
///
/// # Important Notes
/// - RSSI measurement must be enabled in `eepServices.rssiSysConf` of the
///   service, otherwise the values are meaningless
#[derive(Debug, Clone, Copy)]
pub struct StartRssiMeasurement {
    /// Service and channel to measure
    pub service_channel: ServiceChannel,
}

impl ToByteArray for StartRssiMeasurement {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.service_channel.to_byte()])
    }
}

impl Command for StartRssiMeasurement {
    type IdType = u8;
    type CommandParameters = Self;
    type ResponseParameters = StatusResponse<2>;

    fn id() -> Self::IdType {
        Opcode::StartRssiMeasurement as u8
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self
    }
}
