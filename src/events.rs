//! Event and status bytes
//!
//! The ATA5831 shifts out two status bytes (`events.system` and
//! `events.events`) at the start of every telegram. The dedicated
//! Get Event Bytes command additionally returns `events.power` and
//! `events.config`, and clears `system`, `trx` and `power` on the chip side.
//! `config` is never cleared since it describes the currently loaded
//! service/channel configuration.
//!
//! The driver does not interpret `system` and `power`; their bit layout is
//! defined by the transceiver firmware. All bytes are kept exactly as
//! received.

use bitflags::bitflags;
use core::convert::Infallible;

use regiface::FromByteArray;

bitflags! {
    /// Telegram events (`events.events`) for both receive paths
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TrxEvents: u8 {
        /// Path A: ID check successful
        const IDCHK_A = 1 << 7;
        /// Path A: wake-up check successful
        const WCOK_A = 1 << 6;
        /// Path A: start of telegram detected
        const SOT_A = 1 << 5;
        /// Path A: end of telegram reached
        const EOT_A = 1 << 4;
        /// Path B: ID check successful
        const IDCHK_B = 1 << 3;
        /// Path B: wake-up check successful
        const WCOK_B = 1 << 2;
        /// Path B: start of telegram detected
        const SOT_B = 1 << 1;
        /// Path B: end of telegram reached
        const EOT_B = 1 << 0;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TrxEvents {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TrxEvents({=u8:#x})", self.bits())
    }
}

impl TrxEvents {
    /// A complete telegram was received on path A
    /// (wake-up check, start and end of telegram all set)
    pub fn telegram_complete_a(self) -> bool {
        self.contains(Self::WCOK_A | Self::SOT_A | Self::EOT_A)
    }

    /// A complete telegram was received on path B
    pub fn telegram_complete_b(self) -> bool {
        self.contains(Self::WCOK_B | Self::SOT_B | Self::EOT_B)
    }
}

/// Service/channel configuration byte
///
/// Used both as the `events.config` byte and as the service/channel
/// parameter of Set System Mode, Calibrate and Check and
/// Start RSSI Measurement. The raw byte is kept as is; the accessors only
/// decode it.
///
/// # Byte Format
/// - Bit 7: Path B enabled
/// - Bit 6: Path A enabled
/// - Bits 5:4: Channel
/// - Bit 3: Reserved
/// - Bits 2:0: Service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceChannel(pub u8);

impl ServiceChannel {
    /// Builds a configuration from its fields. Out of range channel and
    /// service numbers are masked.
    pub fn new(path_a: bool, path_b: bool, channel: u8, service: u8) -> Self {
        let mut byte = ((channel & 0x3) << 4) | (service & 0x7);
        if path_a {
            byte |= 0x40;
        }
        if path_b {
            byte |= 0x80;
        }
        Self(byte)
    }

    /// Wraps a raw configuration byte
    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Raw configuration byte
    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Receive path A selected
    pub fn path_a(self) -> bool {
        self.0 & 0x40 != 0
    }

    /// Receive path B selected
    pub fn path_b(self) -> bool {
        self.0 & 0x80 != 0
    }

    /// Channel number, 0-3
    pub fn channel(self) -> u8 {
        (self.0 >> 4) & 0x3
    }

    /// Service number, 0-7
    pub fn service(self) -> u8 {
        self.0 & 0x7
    }
}

/// Status bytes echoed at the start of every reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// `events.system`
    pub system: u8,
    /// `events.events`
    pub trx: TrxEvents,
}

impl FromByteArray for Status {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            system: bytes[0],
            trx: TrxEvents::from_bits_retain(bytes[1]),
        })
    }
}

/// Snapshot of the four event bytes
///
/// Owned by the [`Device`](crate::Device). `system` and `trx` always reflect
/// the most recent telegram, which is not necessarily the most recent
/// Get Event Bytes command. `power` and `config` only change on
/// Get Event Bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Events {
    /// `events.system`
    pub system: u8,
    /// `events.events`
    pub trx: TrxEvents,
    /// `events.power`
    pub power: u8,
    /// `events.config`
    pub config: u8,
}

impl Events {
    /// Status part of the snapshot
    pub fn status(&self) -> Status {
        Status {
            system: self.system,
            trx: self.trx,
        }
    }

    /// `config` decoded as a [`ServiceChannel`]
    pub fn service_channel(&self) -> ServiceChannel {
        ServiceChannel::from_byte(self.config)
    }

    pub(crate) fn update_status(&mut self, status: Status) {
        self.system = status.system;
        self.trx = status.trx;
    }
}

impl FromByteArray for Events {
    type Error = Infallible;
    type Array = [u8; 4];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            system: bytes[0],
            trx: TrxEvents::from_bits_retain(bytes[1]),
            power: bytes[2],
            config: bytes[3],
        })
    }
}
