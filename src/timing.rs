//! SPI timing and polling configuration
//!
//! Every telegram is framed by the delays below (see the SPI timing diagram of
//! the ATA5831 datasheet):
//!
//! ```text
//! NSS  ‾‾\____________________________________________/‾‾‾‾‾‾‾‾
//!         |<- T0 ->|<- T1 ->|<- bytes ->|<- T4 ->|      |<- T5 ->|
//! ```
//!
//! T2 (shift time of one byte) and T3 (pause between bytes) are both zero and
//! not enforced by the driver.

/// Size of the transceiver's SPI buffer; no telegram may be longer
pub const BUFFER_LEN: usize = 32;

/// Chip-select timing envelope, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// NSS low until the internal AVR is active (wake-up from sleep)
    pub t0_us: u32,
    /// AVR active until the first telegram byte
    pub t1_us: u32,
    /// Processing time of the last byte
    pub t4_us: u32,
    /// Idle time between telegrams
    pub t5_us: u32,
}

impl Timing {
    /// Timing values from the ATA5831 datasheet
    pub const DATASHEET: Self = Self {
        t0_us: 25,
        t1_us: 18,
        t4_us: 35,
        t5_us: 16,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DATASHEET
    }
}

/// Bounded polling budget for waiting on the IRQ line
///
/// The total wait is roughly `polls * interval_us` microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollTimeout {
    /// Maximum number of IRQ samples
    pub polls: u32,
    /// Delay between two samples
    pub interval_us: u32,
}

impl PollTimeout {
    /// Budget for a short acknowledge transmission (30 ms)
    pub const TX: Self = Self {
        polls: 300,
        interval_us: 100,
    };

    /// Budget for receiving an acknowledge telegram (40 ms)
    pub const RX: Self = Self {
        polls: 400,
        interval_us: 100,
    };
}

pub(crate) const fn us_to_ns(us: u32) -> u32 {
    us.saturating_mul(1_000)
}
