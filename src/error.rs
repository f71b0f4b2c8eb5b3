//! Driver error type

use crate::timing::BUFFER_LEN;

/// Errors returned by [`Device`](crate::Device) operations.
///
/// The ATA5831 protocol itself carries no ACK, NAK or checksum, so none of
/// these variants describe a chip-side fault. Chip anomalies are reported
/// through the [`Events`](crate::Events) snapshot instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The SPI implementation reported an error
    #[error("SPI bus error")]
    Bus,
    /// A reset, power or IRQ pin reported an error
    #[error("control pin error")]
    Pin,
    /// The frame would be shorter than 2 or longer than
    /// [`BUFFER_LEN`] bytes
    #[error("frame length {0} outside 2..={max}", max = BUFFER_LEN)]
    FrameLength(usize),
    /// A byte interrupt read was requested for zero bytes
    #[error("zero-length byte interrupt read")]
    EmptyRead,
    /// The IRQ line was not asserted within the poll budget
    #[error("transceiver unresponsive")]
    Timeout,
}
