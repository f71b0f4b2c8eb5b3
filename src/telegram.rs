//! Telegram checksum
//!
//! The demo sensor telegrams end with a one-byte checksum: the two's
//! complement of the sum of all preceding bytes. The transceiver does not
//! check it; validating received payloads is up to the application.

/// Checksum over `data`, `0xFF - sum + 1` with wrapping arithmetic
pub fn checksum(data: &[u8]) -> u8 {
    let sum = data.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte));
    0xFFu8.wrapping_sub(sum).wrapping_add(1)
}

/// Checks that the last byte of `telegram` is the checksum of the rest.
///
/// Returns `false` for an empty telegram.
pub fn verify(telegram: &[u8]) -> bool {
    match telegram.split_last() {
        Some((last, payload)) => *last == checksum(payload),
        None => false,
    }
}
