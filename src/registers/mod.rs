//! SRAM addresses used by the driver
//!
//! The secure EEPROM write reads its job from the `tmpAryApp` array in SRAM.
//! The first two bytes hold the EEPROM address, the third the length and the
//! remaining seven the data (see
//! [`TriggerEepromSecureWrite`](crate::TriggerEepromSecureWrite)).

/// `tmpAryApp[0]`: EEPROM address, high byte
pub const SECURE_WRITE_ADDR_HIGH: u16 = 0x02E9;

/// `tmpAryApp[1]`: EEPROM address, low byte
pub const SECURE_WRITE_ADDR_LOW: u16 = 0x02EA;

/// `tmpAryApp[2]`: number of data bytes
pub const SECURE_WRITE_LEN: u16 = 0x02EB;

/// `tmpAryApp[3..10]`: data bytes
pub const SECURE_WRITE_DATA: u16 = 0x02EC;
