#![cfg_attr(not(test), no_std)]
//! ATA5831 UHF Transceiver Driver
//!
//! This crate provides a type-safe interface for the Microchip ATA5831/ATA5833
//! family of UHF ASK/FSK transceivers. The transceiver runs its own firmware
//! and is controlled by the host through short SPI telegrams.
//!
//! # Features
//! - Frequency bands: 315/433/868/915 MHz
//! - Two receive paths (A and B) with independent wake-up and ID checks
//! - Service/channel configurations stored in EEPROM
//! - RX, TX, TX preamble and RSSI FIFOs
//! - Secure EEPROM writes staged through SRAM
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Main device interface for hardware interaction
//!   - Runs telegrams inside the SPI timing envelope
//!   - Keeps the event byte snapshot up to date
//!   - Provides the FIFO, SRAM and composite operations
//!
//! - [`commands`]: Fixed-length commands
//!   - Readouts: fill levels, event bytes, versions and measurements
//!   - Operating modes, calibration, resets and services
//!   - Single-byte EEPROM access and the secure write trigger
//!
//! - [`events`]: Event and status byte types
//! - [`power`]: NRES / NPWRON1 sequencing
//! - [`registers`]: SRAM addresses used by the driver
//! - [`telegram`]: Application telegram checksum
//! - [`timing`]: SPI timing envelope and poll budgets
//!
//! # Usage
//! The driver uses the `regiface` crate to describe fixed-length commands.
//! The main entry point is the [`Device`] struct which wraps an SPI device
//! and a delay provider.
//!
//! A typical session looks like this:
//!
//! 1. Create a [`Device`] and a [`PowerControl`] from your HAL's pins
//! 2. Call [`Device::init`] to power on, clear events and read the ROM version
//! 3. Select a service/channel with [`SetSystemMode`] (RX or polling)
//! 4. Wait for [`Device::wait_for_event`] and read the RX FIFO
//! 5. Fill the TX FIFO and switch to TXMode to transmit
//!
//! # Important Notes
//! - SRAM and register access is only allowed in IDLEMode
//! - EEPROM writes block for about 10ms per byte
//! - The first two bytes of every reply are status bytes
//! - Telegrams are limited to [`BUFFER_LEN`] bytes

#[macro_use]
mod fmt;

pub mod commands;
pub mod device;
pub mod error;
pub mod events;
pub mod power;
pub mod registers;
pub mod telegram;
pub mod timing;

#[cfg(test)]
mod testing;

pub use regiface::{Command, FromByteArray, ToByteArray};

pub use commands::*;
pub use device::Device;
pub use error::Error;
pub use events::*;
pub use power::PowerControl;
pub use timing::*;
