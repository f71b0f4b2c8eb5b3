//! Test doubles: a behavioural model of the transceiver and a recording delay

use core::convert::Infallible;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

use crate::commands::{Opcode, SECURE_WRITE_PATTERN};
use crate::registers::{SECURE_WRITE_ADDR_HIGH, SECURE_WRITE_DATA, SECURE_WRITE_LEN};

/// Answers telegrams the way the transceiver firmware does.
///
/// Every reply starts with the current system and trx event bytes. Get Event
/// Bytes clears everything but the config byte. A Trigger EEPROM Secure Write
/// with the right pattern commits the job staged in SRAM.
#[derive(Debug)]
pub struct SimulatedChip {
    pub events: [u8; 4],
    pub rom_version: u8,
    pub flash_version: u16,
    pub customer_version: u8,
    pub temperature: u16,
    pub rssi: u16,
    pub sram: Vec<u8>,
    pub eeprom: Vec<u8>,
    pub rx_fifo: VecDeque<u8>,
    pub rssi_fifo: VecDeque<u8>,
    pub tx_fifo: Vec<u8>,
    pub preamble_fifo: Vec<u8>,
    frames: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Default for SimulatedChip {
    fn default() -> Self {
        Self {
            events: [0x00; 4],
            rom_version: 0x10,
            flash_version: 0x0000,
            customer_version: 0x00,
            temperature: 0x0000,
            rssi: 0x0000,
            sram: vec![0x00; 0x1_0000],
            eeprom: vec![0xFF; 0x1_0000],
            rx_fifo: VecDeque::new(),
            rssi_fifo: VecDeque::new(),
            tx_fifo: Vec::new(),
            preamble_fifo: Vec::new(),
            frames: Vec::new(),
        }
    }
}

fn address(high: u8, low: u8) -> usize {
    usize::from(u16::from_be_bytes([high, low]))
}

fn pop_into(fifo: &mut VecDeque<u8>, out: &mut [u8]) {
    for byte in out {
        *byte = fifo.pop_front().unwrap_or(0x00);
    }
}

impl SimulatedChip {
    /// Requests in the order they were clocked in
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.frames.iter().map(|(request, _)| request.clone()).collect()
    }

    pub fn last_request(&self) -> Vec<u8> {
        self.frames.last().map(|(request, _)| request.clone()).unwrap_or_default()
    }

    pub fn last_reply(&self) -> Vec<u8> {
        self.frames.last().map(|(_, reply)| reply.clone()).unwrap_or_default()
    }

    fn answer(&mut self, request: &[u8]) -> Vec<u8> {
        let len = request.len();
        let mut reply = vec![0x00; len];
        reply[0] = self.events[0];
        reply[1] = self.events[1];

        match request[0] {
            op if op == Opcode::ReadFillLevelRxFifo as u8 => reply[2] = self.rx_fifo.len() as u8,
            op if op == Opcode::ReadFillLevelTxFifo as u8 => reply[2] = self.tx_fifo.len() as u8,
            op if op == Opcode::ReadFillLevelRssiFifo as u8 => {
                reply[2] = self.rssi_fifo.len() as u8
            }
            op if op == Opcode::GetEventBytes as u8 => {
                reply[2] = self.events[2];
                reply[3] = self.events[3];
                self.events[0] = 0x00;
                self.events[1] = 0x00;
                self.events[2] = 0x00;
            }
            op if op == Opcode::ReadRssiFifo as u8 => pop_into(&mut self.rssi_fifo, &mut reply[3..]),
            op if op == Opcode::ReadRxFifo as u8 => pop_into(&mut self.rx_fifo, &mut reply[3..]),
            op if op == Opcode::WriteSram as u8 => {
                let start = address(request[2], request[3]);
                let count = usize::from(request[1]);
                self.sram[start..start + count].copy_from_slice(&request[4..4 + count]);
            }
            op if op == Opcode::ReadSram as u8 => {
                let start = address(request[2], request[3]);
                let count = usize::from(request[1]);
                reply[5..5 + count].copy_from_slice(&self.sram[start..start + count]);
            }
            op if op == Opcode::WriteEeprom as u8 => {
                self.eeprom[address(request[1], request[2])] = request[3];
            }
            op if op == Opcode::ReadEeprom as u8 => {
                reply[4] = self.eeprom[address(request[1], request[2])];
            }
            op if op == Opcode::WriteTxFifo as u8 => {
                let count = usize::from(request[1]);
                self.tx_fifo.extend_from_slice(&request[2..2 + count]);
            }
            op if op == Opcode::WriteTxPreambleFifo as u8 => {
                let count = usize::from(request[1]);
                self.preamble_fifo.extend_from_slice(&request[2..2 + count]);
            }
            op if op == Opcode::GetVersionRom as u8 => reply[2] = self.rom_version,
            op if op == Opcode::GetVersionFlash as u8 => {
                reply[2] = self.rom_version;
                reply[3..5].copy_from_slice(&self.flash_version.to_be_bytes());
                reply[5] = self.customer_version;
            }
            op if op == Opcode::TriggerEepromSecureWrite as u8 => {
                if request[1..4] == SECURE_WRITE_PATTERN {
                    self.commit_secure_write();
                }
            }
            op if op == Opcode::ReadTemperatureValue as u8 => {
                reply[2..4].copy_from_slice(&self.temperature.to_be_bytes())
            }
            op if op == Opcode::GetRssiValue as u8 => {
                reply[2..4].copy_from_slice(&self.rssi.to_be_bytes())
            }
            op if op == Opcode::ReadRxFifoByteInt as u8 => pop_into(&mut self.rx_fifo, &mut reply[2..]),
            op if op == Opcode::ReadRssiFifoByteInt as u8 => {
                pop_into(&mut self.rssi_fifo, &mut reply[2..])
            }
            _ => {}
        }

        reply
    }

    fn commit_secure_write(&mut self) {
        let high = usize::from(SECURE_WRITE_ADDR_HIGH);
        let target = address(self.sram[high], self.sram[high + 1]);
        let count = usize::from(self.sram[usize::from(SECURE_WRITE_LEN)]);
        let data = usize::from(SECURE_WRITE_DATA);
        self.eeprom[target..target + count].copy_from_slice(&self.sram[data..data + count]);
    }
}

impl ErrorType for SimulatedChip {
    type Error = Infallible;
}

impl SpiDevice for SimulatedChip {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        for operation in operations {
            match operation {
                Operation::DelayNs(_) => {}
                Operation::TransferInPlace(buf) => {
                    let request = buf.to_vec();
                    let reply = self.answer(&request);
                    buf.copy_from_slice(&reply);
                    self.frames.push((request, reply));
                }
                _ => panic!("the transceiver only runs full-duplex telegrams"),
            }
        }
        Ok(())
    }
}

/// Delay provider that records every requested delay in nanoseconds
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub delays_ns: Vec<u32>,
}

impl RecordingDelay {
    /// Whole millisecond delays, in order
    pub fn millis(&self) -> Vec<u32> {
        self.delays_ns
            .iter()
            .filter(|ns| **ns >= 1_000_000 && **ns % 1_000_000 == 0)
            .map(|ns| ns / 1_000_000)
            .collect()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delays_ns.push(us * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ns.push(ms * 1_000_000);
    }
}
