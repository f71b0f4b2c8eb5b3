//! ATA5831 Device Interface
//!
//! This module provides the interface for talking to the ATA5831 UHF
//! transceiver over SPI. The interface is built around the
//! `Device<SPI, DELAY>` struct which owns an SPI device and a delay provider
//! and provides methods for:
//! - Running raw telegrams inside the SPI timing envelope
//! - Executing fixed-length commands
//! - Reading and writing the FIFOs and the SRAM
//! - Composite operations (EEPROM block write, power-on, event wait)
//!
//! Every telegram refreshes the [`Events`] snapshot held by the device.
//!
//! # Example
//! ```no_run
//! use ata5831::{Device, GetEventBytes, ReadFillLevelRxFifo};
//!
//! # fn demo<SPI: embedded_hal::spi::SpiDevice, D: embedded_hal::delay::DelayNs>(spi: SPI, delay: D) -> Result<(), ata5831::Error> {
//! let mut device = Device::new(spi, delay);
//!
//! let events = device.execute_command(GetEventBytes)?;
//! if events.trx.telegram_complete_a() {
//!     let fill = device.execute_command(ReadFillLevelRxFifo)?.fill_level;
//!     let mut data = [0u8; 29];
//!     device.read_rx_fifo(&mut data[..usize::from(fill).min(29)])?;
//! }
//! # Ok(())
//! # }
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::{Operation, SpiDevice};
use heapless::Vec;
use regiface::{ByteArray, Command, FromByteArray, ToByteArray};

use crate::commands::{
    GetEventBytes, GetVersionRom, Opcode, RomVersion, TriggerEepromSecureWrite,
    EEPROM_WRITE_TIME_MS, SECURE_WRITE_MAX_LEN,
};
use crate::events::{Events, Status};
use crate::power::PowerControl;
use crate::registers::{
    SECURE_WRITE_ADDR_HIGH, SECURE_WRITE_ADDR_LOW, SECURE_WRITE_DATA, SECURE_WRITE_LEN,
};
use crate::timing::{us_to_ns, PollTimeout, Timing, BUFFER_LEN};
use crate::Error;

type Frame = Vec<u8, BUFFER_LEN>;

/// Allocates a zeroed telegram of `len` bytes starting with `opcode`.
fn new_frame(opcode: Opcode, len: usize) -> Result<Frame, Error> {
    if len < 2 {
        return Err(Error::FrameLength(len));
    }
    let mut frame = Frame::new();
    frame.resize(len, 0x00).map_err(|_| Error::FrameLength(len))?;
    frame[0] = opcode as u8;
    Ok(frame)
}

/// Main device interface for the ATA5831.
///
/// Owns the SPI device (which drives NSS), a blocking delay provider used for
/// the inter-telegram idle time and the command back-off delays, and the
/// [`Events`] snapshot.
#[derive(Debug)]
pub struct Device<SPI, DELAY> {
    spi: SPI,
    delay: DELAY,
    timing: Timing,
    events: Events,
}

impl<SPI, DELAY> Device<SPI, DELAY> {
    /// Creates a new Device with the datasheet timing.
    ///
    /// # Arguments
    /// * `spi` - SPI device for the transceiver, owning its NSS line
    /// * `delay` - Blocking delay provider
    pub fn new(spi: SPI, delay: DELAY) -> Self {
        Self::with_timing(spi, delay, Timing::default())
    }

    /// Creates a new Device with a custom timing envelope.
    pub fn with_timing(spi: SPI, delay: DELAY, timing: Timing) -> Self {
        Self {
            spi,
            delay,
            timing,
            events: Events::default(),
        }
    }

    /// Last known event bytes.
    pub fn events(&self) -> Events {
        self.events
    }

    /// Timing envelope in use.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Releases the SPI device and the delay provider.
    pub fn release(self) -> (SPI, DELAY) {
        (self.spi, self.delay)
    }

    #[cfg(test)]
    pub(crate) fn spi_ref(&self) -> &SPI {
        &self.spi
    }

    #[cfg(test)]
    pub(crate) fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }
}

impl<SPI, DELAY> Device<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Runs one telegram and records the echoed status in the snapshot.
    ///
    /// NSS is held low for T0 + T1, the exchange and T4, then the bus idles
    /// for T5. The reply replaces `frame` byte for byte. Reply bytes 0 and 1
    /// refresh `system` and `trx` of the snapshot; a 4 byte Get Event Bytes
    /// telegram replaces all four event bytes. Nothing beyond that is
    /// interpreted.
    ///
    /// # Errors
    /// * `Error::FrameLength` - `frame` is shorter than 2 or longer than
    ///   [`BUFFER_LEN`] bytes; nothing is sent
    /// * `Error::Bus` - SPI communication failed
    pub fn transfer(&mut self, frame: &mut [u8]) -> Result<Status, Error> {
        let opcode = frame.first().copied();
        self.clock_frame(frame)?;
        trace!("telegram {:#x}, {} bytes", opcode.unwrap_or_default(), frame.len());

        if opcode == Some(Opcode::GetEventBytes as u8) && frame.len() == 4 {
            self.events = Events::from_bytes([frame[0], frame[1], frame[2], frame[3]])
                .unwrap_or_else(|e| match e {});
        } else {
            let status = Status::from_bytes([frame[0], frame[1]]).unwrap_or_else(|e| match e {});
            self.events.update_status(status);
        }
        Ok(self.events.status())
    }

    /// Clocks `frame` through the timing envelope.
    fn clock_frame(&mut self, frame: &mut [u8]) -> Result<(), Error> {
        if !(2..=BUFFER_LEN).contains(&frame.len()) {
            return Err(Error::FrameLength(frame.len()));
        }

        let timing = self.timing;
        self.spi
            .transaction(&mut [
                Operation::DelayNs(us_to_ns(timing.t0_us)),
                Operation::DelayNs(us_to_ns(timing.t1_us)),
                Operation::TransferInPlace(&mut *frame),
                Operation::DelayNs(us_to_ns(timing.t4_us)),
            ])
            .map_err(|_| Error::Bus)?;

        self.delay.delay_us(timing.t5_us);
        Ok(())
    }

    /// Executes a fixed-length command on the device.
    ///
    /// # Type Parameters
    /// * `C` - Command type implementing the Command trait with u8 ID
    ///
    /// # Returns
    /// Command response parameters on success
    ///
    /// # Errors
    /// * `Error::FrameLength` - request and response lengths do not form a
    ///   symmetric telegram of at most [`BUFFER_LEN`] bytes
    /// * `Error::Bus` - SPI communication failed
    pub fn execute_command<C>(&mut self, command: C) -> Result<C::ResponseParameters, Error>
    where
        C: Command<IdType = u8>,
        C::CommandParameters: ToByteArray<Error = Infallible>,
        C::ResponseParameters: FromByteArray<Error = Infallible>,
    {
        let params = command
            .invoking_parameters()
            .to_bytes()
            .unwrap_or_else(|e| match e {});
        let request: &[u8] = params.as_ref();
        let mut raw_response = <C::ResponseParameters as FromByteArray>::Array::new();

        let frame: &mut [u8] = raw_response.as_mut();
        if frame.len() != request.len() + 1 {
            return Err(Error::FrameLength(request.len() + 1));
        }
        frame[0] = C::id();
        frame[1..].copy_from_slice(request);
        self.transfer(frame)?;

        Ok(C::ResponseParameters::from_bytes(raw_response).unwrap_or_else(|e| match e {}))
    }

    /// Reads `data.len()` bytes from the RSSI FIFO (SFIFO, RX direction).
    ///
    /// At most 29 bytes fit in one telegram.
    pub fn read_rssi_fifo(&mut self, data: &mut [u8]) -> Result<Status, Error> {
        self.read_fifo(Opcode::ReadRssiFifo, data)
    }

    /// Reads `data.len()` bytes from the RX data FIFO (DFIFO).
    ///
    /// At most 29 bytes fit in one telegram. Use
    /// [`ReadFillLevelRxFifo`](crate::ReadFillLevelRxFifo) first to learn how
    /// many bytes are available.
    pub fn read_rx_fifo(&mut self, data: &mut [u8]) -> Result<Status, Error> {
        self.read_fifo(Opcode::ReadRxFifo, data)
    }

    fn read_fifo(&mut self, opcode: Opcode, data: &mut [u8]) -> Result<Status, Error> {
        // opcode, length, one dummy, data
        let mut frame = new_frame(opcode, data.len() + 3)?;
        frame[1] = data.len() as u8;

        let status = self.transfer(&mut frame)?;
        data.copy_from_slice(&frame[3..]);
        Ok(status)
    }

    /// Writes `data` to consecutive SRAM or register addresses.
    ///
    /// At most 28 bytes fit in one telegram. Only allowed in IDLEMode.
    pub fn write_sram(&mut self, address: u16, data: &[u8]) -> Result<Status, Error> {
        let mut frame = new_frame(Opcode::WriteSram, data.len() + 4)?;
        frame[1] = data.len() as u8;
        frame[2..4].copy_from_slice(&address.to_be_bytes());
        frame[4..].copy_from_slice(data);

        self.transfer(&mut frame)
    }

    /// Reads `data.len()` bytes from consecutive SRAM or register addresses.
    ///
    /// At most 27 bytes fit in one telegram. Only allowed in IDLEMode.
    pub fn read_sram(&mut self, address: u16, data: &mut [u8]) -> Result<Status, Error> {
        // opcode, length, address, three dummies, data
        let mut frame = new_frame(Opcode::ReadSram, data.len() + 5)?;
        frame[1] = data.len() as u8;
        frame[2..4].copy_from_slice(&address.to_be_bytes());

        let status = self.transfer(&mut frame)?;
        data.copy_from_slice(&frame[5..]);
        Ok(status)
    }

    /// Appends `data` to the TX data FIFO.
    ///
    /// At most 30 bytes fit in one telegram.
    pub fn write_tx_fifo(&mut self, data: &[u8]) -> Result<Status, Error> {
        self.write_fifo(Opcode::WriteTxFifo, data)
    }

    /// Appends `data` to the TX preamble FIFO (SFIFO, TX direction).
    ///
    /// At most 30 bytes fit in one telegram.
    pub fn write_tx_preamble_fifo(&mut self, data: &[u8]) -> Result<Status, Error> {
        self.write_fifo(Opcode::WriteTxPreambleFifo, data)
    }

    fn write_fifo(&mut self, opcode: Opcode, data: &[u8]) -> Result<Status, Error> {
        let mut frame = new_frame(opcode, data.len() + 2)?;
        frame[1] = data.len() as u8;
        frame[2..].copy_from_slice(data);

        self.transfer(&mut frame)
    }

    /// Reads `data.len()` bytes directly from the DFIFO, bypassing the SPI
    /// FIFO.
    ///
    /// Meant for byte-paced reads in timing critical situations; only works
    /// up to 250 kbit/s. At most 30 bytes fit in one telegram.
    ///
    /// # Errors
    /// * `Error::EmptyRead` - `data` is empty
    pub fn read_rx_fifo_byte_int(&mut self, data: &mut [u8]) -> Result<Status, Error> {
        self.read_fifo_byte_int(Opcode::ReadRxFifoByteInt, data)
    }

    /// Reads `data.len()` bytes directly from the SFIFO, bypassing the SPI
    /// FIFO.
    ///
    /// See [`read_rx_fifo_byte_int`](Device::read_rx_fifo_byte_int).
    pub fn read_rssi_fifo_byte_int(&mut self, data: &mut [u8]) -> Result<Status, Error> {
        self.read_fifo_byte_int(Opcode::ReadRssiFifoByteInt, data)
    }

    fn read_fifo_byte_int(&mut self, opcode: Opcode, data: &mut [u8]) -> Result<Status, Error> {
        let len = data.len();
        if len == 0 {
            return Err(Error::EmptyRead);
        }
        // opcode, (len - 1) step bytes, two closing zeros
        let mut frame = new_frame(opcode, len + 2)?;
        frame[1..len].fill(0x01);

        let status = self.transfer(&mut frame)?;
        data.copy_from_slice(&frame[2..]);
        Ok(status)
    }

    /// Writes `data` to the EEPROM starting at `address`.
    ///
    /// The data is staged in the secure write SRAM area in chunks of up to
    /// [`SECURE_WRITE_MAX_LEN`] bytes. Each chunk is committed with
    /// [`TriggerEepromSecureWrite`] and followed by a blocking wait of
    /// [`EEPROM_WRITE_TIME_MS`] per byte. The address wraps at 16 bits.
    ///
    /// # Important Notes
    /// - Must be issued in IDLEMode
    /// - Blocks for about 10ms per byte
    pub fn write_eeprom_block(&mut self, address: u16, data: &[u8]) -> Result<(), Error> {
        let mut address = address;
        for chunk in data.chunks(SECURE_WRITE_MAX_LEN) {
            let len = chunk.len() as u8;
            let [high, low] = address.to_be_bytes();
            debug!("EEPROM secure write of {} bytes at {:#x}", len, address);

            self.write_sram(SECURE_WRITE_ADDR_HIGH, &[high])?;
            self.write_sram(SECURE_WRITE_ADDR_LOW, &[low])?;
            self.write_sram(SECURE_WRITE_LEN, &[len])?;
            self.write_sram(SECURE_WRITE_DATA, chunk)?;
            self.execute_command(TriggerEepromSecureWrite)?;

            self.delay.delay_ms(EEPROM_WRITE_TIME_MS * u32::from(len));
            address = address.wrapping_add(u16::from(len));
        }
        Ok(())
    }

    /// Powers on and resets the transceiver.
    ///
    /// See [`PowerControl::power_on`]. The snapshot is cleared since the chip
    /// restarts.
    pub fn power_on<NRES, NPWRON>(
        &mut self,
        power: &mut PowerControl<NRES, NPWRON>,
    ) -> Result<(), Error>
    where
        NRES: OutputPin,
        NPWRON: OutputPin,
    {
        power.power_on(&mut self.delay)?;
        self.events = Events::default();
        Ok(())
    }

    /// Runs the start-up sequence.
    ///
    /// Powers on the transceiver, reads the event bytes to clear pending
    /// events and returns the ROM version.
    pub fn init<NRES, NPWRON>(
        &mut self,
        power: &mut PowerControl<NRES, NPWRON>,
    ) -> Result<RomVersion, Error>
    where
        NRES: OutputPin,
        NPWRON: OutputPin,
    {
        self.power_on(power)?;
        self.execute_command(GetEventBytes)?;
        let version = self.execute_command(GetVersionRom)?.version;
        debug!("ATA5831 ROM version {}.{}", version.major(), version.minor());
        Ok(version)
    }

    /// Waits for the transceiver to assert its IRQ line (active low), then
    /// reads and returns the event bytes.
    ///
    /// The line is sampled after every `timeout.interval_us`, at most
    /// `timeout.polls` times.
    ///
    /// # Errors
    /// * `Error::Timeout` - the line stayed high for the whole budget
    /// * `Error::Pin` - sampling the line failed
    pub fn wait_for_event<IRQ>(&mut self, irq: &mut IRQ, timeout: PollTimeout) -> Result<Events, Error>
    where
        IRQ: InputPin,
    {
        for _ in 0..timeout.polls {
            self.delay.delay_us(timeout.interval_us);
            if irq.is_low().map_err(|_| Error::Pin)? {
                return self.execute_command(GetEventBytes);
            }
        }
        warn!("no transceiver event after {} polls", timeout.polls);
        Err(Error::Timeout)
    }
}
