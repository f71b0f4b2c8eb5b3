//! Reset and power-enable lines

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::Error;

/// Length of the NRES low pulse
pub const RESET_PULSE_US: u32 = 1_000;

/// Start-up time after NRES is released, before the first telegram
pub const STARTUP_US: u32 = 5_000;

/// The NRES and NPWRON1 control lines of the transceiver
///
/// Both lines are active low.
#[derive(Debug)]
pub struct PowerControl<NRES, NPWRON> {
    nres: NRES,
    npwron: NPWRON,
}

impl<NRES, NPWRON> PowerControl<NRES, NPWRON> {
    /// Wraps the reset (`NRES`) and power-on (`NPWRON1`) output pins
    pub fn new(nres: NRES, npwron: NPWRON) -> Self {
        Self { nres, npwron }
    }

    /// Releases the pins
    pub fn release(self) -> (NRES, NPWRON) {
        (self.nres, self.npwron)
    }
}

impl<NRES, NPWRON> PowerControl<NRES, NPWRON>
where
    NRES: OutputPin,
    NPWRON: OutputPin,
{
    /// Wakes and resets the transceiver.
    ///
    /// Pulls NPWRON1 low, pulses NRES low for [`RESET_PULSE_US`] and then
    /// waits [`STARTUP_US`]. No telegram may be sent before this returns.
    ///
    /// # Errors
    /// * `Error::Pin` - setting one of the lines failed
    pub fn power_on<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.npwron.set_low().map_err(|_| Error::Pin)?;
        self.nres.set_low().map_err(|_| Error::Pin)?;
        delay.delay_us(RESET_PULSE_US);
        self.nres.set_high().map_err(|_| Error::Pin)?;
        delay.delay_us(STARTUP_US);
        Ok(())
    }
}
