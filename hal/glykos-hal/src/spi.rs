//! SPI transport over blocking `embedded-hal` traits
//!
//! Implements [`DisplayBus`] for the usual four-wire TFT hookup: an SPI
//! bus shared or exclusive, an active-low chip-select pin, and a
//! data/command pin (low = command, high = data).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::bus::DisplayBus;

/// Errors from the SPI transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Control pin (CS or DC) failed
    Pin(P),
}

/// Four-wire SPI transport: bus + CS + DC + delay provider
pub struct SpiTransport<SPI, CS, DC, D> {
    spi: SPI,
    cs: CS,
    dc: DC,
    delay: D,
}

impl<SPI, CS, DC, D> SpiTransport<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
    D: DelayNs,
{
    /// Create a new transport
    ///
    /// The chip-select pin is deasserted (driven high) immediately so the
    /// panel ignores traffic meant for other devices on the bus.
    pub fn new(spi: SPI, mut cs: CS, dc: DC, delay: D) -> Result<Self, TransportError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(TransportError::Pin)?;
        Ok(Self { spi, cs, dc, delay })
    }

    /// Release the underlying peripherals
    pub fn release(self) -> (SPI, CS, DC, D) {
        (self.spi, self.cs, self.dc, self.delay)
    }
}

impl<SPI, CS, DC, D> DisplayBus for SpiTransport<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
    D: DelayNs,
{
    type Error = TransportError<SPI::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(TransportError::Pin)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(TransportError::Pin)
    }

    fn command_mode(&mut self) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(TransportError::Pin)
    }

    fn data_mode(&mut self) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(TransportError::Pin)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(TransportError::Spi)?;
        self.spi.flush().map_err(TransportError::Spi)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
