//! Half-duplex transport to the adapter
//!
//! Every exchange with the adapter is framed the same way: assert the
//! device select line, clock bytes through, release the line. The
//! [`Transport`] trait exposes exactly those three primitives so the
//! driver can frame exchanges itself and tests can record them.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Select/transfer/deselect channel to a single device
pub trait Transport {
    /// Error type for bus operations
    type Error;

    /// Assert the device select line
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Release the device select line
    ///
    /// Implementations must finish any in-flight transfer first.
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Clock one byte out and return the byte clocked in at the same time
    fn transfer_byte(&mut self, out: u8) -> Result<u8, Self::Error>;

    /// Write a sequence of bytes, discarding whatever comes back
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.transfer_byte(byte)?;
        }
        Ok(())
    }
}

/// Errors from [`SpiTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiTransportError<S, P> {
    /// SPI peripheral error
    Spi(S),
    /// Chip-select pin error
    Pin(P),
}

/// [`Transport`] over an `embedded-hal` SPI bus and an active-low chip select
///
/// The chip select is driven high (released) on construction so the
/// adapter does not see a partial exchange while the host boots.
pub struct SpiTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Wrap a configured SPI bus and chip-select pin
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, SpiTransportError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(SpiTransportError::Pin)?;
        Ok(Self { spi, cs })
    }

    /// Release the underlying bus and pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> Transport for SpiTransport<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    type Error = SpiTransportError<SPI::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(SpiTransportError::Pin)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(SpiTransportError::Spi)?;
        self.cs.set_high().map_err(SpiTransportError::Pin)
    }

    fn transfer_byte(&mut self, out: u8) -> Result<u8, Self::Error> {
        let mut buf = [out];
        self.spi
            .transfer_in_place(&mut buf)
            .map_err(SpiTransportError::Spi)?;
        Ok(buf[0])
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(data).map_err(SpiTransportError::Spi)
    }
}
