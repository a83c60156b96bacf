//! Framed exchanges with the adapter
//!
//! Each exchange is one chip-select window. The adapter firmware needs a
//! short turnaround between the last byte and the select line going high,
//! and between a poll opcode and its response slot; those waits are the
//! named constants below.
//!
//! Exchange shapes:
//!
//! | Shape    | Sequence                                            |
//! |----------|-----------------------------------------------------|
//! | query    | select, opcode, read, deselect                      |
//! | poll     | select, opcode, settle, read, settle, deselect      |
//! | value    | select, opcode, settle, value, settle, deselect     |
//! | stream   | select, opcode, payload..., settle, deselect        |
//!
//! Reads clock out [`Command::GetSpiData`] and keep whatever comes back.

use embedded_hal::delay::DelayNs;
use tglcd_core::config::PanelConfig;
use tglcd_hal::{SpiConfig, Transport};
use tglcd_protocol::Command;

/// Adapter turnaround around transfers, in microseconds
pub const SETTLE_US: u32 = 10;

/// Time the adapter needs after [`Command::InitAdapter`], in milliseconds
pub const INIT_DELAY_MS: u32 = 100;

/// Bus settings for the configured adapter clock
pub fn spi_config(config: &PanelConfig) -> SpiConfig {
    SpiConfig::with_frequency(config.spi_frequency)
}

/// Transport plus delay source, framing one exchange at a time
pub struct Session<T, D> {
    transport: T,
    delay: D,
}

impl<T, D> Session<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Create a session
    pub fn new(transport: T, delay: D) -> Self {
        Self { transport, delay }
    }

    /// Send a setup query and read its answer without settle delays
    pub fn query(&mut self, command: Command) -> Result<u8, T::Error> {
        self.framed(|transport, _| {
            transport.transfer_byte(command.to_byte())?;
            transport.transfer_byte(Command::GetSpiData.to_byte())
        })
    }

    /// Send a runtime poll and read its answer
    pub fn poll(&mut self, command: Command) -> Result<u8, T::Error> {
        self.framed(|transport, delay| {
            transport.transfer_byte(command.to_byte())?;
            delay.delay_us(SETTLE_US);
            let response = transport.transfer_byte(Command::GetSpiData.to_byte())?;
            delay.delay_us(SETTLE_US);
            Ok(response)
        })
    }

    /// Send a command carrying one value byte
    pub fn write_value(&mut self, command: Command, value: u8) -> Result<(), T::Error> {
        self.framed(|transport, delay| {
            transport.transfer_byte(command.to_byte())?;
            delay.delay_us(SETTLE_US);
            transport.transfer_byte(value)?;
            delay.delay_us(SETTLE_US);
            Ok(())
        })
    }

    /// Send a command followed by a payload stream
    pub fn stream(&mut self, command: Command, payload: &[u8]) -> Result<(), T::Error> {
        self.framed(|transport, delay| {
            transport.transfer_byte(command.to_byte())?;
            transport.write(payload)?;
            delay.delay_us(SETTLE_US);
            Ok(())
        })
    }

    /// Block for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Delay source, for callers that generate their own timing
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    #[cfg(test)]
    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the select line and hand back transport and delay
    pub fn release(mut self) -> (T, D) {
        if self.transport.deselect().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Adapter deselect failed on release");
        }
        (self.transport, self.delay)
    }

    /// Run `body` inside one select window
    ///
    /// The select line is released even if `body` fails.
    fn framed<R>(
        &mut self,
        body: impl FnOnce(&mut T, &mut D) -> Result<R, T::Error>,
    ) -> Result<R, T::Error> {
        self.transport.select()?;
        let result = body(&mut self.transport, &mut self.delay);
        let released = self.transport.deselect();
        let value = result?;
        released?;
        Ok(value)
    }
}
