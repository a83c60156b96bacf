//! SPI bus settings for the adapter
//!
//! The adapter samples on the leading edge with the clock idling low
//! (mode 0). Building the peripheral is the platform's job; hosts take the
//! clock and mode from [`SpiConfig`] when they do.

pub use embedded_hal::spi::{Mode, Phase, Polarity, MODE_0};

/// Default adapter bus clock
pub const DEFAULT_FREQUENCY_HZ: u32 = 1_000_000;

/// Clock and mode the host peripheral must be set up with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::with_frequency(DEFAULT_FREQUENCY_HZ)
    }
}

impl SpiConfig {
    /// Mode 0 at the given clock
    ///
    /// A zero frequency is not a usable clock and falls back to
    /// [`DEFAULT_FREQUENCY_HZ`].
    pub const fn with_frequency(frequency: u32) -> Self {
        let frequency = if frequency == 0 {
            DEFAULT_FREQUENCY_HZ
        } else {
            frequency
        };
        Self {
            frequency,
            mode: MODE_0,
        }
    }
}
