//! Panel hardware configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default adapter bus clock in Hz
pub const DEFAULT_SPI_FREQUENCY: u32 = 1_000_000;

/// Default LCD contrast
pub const DEFAULT_CONTRAST: u8 = 180;

/// Pin configuration with optional inversion
///
/// Pins are named `port.pin`, e.g. `0.16` or `1.30!` (inverted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO port
    pub port: u8,
    /// Pin number within the port
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(port: u8, pin: u8) -> Self {
        Self {
            port,
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(port: u8, pin: u8) -> Self {
        Self {
            port,
            pin,
            inverted: true,
        }
    }
}

/// Pins of one SPI channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiPins {
    pub mosi: PinConfig,
    pub miso: PinConfig,
    pub sclk: PinConfig,
}

/// SPI channel the adapter is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpiChannel {
    #[default]
    Spi0,
    Spi1,
}

impl SpiChannel {
    /// Map a configured channel number; unknown numbers fall back to channel 0
    pub fn from_number(number: i32) -> Self {
        match number {
            1 => SpiChannel::Spi1,
            _ => SpiChannel::Spi0,
        }
    }

    /// Channel number
    pub fn number(self) -> u8 {
        match self {
            SpiChannel::Spi0 => 0,
            SpiChannel::Spi1 => 1,
        }
    }

    /// Data and clock pins of this channel
    pub const fn pins(self) -> SpiPins {
        match self {
            SpiChannel::Spi0 => SpiPins {
                mosi: PinConfig::new(0, 18),
                miso: PinConfig::new(0, 17),
                sclk: PinConfig::new(0, 15),
            },
            SpiChannel::Spi1 => SpiPins {
                mosi: PinConfig::new(0, 9),
                miso: PinConfig::new(0, 8),
                sclk: PinConfig::new(0, 7),
            },
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// SPI channel
    pub spi_channel: SpiChannel,
    /// Bus clock in Hz
    pub spi_frequency: u32,
    /// Chip-select pin (`None` = not connected)
    pub spi_cs_pin: Option<PinConfig>,
    /// Buzzer pin on the main board (`None` = buzzer is on the adapter)
    pub buzz_pin: Option<PinConfig>,
    /// Initial LCD contrast
    pub contrast: u8,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            spi_channel: SpiChannel::Spi0,
            spi_frequency: DEFAULT_SPI_FREQUENCY,
            spi_cs_pin: None,
            buzz_pin: None,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl PanelConfig {
    /// Create a configuration with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the buzzer is driven from the main board
    pub fn has_local_buzzer(&self) -> bool {
        self.buzz_pin.is_some()
    }
}
