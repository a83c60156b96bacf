//! Panel configuration
//!
//! Configuration consumed from the host environment: which SPI channel
//! the adapter hangs off, its chip select and clock, an optional buzzer
//! pin on the main board and the default contrast. Every field has a
//! default, so an empty configuration is valid.

pub mod panel;
pub mod parse;

pub use panel::{
    PanelConfig, PinConfig, SpiChannel, SpiPins, DEFAULT_CONTRAST, DEFAULT_SPI_FREQUENCY,
};
pub use parse::{parse_panel_config, ParseError};
