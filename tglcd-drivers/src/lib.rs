//! TFT GLCD adapter driver
//!
//! This crate drives a microcontroller-based display adapter over a
//! synchronous serial bus:
//!
//! - Transport session framing with fixed settle delays
//! - Geometry discovery and the absent/present gate
//! - Frame buffer refresh and icon aging
//! - Button, encoder, contrast and buzzer exchanges
//! - A mutex-guarded wrapper for hosts with real concurrency
//!
//! The driver is synchronous and has no internal threads. Every exchange
//! blocks for its transfer time plus the settle delays; a buzzer wired to
//! the main board blocks for the whole tone.
//!
//! ```ignore
//! let bus = spi_config(&config); // clock and mode for the platform SPI
//! let transport = SpiTransport::new(spi, cs)?;
//! let mut panel = TftGlcdAdapter::probe(transport, delay, None::<NoPin>, &config);
//! panel.init();
//! panel.clear();
//! panel.write_at(0, 0, b"READY");
//!
//! // In the 20 Hz refresh hook:
//! panel.on_refresh(false);
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod adapter;
pub mod shared;

pub use adapter::{spi_config, Buzzer, NoPin, Session, TftGlcdAdapter};
pub use shared::SharedPanel;
