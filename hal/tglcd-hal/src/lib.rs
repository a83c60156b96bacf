//! tglcd Hardware Abstraction Layer
//!
//! This crate defines the capabilities the adapter driver is handed at
//! construction time. The driver never touches pins or peripheral
//! registers directly, so the same protocol logic runs against a real
//! SPI peripheral or against a scripted fake in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tglcd-drivers (adapter driver)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tglcd-hal (this crate - Transport)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ SpiTransport  │       │  test fakes   │
//! │ (embedded-hal)│       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Half-duplex select/transfer/deselect channel
//!
//! The buzzer pin and the delay source use the `embedded-hal` traits
//! (`OutputPin`, `DelayNs`) directly.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod spi;
pub mod transport;

// Re-export key types at crate root for convenience
pub use spi::{Mode, Phase, Polarity, SpiConfig, MODE_0};
pub use transport::{SpiTransport, SpiTransportError, Transport};
