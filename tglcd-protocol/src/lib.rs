//! TFT GLCD Adapter Wire Protocol
//!
//! This crate defines the single-byte command protocol spoken between the
//! host controller and a TFT GLCD adapter over a synchronous serial bus.
//! The adapter is a microcontroller that renders a text-cell screen, drives
//! its own LCD and debounces its own buttons and encoder.
//!
//! # Protocol Overview
//!
//! Every exchange is one chip-select window:
//! ```text
//! ┌────────┬────────┬─────────────────────┬────────┬──────────┐
//! │ SELECT │ OPCODE │ PAYLOAD / RESPONSE  │ SETTLE │ DESELECT │
//! │        │ 1B     │ 0–N B               │ 10 µs  │          │
//! └────────┴────────┴─────────────────────┴────────┴──────────┘
//! ```
//!
//! Responses are clocked back by sending [`Command::GetSpiData`] in the
//! response slot. There is no checksum, no retry and no version field
//! beyond the protocol-id byte sent with [`Command::InitAdapter`].

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod input;

pub use command::{BuzzerRequest, Command, PROTOCOL_ID};
pub use input::{encoder_delta, Buttons};
