//! Board-agnostic model for the TFT GLCD adapter driver
//!
//! This crate contains everything about the adapter that does not touch
//! the bus:
//!
//! - Text geometry and its plausibility window
//! - The frame buffer (character cells plus icon and LED flag bytes)
//! - Icon and LED status masks, including the icon decay counter
//! - Refresh cadence and the fan-percentage overlay cell
//! - Link state machine (absent/present)
//! - Panel configuration and its parser
//! - The host-facing [`traits::Panel`] trait

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod framebuffer;
pub mod geometry;
pub mod overlay;
pub mod refresh;
pub mod state;
pub mod status;
pub mod traits;

pub use framebuffer::{Cursor, FrameBuffer, FrameBufferError, BLANK, MAX_FRAMEBUFFER_LEN};
pub use geometry::Geometry;
pub use overlay::FanOverlay;
pub use refresh::RefreshDivider;
pub use state::{LinkEvent, LinkState};
pub use status::{Icon, IconBits, Led, LedBits};
