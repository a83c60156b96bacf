//! Host-facing traits
//!
//! These traits define the interface between the host's menu/status code
//! and a display panel implementation.

pub mod panel;

pub use panel::{Panel, PanelExt};
