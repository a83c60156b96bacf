//! Fan-percentage overlay cell
//!
//! The adapter's home screen draws a fan gauge from a raw numeric byte
//! rather than from text. The host recognises its own home screen by a
//! sentinel character at a fixed cell and, just before each transmit,
//! drops the fan percentage into the first cell of the gauge row.

use crate::framebuffer::FrameBuffer;

/// Cell index checked for the home-screen sentinel
pub const HOME_MARKER_INDEX: usize = 20;

/// Sentinel character marking the home screen
pub const HOME_MARKER: u8 = b'X';

/// Row whose first cell receives the fan percentage
pub const FAN_OVERLAY_ROW: u8 = 4;

/// Fan state fed into the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FanOverlay {
    has_fan: bool,
    percent: u16,
}

impl FanOverlay {
    /// Create an overlay with no fan configured
    pub const fn new() -> Self {
        Self {
            has_fan: false,
            percent: 0,
        }
    }

    /// Record whether a fan is configured
    pub fn set_has_fan(&mut self, present: bool) {
        self.has_fan = present;
    }

    /// Record the current fan percentage
    pub fn set_percent(&mut self, percent: u16) {
        self.percent = percent;
    }

    pub fn has_fan(&self) -> bool {
        self.has_fan
    }

    pub fn percent(&self) -> u16 {
        self.percent
    }

    /// Write the overlay cell if the home screen is showing
    ///
    /// Returns true if the cell was written. The percentage is truncated to
    /// a byte. Nothing happens when either cell lies outside the geometry.
    pub fn apply(&self, fb: &mut FrameBuffer) -> bool {
        if !self.has_fan || fb.cell_at(HOME_MARKER_INDEX) != Some(HOME_MARKER) {
            return false;
        }

        let target = fb.geometry().offset(0, FAN_OVERLAY_ROW);
        fb.set_cell_at(target, self.percent as u8)
    }
}
