//! Refresh cadence
//!
//! The host scheduler calls the refresh hook at a fixed rate. Pushing the
//! whole buffer on every call would saturate the bus for no visible gain,
//! so only every [`REFRESH_DIVIDER`]th call transmits (a 20 Hz hook gives
//! a 10 Hz display refresh). A forced refresh transmits at once and
//! restarts the count.

/// Hook calls per transmit
pub const REFRESH_DIVIDER: u8 = 2;

/// Counts refresh hook calls between transmits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshDivider {
    count: u8,
}

impl RefreshDivider {
    /// Create a divider at the start of a period
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Register a hook call; returns true if this call should transmit
    pub fn tick(&mut self, force: bool) -> bool {
        self.count += 1;
        if force || self.count >= REFRESH_DIVIDER {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Calls since the last transmit
    pub fn pending(&self) -> u8 {
        self.count
    }
}
