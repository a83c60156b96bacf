//! Adapter link state machine
//!
//! ```text
//! Uninitialized ──▶ Detecting ──┬──▶ Present
//!                               └──▶ Absent (terminal)
//! ```
//!
//! The wire protocol has no "not present" answer, so detection is the only
//! gate: once a link is `Absent` every operation degrades to a no-op for
//! the lifetime of the driver. A present adapter whose frame buffer cannot
//! be allocated is treated exactly like an absent one.

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Driver constructed, adapter not yet queried
    #[default]
    Uninitialized,
    /// Geometry queries in flight
    Detecting,
    /// No usable adapter; all operations are no-ops
    Absent,
    /// Adapter answered with a plausible geometry and a buffer exists
    Present,
}

/// Events driving [`LinkState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Geometry query started
    DetectStarted,
    /// Row count inside the plausibility window
    GeometryAccepted,
    /// Row count outside the plausibility window
    GeometryRejected,
    /// Frame buffer could not be allocated
    BufferUnavailable,
}

impl LinkState {
    /// Check if bus operations are allowed
    pub fn is_present(&self) -> bool {
        matches!(self, LinkState::Present)
    }

    /// Check if the state can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, LinkState::Absent)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            (Uninitialized, DetectStarted) => Detecting,

            (Detecting, GeometryAccepted) => Present,
            (Detecting, GeometryRejected) => Absent,
            (Detecting, BufferUnavailable) => Absent,

            (Present, BufferUnavailable) => Absent,

            // Default: stay in current state
            _ => self,
        }
    }
}
