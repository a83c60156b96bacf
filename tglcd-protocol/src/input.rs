//! Input state reported by the adapter
//!
//! The adapter debounces its buttons and decodes its encoder itself; the
//! host only ever sees the resulting button bitmask and step count.

/// Button bitmask returned by [`Command::ReadButtons`](crate::Command::ReadButtons)
///
/// The adapter has up to six buttons including the encoder's own push
/// button, which reports as [`Buttons::SELECT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    /// Encoder push button
    pub const SELECT: u8 = 0x01;
    pub const RIGHT: u8 = 0x02;
    pub const LEFT: u8 = 0x04;
    pub const DOWN: u8 = 0x08;
    pub const UP: u8 = 0x10;
    pub const PAUSE: u8 = 0x20;
    pub const AUX1: u8 = 0x40;
    pub const AUX2: u8 = 0x80;

    /// No buttons pressed; also what an absent adapter reports
    pub const NONE: Self = Self(0);

    /// Wrap a raw bitmask from the wire
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bitmask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every bit in `mask` is pressed
    pub const fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask && mask != 0
    }

    /// Returns true if no button is pressed
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the encoder push button is pressed
    pub const fn select(self) -> bool {
        self.contains(Self::SELECT)
    }
}

impl From<u8> for Buttons {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

/// Widen a raw encoder response to a signed step count
///
/// The adapter reports the steps accumulated since the last read as a
/// two's-complement byte.
pub fn encoder_delta(raw: u8) -> i32 {
    i32::from(raw as i8)
}
