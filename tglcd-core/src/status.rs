//! Icon and LED status masks
//!
//! The adapter draws its own status icons and lights its own LEDs; the
//! host only tells it which ones are active via the two flag bytes at the
//! end of the frame buffer.
//!
//! Icons come from glyph draw requests. Regional icons (heaters, bed, fan)
//! age out on their own: each request re-arms a decay counter and the bits
//! are dropped once the counter runs out, so the host never has to send an
//! explicit "icon off". The splash logo is sticky and only cleared by
//! [`IconBits::clear`].

/// Bits the adapter understands in the icon byte
pub const ICON_MASK: u8 = 0x3F;

/// Bits the adapter understands in the LED byte
pub const LED_MASK: u8 = 0x0F;

/// Transmits a regional icon survives without being re-requested
pub const GLYPH_DECAY_REFRESHES: u8 = 20;

/// Glyph width that means "draw the splash logo"
pub const LOGO_WIDTH: u16 = 80;

/// Status icons drawn by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    /// Splash logo (sticky)
    Logo,
    /// First hotend heating
    Hotend1,
    /// Second hotend heating
    Hotend2,
    /// Third hotend heating
    Hotend3,
    /// Bed heating
    Bed,
    /// Fan running
    Fan,
}

impl Icon {
    /// Bit in the icon byte
    pub const fn bit(self) -> u8 {
        match self {
            Icon::Logo => 0x01,
            Icon::Hotend1 => 0x02,
            Icon::Hotend2 => 0x04,
            Icon::Hotend3 => 0x08,
            Icon::Bed => 0x10,
            Icon::Fan => 0x20,
        }
    }

    /// Regional icon drawn at a glyph x-offset
    pub fn from_glyph_x(x: u16) -> Option<Self> {
        match x {
            0 => Some(Icon::Hotend1),
            27 => Some(Icon::Hotend2),
            55 => Some(Icon::Hotend3),
            83 => Some(Icon::Bed),
            111 => Some(Icon::Fan),
            _ => None,
        }
    }
}

/// Active icons plus the decay counter for regional icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IconBits {
    bits: u8,
    decay: u8,
}

impl IconBits {
    /// Create an empty mask
    pub const fn new() -> Self {
        Self { bits: 0, decay: 0 }
    }

    /// Translate a glyph draw request into icon bits
    ///
    /// A `width` of [`LOGO_WIDTH`] shows the splash logo and replaces every
    /// other icon. Any other width re-arms the decay counter and, if `x`
    /// matches an icon region, sets that icon.
    pub fn request_glyph(&mut self, x: u16, width: u16) {
        if width == LOGO_WIDTH {
            self.bits = Icon::Logo.bit();
            return;
        }

        self.decay = GLYPH_DECAY_REFRESHES;
        if let Some(icon) = Icon::from_glyph_x(x) {
            self.bits |= icon.bit();
        }
    }

    /// Age the mask after a transmit
    ///
    /// Counts the decay counter down; once it is exhausted every bit but
    /// the logo is dropped.
    pub fn age(&mut self) {
        if self.decay > 0 {
            self.decay -= 1;
        } else {
            self.bits &= Icon::Logo.bit();
        }
    }

    /// Drop every icon, including the logo, and disarm the counter
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Check whether an icon is active
    pub fn is_set(&self, icon: Icon) -> bool {
        self.bits & icon.bit() != 0
    }

    /// Byte for the wire
    pub fn bits(&self) -> u8 {
        self.bits & ICON_MASK
    }

    /// Remaining transmits before regional icons are dropped
    pub fn decay(&self) -> u8 {
        self.decay
    }
}

/// Logical LEDs on the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    /// Hotend heater on
    HotendOn,
    /// Bed heater on
    BedOn,
    /// Fan on
    FanOn,
    /// Something is above a safe-to-touch temperature
    Hot,
}

impl Led {
    /// Bit in the LED byte
    pub const fn bit(self) -> u8 {
        match self {
            Led::HotendOn => 0x01,
            Led::BedOn => 0x02,
            Led::FanOn => 0x04,
            Led::Hot => 0x08,
        }
    }
}

/// LED mask, sent on every transmit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedBits(u8);

impl LedBits {
    /// Create a mask with every LED off
    pub const fn new() -> Self {
        Self(0)
    }

    /// Switch one LED, leaving the others untouched
    pub fn set(&mut self, led: Led, on: bool) {
        if on {
            self.0 |= led.bit();
        } else {
            self.0 &= !led.bit();
        }
    }

    /// Check whether an LED is on
    pub fn is_on(&self, led: Led) -> bool {
        self.0 & led.bit() != 0
    }

    /// Byte for the wire
    pub fn bits(&self) -> u8 {
        self.0 & LED_MASK
    }
}
