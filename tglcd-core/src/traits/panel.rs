//! Panel trait for text displays with status icons, LEDs and an encoder

use tglcd_protocol::Buttons;

use crate::status::Led;

/// Trait for a text-cell display panel
///
/// Text and flag operations only touch host memory; nothing reaches the
/// panel until [`Panel::on_refresh`] transmits. Panels that cannot be
/// reached degrade every method to a no-op returning neutral values, so
/// callers never need to check for a missing display.
pub trait Panel {
    /// Prepare the panel after power-up
    fn init(&mut self);

    /// Blank the screen, drop all status flags and home the cursor
    fn clear(&mut self);

    /// Move the text cursor to the upper left corner
    fn home(&mut self);

    /// Move the text cursor
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write text at the cursor
    ///
    /// The cursor does not advance.
    fn write(&mut self, text: &[u8]);

    /// Periodic refresh hook
    ///
    /// `now` forces an immediate transmit.
    fn on_refresh(&mut self, now: bool);

    /// Read the button bitmask
    fn read_buttons(&mut self) -> Buttons;

    /// Read encoder steps since the last call
    fn read_encoder_delta(&mut self) -> i32;

    /// Returns true if [`Panel::read_encoder_delta`] reports accumulated steps
    fn encoder_returns_delta(&self) -> bool {
        true
    }

    /// Encoder steps per detent
    fn encoder_resolution(&self) -> u8;

    /// Number of text lines on the screen (0 if unknown)
    fn screen_lines(&self) -> u16;

    /// Returns true if the panel can show icons
    fn has_graphics(&self) -> bool;

    /// Returns true if the panel can show arbitrary bitmaps
    fn has_full_graphics(&self) -> bool;

    /// Request a glyph of `width` pixels at horizontal offset `x`
    fn draw_glyph(&mut self, x: u16, width: u16);

    /// Switch a status LED
    fn set_led(&mut self, led: Led, on: bool);

    /// Current contrast
    fn contrast(&self) -> u8;

    /// Set the contrast
    fn set_contrast(&mut self, contrast: u8);

    /// Sound the buzzer for `duration_ms` at `freq_hz`
    fn buzz(&mut self, duration_ms: u16, freq_hz: u16);

    /// Record the fan speed shown on the home screen
    fn set_fan_percent(&mut self, percent: u16);

    /// Record whether a fan is configured
    fn set_has_fan(&mut self, present: bool);
}

/// Helper trait for common text layouts
pub trait PanelExt: Panel {
    /// Write text at a position
    fn write_at(&mut self, col: u8, row: u8, text: &[u8]) {
        self.set_cursor(col, row);
        self.write(text);
    }

    /// Write a whole line of `width` cells, padding with blanks
    ///
    /// Text longer than `width` is cut off.
    fn write_line(&mut self, row: u8, width: u8, text: &[u8]) {
        let len = text.len().min(width as usize);
        self.write_at(0, row, &text[..len]);

        let blanks = [crate::framebuffer::BLANK; 8];
        let mut col = len;
        while col < width as usize {
            let chunk = (width as usize - col).min(blanks.len());
            self.write_at(col as u8, row, &blanks[..chunk]);
            col += chunk;
        }
    }
}

// Blanket implementation for all Panel types
impl<T: Panel + ?Sized> PanelExt for T {}
