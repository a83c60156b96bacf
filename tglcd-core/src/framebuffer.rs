//! Text-cell frame buffer
//!
//! The buffer has the exact layout the adapter expects on the wire:
//!
//! ```text
//! ┌────────────────────────────────┬──────────┬──────────┐
//! │ cols*rows character cells      │ icon     │ LED      │
//! │ row-major, addressed row*cols+c│ bitmask  │ bitmask  │
//! └────────────────────────────────┴──────────┴──────────┘
//! ```
//!
//! Text operations mutate this buffer only; nothing here touches the bus.

use heapless::Vec;

use crate::geometry::{Geometry, MAX_ROWS};

/// Glyph used for empty cells
pub const BLANK: u8 = b' ';

/// Widest line the buffer has room for
pub const MAX_COLS: usize = 40;

/// Frame buffer capacity: the largest supported geometry plus flag bytes
pub const MAX_FRAMEBUFFER_LEN: usize = MAX_ROWS as usize * MAX_COLS + 2;

/// Frame buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameBufferError {
    /// Geometry needs more storage than [`MAX_FRAMEBUFFER_LEN`]
    TooLarge { needed: usize },
}

/// Host-side text cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub col: u8,
    pub row: u8,
}

/// Character cells plus the two trailing status bytes
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: Vec<u8, MAX_FRAMEBUFFER_LEN>,
    geometry: Geometry,
    cursor: Cursor,
}

impl FrameBuffer {
    /// Allocate a cleared buffer for `geometry`
    pub fn new(geometry: Geometry) -> Result<Self, FrameBufferError> {
        let needed = geometry.buffer_len();
        let mut bytes = Vec::new();
        bytes
            .resize(needed, 0)
            .map_err(|_| FrameBufferError::TooLarge { needed })?;

        let mut fb = Self {
            bytes,
            geometry,
            cursor: Cursor::default(),
        };
        fb.clear();
        Ok(fb)
    }

    /// Geometry this buffer was sized for
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Total length including flag bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns false for a zero-sized geometry with only flag bytes
    pub fn has_cells(&self) -> bool {
        self.geometry.cell_count() > 0
    }

    /// Blank every cell, zero both flag bytes and home the cursor
    pub fn clear(&mut self) {
        let cells = self.geometry.cell_count();
        self.bytes[..cells].fill(BLANK);
        self.bytes[cells..].fill(0);
        self.cursor = Cursor::default();
    }

    /// Move the cursor
    ///
    /// Not bounds-checked; writes from an out-of-range cursor are clipped.
    pub fn set_cursor(&mut self, col: u8, row: u8) {
        self.cursor = Cursor { col, row };
    }

    /// Move the cursor to the upper left corner
    pub fn home(&mut self) {
        self.cursor = Cursor::default();
    }

    /// Current cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Copy `text` into the cells starting at the cursor
    ///
    /// The cursor does not advance; callers reposition before each write.
    /// Text running past the last cell is dropped, so the flag bytes are
    /// never overwritten. Returns the number of bytes stored.
    pub fn write(&mut self, text: &[u8]) -> usize {
        let cells = self.geometry.cell_count();
        let start = self.geometry.offset(self.cursor.col, self.cursor.row);
        if start >= cells {
            return 0;
        }

        let len = text.len().min(cells - start);
        self.bytes[start..start + len].copy_from_slice(&text[..len]);
        len
    }

    /// Character cells without the flag bytes
    pub fn cells(&self) -> &[u8] {
        &self.bytes[..self.geometry.cell_count()]
    }

    /// One text line
    pub fn row(&self, row: u8) -> Option<&[u8]> {
        if row >= self.geometry.rows {
            return None;
        }
        let start = self.geometry.offset(0, row);
        Some(&self.bytes[start..start + self.geometry.cols as usize])
    }

    /// Character at a linear cell index
    pub fn cell_at(&self, index: usize) -> Option<u8> {
        self.cells().get(index).copied()
    }

    /// Overwrite a single cell; returns false if `index` is not a cell
    pub fn set_cell_at(&mut self, index: usize, byte: u8) -> bool {
        if index >= self.geometry.cell_count() {
            return false;
        }
        self.bytes[index] = byte;
        true
    }

    /// Icon bitmask byte
    pub fn icon_byte(&self) -> u8 {
        self.bytes[self.bytes.len() - 2]
    }

    /// LED bitmask byte
    pub fn led_byte(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }

    /// Store both flag bytes
    pub fn set_flags(&mut self, icons: u8, leds: u8) {
        let len = self.bytes.len();
        self.bytes[len - 2] = icons;
        self.bytes[len - 1] = leds;
    }

    /// Whole buffer in wire order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
