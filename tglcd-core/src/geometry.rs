//! Text geometry reported by the adapter

/// Fewest text rows a real adapter reports
pub const MIN_ROWS: u8 = 10;

/// Most text rows a real adapter reports
pub const MAX_ROWS: u8 = 20;

/// Trailing flag bytes after the character cells (icons, LEDs)
pub const FLAG_BYTES: usize = 2;

/// Text grid dimensions of a connected adapter
///
/// Discovered once at startup and fixed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Text lines
    pub rows: u8,
    /// Characters per line
    pub cols: u8,
}

impl Geometry {
    /// Create a geometry
    pub const fn new(rows: u8, cols: u8) -> Self {
        Self { rows, cols }
    }

    /// Check a row count against the window of supported adapters
    ///
    /// An unconnected bus reads back arbitrary bytes, so a row count
    /// outside [`MIN_ROWS`]..=[`MAX_ROWS`] means no adapter is present.
    pub const fn is_plausible_rows(rows: u8) -> bool {
        rows >= MIN_ROWS && rows <= MAX_ROWS
    }

    /// Number of character cells
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Frame buffer length: every cell plus the two flag bytes
    pub const fn buffer_len(&self) -> usize {
        self.cell_count() + FLAG_BYTES
    }

    /// Linear cell offset of a column/row pair
    ///
    /// Columns past the end of a line continue on the next line.
    pub const fn offset(&self, col: u8, row: u8) -> usize {
        row as usize * self.cols as usize + col as usize
    }
}
