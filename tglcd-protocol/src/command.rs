//! Command opcodes for the adapter protocol
//!
//! Opcodes are divided into two ranges:
//! - 0x00–0x05: runtime commands (polling, frame writes, buzzer, contrast)
//! - 0xE0–0xFF: setup commands (geometry discovery, init)

// Opcode values: runtime range
pub const OP_GET_SPI_DATA: u8 = 0x00;
pub const OP_READ_BUTTONS: u8 = 0x01;
pub const OP_READ_ENCODER: u8 = 0x02;
pub const OP_LCD_WRITE: u8 = 0x03;
pub const OP_BUZZER: u8 = 0x04;
pub const OP_CONTRAST: u8 = 0x05;

// Opcode values: setup range
pub const OP_GET_LCD_ROW: u8 = 0xE0;
pub const OP_GET_LCD_COL: u8 = 0xE1;
pub const OP_CLEAR_BUFFER: u8 = 0xE2;
pub const OP_REDRAW: u8 = 0xE3;
pub const OP_INIT_ADAPTER: u8 = 0xFE;

/// Protocol-id byte sent with [`Command::InitAdapter`]
///
/// Selects the host protocol variant the adapter firmware should expect.
pub const PROTOCOL_ID: u8 = 0;

/// Adapter command opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Dummy byte clocked out to read a response
    GetSpiData,
    /// Read the button bitmask
    ReadButtons,
    /// Read the signed encoder delta
    ReadEncoder,
    /// Stream the whole frame buffer
    LcdWrite,
    /// Sound the adapter's buzzer
    Buzzer,
    /// Set the LCD contrast
    Contrast,
    /// Query the number of text rows
    GetLcdRow,
    /// Query the number of text columns
    GetLcdCol,
    /// Reserved
    ClearBuffer,
    /// Reserved
    Redraw,
    /// Initialise the adapter for a host protocol variant
    InitAdapter,
}

impl Command {
    /// Parse a command from its opcode
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            OP_GET_SPI_DATA => Some(Command::GetSpiData),
            OP_READ_BUTTONS => Some(Command::ReadButtons),
            OP_READ_ENCODER => Some(Command::ReadEncoder),
            OP_LCD_WRITE => Some(Command::LcdWrite),
            OP_BUZZER => Some(Command::Buzzer),
            OP_CONTRAST => Some(Command::Contrast),
            OP_GET_LCD_ROW => Some(Command::GetLcdRow),
            OP_GET_LCD_COL => Some(Command::GetLcdCol),
            OP_CLEAR_BUFFER => Some(Command::ClearBuffer),
            OP_REDRAW => Some(Command::Redraw),
            OP_INIT_ADAPTER => Some(Command::InitAdapter),
            _ => None,
        }
    }

    /// Convert to opcode
    pub fn to_byte(self) -> u8 {
        match self {
            Command::GetSpiData => OP_GET_SPI_DATA,
            Command::ReadButtons => OP_READ_BUTTONS,
            Command::ReadEncoder => OP_READ_ENCODER,
            Command::LcdWrite => OP_LCD_WRITE,
            Command::Buzzer => OP_BUZZER,
            Command::Contrast => OP_CONTRAST,
            Command::GetLcdRow => OP_GET_LCD_ROW,
            Command::GetLcdCol => OP_GET_LCD_COL,
            Command::ClearBuffer => OP_CLEAR_BUFFER,
            Command::Redraw => OP_REDRAW,
            Command::InitAdapter => OP_INIT_ADAPTER,
        }
    }

    /// Returns true if the adapter answers this command with a byte
    pub fn has_response(&self) -> bool {
        matches!(
            self,
            Command::ReadButtons | Command::ReadEncoder | Command::GetLcdRow | Command::GetLcdCol
        )
    }

    /// Returns true for opcodes the adapter accepts but this host never sends
    pub fn is_reserved(&self) -> bool {
        matches!(self, Command::ClearBuffer | Command::Redraw)
    }
}

/// Buzzer request carried by [`Command::Buzzer`]
///
/// The adapter sounds the buzzer on its own time; the host does not wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerRequest {
    /// Tone duration in milliseconds
    pub duration_ms: u16,
    /// Tone frequency in Hz
    pub freq_hz: u16,
}

impl BuzzerRequest {
    /// Payload size in bytes
    pub const LEN: usize = 4;

    /// Encode as duration then frequency, both big-endian
    pub fn to_bytes(self) -> [u8; Self::LEN] {
        let [d_hi, d_lo] = self.duration_ms.to_be_bytes();
        let [f_hi, f_lo] = self.freq_hz.to_be_bytes();
        [d_hi, d_lo, f_hi, f_lo]
    }

    /// Decode a payload (for testing or simulation)
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self {
            duration_ms: u16::from_be_bytes([bytes[0], bytes[1]]),
            freq_hz: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }
}
