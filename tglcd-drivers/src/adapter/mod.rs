//! TFT GLCD adapter over SPI

pub mod buzzer;
pub mod detect;
pub mod driver;
pub mod session;

pub use buzzer::{Buzzer, NoPin};
pub use detect::detect;
pub use driver::TftGlcdAdapter;
pub use session::{spi_config, Session, INIT_DELAY_MS, SETTLE_US};
