//! Buzzer realisations
//!
//! A tone is produced in exactly one of two places, fixed when the driver
//! is built:
//!
//! - **Local**: a buzzer wired to a main-board pin is bit-banged as a
//!   square wave. This blocks the caller for the whole tone, so it must
//!   not be used from a latency-sensitive refresh path.
//! - **Remote**: the adapter's own buzzer. The host sends one
//!   [`Command::Buzzer`](tglcd_protocol::Command::Buzzer) exchange and the
//!   adapter plays the tone on its own time.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Where tones are produced
pub enum Buzzer<P> {
    /// Square wave on a main-board pin (blocking)
    Local(P),
    /// Buzzer command to the adapter (non-blocking)
    Remote,
}

impl<P: OutputPin> Buzzer<P> {
    /// Pick the realisation from the configured pin
    pub fn from_pin(pin: Option<P>) -> Self {
        match pin {
            Some(pin) => Buzzer::Local(pin),
            None => Buzzer::Remote,
        }
    }

    /// Returns true if tones block the caller
    pub fn is_local(&self) -> bool {
        matches!(self, Buzzer::Local(_))
    }

    /// Give back the local pin, if any
    pub fn into_pin(self) -> Option<P> {
        match self {
            Buzzer::Local(pin) => Some(pin),
            Buzzer::Remote => None,
        }
    }
}

/// Placeholder pin type for drivers without a main-board buzzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Toggle `pin` at `freq_hz` for `duration_ms`
///
/// Whole periods are emitted until the duration is covered, so the tone
/// may run up to one period long. A zero frequency produces no tone.
pub fn square_wave<P, D>(
    pin: &mut P,
    delay: &mut D,
    duration_ms: u16,
    freq_hz: u16,
) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    if freq_hz == 0 {
        return Ok(());
    }

    let duration_us = u32::from(duration_ms) * 1_000;
    let period_us = 1_000_000 / u32::from(freq_hz);
    let half_period_us = period_us / 2;

    let mut elapsed_us = 0;
    while elapsed_us < duration_us {
        pin.set_high()?;
        delay.delay_us(half_period_us);
        pin.set_low()?;
        delay.delay_us(half_period_us);
        elapsed_us += period_us;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::mock::MockPin;
    use super::*;
    use crate::adapter::session::mock::MockDelay;

    #[test]
    fn test_from_pin() {
        assert!(Buzzer::from_pin(Some(MockPin::default())).is_local());
        assert!(!Buzzer::<MockPin>::from_pin(None).is_local());
        assert!(Buzzer::<NoPin>::Remote.into_pin().is_none());
    }

    #[test]
    fn test_square_wave_timing() {
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();

        // 1 kHz for 10 ms: ten 1000 µs periods
        square_wave(&mut pin, &mut delay, 10, 1_000).unwrap();

        assert_eq!(pin.rising_edges(), 10);
        assert_eq!(pin.levels.len(), 20);
        assert_eq!(pin.levels.last(), Some(&false));
        assert_eq!(delay.total_us(), 10_000);
    }

    #[test]
    fn test_square_wave_rounds_up_to_whole_periods() {
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();

        // 300 Hz period is 3333 µs; 10 ms needs four periods
        square_wave(&mut pin, &mut delay, 10, 300).unwrap();
        assert_eq!(pin.rising_edges(), 4);
    }

    #[test]
    fn test_zero_frequency_is_silent() {
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();
        square_wave(&mut pin, &mut delay, 100, 0).unwrap();
        assert!(pin.levels.is_empty());
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_zero_duration_is_silent() {
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();
        square_wave(&mut pin, &mut delay, 0, 1_000).unwrap();
        assert!(pin.levels.is_empty());
    }
}
