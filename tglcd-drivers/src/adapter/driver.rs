//! TFT GLCD adapter driver
//!
//! The host keeps the whole text screen plus icon and LED flags in a frame
//! buffer and pushes it in one exchange from the periodic refresh hook.
//! Everything the adapter renders is derived from that buffer; the host
//! never sends partial updates.
//!
//! # Presence
//!
//! Detection runs once. If the adapter does not answer with a plausible
//! geometry, or its frame buffer does not fit, the driver is `Absent` for
//! good and every [`Panel`] method becomes a no-op returning neutral
//! values. A missing display must never stall the rest of the host.
//!
//! # Bus faults
//!
//! The bus is assumed reliable. A transport error is logged and the
//! operation reports its neutral value; it is never propagated.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use tglcd_core::config::PanelConfig;
use tglcd_core::traits::Panel;
use tglcd_core::{
    FanOverlay, FrameBuffer, Geometry, IconBits, Led, LedBits, LinkEvent, LinkState,
    RefreshDivider,
};
use tglcd_hal::Transport;
use tglcd_protocol::{encoder_delta, Buttons, BuzzerRequest, Command, PROTOCOL_ID};

use super::buzzer::{square_wave, Buzzer};
use super::detect::detect;
use super::session::{Session, INIT_DELAY_MS};

/// Encoder steps per detent reported by the adapter
pub const ENCODER_RESOLUTION: u8 = 2;

/// Host-side screen state, only allocated for a present adapter
struct Screen {
    fb: FrameBuffer,
    icons: IconBits,
    leds: LedBits,
    divider: RefreshDivider,
}

impl Screen {
    fn new(fb: FrameBuffer) -> Self {
        Self {
            fb,
            icons: IconBits::new(),
            leds: LedBits::new(),
            divider: RefreshDivider::new(),
        }
    }
}

/// Driver for a TFT GLCD adapter
///
/// Generic over the bus transport `T`, the delay source `D` and the
/// optional main-board buzzer pin `P` (use [`NoPin`](super::NoPin) when
/// the buzzer sits on the adapter).
pub struct TftGlcdAdapter<T, D, P> {
    session: Session<T, D>,
    buzzer: Buzzer<P>,
    state: LinkState,
    screen: Option<Screen>,
    contrast: u8,
    fan: FanOverlay,
}

impl<T, D, P> TftGlcdAdapter<T, D, P>
where
    T: Transport,
    D: DelayNs,
    P: OutputPin,
{
    /// Create an undetected driver
    ///
    /// No bus traffic happens until [`detect`](Self::detect).
    ///
    /// `buzz_pin` decides where tones are produced. `config.buzz_pin` only
    /// describes the wiring; a disagreement between the two is logged.
    pub fn new(transport: T, delay: D, buzz_pin: Option<P>, config: &PanelConfig) -> Self {
        if config.has_local_buzzer() != buzz_pin.is_some() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Buzzer pin configured: {}, pin supplied: {}; using the supplied pin",
                config.has_local_buzzer(),
                buzz_pin.is_some()
            );
        }

        Self {
            session: Session::new(transport, delay),
            buzzer: Buzzer::from_pin(buzz_pin),
            state: LinkState::Uninitialized,
            screen: None,
            contrast: config.contrast,
            fan: FanOverlay::new(),
        }
    }

    /// Create a driver and run detection
    pub fn probe(transport: T, delay: D, buzz_pin: Option<P>, config: &PanelConfig) -> Self {
        let mut adapter = Self::new(transport, delay, buzz_pin, config);
        adapter.detect();
        adapter
    }

    /// Query the adapter's geometry and allocate the frame buffer
    ///
    /// Runs once; later calls return the state reached the first time.
    pub fn detect(&mut self) -> LinkState {
        if self.state != LinkState::Uninitialized {
            return self.state;
        }
        self.state = self.state.transition(LinkEvent::DetectStarted);

        let geometry = match detect(&mut self.session) {
            Ok(Some(geometry)) => geometry,
            Ok(None) | Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("TFT GLCD adapter not connected");
                self.state = self.state.transition(LinkEvent::GeometryRejected);
                return self.state;
            }
        };

        self.state = self.state.transition(LinkEvent::GeometryAccepted);
        match FrameBuffer::new(geometry) {
            Ok(fb) => {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "TFT GLCD adapter detected: {} rows x {} cols",
                    geometry.rows,
                    geometry.cols
                );
                self.screen = Some(Screen::new(fb));
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Not enough memory available for frame buffer");
                self.state = self.state.transition(LinkEvent::BufferUnavailable);
            }
        }
        self.state
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Returns true if the adapter was detected and has a frame buffer
    pub fn is_present(&self) -> bool {
        self.state.is_present() && self.screen.is_some()
    }

    /// Discovered geometry
    pub fn geometry(&self) -> Option<Geometry> {
        self.screen.as_ref().map(|s| s.fb.geometry())
    }

    /// Frame buffer as it will be sent on the next transmit
    pub fn frame_buffer(&self) -> Option<&FrameBuffer> {
        self.screen.as_ref().map(|s| &s.fb)
    }

    /// Active icons
    pub fn icons(&self) -> Option<IconBits> {
        self.screen.as_ref().map(|s| s.icons)
    }

    /// Active LEDs
    pub fn leds(&self) -> Option<LedBits> {
        self.screen.as_ref().map(|s| s.leds)
    }

    /// Returns true if tones block the caller
    pub fn has_local_buzzer(&self) -> bool {
        self.buzzer.is_local()
    }

    /// Deselect the adapter and hand back the bus, delay and buzzer pin
    pub fn release(self) -> (T, D, Option<P>) {
        let (transport, delay) = self.session.release();
        (transport, delay, self.buzzer.into_pin())
    }

    /// Push the whole frame buffer to the adapter
    fn transmit(&mut self) {
        let Some(screen) = self.screen.as_mut() else {
            return;
        };

        screen.fb.set_flags(screen.icons.bits(), screen.leds.bits());
        screen.icons.age();
        self.fan.apply(&mut screen.fb);

        if self
            .session
            .stream(Command::LcdWrite, screen.fb.as_bytes())
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Frame buffer transmit failed");
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Frame buffer sent ({} bytes)", screen.fb.len());
    }

    /// Run a poll exchange, or report 0 if absent or on a bus fault
    fn poll_or_zero(&mut self, command: Command) -> u8 {
        if !self.is_present() {
            return 0;
        }
        match self.session.poll(command) {
            Ok(response) => response,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Adapter poll {} failed", command);
                0
            }
        }
    }
}

impl<T, D, P> Panel for TftGlcdAdapter<T, D, P>
where
    T: Transport,
    D: DelayNs,
    P: OutputPin,
{
    fn init(&mut self) {
        if !self.is_present() {
            return;
        }
        if self
            .session
            .stream(Command::InitAdapter, &[PROTOCOL_ID])
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Adapter init failed");
        }
        // Give the adapter time to initialise
        self.session.delay_ms(INIT_DELAY_MS);
    }

    fn clear(&mut self) {
        if let Some(screen) = self.screen.as_mut() {
            screen.fb.clear();
            screen.icons.clear();
        }
    }

    fn home(&mut self) {
        if let Some(screen) = self.screen.as_mut() {
            screen.fb.home();
        }
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        if let Some(screen) = self.screen.as_mut() {
            screen.fb.set_cursor(col, row);
        }
    }

    fn write(&mut self, text: &[u8]) {
        if let Some(screen) = self.screen.as_mut() {
            screen.fb.write(text);
        }
    }

    fn on_refresh(&mut self, now: bool) {
        let Some(screen) = self.screen.as_mut() else {
            return;
        };
        if screen.divider.tick(now) {
            self.transmit();
        }
    }

    fn read_buttons(&mut self) -> Buttons {
        Buttons::from_bits(self.poll_or_zero(Command::ReadButtons))
    }

    fn read_encoder_delta(&mut self) -> i32 {
        encoder_delta(self.poll_or_zero(Command::ReadEncoder))
    }

    fn encoder_resolution(&self) -> u8 {
        ENCODER_RESOLUTION
    }

    fn screen_lines(&self) -> u16 {
        self.geometry().map_or(0, |g| u16::from(g.rows))
    }

    fn has_graphics(&self) -> bool {
        true
    }

    fn has_full_graphics(&self) -> bool {
        false
    }

    fn draw_glyph(&mut self, x: u16, width: u16) {
        if let Some(screen) = self.screen.as_mut() {
            screen.icons.request_glyph(x, width);
        }
    }

    fn set_led(&mut self, led: Led, on: bool) {
        if let Some(screen) = self.screen.as_mut() {
            screen.leds.set(led, on);
        }
    }

    fn contrast(&self) -> u8 {
        self.contrast
    }

    fn set_contrast(&mut self, contrast: u8) {
        self.contrast = contrast;
        if !self.is_present() {
            return;
        }
        if self
            .session
            .write_value(Command::Contrast, contrast)
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Contrast update failed");
        }
    }

    fn buzz(&mut self, duration_ms: u16, freq_hz: u16) {
        match &mut self.buzzer {
            Buzzer::Local(pin) => {
                if square_wave(pin, self.session.delay_mut(), duration_ms, freq_hz).is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Buzzer pin fault");
                }
            }
            Buzzer::Remote => {
                if !self.state.is_present() || self.screen.is_none() {
                    return;
                }
                let request = BuzzerRequest {
                    duration_ms,
                    freq_hz,
                };
                if self
                    .session
                    .stream(Command::Buzzer, &request.to_bytes())
                    .is_err()
                {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Buzzer command failed");
                }
            }
        }
    }

    fn set_fan_percent(&mut self, percent: u16) {
        self.fan.set_percent(percent);
    }

    fn set_has_fan(&mut self, present: bool) {
        self.fan.set_has_fan(present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::buzzer::mock::MockPin;
    use crate::adapter::session::mock::{MockDelay, MockTransport};
    use crate::adapter::NoPin;
    use std::vec::Vec;
    use tglcd_core::config::PinConfig;
    use tglcd_core::status::GLYPH_DECAY_REFRESHES;
    use tglcd_core::traits::PanelExt;
    use tglcd_core::Icon;

    type TestAdapter = TftGlcdAdapter<MockTransport, MockDelay, NoPin>;
    type LocalAdapter = TftGlcdAdapter<MockTransport, MockDelay, MockPin>;

    /// Detection script for a rows x cols adapter
    fn geometry_script(rows: u8, cols: u8) -> MockTransport {
        MockTransport::with_responses(&[0, rows, 0, cols])
    }

    /// Present 10x20 adapter with detection traffic cleared
    fn present() -> TestAdapter {
        let mut adapter = TestAdapter::probe(
            geometry_script(10, 20),
            MockDelay::default(),
            None,
            &PanelConfig::default(),
        );
        adapter.session_transport().clear();
        adapter
    }

    fn absent() -> TestAdapter {
        let mut adapter = TestAdapter::probe(
            geometry_script(0xFF, 0xFF),
            MockDelay::default(),
            None,
            &PanelConfig::default(),
        );
        adapter.session_transport().clear();
        adapter
    }

    impl<P: OutputPin> TftGlcdAdapter<MockTransport, MockDelay, P> {
        fn session_transport(&mut self) -> &mut MockTransport {
            self.session.transport_mut()
        }

        /// Frames sent with LCD_WRITE, without the opcode
        fn frames(&mut self) -> Vec<Vec<u8>> {
            self.session_transport()
                .windows()
                .into_iter()
                .filter(|w| w.first() == Some(&0x03))
                .map(|w| w[1..].to_vec())
                .collect()
        }

        fn last_icon_byte(&mut self) -> u8 {
            let frames = self.frames();
            let frame = frames.last().expect("no frame sent");
            frame[frame.len() - 2]
        }
    }

    #[test]
    fn test_new_has_no_traffic() {
        let adapter = TestAdapter::new(
            MockTransport::default(),
            MockDelay::default(),
            None,
            &PanelConfig::default(),
        );
        assert_eq!(adapter.state(), LinkState::Uninitialized);
        let (transport, _, _) = adapter.release();
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_probe_present() {
        let adapter = present();
        assert_eq!(adapter.state(), LinkState::Present);
        assert!(adapter.is_present());
        assert_eq!(adapter.geometry(), Some(Geometry::new(10, 20)));
        assert_eq!(adapter.frame_buffer().unwrap().len(), 202);
        assert_eq!(adapter.screen_lines(), 10);
    }

    #[test]
    fn test_probe_absent_skips_column_query() {
        let adapter = TestAdapter::probe(
            geometry_script(9, 20),
            MockDelay::default(),
            None,
            &PanelConfig::default(),
        );
        assert_eq!(adapter.state(), LinkState::Absent);
        assert_eq!(adapter.screen_lines(), 0);

        let (transport, _, _) = adapter.release();
        assert_eq!(transport.sent(), [0xE0, 0x00]);
    }

    #[test]
    fn test_probe_buffer_too_large_is_absent() {
        let adapter = TestAdapter::probe(
            geometry_script(20, 200),
            MockDelay::default(),
            None,
            &PanelConfig::default(),
        );
        assert_eq!(adapter.state(), LinkState::Absent);
        assert!(!adapter.is_present());
        assert!(adapter.frame_buffer().is_none());
    }

    #[test]
    fn test_probe_bus_fault_is_absent() {
        let mut transport = geometry_script(10, 20);
        transport.fail_at = Some(1);
        let adapter =
            TestAdapter::probe(transport, MockDelay::default(), None, &PanelConfig::default());
        assert_eq!(adapter.state(), LinkState::Absent);
    }

    #[test]
    fn test_detect_runs_once() {
        let mut adapter = present();
        assert_eq!(adapter.detect(), LinkState::Present);
        assert!(adapter.session_transport().sent().is_empty());
    }

    #[test]
    fn test_init_handshake() {
        let mut adapter = present();
        adapter.init();

        assert_eq!(adapter.session_transport().windows()[0], [0xFE, PROTOCOL_ID]);
        let (_, delay, _) = adapter.release();
        assert_eq!(delay.total_us(), 10 + 100_000);
    }

    #[test]
    fn test_ready_end_to_end() {
        let mut adapter = present();
        adapter.clear();
        adapter.write_at(0, 0, b"READY");
        adapter.on_refresh(true);

        let frames = adapter.frames();
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.len(), 202);
        assert_eq!(&frame[..5], b"READY");
        assert!(frame[5..200].iter().all(|&c| c == b' '));
        assert_eq!(frame[200], 0);
        assert_eq!(frame[201], 0);
    }

    #[test]
    fn test_refresh_every_second_tick() {
        let mut adapter = present();

        adapter.on_refresh(false);
        assert_eq!(adapter.frames().len(), 0);
        adapter.on_refresh(false);
        assert_eq!(adapter.frames().len(), 1);

        // Forced refresh transmits at once and restarts the count
        adapter.on_refresh(false);
        adapter.on_refresh(true);
        assert_eq!(adapter.frames().len(), 2);
        adapter.on_refresh(false);
        assert_eq!(adapter.frames().len(), 2);
        adapter.on_refresh(false);
        assert_eq!(adapter.frames().len(), 3);
    }

    #[test]
    fn test_leds_on_every_transmit() {
        let mut adapter = present();
        adapter.set_led(Led::HotendOn, true);
        adapter.set_led(Led::Hot, true);
        adapter.on_refresh(true);
        adapter.set_led(Led::Hot, false);
        adapter.on_refresh(true);

        let frames = adapter.frames();
        assert_eq!(frames[0][201], 0x09);
        assert_eq!(frames[1][201], 0x01);
    }

    #[test]
    fn test_regional_icon_ages_out() {
        let mut adapter = present();
        adapter.draw_glyph(83, 16);

        for _ in 0..=GLYPH_DECAY_REFRESHES {
            adapter.on_refresh(true);
            assert_eq!(adapter.last_icon_byte(), Icon::Bed.bit());
        }

        adapter.on_refresh(true);
        assert_eq!(adapter.last_icon_byte(), 0);
    }

    #[test]
    fn test_logo_survives_refreshes() {
        let mut adapter = present();
        adapter.draw_glyph(0, 80);
        adapter.draw_glyph(111, 16);

        for _ in 0..(GLYPH_DECAY_REFRESHES as usize * 3) {
            adapter.on_refresh(true);
        }
        assert_eq!(adapter.last_icon_byte(), Icon::Logo.bit());

        adapter.clear();
        adapter.on_refresh(true);
        assert_eq!(adapter.last_icon_byte(), 0);
    }

    #[test]
    fn test_fan_overlay() {
        let mut adapter = present();
        adapter.set_has_fan(true);
        adapter.set_fan_percent(55);
        adapter.write_at(0, 1, b"X");
        adapter.on_refresh(true);

        let frames = adapter.frames();
        assert_eq!(frames[0][20], b'X');
        assert_eq!(frames[0][80], 55);
    }

    #[test]
    fn test_fan_overlay_needs_fan() {
        let mut adapter = present();
        adapter.set_fan_percent(55);
        adapter.write_at(0, 1, b"X");
        adapter.on_refresh(true);

        assert_eq!(adapter.frames()[0][80], b' ');
    }

    #[test]
    fn test_read_buttons() {
        let mut adapter = present();
        adapter.session_transport().responses.extend([0, 0x11]);

        let buttons = adapter.read_buttons();
        assert!(buttons.select());
        assert!(buttons.contains(Buttons::UP));
        assert_eq!(adapter.session_transport().windows()[0], [0x01, 0x00]);
    }

    #[test]
    fn test_read_encoder_delta() {
        let mut adapter = present();
        adapter.session_transport().responses.extend([0, 0xFE, 0, 0x03]);

        assert_eq!(adapter.read_encoder_delta(), -2);
        assert_eq!(adapter.read_encoder_delta(), 3);
        assert_eq!(adapter.session_transport().windows()[0], [0x02, 0x00]);
    }

    #[test]
    fn test_poll_bus_fault_reads_zero() {
        let mut adapter = present();
        adapter.session_transport().responses.extend([0, 0x11]);
        // Detection used four transfers; fail the response slot of the poll
        adapter.session_transport().fail_at = Some(5);

        assert_eq!(adapter.read_buttons(), Buttons::NONE);
        assert!(!adapter.session_transport().selected);
    }

    #[test]
    fn test_set_contrast() {
        let mut adapter = present();
        assert_eq!(adapter.contrast(), 180);

        adapter.set_contrast(90);
        assert_eq!(adapter.contrast(), 90);
        assert_eq!(adapter.session_transport().windows()[0], [0x05, 90]);
    }

    #[test]
    fn test_contrast_from_config() {
        let config = PanelConfig {
            contrast: 42,
            ..PanelConfig::default()
        };
        let adapter =
            TestAdapter::probe(geometry_script(10, 20), MockDelay::default(), None, &config);
        assert_eq!(adapter.contrast(), 42);
    }

    #[test]
    fn test_remote_buzzer() {
        let mut adapter = present();
        assert!(!adapter.has_local_buzzer());
        adapter.buzz(500, 4_000);

        assert_eq!(
            adapter.session_transport().windows()[0],
            [0x04, 0x01, 0xF4, 0x0F, 0xA0]
        );
        // The adapter plays the tone; the host only waits for the settle
        let (_, delay, _) = adapter.release();
        assert_eq!(delay.total_us(), 10);
    }

    #[test]
    fn test_local_buzzer_blocks_and_skips_bus() {
        let mut adapter = LocalAdapter::probe(
            geometry_script(10, 20),
            MockDelay::default(),
            Some(MockPin::default()),
            &PanelConfig::default(),
        );
        adapter.session_transport().clear();
        assert!(adapter.has_local_buzzer());

        adapter.buzz(20, 1_000);

        assert!(adapter.session_transport().sent().is_empty());
        let (_, delay, pin) = adapter.release();
        assert_eq!(delay.total_us(), 20_000);
        assert_eq!(pin.unwrap().rising_edges(), 20);
    }

    #[test]
    fn test_local_buzzer_works_without_adapter() {
        let mut adapter = LocalAdapter::probe(
            geometry_script(0, 0),
            MockDelay::default(),
            Some(MockPin::default()),
            &PanelConfig::default(),
        );
        adapter.buzz(5, 1_000);

        let (_, _, pin) = adapter.release();
        assert_eq!(pin.unwrap().rising_edges(), 5);
    }

    #[test]
    fn test_supplied_pin_decides_buzzer() {
        let config = PanelConfig {
            buzz_pin: Some(PinConfig::new(1, 30)),
            ..PanelConfig::default()
        };
        let mut adapter =
            TestAdapter::probe(geometry_script(10, 20), MockDelay::default(), None, &config);
        adapter.session_transport().clear();
        assert!(!adapter.has_local_buzzer());

        adapter.buzz(100, 1_000);
        assert_eq!(adapter.session_transport().windows()[0][0], 0x04);

        let adapter = LocalAdapter::new(
            MockTransport::default(),
            MockDelay::default(),
            Some(MockPin::default()),
            &PanelConfig::default(),
        );
        assert!(adapter.has_local_buzzer());
    }

    #[test]
    fn test_absent_is_inert() {
        let mut adapter = absent();

        adapter.init();
        adapter.clear();
        adapter.set_cursor(1, 1);
        adapter.home();
        adapter.write(b"ignored");
        adapter.draw_glyph(0, 80);
        adapter.set_led(Led::BedOn, true);
        adapter.set_fan_percent(50);
        adapter.set_has_fan(true);
        for _ in 0..4 {
            adapter.on_refresh(false);
        }
        adapter.on_refresh(true);
        adapter.buzz(100, 1_000);

        assert_eq!(adapter.read_buttons(), Buttons::NONE);
        assert_eq!(adapter.read_encoder_delta(), 0);
        assert!(adapter.frame_buffer().is_none());
        assert!(adapter.icons().is_none());
        assert!(adapter.leds().is_none());

        // Contrast is cached even without an adapter
        adapter.set_contrast(10);
        assert_eq!(adapter.contrast(), 10);

        let (transport, delay, _) = adapter.release();
        assert!(transport.sent().is_empty());
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_capabilities() {
        let adapter = present();
        assert!(adapter.encoder_returns_delta());
        assert_eq!(adapter.encoder_resolution(), 2);
        assert!(adapter.has_graphics());
        assert!(!adapter.has_full_graphics());
    }

    #[test]
    fn test_write_line_pads_row() {
        let mut adapter = present();
        adapter.write_at(0, 2, b"ZZZZZZZZZZZZZZZZZZZZ");
        adapter.write_line(2, 20, b"Temp 210");

        let row = adapter.frame_buffer().unwrap().row(2).unwrap();
        assert_eq!(row, b"Temp 210            ");
    }

    #[test]
    fn test_release_deselects() {
        let adapter = present();
        let (transport, _, pin) = adapter.release();
        assert!(!transport.selected);
        assert!(pin.is_none());
    }
}
