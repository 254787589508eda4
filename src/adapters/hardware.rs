//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorGateway`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches actual hardware.  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::button::Button;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::display::Display;
use crate::drivers::indicator::Indicator;
use crate::error::SensorError;
use crate::reading::ClimateSample;
use crate::sensors::SensorGateway;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    gateway: SensorGateway,
    button: Button,
    indicator: Indicator,
    buzzer: Buzzer,
    display: Display,
}

impl HardwareAdapter {
    pub fn new(
        gateway: SensorGateway,
        button: Button,
        indicator: Indicator,
        buzzer: Buzzer,
        display: Display,
    ) -> Self {
        Self {
            gateway,
            button,
            indicator,
            buzzer,
            display,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn poll_climate(&mut self) -> Result<ClimateSample, SensorError> {
        self.gateway.poll_climate()
    }

    fn poll_distance(&mut self) -> Result<f32, SensorError> {
        self.gateway.poll_distance()
    }

    fn button_level_low(&mut self) -> Option<bool> {
        self.button.level_low()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_indicator(&mut self, r: u8, g: u8, b: u8) {
        self.indicator.set_colour(r, g, b);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn chirp(&mut self, duration_ms: u16) {
        self.buzzer.chirp(duration_ms);
    }

    fn show_lines(&mut self, line0: &str, line1: &str) {
        self.display.show(line0, line1);
    }

    fn all_off(&mut self) {
        self.indicator.off();
        self.buzzer.set(false);
        self.display.clear();
    }
}
