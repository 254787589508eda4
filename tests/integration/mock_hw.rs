//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers, and returns injected
//! sensor results.

use ivy::app::events::AppEvent;
use ivy::app::ports::{ActuatorPort, EventSink, SensorPort};
use ivy::adapters::wifi::{ConnectivityError, ConnectivityPort};
use ivy::reading::ClimateSample;
use ivy::SensorError;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetIndicator { r: u8, g: u8, b: u8 },
    SetBuzzer { on: bool },
    Chirp { ms: u16 },
    ShowLines { line0: String, line1: String },
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Next raw button sample (`Some(true)` = pressed, `None` = bad read).
    pub button_low: Option<bool>,
    /// Next climate poll result.
    pub climate: Result<ClimateSample, SensorError>,
    /// Next distance poll result.
    pub distance: Result<f32, SensorError>,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            button_low: Some(false),
            climate: Ok(ClimateSample {
                temperature_c: 25.0,
                humidity_pct: 50.0,
            }),
            distance: Ok(200.0),
            calls: Vec::new(),
        }
    }

    pub fn set_climate(&mut self, t: f32, h: f32) {
        self.climate = Ok(ClimateSample {
            temperature_c: t,
            humidity_pct: h,
        });
    }

    pub fn last_indicator(&self) -> Option<(u8, u8, u8)> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetIndicator { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        })
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetBuzzer { on } => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn last_lines(&self) -> Option<(String, String)> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::ShowLines { line0, line1 } => Some((line0.clone(), line1.clone())),
            _ => None,
        })
    }

    pub fn chirped(&self) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, ActuatorCall::Chirp { .. }))
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn poll_climate(&mut self) -> Result<ClimateSample, SensorError> {
        self.climate
    }

    fn poll_distance(&mut self) -> Result<f32, SensorError> {
        self.distance
    }

    fn button_level_low(&mut self) -> Option<bool> {
        self.button_low
    }
}

impl ActuatorPort for MockHardware {
    fn set_indicator(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(ActuatorCall::SetIndicator { r, g, b });
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetBuzzer { on });
    }

    fn chirp(&mut self, duration_ms: u16) {
        self.calls.push(ActuatorCall::Chirp { ms: duration_ms });
    }

    fn show_lines(&mut self, line0: &str, line1: &str) {
        self.calls.push(ActuatorCall::ShowLines {
            line0: line0.to_string(),
            line1: line1.to_string(),
        });
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Connectivity stub ─────────────────────────────────────────

pub struct StubNet {
    pub connected: bool,
}

#[allow(dead_code)]
impl StubNet {
    pub fn online() -> Self {
        Self { connected: true }
    }

    pub fn offline() -> Self {
        Self { connected: false }
    }
}

impl ConnectivityPort for StubNet {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn poll(&mut self, _now_ms: u64) {}

    fn set_credentials(&mut self, _ssid: &str, _password: &str) -> Result<(), ConnectivityError> {
        Ok(())
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
