//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly.  The connectivity
//! port lives with its adapter in [`crate::adapters::wifi`].

use crate::error::SensorError;
use crate::reading::ClimateSample;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
///
/// No retries at this boundary — retry policy is the caller's periodic
/// cadence.
pub trait SensorPort {
    /// One climate poll (temperature + humidity).
    fn poll_climate(&mut self) -> Result<ClimateSample, SensorError>;

    /// One ranging cycle.  Bounded by the echo timeout; a lost echo is an
    /// error, never a zero.
    fn poll_distance(&mut self) -> Result<f32, SensorError>;

    /// Raw button level sample; `Some(true)` = line low (pressed).
    /// `None` when the pin could not be read.
    fn button_level_low(&mut self) -> Option<bool>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the indicator,
/// buzzer, and display.
pub trait ActuatorPort {
    /// Set the RGB indicator colour.
    fn set_indicator(&mut self, r: u8, g: u8, b: u8);

    /// Continuous buzzer on/off.
    fn set_buzzer(&mut self, on: bool);

    /// Short confirmation chirp (blocking for `duration_ms`).
    fn chirp(&mut self, duration_ms: u16);

    /// Replace both display lines.
    fn show_lines(&mut self, line0: &str, line1: &str);

    /// Indicator off, buzzer off, display cleared — idle presentation.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// MQTT or BLE tomorrow).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
