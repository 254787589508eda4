//! Sensor subsystem — individual drivers and the aggregating [`SensorGateway`].
//!
//! The gateway owns both sensor drivers and exposes one poll per sensor.
//! It performs no retries and keeps no reading state — retry policy is the
//! foreground loop's cadence, and the latest accepted values live in the
//! [`ReadingStore`](crate::reading::ReadingStore).

pub mod climate;
pub mod distance;

use crate::error::SensorError;
use crate::reading::ClimateSample;
use climate::Dht11;
use distance::HcSr04;

/// Wraps the climate and distance sensors behind one seam.
pub struct SensorGateway {
    climate: Dht11,
    sonar: HcSr04,
}

impl SensorGateway {
    /// Construct from pre-built drivers (built in main where pin ownership
    /// is established).
    pub fn new(climate: Dht11, sonar: HcSr04) -> Self {
        Self { climate, sonar }
    }

    /// One climate poll (temperature + humidity), or a failure for this
    /// cycle.
    pub fn poll_climate(&mut self) -> Result<ClimateSample, SensorError> {
        self.climate.read()
    }

    /// One ranging cycle, or a timeout for this cycle.
    pub fn poll_distance(&mut self) -> Result<f32, SensorError> {
        self.sonar.measure()
    }
}
