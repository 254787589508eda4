//! System configuration parameters
//!
//! All tunable parameters for the Ivy monitor node.  Compiled-in defaults
//! match the deployed "ivy-01" unit; a future provisioning path can
//! override them at runtime.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Identity / endpoint ---
    /// Device identifier sent with every upload.
    pub device_id: heapless::String<16>,
    /// Remote ingest endpoint (the companion server's /data route).
    pub endpoint_url: heapless::String<96>,

    // --- Alarm thresholds ---
    /// Temperature (°C) above which the alarm fires.
    pub temp_alarm_c: f32,
    /// Relative humidity (%) above which the alarm fires.
    pub humidity_alarm_pct: u8,
    /// Distance (cm) below which the proximity alarm fires.
    pub distance_alarm_cm: f32,

    // --- Presentation overlays (non-alarm) ---
    /// Humidity (%) above which the indicator gets a bluish tint.
    pub humidity_overlay_pct: u8,
    /// Distance (cm) below which the indicator gets a warm-red tint.
    pub distance_overlay_cm: f32,

    // --- Timing ---
    /// Sensor poll cadence while Active (milliseconds).
    pub poll_interval_ms: u32,
    /// Upload cadence while Active (milliseconds).
    pub upload_interval_ms: u32,
    /// Button debounce window (milliseconds).
    pub debounce_ms: u32,
    /// Main loop sleep between iterations (milliseconds).
    pub loop_sleep_ms: u32,
    /// Ultrasonic echo timeout (microseconds, ≈ 5 m max range).
    pub echo_timeout_us: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Identity / endpoint
            device_id: heapless::String::try_from("ivy-01").unwrap(),
            endpoint_url: heapless::String::try_from("http://ivy-hub.local:5005/data")
                .unwrap(),

            // Alarm thresholds
            temp_alarm_c: 34.0,
            humidity_alarm_pct: 85,
            distance_alarm_cm: 30.0,

            // Overlays
            humidity_overlay_pct: 75,
            distance_overlay_cm: 100.0,

            // Timing
            poll_interval_ms: 5_000,     // sensor refresh
            upload_interval_ms: 120_000, // one report per two minutes
            debounce_ms: 200,
            loop_sleep_ms: 10,
            echo_timeout_us: 30_000,
        }
    }
}
