//! The shared reading record and its owning store.
//!
//! `ReadingStore` is the single shared mutable record of the latest accepted
//! sensor values.  It is written only by the foreground loop and read by both
//! the foreground loop (display/alarm) and the upload task (payload), so the
//! record sits behind a mutex and `snapshot()` hands out copies, never live
//! references.
//!
//! The store enforces the field-level merge rule: a failed read leaves the
//! corresponding field unchanged — stale-but-valid data beats a blank display.
//! It is also the only place raw sensor output is converted to display/alarm
//! units (temperature and humidity rounded to nearest integer, distance kept
//! as floating-point centimetres).

use std::sync::{Mutex, PoisonError};

use crate::error::SensorError;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// A point-in-time copy of the latest accepted readings.
///
/// `None` means the field has never been successfully read; the store never
/// replaces `Some` with `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reading {
    /// Temperature, rounded to nearest whole °C.
    pub temperature_c: Option<i32>,
    /// Relative humidity, rounded to nearest whole percent.
    pub humidity_pct: Option<u8>,
    /// Distance to the nearest obstacle, centimetres.
    pub distance_cm: Option<f32>,
    /// Monotonic time of the most recent accepted update (ms since boot).
    pub timestamp_ms: u64,
}

impl Reading {
    /// True once every field holds a value — required before upload.
    pub fn is_complete(&self) -> bool {
        self.temperature_c.is_some() && self.humidity_pct.is_some() && self.distance_cm.is_some()
    }
}

/// Raw output of one successful climate poll, pre-conversion.
#[derive(Debug, Clone, Copy)]
pub struct ClimateSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

// ---------------------------------------------------------------------------
// ReadingStore
// ---------------------------------------------------------------------------

/// Process-lifetime owner of the shared [`Reading`].
///
/// Single writer (foreground loop), multiple readers.  Created once at boot
/// with every field absent.
pub struct ReadingStore {
    inner: Mutex<Reading>,
}

impl ReadingStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Reading::default()),
        }
    }

    /// Merge one climate poll result.  A failure leaves both climate fields
    /// at their previous values.
    pub fn apply_climate(&self, sample: Result<ClimateSample, SensorError>, now_ms: u64) {
        let Ok(sample) = sample else { return };
        let mut r = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        r.temperature_c = Some(round_i32(sample.temperature_c));
        r.humidity_pct = Some(round_i32(sample.humidity_pct).clamp(0, 100) as u8);
        r.timestamp_ms = now_ms;
    }

    /// Merge one distance poll result.  A timeout leaves the field unchanged.
    pub fn apply_distance(&self, sample: Result<f32, SensorError>, now_ms: u64) {
        let Ok(cm) = sample else { return };
        let mut r = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        r.distance_cm = Some(cm);
        r.timestamp_ms = now_ms;
    }

    /// Copy of the current record for a single use (display refresh or
    /// upload payload).
    pub fn snapshot(&self) -> Reading {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn round_i32(v: f32) -> i32 {
    v.round() as i32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
