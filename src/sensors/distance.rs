//! HC-SR04 ultrasonic ranging sensor.
//!
//! A 10 µs trigger pulse fires an 8-cycle burst; the echo pin then goes
//! high for the sound round-trip time.  Both the wait-for-echo and the
//! echo pulse itself are bounded by the configured timeout (30 ms ≈ 5 m
//! of range) — a lost echo is [`SensorError::EchoTimeout`], never zero.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives trigger/echo GPIOs via hw_init with µs timing.
//! On host/test: reads from injected atomics.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::SensorError;

/// Sound round-trip through air: ~58 µs per centimetre of distance.
#[cfg(target_os = "espidf")]
const US_PER_CM: f32 = 58.0;

#[cfg(not(target_os = "espidf"))]
static SIM_DISTANCE_BITS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_ECHO_TIMES_OUT: AtomicBool = AtomicBool::new(false);

/// Simulation: inject the next distance reading (cm).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance(cm: f32) {
    SIM_DISTANCE_BITS.store(cm.to_bits(), Ordering::Relaxed);
}

/// Simulation: make ranging cycles time out.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_times_out(times_out: bool) {
    SIM_ECHO_TIMES_OUT.store(times_out, Ordering::Relaxed);
}

pub struct HcSr04 {
    trig_gpio: i32,
    echo_gpio: i32,
    timeout_us: u32,
}

impl HcSr04 {
    pub fn new(trig_gpio: i32, echo_gpio: i32, timeout_us: u32) -> Self {
        Self {
            trig_gpio,
            echo_gpio,
            timeout_us,
        }
    }

    /// One ranging cycle.
    #[cfg(target_os = "espidf")]
    pub fn measure(&mut self) -> Result<f32, SensorError> {
        use crate::drivers::hw_init::{delay_us, gpio_read, gpio_write, micros};

        // Trigger pulse.
        gpio_write(self.trig_gpio, false);
        delay_us(2);
        gpio_write(self.trig_gpio, true);
        delay_us(10);
        gpio_write(self.trig_gpio, false);

        // Wait for the echo to start.
        let deadline = micros() + u64::from(self.timeout_us);
        while !gpio_read(self.echo_gpio) {
            if micros() > deadline {
                return Err(SensorError::EchoTimeout);
            }
        }

        // Measure the echo pulse width.
        let rise = micros();
        let deadline = rise + u64::from(self.timeout_us);
        while gpio_read(self.echo_gpio) {
            if micros() > deadline {
                return Err(SensorError::EchoTimeout);
            }
        }
        let width_us = (micros() - rise) as f32;

        Ok(width_us / US_PER_CM)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn measure(&mut self) -> Result<f32, SensorError> {
        let _ = self.timeout_us;
        let _ = (self.trig_gpio, self.echo_gpio);
        if SIM_ECHO_TIMES_OUT.load(Ordering::Relaxed) {
            return Err(SensorError::EchoTimeout);
        }
        Ok(f32::from_bits(SIM_DISTANCE_BITS.load(Ordering::Relaxed)))
    }
}
