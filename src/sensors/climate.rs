//! DHT11 climate sensor (temperature + relative humidity, single-wire).
//!
//! The host pulls the data line low for ≥18 ms to request a reading, then
//! the sensor clocks out 40 bits by pulse-width coding (~28 µs high = 0,
//! ~70 µs high = 1) followed by a byte checksum.  A failed handshake,
//! a bad checksum, or a not-a-number value is a read failure for this
//! cycle — never a zero, and never retried here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the open-drain data line via hw_init.
//! On host/test: reads from injected atomics.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::SensorError;
use crate::reading::ClimateSample;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_HUMID_BITS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_READ_FAILS: AtomicBool = AtomicBool::new(false);

/// Simulation: inject the next climate reading.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUMID_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
}

/// Simulation: make climate reads fail.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_read_fails(fails: bool) {
    SIM_READ_FAILS.store(fails, Ordering::Relaxed);
}

pub struct Dht11 {
    gpio: i32,
}

impl Dht11 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// One climate poll.
    pub fn read(&mut self) -> Result<ClimateSample, SensorError> {
        let (t, h) = self.read_raw()?;
        if t.is_nan() || h.is_nan() {
            return Err(SensorError::NotANumber);
        }
        Ok(ClimateSample {
            temperature_c: t,
            humidity_pct: h,
        })
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&self) -> Result<(f32, f32), SensorError> {
        use crate::drivers::hw_init::{delay_us, gpio_write};

        // Host start signal: ≥18 ms low, then release to the pull-up.
        gpio_write(self.gpio, false);
        delay_us(20_000);
        gpio_write(self.gpio, true);
        delay_us(30);

        // Sensor response: ~80 µs low, ~80 µs high, then data.
        wait_for_level(self.gpio, false, 100)?;
        wait_for_level(self.gpio, true, 100)?;
        wait_for_level(self.gpio, false, 100)?;

        let mut data = [0u8; 5];
        for bit in 0..40 {
            // ~50 µs low gap before each bit.
            wait_for_level(self.gpio, true, 80)?;
            // High pulse width encodes the bit value.
            let width = wait_for_level(self.gpio, false, 100)?;
            if width > 48 {
                data[bit / 8] |= 1 << (7 - bit % 8);
            }
        }

        let sum = data[0]
            .wrapping_add(data[1])
            .wrapping_add(data[2])
            .wrapping_add(data[3]);
        if sum != data[4] {
            return Err(SensorError::NotANumber);
        }

        // DHT11 integral parts; decimal bytes are zero on this part.
        Ok((f32::from(data[2]), f32::from(data[0])))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&self) -> Result<(f32, f32), SensorError> {
        let _ = self.gpio;
        if SIM_READ_FAILS.load(Ordering::Relaxed) {
            return Err(SensorError::NotANumber);
        }
        Ok((
            f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            f32::from_bits(SIM_HUMID_BITS.load(Ordering::Relaxed)),
        ))
    }
}

/// Spin until the line reaches `level`, returning the wait in µs.
/// `NotANumber` when the sensor stops talking mid-frame.
#[cfg(target_os = "espidf")]
fn wait_for_level(gpio: i32, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
    use crate::drivers::hw_init::{gpio_read, micros};

    let start = micros();
    loop {
        if gpio_read(gpio) == level {
            return Ok((micros() - start) as u32);
        }
        if (micros() - start) as u32 > timeout_us {
            return Err(SensorError::NotANumber);
        }
    }
}
