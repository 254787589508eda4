//! Active piezo buzzer driver.
//!
//! Two modes of use: continuous on/off (alarm) and a short blocking chirp
//! (button-press confirmation).  The chirp blocks the foreground loop for
//! its duration, which is acceptable at ~100 ms once per press.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the buzzer GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct Buzzer {
    on: bool,
}

impl Buzzer {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.on {
            hw_init::gpio_write(pins::BUZZER_GPIO, on);
            self.on = on;
        }
    }

    /// Blocking confirmation chirp.  Restores the previous on/off state
    /// afterwards so an active alarm tone is not silenced by a press.
    pub fn chirp(&mut self, duration_ms: u16) {
        hw_init::gpio_write(pins::BUZZER_GPIO, true);
        #[cfg(target_os = "espidf")]
        std::thread::sleep(core::time::Duration::from_millis(u64::from(duration_ms)));
        #[cfg(not(target_os = "espidf"))]
        let _ = duration_ms; // No real time passes in simulation.
        hw_init::gpio_write(pins::BUZZER_GPIO, self.on);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
