//! Raw button level sampling.
//!
//! Active-low momentary switch with pull-up; the main loop samples the
//! level every iteration and feeds it to the activation controller, which
//! does edge detection and debouncing.  No ISR — the 10 ms loop cadence
//! bounds button latency well below human perception.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the button GPIO via hw_init.
//! On host/test: reads from injected atomics.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_PRESSED: AtomicBool = AtomicBool::new(false);
#[cfg(not(target_os = "espidf"))]
static SIM_READ_FAILS: AtomicBool = AtomicBool::new(false);

/// Simulation: press or release the button.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pressed(pressed: bool) {
    SIM_PRESSED.store(pressed, Ordering::Relaxed);
}

/// Simulation: make the next reads fail (malformed pin read).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_read_fails(fails: bool) {
    SIM_READ_FAILS.store(fails, Ordering::Relaxed);
}

pub struct Button {
    gpio: i32,
}

impl Button {
    pub fn new() -> Self {
        Self {
            gpio: pins::BUTTON_GPIO,
        }
    }

    /// One raw sample; `Some(true)` = line low = pressed.
    /// `None` when the level could not be read.
    #[cfg(target_os = "espidf")]
    pub fn level_low(&self) -> Option<bool> {
        Some(!crate::drivers::hw_init::gpio_read(self.gpio))
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn level_low(&self) -> Option<bool> {
        if SIM_READ_FAILS.load(Ordering::Relaxed) {
            return None;
        }
        Some(SIM_PRESSED.load(Ordering::Relaxed))
    }
}
