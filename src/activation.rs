//! Debounced activation control.
//!
//! The push-button toggles the device between Idle and Active.  The
//! controller consumes raw active-low level samples from the main loop and
//! classifies falling edges; an edge is accepted only if the debounce window
//! has elapsed since the last *accepted* edge.  Side effects (confirmation
//! chirp, cadence re-arm, idle presentation) belong to the caller.
//!
//! The resulting mode lives in an [`ActivationFlag`] — a lock-free atomic
//! written from the foreground loop's context and read by the upload task,
//! which must never touch the network while the device is Idle.

use core::sync::atomic::{AtomicBool, Ordering};

/// Device operating mode.  Idle suppresses all sensing and uploading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    Idle,
    Active,
}

/// Emitted when a debounced button edge flips the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Activated,
    Deactivated,
}

// ---------------------------------------------------------------------------
// Shared flag
// ---------------------------------------------------------------------------

/// Shared Idle/Active flag.
///
/// Written by [`ActivationController`] (foreground context), read by the
/// upload task before any network I/O.
pub struct ActivationFlag {
    active: AtomicBool,
}

impl ActivationFlag {
    /// Boots Idle.
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ActivationState {
        if self.is_active() {
            ActivationState::Active
        } else {
            ActivationState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Flip the mode; returns `true` if the new mode is Active.
    fn toggle(&self) -> bool {
        !self.active.fetch_xor(true, Ordering::AcqRel)
    }
}

impl Default for ActivationFlag {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Debounced falling-edge detector over raw button level samples.
pub struct ActivationController {
    debounce_ms: u64,
    last_low: bool,
    last_accepted_ms: Option<u64>,
}

impl ActivationController {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms: debounce_ms as u64,
            last_low: false,
            last_accepted_ms: None,
        }
    }

    /// Feed one raw level sample (`Some(true)` = line low = pressed).
    ///
    /// Returns a transition event when a debounced falling edge flips the
    /// shared flag.  A malformed read (`None`) is treated as "no edge" and
    /// does not disturb edge tracking.
    pub fn on_button_edge(
        &mut self,
        sample: Option<bool>,
        now_ms: u64,
        flag: &ActivationFlag,
    ) -> Option<TransitionEvent> {
        let is_low = sample?;
        let falling = is_low && !self.last_low;
        self.last_low = is_low;
        if !falling {
            return None;
        }

        if let Some(last) = self.last_accepted_ms {
            if now_ms.wrapping_sub(last) < self.debounce_ms {
                return None; // Bounce — within the window of the last accepted edge.
            }
        }
        self.last_accepted_ms = Some(now_ms);

        Some(if flag.toggle() {
            TransitionEvent::Activated
        } else {
            TransitionEvent::Deactivated
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
