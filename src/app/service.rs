//! Application service — the foreground controller.
//!
//! [`AppService`] owns the activation controller and the two cadence
//! timers, and orchestrates one pass of the device state machine per
//! `tick()`:
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! ActuatorPort ◀──│  activation · cadences  │──▶ UploadSignal
//!                 │  store · alarm          │
//!                 └────────────────────────┘
//! ```
//!
//! Idle: only watches for button edges.  Active: polls sensors on the
//! poll cadence and signals the upload task on the send cadence.  The two
//! cadences are independent timers, both re-armed from the Active-entry
//! timestamp.  The clock is injected (`now_ms`) so every timing path is
//! testable on the host.

use std::sync::Arc;

use log::warn;

use crate::activation::{ActivationController, ActivationFlag, ActivationState, TransitionEvent};
use crate::adapters::wifi::ConnectivityPort;
use crate::alarm::{self, AlarmState};
use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, EventSink, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::display::LINE_WIDTH;
use crate::reading::{Reading, ReadingStore};
use crate::upload::UploadSignal;

/// Confirmation chirp length on activation (ms).
const ACTIVATION_CHIRP_MS: u16 = 120;

const IDLE_LINE0: &str = "Ivy standing by";
const IDLE_LINE1: &str = "press to wake";

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The foreground controller.
pub struct AppService {
    config: SystemConfig,
    controller: ActivationController,
    activation: Arc<ActivationFlag>,
    store: Arc<ReadingStore>,
    uploader: UploadSignal,
    last_alarm: AlarmState,
    /// Next poll due time; `None` while Idle.
    poll_deadline_ms: Option<u64>,
    /// Next send due time; `None` while Idle.
    send_deadline_ms: Option<u64>,
}

impl AppService {
    pub fn new(
        config: SystemConfig,
        activation: Arc<ActivationFlag>,
        store: Arc<ReadingStore>,
        uploader: UploadSignal,
    ) -> Self {
        let controller = ActivationController::new(config.debounce_ms);
        Self {
            config,
            controller,
            activation,
            store,
            uploader,
            last_alarm: AlarmState::Normal,
            poll_deadline_ms: None,
            send_deadline_ms: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Present the idle face and announce startup.  Always boots Idle.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.present_idle(hw);
        sink.emit(&AppEvent::Started);
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One pass of the foreground loop.  Called every iteration (the main
    /// loop sleeps ~10 ms between calls, bounding button latency).
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        net: &impl ConnectivityPort,
        sink: &mut impl EventSink,
    ) {
        // 1. Button edges (debounced by the controller).
        let sample = hw.button_level_low();
        match self.controller.on_button_edge(sample, now_ms, &self.activation) {
            Some(TransitionEvent::Activated) => {
                hw.chirp(ACTIVATION_CHIRP_MS);
                // Both cadences arm from the activation timestamp: first
                // poll fires immediately, first send a full interval out.
                self.poll_deadline_ms = Some(now_ms);
                self.send_deadline_ms =
                    Some(now_ms + u64::from(self.config.upload_interval_ms));
                sink.emit(&AppEvent::Activated);
            }
            Some(TransitionEvent::Deactivated) => {
                self.poll_deadline_ms = None;
                self.send_deadline_ms = None;
                self.last_alarm = AlarmState::Normal;
                self.present_idle(hw);
                sink.emit(&AppEvent::Deactivated);
            }
            None => {}
        }

        if !self.activation.is_active() {
            return;
        }

        // 2. Poll cadence: sensors → store → alarm → presentation.
        if self.poll_deadline_ms.is_some_and(|d| now_ms >= d) {
            self.poll_deadline_ms = Some(now_ms + u64::from(self.config.poll_interval_ms));
            self.poll_cycle(now_ms, hw, sink);
        }

        // 3. Send cadence: signal the upload task, or skip when offline.
        if self.send_deadline_ms.is_some_and(|d| now_ms >= d) {
            // Re-arm whether the token goes out or the window is skipped;
            // missed windows are never queued for later.
            self.send_deadline_ms = Some(now_ms + u64::from(self.config.upload_interval_ms));
            if net.is_connected() {
                self.uploader.trigger();
                sink.emit(&AppEvent::UploadTriggered);
            } else {
                warn!("Send window elapsed with no link — skipping");
                sink.emit(&AppEvent::UploadSkippedOffline);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ActivationState {
        self.activation.state()
    }

    // ── Internal ──────────────────────────────────────────────

    fn poll_cycle(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.store.apply_climate(hw.poll_climate(), now_ms);
        self.store.apply_distance(hw.poll_distance(), now_ms);

        let snapshot = self.store.snapshot();
        sink.emit(&AppEvent::ReadingUpdated(snapshot));

        let verdict = alarm::evaluate(&snapshot, &self.config);
        if verdict.state != self.last_alarm {
            sink.emit(&AppEvent::AlarmChanged {
                from: self.last_alarm,
                to: verdict.state,
            });
            self.last_alarm = verdict.state;
        }

        let (r, g, b) = verdict.color;
        hw.set_indicator(r, g, b);
        hw.set_buzzer(verdict.buzzer_on);
        hw.show_lines(&climate_line(&snapshot), &distance_line(&snapshot));
    }

    fn present_idle(&self, hw: &mut impl ActuatorPort) {
        hw.all_off();
        hw.show_lines(IDLE_LINE0, IDLE_LINE1);
    }
}

// ───────────────────────────────────────────────────────────────
// Display formatting
// ───────────────────────────────────────────────────────────────

/// Climate summary line; never-read fields show as unknown.
fn climate_line(r: &Reading) -> heapless::String<LINE_WIDTH> {
    use core::fmt::Write as _;
    let mut s = heapless::String::new();
    match r.temperature_c {
        Some(t) => {
            let _ = write!(s, "T:{}C", t);
        }
        None => {
            let _ = s.push_str("T:--C");
        }
    }
    let _ = s.push(' ');
    match r.humidity_pct {
        Some(h) => {
            let _ = write!(s, "H:{}%", h);
        }
        None => {
            let _ = s.push_str("H:--%");
        }
    }
    s
}

/// Distance summary line.
fn distance_line(r: &Reading) -> heapless::String<LINE_WIDTH> {
    use core::fmt::Write as _;
    let mut s = heapless::String::new();
    match r.distance_cm {
        Some(d) => {
            let _ = write!(s, "Dist {:.1}cm", d);
        }
        None => {
            let _ = s.push_str("Dist --");
        }
    }
    s
}
