//! Integration tests for the foreground loop: activation → polling →
//! alarm/presentation → upload signaling, driven with a synthetic clock.

use std::sync::Arc;

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink, StubNet};
use ivy::activation::{ActivationFlag, ActivationState};
use ivy::alarm::{AlarmState, COLOUR_ALARM, COLOUR_COMFORT};
use ivy::app::events::AppEvent;
use ivy::app::service::AppService;
use ivy::config::SystemConfig;
use ivy::reading::ReadingStore;
use ivy::upload::{TriggerChannel, UploadSignal};
use ivy::SensorError;

struct Fixture {
    app: AppService,
    hw: MockHardware,
    net: StubNet,
    sink: RecordingSink,
    trigger: Arc<TriggerChannel>,
    flag: Arc<ActivationFlag>,
    store: Arc<ReadingStore>,
}

fn fixture() -> Fixture {
    let config = SystemConfig::default();
    let flag = Arc::new(ActivationFlag::new());
    let store = Arc::new(ReadingStore::new());
    let trigger: Arc<TriggerChannel> = Arc::new(TriggerChannel::new());
    let mut app = AppService::new(
        config,
        flag.clone(),
        store.clone(),
        UploadSignal::new(trigger.clone()),
    );
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    Fixture {
        app,
        hw,
        net: StubNet::online(),
        sink,
        trigger,
        flag,
        store,
    }
}

impl Fixture {
    fn tick(&mut self, now_ms: u64) {
        self.app
            .tick(now_ms, &mut self.hw, &self.net, &mut self.sink);
    }

    /// Press and release the button around `at_ms`.
    fn press(&mut self, at_ms: u64) {
        self.hw.button_low = Some(true);
        self.tick(at_ms);
        self.hw.button_low = Some(false);
        self.tick(at_ms + 10);
    }
}

// ── Boot and idle ─────────────────────────────────────────────

#[test]
fn boots_idle_with_idle_presentation() {
    let f = fixture();
    assert_eq!(f.app.state(), ActivationState::Idle);
    assert!(f.hw.calls.contains(&ActuatorCall::AllOff));
    let (l0, _) = f.hw.last_lines().expect("idle prompt shown");
    assert!(l0.contains("standing by"));
}

#[test]
fn idle_never_polls_sensors() {
    let mut f = fixture();
    for t in (0..50_000).step_by(10) {
        f.tick(t);
    }
    // Nothing was merged into the store and no reading event was emitted.
    assert_eq!(f.store.snapshot().temperature_c, None);
    assert!(!f.sink.contains(|e| matches!(e, AppEvent::ReadingUpdated(_))));
}

// ── Activation ────────────────────────────────────────────────

#[test]
fn press_activates_chirps_and_polls_immediately() {
    let mut f = fixture();
    f.press(1_000);

    assert_eq!(f.app.state(), ActivationState::Active);
    assert!(f.hw.chirped());
    assert!(f.sink.contains(|e| matches!(e, AppEvent::Activated)));
    // First poll fires on the activation tick; comfort-green presentation.
    assert_eq!(f.hw.last_indicator(), Some(COLOUR_COMFORT));
    assert_eq!(f.store.snapshot().temperature_c, Some(25));
}

#[test]
fn second_press_deactivates_and_restores_idle_face() {
    let mut f = fixture();
    f.press(1_000);
    f.press(2_000);

    assert_eq!(f.app.state(), ActivationState::Idle);
    assert!(f.sink.contains(|e| matches!(e, AppEvent::Deactivated)));
    let (l0, _) = f.hw.last_lines().unwrap();
    assert!(l0.contains("standing by"));
}

#[test]
fn bouncing_press_toggles_once() {
    let mut f = fixture();
    f.press(1_000);
    // Bounce edges inside the 200 ms window.
    f.press(1_050);
    f.press(1_120);
    assert_eq!(f.app.state(), ActivationState::Active);
}

// ── Poll cadence ──────────────────────────────────────────────

#[test]
fn polls_on_the_configured_cadence() {
    let mut f = fixture();
    f.press(1_000);
    let polls_after_activation = f
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ReadingUpdated(_)))
        .count();
    assert_eq!(polls_after_activation, 1);

    // Between-cadence ticks do not poll.
    f.tick(3_000);
    f.tick(5_999);
    let polls = f
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ReadingUpdated(_)))
        .count();
    assert_eq!(polls, 1);

    // Cadence boundary polls again.
    f.tick(6_000);
    let polls = f
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ReadingUpdated(_)))
        .count();
    assert_eq!(polls, 2);
}

#[test]
fn failed_reads_keep_previous_display_values() {
    let mut f = fixture();
    f.press(1_000);
    assert_eq!(f.store.snapshot().temperature_c, Some(25));

    // Every sensor fails on the next poll; stale values survive.
    f.hw.climate = Err(SensorError::NotANumber);
    f.hw.distance = Err(SensorError::EchoTimeout);
    f.tick(6_000);

    let snap = f.store.snapshot();
    assert_eq!(snap.temperature_c, Some(25));
    assert_eq!(snap.distance_cm, Some(200.0));
    let (l0, l1) = f.hw.last_lines().unwrap();
    assert!(l0.contains("25"));
    assert!(l1.contains("200.0"));
}

#[test]
fn never_read_distance_displays_unknown() {
    let mut f = fixture();
    f.hw.distance = Err(SensorError::EchoTimeout);
    f.press(1_000);
    let (_, l1) = f.hw.last_lines().unwrap();
    assert!(l1.contains("--"), "unknown marker expected, got '{l1}'");
}

// ── Alarm flow ────────────────────────────────────────────────

#[test]
fn alarm_reading_goes_red_with_buzzer() {
    let mut f = fixture();
    f.hw.set_climate(40.0, 50.0);
    f.press(1_000);

    assert_eq!(f.hw.last_indicator(), Some(COLOUR_ALARM));
    assert!(f.hw.buzzer_on());
    assert!(f.sink.contains(|e| matches!(
        e,
        AppEvent::AlarmChanged {
            to: AlarmState::Alarm,
            ..
        }
    )));
}

#[test]
fn alarm_clears_when_reading_recovers() {
    let mut f = fixture();
    f.hw.set_climate(40.0, 50.0);
    f.press(1_000);
    assert!(f.hw.buzzer_on());

    f.hw.set_climate(25.0, 50.0);
    f.tick(6_000);
    assert!(!f.hw.buzzer_on());
    assert!(f.sink.contains(|e| matches!(
        e,
        AppEvent::AlarmChanged {
            from: AlarmState::Alarm,
            to: AlarmState::Normal,
        }
    )));
}

// ── Send cadence ──────────────────────────────────────────────

#[test]
fn no_send_fires_before_the_first_window() {
    let mut f = fixture();
    f.press(1_000);
    f.tick(60_000);
    f.tick(120_999);
    assert!(f.trigger.try_receive().is_err());
    assert!(!f.sink.contains(|e| matches!(e, AppEvent::UploadTriggered)));
}

#[test]
fn send_window_signals_the_upload_task() {
    let mut f = fixture();
    f.press(1_000);
    f.tick(121_000); // activation + upload interval
    assert!(f.trigger.try_receive().is_ok());
    assert!(f.sink.contains(|e| matches!(e, AppEvent::UploadTriggered)));
}

#[test]
fn offline_window_is_skipped_not_queued() {
    let mut f = fixture();
    f.press(1_000);
    f.net.connected = false;
    f.tick(121_000);

    assert!(f.trigger.try_receive().is_err());
    assert!(f
        .sink
        .contains(|e| matches!(e, AppEvent::UploadSkippedOffline)));

    // Link restored — nothing fires until the *next* window.
    f.net.connected = true;
    f.tick(125_000);
    assert!(f.trigger.try_receive().is_err());
    f.tick(241_000);
    assert!(f.trigger.try_receive().is_ok());
}

#[test]
fn deactivation_disarms_pending_send_windows() {
    let mut f = fixture();
    f.press(1_000);
    f.press(2_000); // back to Idle

    // Long past where the send window would have elapsed.
    for t in (3_000..400_000).step_by(5_000) {
        f.tick(t);
    }
    assert!(f.trigger.try_receive().is_err());
    assert!(!f.sink.contains(|e| matches!(e, AppEvent::UploadTriggered)));
}

#[test]
fn reactivation_rearms_from_the_new_entry_timestamp() {
    let mut f = fixture();
    f.press(1_000);
    f.press(2_000);
    f.press(500_000);

    // Window measured from the re-activation, not from boot or first run.
    f.tick(500_100);
    assert!(f.trigger.try_receive().is_err());
    f.tick(620_100); // 500_100 + 120_000
    assert!(f.trigger.try_receive().is_ok());
}

// ── Degraded operation ────────────────────────────────────────

#[test]
fn bad_button_reads_never_toggle() {
    let mut f = fixture();
    f.hw.button_low = None;
    for t in (0..10_000).step_by(10) {
        f.tick(t);
    }
    assert_eq!(f.app.state(), ActivationState::Idle);
}

#[test]
fn device_keeps_running_with_all_sensors_dead() {
    let mut f = fixture();
    f.hw.climate = Err(SensorError::NotANumber);
    f.hw.distance = Err(SensorError::EchoTimeout);
    f.press(1_000);

    for t in (2_000..100_000).step_by(1_000) {
        f.tick(t);
    }
    // Still Active, still Normal (absent data never alarms), unknown markers.
    assert_eq!(f.app.state(), ActivationState::Active);
    assert_eq!(f.flag.state(), ActivationState::Active);
    assert!(!f.hw.buzzer_on());
    let (l0, l1) = f.hw.last_lines().unwrap();
    assert!(l0.contains("--"));
    assert!(l1.contains("--"));
}
