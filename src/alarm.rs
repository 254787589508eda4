//! Alarm classification and indicator colour selection.
//!
//! Pure function from a [`Reading`] snapshot to an alarm/normal verdict,
//! an indicator colour, and a buzzer state.  Recomputed every evaluation
//! cycle; nothing here is stored.
//!
//! Priority order:
//! 1. Any alarm threshold crossed → solid red, buzzer on.  Nothing else
//!    applies.
//! 2. Otherwise a temperature band picks the base colour, then two overlay
//!    tints may override it in fixed order (humidity first, proximity
//!    second — the later one wins when both hold).  Overlays are
//!    presentation only; the buzzer stays off.
//!
//! Absent fields are excluded from every rule: missing data never implies
//! an alarm, and a missing temperature skips banding entirely in favour of
//! a neutral idle colour.

use crate::config::SystemConfig;
use crate::reading::Reading;

/// Indicator colour, one byte per channel.
pub type Rgb = (u8, u8, u8);

/// Derived alarm classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Normal,
    Alarm,
}

/// Output of one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub state: AlarmState,
    pub color: Rgb,
    pub buzzer_on: bool,
}

// ── Palette ───────────────────────────────────────────────────

pub const COLOUR_ALARM: Rgb = (255, 0, 0);
/// Temperature bands, coolest to warmest.
pub const COLOUR_COOL: Rgb = (0, 80, 255);
pub const COLOUR_MILD: Rgb = (0, 180, 148);
pub const COLOUR_COMFORT: Rgb = (0, 200, 80);
pub const COLOUR_WARM: Rgb = (255, 150, 0);
/// Overlay tints.
pub const COLOUR_HUMID_TINT: Rgb = (70, 130, 255);
pub const COLOUR_CLOSE_TINT: Rgb = (255, 90, 40);
/// Neutral colour when no temperature has ever been read.
pub const COLOUR_UNKNOWN: Rgb = (30, 30, 30);

// ── Evaluation ────────────────────────────────────────────────

/// Classify the current reading.
pub fn evaluate(reading: &Reading, config: &SystemConfig) -> Verdict {
    if is_alarm(reading, config) {
        return Verdict {
            state: AlarmState::Alarm,
            color: COLOUR_ALARM,
            buzzer_on: true,
        };
    }

    let mut color = match reading.temperature_c {
        None => COLOUR_UNKNOWN,
        Some(t) if t <= 18 => COLOUR_COOL,
        Some(t) if t <= 24 => COLOUR_MILD,
        Some(t) if t <= 28 => COLOUR_COMFORT,
        Some(_) => COLOUR_WARM,
    };

    // Overlays, applied sequentially — the proximity tint wins when both hold.
    if let Some(h) = reading.humidity_pct {
        if h > config.humidity_overlay_pct {
            color = COLOUR_HUMID_TINT;
        }
    }
    if let Some(d) = reading.distance_cm {
        if d < config.distance_overlay_cm {
            color = COLOUR_CLOSE_TINT;
        }
    }

    Verdict {
        state: AlarmState::Normal,
        color,
        buzzer_on: false,
    }
}

fn is_alarm(reading: &Reading, config: &SystemConfig) -> bool {
    let temp_high = reading
        .temperature_c
        .is_some_and(|t| t as f32 > config.temp_alarm_c);
    let humid_high = reading
        .humidity_pct
        .is_some_and(|h| h > config.humidity_alarm_pct);
    let too_close = reading
        .distance_cm
        .is_some_and(|d| d < config.distance_alarm_cm);
    temp_high || humid_high || too_close
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
