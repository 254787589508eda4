//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! ESP-IDF logger (UART / USB-CDC in production).  A future MQTT or BLE
//! adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | service up, mode=Idle"),
            AppEvent::Activated => info!("MODE  | Idle -> Active"),
            AppEvent::Deactivated => info!("MODE  | Active -> Idle"),
            AppEvent::ReadingUpdated(r) => {
                info!(
                    "POLL  | T={} H={} D={}",
                    fmt_opt_i32(r.temperature_c),
                    fmt_opt_u8(r.humidity_pct),
                    fmt_opt_f32(r.distance_cm),
                );
            }
            AppEvent::AlarmChanged { from, to } => {
                info!("ALARM | {:?} -> {:?}", from, to);
            }
            AppEvent::UploadTriggered => info!("SEND  | upload task signalled"),
            AppEvent::UploadSkippedOffline => info!("SEND  | skipped, no link"),
        }
    }
}

fn fmt_opt_i32(v: Option<i32>) -> heapless::String<12> {
    let mut s = heapless::String::new();
    match v {
        Some(v) => {
            let _ = core::fmt::write(&mut s, format_args!("{}C", v));
        }
        None => {
            let _ = s.push_str("--");
        }
    }
    s
}

fn fmt_opt_u8(v: Option<u8>) -> heapless::String<12> {
    let mut s = heapless::String::new();
    match v {
        Some(v) => {
            let _ = core::fmt::write(&mut s, format_args!("{}%", v));
        }
        None => {
            let _ = s.push_str("--");
        }
    }
    s
}

fn fmt_opt_f32(v: Option<f32>) -> heapless::String<12> {
    let mut s = heapless::String::new();
    match v {
        Some(v) => {
            let _ = core::fmt::write(&mut s, format_args!("{:.1}cm", v));
        }
        None => {
            let _ = s.push_str("--");
        }
    }
    s
}
