//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — today they go to the serial log.

use crate::alarm::AlarmState;
use crate::reading::Reading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (always boots Idle).
    Started,

    /// A debounced button press switched the device on.
    Activated,

    /// A debounced button press switched the device off.
    Deactivated,

    /// A poll cycle merged new sensor data (carries the fresh snapshot).
    ReadingUpdated(Reading),

    /// The alarm classification changed.
    AlarmChanged { from: AlarmState, to: AlarmState },

    /// A send window elapsed and the upload task was signalled.
    UploadTriggered,

    /// A send window elapsed but no link was available; nothing queued.
    UploadSkippedOffline,
}
