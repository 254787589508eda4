//! Upload payload builder.
//!
//! The ingest endpoint indexes `Temp`, `Humid`, and `Proxy` unconditionally,
//! so a payload is only built once every field has been read at least once.
//! Field names and casing are fixed by the server contract.

use serde::Serialize;

use crate::reading::Reading;

/// JSON body of one upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UploadPayload<'a> {
    pub device_id: &'a str,
    #[serde(rename = "Temp")]
    pub temp: i32,
    #[serde(rename = "Humid")]
    pub humid: i32,
    #[serde(rename = "Proxy")]
    pub proxy: i32,
}

impl<'a> UploadPayload<'a> {
    /// Build from a snapshot.  Returns `None` while any field is still
    /// absent; distance is rounded to the nearest whole centimetre.
    pub fn from_reading(device_id: &'a str, r: &Reading) -> Option<Self> {
        Some(Self {
            device_id,
            temp: r.temperature_c?,
            humid: i32::from(r.humidity_pct?),
            proxy: r.distance_cm?.round() as i32,
        })
    }
}
