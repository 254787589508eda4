//! Host-side integration tests for the Ivy firmware.
//!
//! Everything here runs on x86_64 against mock adapters — no hardware.

mod mock_hw;
mod service_tests;
mod upload_tests;
