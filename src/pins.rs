//! GPIO / peripheral pin assignments for the Ivy main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Climate sensor (DHT11, single-wire)
// ---------------------------------------------------------------------------

/// DHT11 data line — open-drain, external 10 kΩ pull-up.
pub const DHT_DATA_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Distance sensor (HC-SR04 ultrasonic)
// ---------------------------------------------------------------------------

/// Digital output: a 10 µs pulse starts a ranging cycle.
pub const SONAR_TRIG_GPIO: i32 = 5;
/// Digital input: echo pulse width encodes the round-trip time.
/// Routed through a 5 V → 3.3 V divider.
pub const SONAR_ECHO_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Indicator LED (discrete RGB, common cathode)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Buzzer (active piezo, transistor-driven)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = sounding.
pub const BUZZER_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// I²C bus — LCD1602 via PCF8574 backpack
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// 7-bit I²C address of the PCF8574 LCD backpack.
pub const LCD_I2C_ADDR: u8 = 0x27;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for the RGB indicator (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;

// ---------------------------------------------------------------------------
// User button (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button toggling the device between Idle and Active.
pub const BUTTON_GPIO: i32 = 16;
