//! Heat-exchange model and food-spoilage cost curve.
//!
//! The fridge exchanges heat through two independent channels: an ambient
//! leak whose rate depends on whether the door is open, and active cooling
//! while the compressor runs. Both are integrated with one explicit Euler
//! step per simulation step.

use super::types::DT_SECONDS;

/// Probability that the door is opened during a step.
pub const DOOR_OPEN_PROBABILITY: f64 = 0.1;

/// Ambient leak rate with the door open (1/s).
pub const LEAK_DOOR_OPEN: f64 = 3e-5;

/// Ambient leak rate with the door closed (1/s).
pub const LEAK_DOOR_CLOSED: f64 = 5e-7;

/// Heat removal rate while the compressor runs (1/s).
pub const COOLING_RATE: f64 = 8e-6;

/// Lower edge of the safe storage band (°C).
pub const SAFE_BAND_LOW: f64 = 3.5;

/// Upper edge of the safe storage band (°C), exclusive.
pub const SAFE_BAND_HIGH: f64 = 6.5;

/// Door-leak coefficient `c1`.
pub fn leak_coefficient(door_open: bool) -> f64 {
    if door_open {
        LEAK_DOOR_OPEN
    } else {
        LEAK_DOOR_CLOSED
    }
}

/// Cooling coefficient `c2`.
pub fn cooling_coefficient(compressor_on: bool) -> f64 {
    if compressor_on { COOLING_RATE } else { 0.0 }
}

/// Advances the internal temperature by one step.
///
/// `t' = t + (c1 * (room - t) + c2 * (compressor - t)) * dt`
pub fn next_temperature(
    prev_temp: f64,
    room_temp: f64,
    compressor_temp: f64,
    door_open: bool,
    compressor_on: bool,
) -> f64 {
    let c1 = leak_coefficient(door_open);
    let c2 = cooling_coefficient(compressor_on);
    prev_temp + (c1 * (room_temp - prev_temp) + c2 * (compressor_temp - prev_temp)) * DT_SECONDS
}

/// Cost of the food spoiled in one step when the fridge sits at `temp_c`.
///
/// Zero inside `[3.5, 6.5)`, rising exponentially on either side: freezing
/// damage below the band, bacterial growth above it.
pub fn food_expense(temp_c: f64) -> f64 {
    if temp_c < SAFE_BAND_LOW {
        4.39 * (-0.49 * temp_c).exp()
    } else if temp_c >= SAFE_BAND_HIGH {
        0.11 * (0.31 * temp_c).exp()
    } else {
        0.0
    }
}
