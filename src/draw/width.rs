//! Velocity-based width modulation.

use crate::util::{self, Velocity};

/// Speed (units per second) that maps to a blended rate of 1.0.
pub const VELOCITY_CALIBRATION: f64 = 600.0;

const CURRENT_WEIGHT: f64 = 0.6;
const PREVIOUS_WEIGHT: f64 = 0.4;

/// Maximum frame-to-frame change, as a fraction of the previous width.
const MAX_STEP: f64 = 0.25;

/// Narrowest width, as a fraction of the base width.
const MIN_WIDTH_FRACTION: f64 = 0.2;

/// Returns a width which is smaller when the pointer moves faster.
///
/// The result never changes by more than 25% from `previous_width` and always
/// lies within `[0.2 * base_width, base_width]`. A stationary pointer (blended
/// speed of zero) saturates and lands on the upper clamp.
pub fn modulated_width(
    base_width: f64,
    velocity: Velocity,
    previous_velocity: Velocity,
    previous_width: f64,
) -> f64 {
    let speed = velocity.length() / VELOCITY_CALIBRATION;
    let previous_speed = previous_velocity.length() / VELOCITY_CALIBRATION;
    let rate = CURRENT_WEIGHT * speed + PREVIOUS_WEIGHT * previous_speed;

    let modulated = if rate > 0.0 {
        base_width / rate
    } else {
        f64::MAX
    };

    let limited = util::clamp(
        modulated,
        (1.0 - MAX_STEP) * previous_width,
        (1.0 + MAX_STEP) * previous_width,
    );
    util::clamp(limited, MIN_WIDTH_FRACTION * base_width, base_width)
}
