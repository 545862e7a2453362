//! Frame-rate independent smoothing helpers.
//!
//! Every smoothed value in the controller moves toward its target by
//! `clamp01(dt * rate)` of the remaining distance per tick. The clamp keeps a
//! long frame from overshooting the target.

use bevy::prelude::*;

/// Blend factor for one tick of exponential smoothing.
#[inline]
pub fn blend_factor(dt: f32, rate: f32) -> f32 {
    let t = dt * rate;
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Move `current` toward `target` by one tick of exponential smoothing.
#[inline]
pub fn smooth(current: f32, target: f32, dt: f32, rate: f32) -> f32 {
    current + (target - current) * blend_factor(dt, rate)
}

/// Vector version of [`smooth`].
#[inline]
pub fn smooth_vec3(current: Vec3, target: Vec3, dt: f32, rate: f32) -> Vec3 {
    current.lerp(target, blend_factor(dt, rate))
}
