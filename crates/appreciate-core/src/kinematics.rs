//! Hand kinematics for the VR path.
//!
//! Two consecutive hand poses give a per-hand linear speed (cm/s) and angular
//! speed (rad/s). Both hands are averaged, capped, and blended into the
//! target intensity handed to the filter.

use crate::constants::*;
use glam::{EulerRot, Quat, Vec3};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for HandPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicSample {
    pub left_linear_speed: f32,
    pub right_linear_speed: f32,
    pub left_angular_speed: f32,
    pub right_angular_speed: f32,
}

impl KinematicSample {
    /// Blend both hands into a target intensity in `[0, 1]`.
    /// A non-finite average (degenerate pose from the host) counts as still.
    pub fn target_intensity(&self) -> f32 {
        let linear = capped_average(
            self.left_linear_speed,
            self.right_linear_speed,
            MAX_VELOCITY_CM_PER_SEC,
        );
        let angular = capped_average(
            self.left_angular_speed,
            self.right_angular_speed,
            MAX_ANGULAR_SPEED,
        );
        linear / MAX_VELOCITY_CM_PER_SEC * LINEAR_VELOCITY_WEIGHT
            + angular / MAX_ANGULAR_SPEED * ANGULAR_VELOCITY_WEIGHT
    }
}

// `f32::min` would turn NaN into the cap, so filter first.
#[inline]
fn capped_average(left: f32, right: f32, cap: f32) -> f32 {
    let average = (left + right) / 2.0;
    if average.is_finite() {
        average.min(cap)
    } else {
        0.0
    }
}

/// Keeps exactly one previous pose per hand.
#[derive(Clone, Debug)]
pub struct KinematicSampler {
    period: Duration,
    previous: Option<(HandPose, HandPose)>,
}

impl Default for KinematicSampler {
    fn default() -> Self {
        Self::new(HAND_VELOCITY_CHECK_INTERVAL)
    }
}

impl KinematicSampler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            previous: None,
        }
    }

    /// Forget the previous poses; the next sample reads as motionless.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn sample(&mut self, left: HandPose, right: HandPose) -> KinematicSample {
        let Some((prev_left, prev_right)) = self.previous.replace((left, right)) else {
            return KinematicSample::default();
        };
        let dt = self.period.as_secs_f32().max(f32::EPSILON);
        KinematicSample {
            left_linear_speed: linear_speed(prev_left.position, left.position, dt),
            right_linear_speed: linear_speed(prev_right.position, right.position, dt),
            left_angular_speed: angular_speed(prev_left.rotation, left.rotation, dt),
            right_angular_speed: angular_speed(prev_right.rotation, right.rotation, dt),
        }
    }
}

#[inline]
fn linear_speed(from: Vec3, to: Vec3, dt_sec: f32) -> f32 {
    from.distance(to) * CM_PER_M / dt_sec
}

fn angular_speed(from: Quat, to: Quat, dt_sec: f32) -> f32 {
    let mut delta = (to * from.inverse()).normalize();
    // q and -q are the same rotation; keep the short way round
    if delta.w < 0.0 {
        delta = -delta;
    }
    let (yaw, pitch, roll) = delta.to_euler(EulerRot::YXZ);
    Vec3::new(pitch, yaw, roll).length() / dt_sec
}

/// Both hands strictly above the head joint.
#[inline]
pub fn hands_above_head(left: Vec3, right: Vec3, head: Vec3) -> bool {
    left.y > head.y && right.y > head.y
}

/// Minimum spacing between VR sound triggers; calmer gestures wait longer.
pub fn vr_debounce_delay(target_intensity: f32) -> Duration {
    let t = target_intensity.clamp(0.0, 1.0);
    let ms = VR_DEBOUNCE_MIN_MS + (VR_DEBOUNCE_MAX_MS - VR_DEBOUNCE_MIN_MS) * (1.0 - t);
    Duration::from_secs_f32(ms / 1000.0)
}
