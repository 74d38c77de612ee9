//! Bounded intensity scalar and the band selection built on top of it.
//!
//! Intensity lives in `[0, upper_bound]`. The bound is the clap ceiling when
//! whistling is disabled and the whistle ceiling otherwise.

use crate::constants::{MAX_CLAP_INTENSITY, MAX_WHISTLE_INTENSITY};

/// The two mutually exclusive appreciation themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Clap,
    Whistle,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Clap => "clap",
            Category::Whistle => "whistle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Intensity {
    value: f32,
    upper_bound: f32,
}

impl Default for Intensity {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Intensity {
    pub fn new(never_whistle: bool) -> Self {
        Self {
            value: 0.0,
            upper_bound: upper_bound_for(never_whistle),
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn upper_bound(&self) -> f32 {
        self.upper_bound
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.value > 0.0
    }

    /// Move toward `target` by at most `max_step`, then clamp into range.
    pub fn advance(&mut self, target: f32, max_step: f32) -> f32 {
        let mut delta = (target - self.value).abs().min(max_step.max(0.0));
        if target < self.value {
            delta = -delta;
        }
        self.value = (self.value + delta).clamp(0.0, self.upper_bound);
        self.value
    }

    /// Change the ceiling and pull the current value under it immediately.
    pub fn set_never_whistle(&mut self, never_whistle: bool) {
        self.upper_bound = upper_bound_for(never_whistle);
        self.value = self.value.min(self.upper_bound);
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[inline]
fn upper_bound_for(never_whistle: bool) -> f32 {
    if never_whistle {
        MAX_CLAP_INTENSITY
    } else {
        MAX_WHISTLE_INTENSITY
    }
}

/// Pick the theme for an intensity. `None` means nothing should play.
pub fn select_category(intensity: f32, never_whistle: bool) -> Option<Category> {
    if intensity > 0.0 && (never_whistle || intensity <= MAX_CLAP_INTENSITY) {
        Some(Category::Clap)
    } else if intensity > MAX_CLAP_INTENSITY && intensity <= MAX_WHISTLE_INTENSITY {
        Some(Category::Whistle)
    } else {
        None
    }
}

/// Re-map `value` from `[in_min, in_max]` onto `[out_min, out_max]` without clamping.
#[inline]
pub fn linear_scale(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (out_max - out_min) * (value - in_min) / (in_max - in_min)
}
