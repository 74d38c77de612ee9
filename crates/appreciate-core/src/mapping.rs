//! Pure intensity → presentation mappings shared by the channel drivers.

use crate::constants::*;
use crate::intensity::{linear_scale, Category};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Colour with channels in `[0, 255]`, the shape the UI colour picker sends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for Rgb {
    fn default() -> Self {
        let [red, green, blue] = DEFAULT_ENTITY_COLOR;
        Self { red, green, blue }
    }
}

impl Rgb {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.red * factor, self.green * factor, self.blue * factor)
    }

    /// Channels normalised to `[0, 1]` for material albedo.
    pub fn albedo(self) -> [f32; 3] {
        [self.red / 255.0, self.green / 255.0, self.blue / 255.0]
    }
}

// ---------------- Audio ----------------

/// Volume for the active band. Clap ends at 1.0 and whistle starts at 0.07,
/// so crossing 0.55 is an audible step down.
pub fn injector_volume(intensity: f32, category: Category) -> f32 {
    match category {
        Category::Clap => linear_scale(
            intensity,
            0.0,
            MAX_CLAP_INTENSITY,
            MIN_VOLUME_CLAP,
            MAX_VOLUME_CLAP,
        ),
        Category::Whistle => linear_scale(
            intensity,
            MAX_CLAP_INTENSITY,
            MAX_WHISTLE_INTENSITY,
            MIN_VOLUME_WHISTLE,
            MAX_VOLUME_WHISTLE,
        ),
    }
}

#[inline]
pub fn random_pitch<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(MINIMUM_PITCH..=MAXIMUM_PITCH)
}

/// Resource path of the `index`th clip (zero-based) in a category's bank.
pub fn sound_url(category: Category, index: usize) -> String {
    let dir = match category {
        Category::Clap => "claps",
        Category::Whistle => "whistles",
    };
    format!("sounds/{dir}/{:02}.wav", index + 1)
}

pub fn sound_bank_len(category: Category) -> usize {
    match category {
        Category::Clap => NUM_CLAP_SOUNDS,
        Category::Whistle => NUM_WHISTLE_SOUNDS,
    }
}

// ---------------- Visual marker ----------------

#[inline]
pub fn marker_dimensions(intensity: f32) -> Vec3 {
    Vec3::splat(MARKER_MAX_DIMENSION * intensity.max(0.0))
}

pub fn marker_color(intensity: f32, max: Rgb) -> Rgb {
    let min = max.scaled(MIN_COLOR_MULTIPLIER);
    Rgb::new(
        linear_scale(intensity, 0.0, 1.0, min.red, max.red),
        linear_scale(intensity, 0.0, 1.0, min.green, max.green),
        linear_scale(intensity, 0.0, 1.0, min.blue, max.blue),
    )
}

pub fn random_spin_seed<R: Rng>(rng: &mut R) -> Vec3 {
    let mut axis = || rng.gen_range(-MARKER_MAX_SPIN_SEED..=MARKER_MAX_SPIN_SEED);
    Vec3::new(axis(), axis(), axis())
}

#[inline]
pub fn marker_angular_velocity(seed: Vec3, intensity: f32) -> Vec3 {
    seed * (intensity * MARKER_SPIN_MULTIPLIER)
}

// ---------------- Animation ----------------

pub fn animation_fps(intensity: f32, clip: Category) -> f32 {
    let fps = (intensity * CHEERING_FPS_MAX + INITIAL_ANIMATION_FPS).min(CHEERING_FPS_MAX);
    match clip {
        Category::Clap => fps + CLAP_ANIMATION_FPS_BOOST,
        Category::Whistle => fps,
    }
}

pub fn animation_url(clip: Category) -> &'static str {
    match clip {
        Category::Clap => CLAPPING_ANIMATION_URL,
        Category::Whistle => CHEERING_ANIMATION_URL,
    }
}
