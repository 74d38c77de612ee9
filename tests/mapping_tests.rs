// Host-side tests for the intensity → presentation mappings and the tuning
// constants they rely on.

use appreciate_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f32 = 1e-5;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(MAX_CLAP_INTENSITY > 0.0 && MAX_CLAP_INTENSITY < MAX_WHISTLE_INTENSITY);
    assert!((LINEAR_VELOCITY_WEIGHT + ANGULAR_VELOCITY_WEIGHT - 1.0).abs() < EPS);
    assert!(MIN_VOLUME_CLAP < MAX_VOLUME_CLAP);
    assert!(MIN_VOLUME_WHISTLE < MAX_VOLUME_WHISTLE);
    assert!(MINIMUM_PITCH < 1.0 && MAXIMUM_PITCH > 1.0);
    assert!(VR_DEBOUNCE_MIN_MS < VR_DEBOUNCE_MAX_MS);
    assert!(MIN_COLOR_MULTIPLIER > 0.0 && MIN_COLOR_MULTIPLIER < 1.0);
    assert!(INITIAL_ANIMATION_FPS < CHEERING_FPS_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn desktop_timings_are_ordered() {
    assert!(FADE_INTERVAL < SLOW_APPRECIATION_INTERVAL);
    assert!(SLOW_APPRECIATION_INTERVAL < DESKTOP_DEBOUNCE);
    assert!(DESKTOP_DEBOUNCE < STOP_APPRECIATING_GRACE);
    assert!(HAND_VELOCITY_CHECK_INTERVAL < HAND_POSITION_CHECK_INTERVAL);
    assert!(VOLUME_STEP_DOWN_DESKTOP < VOLUME_STEP_UP_DESKTOP);
}

#[test]
fn clap_volume_spans_its_band() {
    assert!((injector_volume(0.0, Category::Clap) - MIN_VOLUME_CLAP).abs() < EPS);
    assert!((injector_volume(MAX_CLAP_INTENSITY, Category::Clap) - MAX_VOLUME_CLAP).abs() < EPS);
}

#[test]
fn whistle_volume_spans_its_band() {
    let lo = injector_volume(MAX_CLAP_INTENSITY, Category::Whistle);
    let hi = injector_volume(MAX_WHISTLE_INTENSITY, Category::Whistle);
    assert!((lo - MIN_VOLUME_WHISTLE).abs() < EPS);
    assert!((hi - MAX_VOLUME_WHISTLE).abs() < EPS);
}

#[test]
fn volume_rises_within_each_band_and_steps_down_at_the_boundary() {
    let mut prev = 0.0;
    for i in 1..=55 {
        let v = injector_volume(i as f32 / 100.0, Category::Clap);
        assert!(v > prev);
        prev = v;
    }
    let across = injector_volume(0.56, Category::Whistle);
    assert!(across < prev, "whistle must start quieter than clap ends");

    let mut prev = across;
    for i in 57..=100 {
        let v = injector_volume(i as f32 / 100.0, Category::Whistle);
        assert!(v > prev);
        prev = v;
    }
}

#[test]
fn pitch_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let p = random_pitch(&mut rng);
        assert!((MINIMUM_PITCH..=MAXIMUM_PITCH).contains(&p));
    }
}

#[test]
fn sound_urls_are_one_based_and_zero_padded() {
    assert_eq!(sound_url(Category::Clap, 0), "sounds/claps/01.wav");
    assert_eq!(sound_url(Category::Clap, 15), "sounds/claps/16.wav");
    assert_eq!(sound_url(Category::Whistle, 16), "sounds/whistles/17.wav");
    assert_eq!(sound_bank_len(Category::Clap), NUM_CLAP_SOUNDS);
    assert_eq!(sound_bank_len(Category::Whistle), NUM_WHISTLE_SOUNDS);
}

#[test]
fn marker_size_follows_intensity() {
    assert_eq!(marker_dimensions(0.0), Vec3::ZERO);
    assert_eq!(marker_dimensions(-0.2), Vec3::ZERO);
    let half = marker_dimensions(0.5);
    assert!((half.x - 0.12).abs() < EPS);
    assert_eq!(half.x, half.y);
    assert_eq!(half.y, half.z);
    assert!((marker_dimensions(1.0).x - MARKER_MAX_DIMENSION).abs() < EPS);
}

#[test]
fn marker_color_fades_from_dim_to_full() {
    let max = Rgb::new(200.0, 100.0, 50.0);
    let dim = marker_color(0.0, max);
    assert!((dim.red - 80.0).abs() < EPS);
    assert!((dim.green - 40.0).abs() < EPS);
    assert!((dim.blue - 20.0).abs() < EPS);

    let full = marker_color(1.0, max);
    assert!((full.red - max.red).abs() < EPS);
    assert!((full.blue - max.blue).abs() < EPS);

    let mid = marker_color(0.5, max);
    assert!(mid.red > dim.red && mid.red < full.red);
}

#[test]
fn default_color_and_albedo() {
    let color = Rgb::default();
    assert_eq!(color, Rgb::new(5.0, 255.0, 5.0));
    let [r, g, b] = color.albedo();
    assert!((r - 5.0 / 255.0).abs() < EPS);
    assert!((g - 1.0).abs() < EPS);
    assert!((b - 5.0 / 255.0).abs() < EPS);
}

#[test]
fn spin_seed_is_bounded_and_scales_with_intensity() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let seed = random_spin_seed(&mut rng);
        assert!(seed.abs().max_element() <= MARKER_MAX_SPIN_SEED);
    }
    let seed = Vec3::new(0.1, -0.2, 0.05);
    assert_eq!(marker_angular_velocity(seed, 0.0), Vec3::ZERO);
    let spin = marker_angular_velocity(seed, 0.5);
    assert!((spin.x - 0.1 * 31.0).abs() < EPS);
    assert!((spin.y + 0.2 * 31.0).abs() < EPS);
}

#[test]
fn animation_rate_tracks_intensity() {
    assert!((animation_fps(0.0, Category::Whistle) - 7.0).abs() < EPS);
    assert!((animation_fps(0.0, Category::Clap) - 22.0).abs() < EPS);
    assert!((animation_fps(0.5, Category::Whistle) - 47.0).abs() < EPS);
    // Capped before the clap boost is added
    assert!((animation_fps(1.0, Category::Whistle) - CHEERING_FPS_MAX).abs() < EPS);
    assert!((animation_fps(1.0, Category::Clap) - 95.0).abs() < EPS);
}

#[test]
fn animation_urls() {
    assert_eq!(animation_url(Category::Clap), CLAPPING_ANIMATION_URL);
    assert_eq!(animation_url(Category::Whistle), CHEERING_ANIMATION_URL);
}
