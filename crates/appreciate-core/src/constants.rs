use std::time::Duration;

// Shared tuning constants for the controller and its channels.
// Most values were determined empirically against the avatar rig.

// Intensity bands
pub const MAX_CLAP_INTENSITY: f32 = 0.55; // upper edge of the clap band
pub const MAX_WHISTLE_INTENSITY: f32 = 1.0; // upper edge of the whistle band

// Filter step sizes (unitless)
pub const INTENSITY_MAX_STEP_VR: f32 = 0.003; // per sampler tick
pub const INSTANT_STEP: f32 = 1.0; // discrete events snap instead of easing

// Desktop path
pub const VOLUME_STEP_UP_DESKTOP: f32 = 0.035;
pub const VOLUME_STEP_DOWN_DESKTOP: f32 = 0.01;
pub const FADE_OUT_STEP: f32 = 0.05;
pub const DESKTOP_DEBOUNCE: Duration = Duration::from_millis(160);
pub const SLOW_APPRECIATION_INTERVAL: Duration = Duration::from_millis(100);
pub const STOP_APPRECIATING_GRACE: Duration = Duration::from_millis(1000);
pub const FADE_INTERVAL: Duration = Duration::from_millis(20);

// VR path
pub const HAND_VELOCITY_CHECK_INTERVAL: Duration = Duration::from_millis(10);
pub const HAND_POSITION_CHECK_INTERVAL: Duration = Duration::from_millis(200);
pub const MAX_VELOCITY_CM_PER_SEC: f32 = 110.0;
pub const MAX_ANGULAR_SPEED: f32 = 1.5; // rad/s
pub const LINEAR_VELOCITY_WEIGHT: f32 = 0.7; // linear + angular weights sum to 1.0
pub const ANGULAR_VELOCITY_WEIGHT: f32 = 0.3;
pub const VR_DEBOUNCE_MIN_MS: f32 = 20.0;
pub const VR_DEBOUNCE_MAX_MS: f32 = 200.0;
pub const CM_PER_M: f32 = 100.0;

// Audio
pub const MIN_VOLUME_CLAP: f32 = 0.05;
pub const MAX_VOLUME_CLAP: f32 = 1.0;
pub const MIN_VOLUME_WHISTLE: f32 = 0.07;
pub const MAX_VOLUME_WHISTLE: f32 = 0.16;
pub const MINIMUM_PITCH: f32 = 0.85;
pub const MAXIMUM_PITCH: f32 = 1.15;
pub const NUM_CLAP_SOUNDS: usize = 16;
pub const NUM_WHISTLE_SOUNDS: usize = 17;

// Visual marker
pub const UPDATE_MARKER_INTERVAL: Duration = Duration::from_millis(65);
pub const MARKER_MAX_DIMENSION: f32 = 0.24; // metres per axis at full intensity
pub const MARKER_MAX_SPIN_SEED: f32 = 0.21; // seed components drawn from [-x, x]
pub const MARKER_SPIN_MULTIPLIER: f32 = 62.0;
pub const MIN_COLOR_MULTIPLIER: f32 = 0.4;
pub const DEFAULT_ENTITY_COLOR: [f32; 3] = [5.0, 255.0, 5.0];

// Animation
pub const INITIAL_ANIMATION_FPS: f32 = 7.0;
pub const CHEERING_FPS_MAX: f32 = 80.0;
pub const CLAP_ANIMATION_FPS_BOOST: f32 = 15.0;
pub const CLAPPING_ANIMATION_URL: &str = "animations/Clapping.fbx";
pub const CHEERING_ANIMATION_URL: &str = "animations/Cheering.fbx";

// Joints
pub const LEFT_HAND: &str = "LeftHand";
pub const RIGHT_HAND: &str = "RightHand";
pub const LEFT_HAND_MIDDLE: &str = "LeftHandMiddle2";
pub const RIGHT_HAND_MIDDLE: &str = "RightHandMiddle2";
pub const HEAD: &str = "Head";
