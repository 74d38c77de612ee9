//! Appreciate: hand motion (VR) or a held key (desktop) drives a bounded
//! intensity that in turn drives claps and whistles, a marker entity between
//! the avatar's hands, and an avatar animation override.
//!
//! The host runtime is reached only through the traits in [`host`], so the
//! controller runs the same against the real client, a simulator, or a test
//! double.

pub mod animation;
pub mod audio;
pub mod bridge;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod host;
pub mod marker;
pub mod scheduler;
pub mod settings;
pub mod wearable;

pub use bridge::{UiEvent, UiRequest};
pub use controller::{AppreciateController, TimerKind};
pub use error::{AppreciateError, Result};
pub use host::*;
pub use settings::{AppreciateSettings, MemorySettings};
pub use wearable::WearableConverter;
