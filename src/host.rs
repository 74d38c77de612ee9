//! Capability traits the controller uses to reach the host runtime.
//!
//! Each trait covers one host subsystem. `Host` bundles them so the
//! controller can own a single value, and tests can swap in a recording fake.

use crate::bridge::UiEvent;
use appreciate_core::{Rgb, LEFT_HAND, LEFT_HAND_MIDDLE, RIGHT_HAND, RIGHT_HAND_MIDDLE};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Host entity handle (the host hands out UUID strings).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InjectorId(pub u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub text: String,
    pub is_shifted: bool,
    pub is_meta: bool,
    pub is_control: bool,
    pub is_alt: bool,
    pub is_auto_repeat: bool,
}

impl KeyEvent {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            ..Self::default()
        }
    }

    pub fn repeat(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            is_auto_repeat: true,
            ..Self::default()
        }
    }

    #[inline]
    pub fn has_modifiers(&self) -> bool {
        self.is_shifted || self.is_meta || self.is_control || self.is_alt
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayOptions {
    pub position: Vec3,
    pub volume: f32,
    pub pitch: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerProperties {
    pub position: Vec3,
    pub dimensions: Vec3,
    pub angular_velocity: Vec3,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NewEntity {
    /// Collisionless, ungrabbable dodecahedron owned by the avatar.
    Marker(MarkerProperties),
    Material {
        parent: EntityId,
        material_data: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntityEdit {
    Marker(MarkerProperties),
    MaterialData(String),
    Locked(bool),
    UserData {
        user_data: String,
        server_scripts: String,
    },
}

pub trait KinematicsSource {
    fn joint_position(&self, joint: &str) -> Option<Vec3>;
    fn joint_rotation(&self, joint: &str) -> Option<Quat>;
}

pub trait InputSource {
    fn subscribe_keys(&mut self);
    fn unsubscribe_keys(&mut self);
    fn hmd_active(&self) -> bool;
}

pub trait AudioSink {
    fn play_sound(&mut self, url: &str, options: &PlayOptions) -> Option<InjectorId>;
    fn is_playing(&self, injector: InjectorId) -> bool;
    fn set_injector_options(&mut self, injector: InjectorId, position: Vec3, volume: f32);
    fn stop_injector(&mut self, injector: InjectorId);
}

pub trait AnimationSink {
    /// `None` until the clip resource has finished loading.
    fn frame_count(&self, url: &str) -> Option<u32>;
    fn override_animation(&mut self, url: &str, fps: f32, looped: bool, first_frame: f32, last_frame: f32);
    fn restore_animation(&mut self);
}

pub trait EntitySink {
    fn add_entity(&mut self, entity: &NewEntity) -> Option<EntityId>;
    fn edit_entity(&mut self, id: &EntityId, edit: &EntityEdit);
    fn delete_entity(&mut self, id: &EntityId);
}

pub trait SettingsStore {
    fn get_value(&self, key: &str) -> Option<String>;
    fn set_value(&mut self, key: &str, value: String);
}

pub trait UiSink {
    fn send_ui(&mut self, event: &UiEvent);
}

pub trait Host:
    KinematicsSource + InputSource + AudioSink + AnimationSink + EntitySink + SettingsStore + UiSink
{
}

impl<T> Host for T where
    T: KinematicsSource
        + InputSource
        + AudioSink
        + AnimationSink
        + EntitySink
        + SettingsStore
        + UiSink
{
}

/// World position halfway between the hands, preferring the middle-finger joints.
pub fn halfway_between_hands<K: KinematicsSource + ?Sized>(source: &K) -> Option<Vec3> {
    let left = source
        .joint_position(LEFT_HAND_MIDDLE)
        .or_else(|| source.joint_position(LEFT_HAND))?;
    let right = source
        .joint_position(RIGHT_HAND_MIDDLE)
        .or_else(|| source.joint_position(RIGHT_HAND))?;
    Some((left + right) * 0.5)
}
