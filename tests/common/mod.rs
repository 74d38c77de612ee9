// Recording host double shared by the controller tests.

#![allow(dead_code)]

use appreciate::constants::SETTING_ENABLED;
use appreciate::{
    AnimationSink, AppreciateController, AudioSink, EntityEdit, EntityId, EntitySink, InjectorId,
    InputSource, KinematicsSource, MemorySettings, NewEntity, PlayOptions, SettingsStore, UiEvent,
    UiSink,
};
use appreciate_core::{CHEERING_ANIMATION_URL, CLAPPING_ANIMATION_URL, HEAD, LEFT_HAND, RIGHT_HAND};
use fnv::{FnvHashMap, FnvHashSet};
use glam::{Quat, Vec3};
use std::time::Duration;

pub const HEAD_HEIGHT: f32 = 1.7;

#[derive(Clone, Debug, PartialEq)]
pub struct Override {
    pub url: String,
    pub fps: f32,
    pub looped: bool,
    pub first_frame: f32,
    pub last_frame: f32,
}

#[derive(Default)]
pub struct FakeHost {
    pub hmd: bool,
    pub subscribed: bool,
    pub positions: FnvHashMap<String, Vec3>,
    pub rotations: FnvHashMap<String, Quat>,
    pub frame_counts: FnvHashMap<String, u32>,
    next_id: u64,
    pub sounds: Vec<(String, PlayOptions)>,
    /// Injectors that still report as playing.
    pub playing: FnvHashSet<u64>,
    pub keep_playing: bool,
    pub stopped: Vec<InjectorId>,
    pub injector_updates: Vec<(InjectorId, f32)>,
    pub overrides: Vec<Override>,
    pub restores: usize,
    pub added: Vec<(EntityId, NewEntity)>,
    pub edits: Vec<(EntityId, EntityEdit)>,
    pub deleted: Vec<EntityId>,
    pub settings: MemorySettings,
    pub ui: Vec<UiEvent>,
}

impl FakeHost {
    /// Desktop host with both clips loaded and hands at the hips.
    pub fn desktop() -> Self {
        let mut host = Self::default();
        host.frame_counts.insert(CLAPPING_ANIMATION_URL.to_owned(), 60);
        host.frame_counts.insert(CHEERING_ANIMATION_URL.to_owned(), 90);
        host.positions
            .insert(HEAD.to_owned(), Vec3::new(0.0, HEAD_HEIGHT, 0.0));
        host.set_hands(1.0, 0.0);
        host
    }

    pub fn vr() -> Self {
        Self {
            hmd: true,
            ..Self::desktop()
        }
    }

    pub fn enabled(mut self) -> Self {
        self.settings.set_value(SETTING_ENABLED, "true".to_owned());
        self
    }

    /// Place both hands at `height`, spread `offset` metres either side of centre.
    pub fn set_hands(&mut self, height: f32, offset: f32) {
        self.positions
            .insert(LEFT_HAND.to_owned(), Vec3::new(-0.2 - offset, height, 0.3));
        self.positions
            .insert(RIGHT_HAND.to_owned(), Vec3::new(0.2 + offset, height, 0.3));
        self.rotations.insert(LEFT_HAND.to_owned(), Quat::IDENTITY);
        self.rotations.insert(RIGHT_HAND.to_owned(), Quat::IDENTITY);
    }

    pub fn live_entities(&self) -> Vec<EntityId> {
        self.added
            .iter()
            .map(|(id, _)| id.clone())
            .filter(|id| !self.deleted.contains(id))
            .collect()
    }

    pub fn last_intensity_ui(&self) -> Option<f32> {
        self.ui.iter().rev().find_map(|event| match event {
            UiEvent::UpdateCurrentIntensity { current_intensity } => Some(*current_intensity),
            _ => None,
        })
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl KinematicsSource for FakeHost {
    fn joint_position(&self, joint: &str) -> Option<Vec3> {
        self.positions.get(joint).copied()
    }

    fn joint_rotation(&self, joint: &str) -> Option<Quat> {
        self.rotations.get(joint).copied()
    }
}

impl InputSource for FakeHost {
    fn subscribe_keys(&mut self) {
        assert!(!self.subscribed, "keys subscribed twice");
        self.subscribed = true;
    }

    fn unsubscribe_keys(&mut self) {
        self.subscribed = false;
    }

    fn hmd_active(&self) -> bool {
        self.hmd
    }
}

impl AudioSink for FakeHost {
    fn play_sound(&mut self, url: &str, options: &PlayOptions) -> Option<InjectorId> {
        let id = self.next_id();
        self.sounds.push((url.to_owned(), *options));
        if self.keep_playing {
            self.playing.insert(id);
        }
        Some(InjectorId(id))
    }

    fn is_playing(&self, injector: InjectorId) -> bool {
        self.playing.contains(&injector.0)
    }

    fn set_injector_options(&mut self, injector: InjectorId, _position: Vec3, volume: f32) {
        self.injector_updates.push((injector, volume));
    }

    fn stop_injector(&mut self, injector: InjectorId) {
        self.playing.remove(&injector.0);
        self.stopped.push(injector);
    }
}

impl AnimationSink for FakeHost {
    fn frame_count(&self, url: &str) -> Option<u32> {
        self.frame_counts.get(url).copied()
    }

    fn override_animation(
        &mut self,
        url: &str,
        fps: f32,
        looped: bool,
        first_frame: f32,
        last_frame: f32,
    ) {
        self.overrides.push(Override {
            url: url.to_owned(),
            fps,
            looped,
            first_frame,
            last_frame,
        });
    }

    fn restore_animation(&mut self) {
        self.restores += 1;
    }
}

impl EntitySink for FakeHost {
    fn add_entity(&mut self, entity: &NewEntity) -> Option<EntityId> {
        let id = EntityId(format!("{{entity-{}}}", self.next_id()));
        self.added.push((id.clone(), entity.clone()));
        Some(id)
    }

    fn edit_entity(&mut self, id: &EntityId, edit: &EntityEdit) {
        self.edits.push((id.clone(), edit.clone()));
    }

    fn delete_entity(&mut self, id: &EntityId) {
        self.deleted.push(id.clone());
    }
}

impl SettingsStore for FakeHost {
    fn get_value(&self, key: &str) -> Option<String> {
        self.settings.get_value(key)
    }

    fn set_value(&mut self, key: &str, value: String) {
        self.settings.set_value(key, value);
    }
}

impl UiSink for FakeHost {
    fn send_ui(&mut self, event: &UiEvent) {
        self.ui.push(event.clone());
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Controller over `host`, started at time zero.
pub fn started(host: FakeHost) -> AppreciateController<FakeHost> {
    let mut controller = AppreciateController::new(host, 7);
    controller.start(Duration::ZERO);
    controller
}
