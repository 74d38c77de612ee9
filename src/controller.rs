//! The Appreciate controller.
//!
//! One struct owns every piece of mutable state: the intensity, the three
//! presentation channels, and a timer table with one slot per activity.
//! The host drives it by advancing the clock and forwarding events; all
//! callbacks run on the caller's thread and none of them block.

use crate::animation::AnimationChannel;
use crate::audio::SoundChannel;
use crate::bridge::{UiEvent, UiRequest};
use crate::error::Result;
use crate::host::Host;
use crate::marker::MarkerChannel;
use crate::scheduler::TimerTable;
use crate::settings::AppreciateSettings;
use appreciate_core::{
    Intensity, KinematicSampler, Rgb, FADE_INTERVAL, FADE_OUT_STEP, INSTANT_STEP,
    UPDATE_MARKER_INTERVAL,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Every periodic or one-shot activity the controller can have armed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 200 ms supervisor: are both hands above the head?
    HandPositionCheck,
    /// 10 ms kinematic sampler, armed only while hands are up.
    HandVelocityCheck,
    /// One-shot spacing between VR sound triggers.
    VrDebounce,
    /// One-shot spacing between honoured key repeats.
    DesktopDebounce,
    /// 100 ms desktop decay ticker.
    SlowAppreciation,
    /// One-shot grace period after key release.
    StopAppreciating,
    /// 20 ms fast fade-out ticker.
    SoundFade,
    /// 65 ms marker refresh.
    MarkerUpdate,
}

pub struct AppreciateController<H: Host> {
    pub(crate) host: H,
    pub(crate) rng: StdRng,
    pub(crate) now: Duration,
    pub(crate) timers: TimerTable<TimerKind>,
    pub(crate) settings: AppreciateSettings,
    pub(crate) intensity: Intensity,
    pub(crate) sampler: KinematicSampler,
    pub(crate) hands_above_head: bool,
    pub(crate) keys_wired: bool,
    pub(crate) sound: SoundChannel,
    pub(crate) marker: MarkerChannel,
    pub(crate) animation: AnimationChannel,
}

impl<H: Host> AppreciateController<H> {
    /// Build a controller over `host`, reading persisted settings from it.
    pub fn new(host: H, seed: u64) -> Self {
        let settings = AppreciateSettings::load(&host);
        let intensity = Intensity::new(settings.never_whistle);
        Self {
            host,
            rng: StdRng::seed_from_u64(seed),
            now: Duration::ZERO,
            timers: TimerTable::new(),
            settings,
            intensity,
            sampler: KinematicSampler::default(),
            hands_above_head: false,
            keys_wired: false,
            sound: SoundChannel::default(),
            marker: MarkerChannel::default(),
            animation: AnimationChannel::default(),
        }
    }

    pub fn start(&mut self, now: Duration) {
        self.advance_to(now);
        log::info!(
            "[appreciate] starting enabled={} never_whistle={}",
            self.settings.enabled,
            self.settings.never_whistle
        );
        self.enable_or_disable();
    }

    // ---------------- Accessors ----------------

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn intensity(&self) -> f32 {
        self.intensity.value()
    }

    pub fn upper_bound(&self) -> f32 {
        self.intensity.upper_bound()
    }

    pub fn settings(&self) -> &AppreciateSettings {
        &self.settings
    }

    pub fn is_armed(&self, timer: TimerKind) -> bool {
        self.timers.is_armed(&timer)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn keys_wired(&self) -> bool {
        self.keys_wired
    }

    pub fn hands_above_head(&self) -> bool {
        self.hands_above_head
    }

    pub fn sound(&self) -> &SoundChannel {
        &self.sound
    }

    pub fn marker(&self) -> &MarkerChannel {
        &self.marker
    }

    pub fn animation(&self) -> &AnimationChannel {
        &self.animation
    }

    // ---------------- Clock ----------------

    /// Fire every timer due up to `now`, in due order, then settle the clock at `now`.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((timer, due)) = self.timers.pop_due(now) {
            self.now = self.now.max(due);
            self.fire(timer);
        }
        self.now = self.now.max(now);
    }

    fn fire(&mut self, timer: TimerKind) {
        match timer {
            TimerKind::HandPositionCheck => self.hand_position_check(),
            TimerKind::HandVelocityCheck => self.hand_velocity_check(),
            // Debounces only matter while armed.
            TimerKind::VrDebounce | TimerKind::DesktopDebounce => {}
            TimerKind::SlowAppreciation => self.slow_appreciation(),
            TimerKind::StopAppreciating => self.fade_out_and_stop(),
            TimerKind::SoundFade => self.fade_tick(),
            TimerKind::MarkerUpdate => self.update_marker(),
        }
    }

    pub(crate) fn arm_interval(&mut self, timer: TimerKind, period: Duration) {
        self.timers.arm_interval(timer, self.now, period);
    }

    pub(crate) fn arm_timeout(&mut self, timer: TimerKind, delay: Duration) {
        self.timers.arm_timeout(timer, self.now, delay);
    }

    pub(crate) fn clear_timer(&mut self, timer: TimerKind) -> bool {
        self.timers.clear(&timer)
    }

    // ---------------- Intensity fan-out ----------------

    /// Step the filter and tell everything that listens to intensity.
    pub(crate) fn fade_intensity(&mut self, target: f32, max_step: f32) -> f32 {
        let value = self.intensity.advance(target, max_step);
        self.send_current_intensity();
        self.sound.refresh(&mut self.host, value);
        value
    }

    pub(crate) fn send_current_intensity(&mut self) {
        let event = UiEvent::UpdateCurrentIntensity {
            current_intensity: self.intensity.value(),
        };
        self.host.send_ui(&event);
    }

    pub(crate) fn select_and_play_sound(&mut self) {
        self.sound.select_and_play(
            &mut self.host,
            &mut self.rng,
            self.intensity.value(),
            self.settings.never_whistle,
        );
    }

    pub(crate) fn ensure_marker_ticker(&mut self) {
        if !self.is_armed(TimerKind::MarkerUpdate) {
            self.arm_interval(TimerKind::MarkerUpdate, UPDATE_MARKER_INTERVAL);
        }
    }

    fn update_marker(&mut self) {
        let exists = self.marker.update(
            &mut self.host,
            &mut self.rng,
            self.intensity.value(),
            self.settings.entity_color,
        );
        if !exists {
            self.clear_timer(TimerKind::MarkerUpdate);
        }
    }

    // ---------------- Lifecycle ----------------

    /// Apply the enabled flag and HMD mode: wire or unwire input and the VR supervisor.
    pub(crate) fn enable_or_disable(&mut self) {
        let hmd = self.host.hmd_active();
        if self.settings.enabled {
            if hmd {
                self.setup_hand_position_check();
            } else if self.is_armed(TimerKind::HandPositionCheck) {
                self.stop_vr_sampling();
            }
            if !self.keys_wired && !hmd {
                self.host.subscribe_keys();
                self.keys_wired = true;
                log::debug!("[keys] subscribed");
            }
        } else {
            self.stop_vr_sampling();
            self.clear_timer(TimerKind::SoundFade);
            self.clear_timer(TimerKind::DesktopDebounce);
            self.stop_appreciating();
            self.unwire_keys();
        }
    }

    pub fn handle_hmd_mode_changed(&mut self, now: Duration) {
        self.advance_to(now);
        log::info!("[appreciate] HMD active={}", self.host.hmd_active());
        self.enable_or_disable();
    }

    pub fn set_enabled(&mut self, now: Duration, enabled: bool) {
        self.advance_to(now);
        self.settings.set_first_run(&mut self.host, false);
        self.settings.set_enabled(&mut self.host, enabled);
        self.enable_or_disable();
    }

    pub fn set_never_whistle(&mut self, now: Duration, never_whistle: bool) {
        self.advance_to(now);
        self.settings.set_never_whistle(&mut self.host, never_whistle);
        let before = self.intensity.value();
        self.intensity.set_never_whistle(never_whistle);
        if self.intensity.value() != before {
            self.send_current_intensity();
        }
    }

    pub fn set_entity_color(&mut self, now: Duration, color: Rgb) {
        self.advance_to(now);
        self.settings.set_entity_color(&mut self.host, color);
    }

    /// The app's UI was opened; show it where intensity is.
    pub fn ui_opened(&mut self) {
        self.send_current_intensity();
    }

    pub fn handle_ui_message(&mut self, now: Duration, raw: &str) -> Result<()> {
        let request = UiRequest::parse(raw).inspect_err(|e| log::warn!("[ui] {e}"))?;
        match request {
            UiRequest::EventBridgeReady => {
                self.advance_to(now);
                let event = UiEvent::UpdateUi {
                    appreciate_enabled: self.settings.enabled,
                    never_whistle_enabled: self.settings.never_whistle,
                    is_first_run: self.settings.first_run,
                    entity_color: self.settings.entity_color,
                };
                self.host.send_ui(&event);
            }
            UiRequest::AppreciateSwitchClicked { appreciate_enabled } => {
                self.set_enabled(now, appreciate_enabled)
            }
            UiRequest::NeverWhistleCheckboxClicked { never_whistle } => {
                self.set_never_whistle(now, never_whistle)
            }
            UiRequest::SetEntityColor { entity_color } => self.set_entity_color(now, entity_color),
        }
        Ok(())
    }

    /// Stop everything: timers, sound, animation override, key subscription, marker.
    pub fn shutdown(&mut self, now: Duration) {
        self.advance_to(now);
        self.timers.clear_all();
        self.sound.stop(&mut self.host);
        self.intensity.reset();
        self.stop_appreciating();
        self.unwire_keys();
        log::info!("[appreciate] shut down");
    }

    fn unwire_keys(&mut self) {
        if self.keys_wired {
            self.host.unsubscribe_keys();
            self.keys_wired = false;
            log::debug!("[keys] unsubscribed");
        }
    }

    // ---------------- Shared stop paths ----------------

    /// Start the fast fade toward zero, replacing any fade already running.
    pub(crate) fn fade_out_and_stop(&mut self) {
        self.clear_timer(TimerKind::SoundFade);
        self.arm_interval(TimerKind::SoundFade, FADE_INTERVAL);
    }

    fn fade_tick(&mut self) {
        let target = self.intensity.value() - FADE_OUT_STEP;
        if target <= 0.0 {
            self.sound.stop(&mut self.host);
            self.clear_timer(TimerKind::SoundFade);
        }
        self.fade_intensity(target, INSTANT_STEP);
    }

    /// Release the desktop activity: timers, marker and animation override.
    pub(crate) fn stop_appreciating(&mut self) {
        self.clear_timer(TimerKind::StopAppreciating);
        self.clear_timer(TimerKind::SlowAppreciation);
        self.clear_timer(TimerKind::MarkerUpdate);
        self.marker.destroy(&mut self.host);
        self.animation.release(&mut self.host);
    }
}
