use crate::animation::AnimationChannel;
use crate::constants::APPRECIATE_KEY;
use crate::controller::{AppreciateController, TimerKind};
use crate::host::{Host, KeyEvent};
use appreciate_core::{
    select_category, DESKTOP_DEBOUNCE, INSTANT_STEP, SLOW_APPRECIATION_INTERVAL,
    STOP_APPRECIATING_GRACE, VOLUME_STEP_DOWN_DESKTOP, VOLUME_STEP_UP_DESKTOP,
};
use std::time::Duration;

#[inline]
pub fn is_appreciate_key(text: &str) -> bool {
    text.eq_ignore_ascii_case(APPRECIATE_KEY)
}

impl<H: Host> AppreciateController<H> {
    /// Key-down from the host. Only an unmodified `Z` in desktop mode counts;
    /// auto-repeats are honoured at most once per debounce window.
    pub fn handle_key_press(&mut self, now: Duration, event: &KeyEvent) {
        self.advance_to(now);
        if !self.keys_wired
            || !is_appreciate_key(&event.text)
            || event.has_modifiers()
            || self.host.hmd_active()
        {
            return;
        }
        if event.is_auto_repeat {
            if self.is_armed(TimerKind::DesktopDebounce) {
                return;
            }
            self.key_pressed();
            self.arm_timeout(TimerKind::DesktopDebounce, DESKTOP_DEBOUNCE);
        } else {
            self.key_pressed();
        }
    }

    /// Key-up from the host. Schedules the fade once the grace period lapses.
    pub fn handle_key_release(&mut self, now: Duration, event: &KeyEvent) {
        self.advance_to(now);
        if !self.keys_wired || !is_appreciate_key(&event.text) || event.is_auto_repeat {
            return;
        }
        self.stop_appreciating_soon();
    }

    fn key_pressed(&mut self) {
        if !AnimationChannel::clips_loaded(&self.host) {
            log::debug!("[keys] animations not loaded yet; ignoring");
            return;
        }
        self.clear_timer(TimerKind::SoundFade);
        self.clear_timer(TimerKind::StopAppreciating);

        let stepped = self.intensity.value() + VOLUME_STEP_UP_DESKTOP;
        self.fade_intensity(stepped, INSTANT_STEP);
        self.select_and_play_sound();

        if !self.play_selected_animation() {
            return;
        }
        if !self.is_armed(TimerKind::SlowAppreciation) {
            self.arm_interval(TimerKind::SlowAppreciation, SLOW_APPRECIATION_INTERVAL);
        }
        self.ensure_marker_ticker();
    }

    /// Decay ticker: bleed intensity and keep the animation rate in step.
    pub(crate) fn slow_appreciation(&mut self) {
        let lowered = self.intensity.value() - VOLUME_STEP_DOWN_DESKTOP;
        self.fade_intensity(lowered, INSTANT_STEP);
        self.play_selected_animation();
    }

    /// Restart the animation for the current band, or stop appreciating when
    /// no band applies. Returns whether an animation is playing.
    fn play_selected_animation(&mut self) -> bool {
        let value = self.intensity.value();
        let Some(clip) = select_category(value, self.settings.never_whistle) else {
            self.stop_appreciating();
            return false;
        };
        let now = self.now;
        if self
            .animation
            .play(&mut self.host, clip, value, now)
            .is_none()
        {
            log::warn!("[anim] {} clip unavailable", clip.name());
        }
        true
    }

    fn stop_appreciating_soon(&mut self) {
        self.clear_timer(TimerKind::StopAppreciating);
        if self.intensity.is_active() {
            self.arm_timeout(TimerKind::StopAppreciating, STOP_APPRECIATING_GRACE);
        }
    }
}
