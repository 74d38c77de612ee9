use crate::controller::{AppreciateController, TimerKind};
use crate::host::Host;
use appreciate_core::{
    hands_above_head, vr_debounce_delay, HandPose, HAND_POSITION_CHECK_INTERVAL,
    HAND_VELOCITY_CHECK_INTERVAL, HEAD, INTENSITY_MAX_STEP_VR, LEFT_HAND, RIGHT_HAND,
};

impl<H: Host> AppreciateController<H> {
    /// (Re)arm the coarse supervisor that admits the fine-grained sampler.
    pub(crate) fn setup_hand_position_check(&mut self) {
        if !self.settings.enabled || !self.host.hmd_active() {
            return;
        }
        self.clear_timer(TimerKind::HandPositionCheck);
        self.arm_interval(TimerKind::HandPositionCheck, HAND_POSITION_CHECK_INTERVAL);
    }

    pub(crate) fn hand_position_check(&mut self) {
        let above = match (
            self.host.joint_position(LEFT_HAND),
            self.host.joint_position(RIGHT_HAND),
            self.host.joint_position(HEAD),
        ) {
            (Some(left), Some(right), Some(head)) => hands_above_head(left, right, head),
            _ => false,
        };
        if above != self.hands_above_head {
            log::debug!("[hands] above head: {above}");
        }
        self.hands_above_head = above;

        if above {
            self.setup_hand_velocity_check();
        } else {
            self.clear_timer(TimerKind::HandVelocityCheck);
            self.fade_out_and_stop();
        }
    }

    fn setup_hand_velocity_check(&mut self) {
        if self.is_armed(TimerKind::HandVelocityCheck) || !self.host.hmd_active() {
            return;
        }
        self.sampler.reset();
        self.arm_interval(TimerKind::HandVelocityCheck, HAND_VELOCITY_CHECK_INTERVAL);
    }

    pub(crate) fn hand_velocity_check(&mut self) {
        if !self.hands_above_head {
            return;
        }
        let (Some(left), Some(right)) = (self.hand_pose(LEFT_HAND), self.hand_pose(RIGHT_HAND))
        else {
            return;
        };
        let target = self.sampler.sample(left, right).target_intensity();
        self.fade_intensity(target, INTENSITY_MAX_STEP_VR);

        if !self.is_armed(TimerKind::VrDebounce) {
            self.select_and_play_sound();
            self.arm_timeout(TimerKind::VrDebounce, vr_debounce_delay(target));
        }
        self.ensure_marker_ticker();
    }

    fn hand_pose(&self, joint: &str) -> Option<HandPose> {
        Some(HandPose {
            position: self.host.joint_position(joint)?,
            rotation: self.host.joint_rotation(joint)?,
        })
    }

    /// Tear down the VR path and silence it. Safe to call when nothing is running.
    pub(crate) fn stop_vr_sampling(&mut self) {
        self.clear_timer(TimerKind::HandPositionCheck);
        self.clear_timer(TimerKind::HandVelocityCheck);
        self.clear_timer(TimerKind::VrDebounce);
        self.hands_above_head = false;
        self.sound.stop(&mut self.host);
        self.intensity.reset();
        self.send_current_intensity();
    }
}
