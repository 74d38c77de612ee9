// VR path: hand motion above the head drives intensity through the sampler.

mod common;

use appreciate::{AppreciateController, EntityEdit, NewEntity, TimerKind};
use appreciate_core::{HEAD, INTENSITY_MAX_STEP_VR, LEFT_HAND};
use common::{ms, started, FakeHost};

const HANDS_UP: f32 = 2.0;
const HANDS_DOWN: f32 = 1.0;
// 1.1 cm per 10 ms tick is the linear speed cap
const SWING: f32 = 0.011;

fn vr_controller() -> AppreciateController<FakeHost> {
    let mut host = FakeHost::vr().enabled();
    host.set_hands(HANDS_UP, 0.0);
    started(host)
}

/// Swing both hands in and out every 10 ms up to `until_ms`, recording intensity.
fn wave(controller: &mut AppreciateController<FakeHost>, from_ms: u64, until_ms: u64) -> Vec<f32> {
    let mut seen = Vec::new();
    let mut t = from_ms;
    while t <= until_ms {
        let offset = if (t / 10) % 2 == 0 { 0.0 } else { SWING };
        controller.host_mut().set_hands(HANDS_UP, offset);
        controller.advance_to(ms(t));
        seen.push(controller.intensity());
        t += 10;
    }
    seen
}

#[test]
fn vr_mode_does_not_subscribe_keys() {
    let controller = vr_controller();
    assert!(!controller.keys_wired());
    assert!(controller.is_armed(TimerKind::HandPositionCheck));
    assert!(!controller.is_armed(TimerKind::HandVelocityCheck));
}

#[test]
fn raised_hands_admit_the_sampler() {
    let mut controller = vr_controller();
    controller.advance_to(ms(200));
    assert!(controller.hands_above_head());
    assert!(controller.is_armed(TimerKind::HandVelocityCheck));
}

#[test]
fn lowered_hands_keep_the_sampler_off() {
    let mut host = FakeHost::vr().enabled();
    host.set_hands(HANDS_DOWN, 0.0);
    let mut controller = started(host);
    controller.advance_to(ms(1000));
    assert!(!controller.hands_above_head());
    assert!(!controller.is_armed(TimerKind::HandVelocityCheck));
    assert_eq!(controller.intensity(), 0.0);
    assert!(controller.host().sounds.is_empty());
}

#[test]
fn missing_head_counts_as_hands_down() {
    let mut host = FakeHost::vr().enabled();
    host.set_hands(HANDS_UP, 0.0);
    host.positions.remove(HEAD);
    let mut controller = started(host);
    controller.advance_to(ms(400));
    assert!(!controller.hands_above_head());
    assert!(!controller.is_armed(TimerKind::HandVelocityCheck));
}

#[test]
fn waving_rises_by_at_most_one_step_per_tick() {
    let mut controller = vr_controller();
    let seen = wave(&mut controller, 10, 500);
    for pair in seen.windows(2) {
        assert!(pair[1] - pair[0] <= INTENSITY_MAX_STEP_VR + 1e-6);
    }
    // First sampled tick at 210 ms reads as still; 29 rising ticks follow
    let v = controller.intensity();
    assert!((v - 29.0 * INTENSITY_MAX_STEP_VR).abs() < 1e-4, "{v}");
}

#[test]
fn sound_triggers_are_spaced_by_the_debounce() {
    let mut controller = vr_controller();
    wave(&mut controller, 10, 400);
    // The only trigger so far fired at zero intensity
    assert!(controller.host().sounds.is_empty());
    assert!(controller.is_armed(TimerKind::VrDebounce));

    wave(&mut controller, 410, 1000);
    let count = controller.host().sounds.len();
    // 74 ms spacing for a 0.7 target, snapped to the 10 ms sampler
    assert!((6..=9).contains(&count), "{count} triggers");
    assert!(controller
        .host()
        .sounds
        .iter()
        .all(|(url, _)| url.starts_with("sounds/claps/")));
}

#[test]
fn marker_tracks_intensity_between_the_hands() {
    let mut controller = vr_controller();
    wave(&mut controller, 10, 600);
    assert!(controller.marker().exists());

    let host = controller.host();
    let NewEntity::Marker(created) = &host.added[0].1 else {
        panic!("marker must be created first");
    };
    assert!((created.position.y - HANDS_UP).abs() < 1e-6);
    assert!(created.dimensions.x > 0.0);

    let last = host
        .edits
        .iter()
        .rev()
        .find_map(|(_, edit)| match edit {
            EntityEdit::Marker(props) => Some(*props),
            _ => None,
        })
        .expect("marker refreshed");
    assert!(last.dimensions.x > created.dimensions.x);
    assert!(last.angular_velocity.length() >= created.angular_velocity.length());
}

#[test]
fn lowering_hands_fades_to_zero() {
    let mut controller = vr_controller();
    wave(&mut controller, 10, 1000);
    assert!(controller.intensity() > 0.2);

    controller.host_mut().set_hands(HANDS_DOWN, 0.0);
    controller.advance_to(ms(1600));
    assert!(!controller.hands_above_head());
    assert!(!controller.is_armed(TimerKind::HandVelocityCheck));
    assert_eq!(controller.intensity(), 0.0);
    assert!(controller.sound().injector().is_none());
    assert!(!controller.marker().exists());
    // The supervisor keeps watching
    assert!(controller.is_armed(TimerKind::HandPositionCheck));
}

#[test]
fn sampler_needs_both_hand_rotations() {
    let mut host = FakeHost::vr().enabled();
    host.set_hands(HANDS_UP, 0.0);
    let mut controller = started(host);
    controller.advance_to(ms(200));
    controller.host_mut().rotations.remove(LEFT_HAND);

    let mut t = 210;
    while t <= 500 {
        let offset = if (t / 10) % 2 == 0 { 0.0 } else { SWING };
        controller.host_mut().positions.insert(
            LEFT_HAND.to_owned(),
            glam::Vec3::new(-0.2 - offset, HANDS_UP, 0.3),
        );
        controller.advance_to(ms(t));
        t += 10;
    }
    assert_eq!(controller.intensity(), 0.0);
}

#[test]
fn degenerate_hand_rotations_do_not_raise_intensity() {
    let mut host = FakeHost::vr().enabled();
    host.set_hands(HANDS_UP, 0.0);
    let zero = glam::Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
    host.rotations.insert(LEFT_HAND.to_owned(), zero);
    host.rotations.insert(appreciate_core::RIGHT_HAND.to_owned(), zero);
    let mut controller = started(host);
    controller.advance_to(ms(400));
    assert!(controller.is_armed(TimerKind::HandVelocityCheck));
    assert_eq!(controller.intensity(), 0.0);
    assert!(controller.host().sounds.is_empty());
}

#[test]
fn leaving_hmd_stops_sampling_and_wires_keys() {
    let mut controller = vr_controller();
    wave(&mut controller, 10, 600);
    assert!(controller.intensity() > 0.0);

    controller.host_mut().hmd = false;
    controller.handle_hmd_mode_changed(ms(600));
    assert_eq!(controller.intensity(), 0.0);
    assert_eq!(controller.host().last_intensity_ui(), Some(0.0));
    assert!(!controller.is_armed(TimerKind::HandPositionCheck));
    assert!(!controller.is_armed(TimerKind::HandVelocityCheck));
    assert!(!controller.is_armed(TimerKind::VrDebounce));
    assert!(controller.keys_wired());
}
