use crate::host::AnimationSink;
use appreciate_core::{animation_url, AnimationCursor, Category, Playback};
use std::time::Duration;

/// Avatar animation override driven by intensity.
#[derive(Clone, Debug, Default)]
pub struct AnimationChannel {
    cursor: AnimationCursor,
    overriding: bool,
}

impl AnimationChannel {
    pub fn cursor(&self) -> &AnimationCursor {
        &self.cursor
    }

    pub fn is_overriding(&self) -> bool {
        self.overriding
    }

    /// Both clips must have loaded before the desktop path may start.
    pub fn clips_loaded<H: AnimationSink + ?Sized>(host: &H) -> bool {
        host.frame_count(animation_url(Category::Clap)).is_some()
            && host.frame_count(animation_url(Category::Whistle)).is_some()
    }

    /// Restart `clip` from the cursor at the rate for `intensity`.
    pub fn play<H: AnimationSink>(
        &mut self,
        host: &mut H,
        clip: Category,
        intensity: f32,
        now: Duration,
    ) -> Option<Playback> {
        let url = animation_url(clip);
        let frame_count = host.frame_count(url)?;
        let playback = self.cursor.restart(clip, intensity, frame_count, now);
        host.override_animation(
            url,
            playback.fps,
            true,
            playback.start_frame,
            frame_count as f32,
        );
        self.overriding = true;
        log::trace!(
            "[anim] {} fps={:.1} frame={:.1}/{frame_count}",
            clip.name(),
            playback.fps,
            playback.start_frame
        );
        Some(playback)
    }

    pub fn release<H: AnimationSink>(&mut self, host: &mut H) {
        if self.overriding {
            host.restore_animation();
            self.overriding = false;
            log::debug!("[anim] override released");
        }
        self.cursor.release();
    }
}
