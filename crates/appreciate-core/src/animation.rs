//! Frame cursor for the avatar animation override.
//!
//! Changing the playback rate means restarting the clip from an explicit
//! frame, so the cursor is advanced by hand: elapsed real time at the rate
//! that was playing, modulo the clip length.

use crate::constants::INITIAL_ANIMATION_FPS;
use crate::intensity::Category;
use crate::mapping::animation_fps;
use std::time::Duration;

/// One override request: play `clip` looping at `fps`, starting at `start_frame`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playback {
    pub clip: Category,
    pub fps: f32,
    pub start_frame: f32,
    pub frame_count: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationCursor {
    clip: Option<Category>,
    fps: f32,
    frame: f32,
    last_timestamp: Option<Duration>,
}

impl Default for AnimationCursor {
    fn default() -> Self {
        Self {
            clip: None,
            fps: INITIAL_ANIMATION_FPS,
            frame: 0.0,
            last_timestamp: None,
        }
    }
}

impl AnimationCursor {
    pub fn clip(&self) -> Option<Category> {
        self.clip
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame(&self) -> f32 {
        self.frame
    }

    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last_timestamp
    }

    /// Advance the cursor, retune the rate for `intensity`, and describe the restart.
    pub fn restart(
        &mut self,
        clip: Category,
        intensity: f32,
        frame_count: u32,
        now: Duration,
    ) -> Playback {
        if self.clip != Some(clip) {
            self.clip = Some(clip);
            self.frame = 0.0;
            self.last_timestamp = None;
        }
        self.frame = match self.last_timestamp {
            Some(ts) if frame_count > 0 => {
                let elapsed = now.saturating_sub(ts).as_secs_f32();
                (self.frame + elapsed * self.fps) % frame_count as f32
            }
            _ => 0.0,
        };
        self.fps = animation_fps(intensity, clip);
        self.last_timestamp = Some(now);
        Playback {
            clip,
            fps: self.fps,
            start_frame: self.frame,
            frame_count,
        }
    }

    pub fn release(&mut self) {
        *self = Self::default();
    }
}
