use crate::host::{
    halfway_between_hands, AudioSink, InjectorId, InputSource, KinematicsSource, PlayOptions,
};
use appreciate_core::{
    injector_volume, random_pitch, select_category, sound_bank_len, sound_url, Category,
};
use rand::Rng;

/// Single-injector sound channel. Replacing the injector always stops the
/// previous one first, so two never overlap.
#[derive(Clone, Debug, Default)]
pub struct SoundChannel {
    injector: Option<InjectorId>,
    category: Option<Category>,
    last_volume: f32,
    last_pitch: f32,
}

impl SoundChannel {
    pub fn injector(&self) -> Option<InjectorId> {
        self.injector
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn last_volume(&self) -> f32 {
        self.last_volume
    }

    pub fn last_pitch(&self) -> f32 {
        self.last_pitch
    }

    /// Pick a clip from the band's bank and play it. Returns the category
    /// that was played, or `None` when nothing applies or the trigger was
    /// suppressed.
    pub fn select_and_play<H, R>(
        &mut self,
        host: &mut H,
        rng: &mut R,
        intensity: f32,
        never_whistle: bool,
    ) -> Option<Category>
    where
        H: AudioSink + KinematicsSource + InputSource,
        R: Rng,
    {
        let category = select_category(intensity, never_whistle)?;
        self.category = Some(category);
        let index = rng.gen_range(0..sound_bank_len(category));
        let url = sound_url(category, index);
        self.play(host, rng, &url, category, intensity)
            .then_some(category)
    }

    fn play<H, R>(
        &mut self,
        host: &mut H,
        rng: &mut R,
        url: &str,
        category: Category,
        intensity: f32,
    ) -> bool
    where
        H: AudioSink + KinematicsSource + InputSource,
        R: Rng,
    {
        if let Some(id) = self.injector {
            // The VR sampler fires every 10 ms; let tails ring out there and for whistles.
            if host.is_playing(id) && (category == Category::Whistle || host.hmd_active()) {
                return false;
            }
            host.stop_injector(id);
            self.injector = None;
        }
        let options = PlayOptions {
            position: halfway_between_hands(host).unwrap_or_default(),
            volume: injector_volume(intensity, category),
            pitch: random_pitch(rng),
        };
        self.injector = host.play_sound(url, &options);
        self.last_volume = options.volume;
        self.last_pitch = options.pitch;
        match self.injector {
            Some(_) => log::debug!(
                "[sound] {} {url} vol={:.3} pitch={:.3}",
                category.name(),
                options.volume,
                options.pitch
            ),
            None => log::warn!("[sound] host refused to play {url}"),
        }
        self.injector.is_some()
    }

    /// Refresh position and volume of an injector that has finished playing.
    pub fn refresh<H>(&mut self, host: &mut H, intensity: f32)
    where
        H: AudioSink + KinematicsSource,
    {
        let (Some(id), Some(category)) = (self.injector, self.category) else {
            return;
        };
        if host.is_playing(id) {
            return;
        }
        let position = halfway_between_hands(host).unwrap_or_default();
        let volume = injector_volume(intensity, category);
        host.set_injector_options(id, position, volume);
        self.last_volume = volume;
    }

    pub fn stop<H: AudioSink>(&mut self, host: &mut H) {
        if let Some(id) = self.injector.take() {
            host.stop_injector(id);
        }
    }
}
