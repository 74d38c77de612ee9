use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use appreciate::{
    AnimationSink, AppreciateController, AudioSink, EntityEdit, EntityId, EntitySink, InjectorId,
    InputSource, KeyEvent, KinematicsSource, NewEntity, PlayOptions, SettingsStore, UiEvent,
    UiSink, WearableConverter,
};
use appreciate_core::{CHEERING_ANIMATION_URL, CLAPPING_ANIMATION_URL, HEAD, LEFT_HAND, RIGHT_HAND};
use fnv::FnvHashMap;
use glam::{Quat, Vec3};
use instant::Instant;

// Simulated host timings
const SOUND_LENGTH: Duration = Duration::from_millis(450);
const KEY_REPEAT: Duration = Duration::from_millis(33);
const STEP: Duration = Duration::from_millis(5);
const TAIL: Duration = Duration::from_millis(3000);
const HANDS_UP_AFTER: Duration = Duration::from_millis(300);
const WAVE_HZ: f32 = 2.5;

struct Options {
    vr: bool,
    never_whistle: bool,
    hold: Duration,
    settings: Option<PathBuf>,
    wearable: Option<(String, String, String)>,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        vr: false,
        never_whistle: false,
        hold: Duration::from_millis(1500),
        settings: None,
        wearable: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--vr" => opts.vr = true,
            "--never-whistle" => opts.never_whistle = true,
            "--hold-ms" => {
                let ms: u64 = args
                    .next()
                    .context("--hold-ms needs a value")?
                    .parse()
                    .context("--hold-ms must be a whole number of milliseconds")?;
                opts.hold = Duration::from_millis(ms);
            }
            "--settings" => {
                opts.settings = Some(PathBuf::from(args.next().context("--settings needs a path")?))
            }
            "wearable" => {
                let (Some(entity), Some(joint), Some(marketplace)) =
                    (args.next(), args.next(), args.next())
                else {
                    bail!("usage: appreciate-native wearable <entity-id> <joint> <marketplace-id>");
                };
                opts.wearable = Some((entity, joint, marketplace));
            }
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(opts)
}

/// Settings backed by a JSON object on disk, rewritten on every change.
#[derive(Default)]
struct FileSettings {
    path: Option<PathBuf>,
    values: FnvHashMap<String, String>,
}

impl FileSettings {
    fn open(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let values = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing settings {}", path.display()))?
        } else {
            FnvHashMap::default()
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(path, raw).with_context(|| format!("writing settings {}", path.display()))
    }
}

/// Host stand-in that logs every effect and fakes hands, sounds and clips.
struct SimHost {
    now: Duration,
    hmd: bool,
    settings: FileSettings,
    next_id: u64,
    injectors: FnvHashMap<u64, Duration>,
    entities: FnvHashMap<String, NewEntity>,
}

impl SimHost {
    fn new(hmd: bool, settings: FileSettings) -> Self {
        Self {
            now: Duration::ZERO,
            hmd,
            settings,
            next_id: 1,
            injectors: FnvHashMap::default(),
            entities: FnvHashMap::default(),
        }
    }

    fn wave(&self) -> f32 {
        (self.now.as_secs_f32() * WAVE_HZ * std::f32::consts::TAU).sin()
    }

    fn hands_up(&self) -> bool {
        self.hmd && self.now >= HANDS_UP_AFTER
    }
}

impl KinematicsSource for SimHost {
    fn joint_position(&self, joint: &str) -> Option<Vec3> {
        let y = if self.hands_up() { 1.95 } else { 1.0 };
        let swing = 0.12 * self.wave();
        match joint {
            HEAD => Some(Vec3::new(0.0, 1.7, 0.0)),
            j if j.starts_with(LEFT_HAND) => Some(Vec3::new(-0.15 + swing, y, 0.3)),
            j if j.starts_with(RIGHT_HAND) => Some(Vec3::new(0.15 - swing, y, 0.3)),
            _ => None,
        }
    }

    fn joint_rotation(&self, joint: &str) -> Option<Quat> {
        let twist = 0.4 * self.wave();
        match joint {
            LEFT_HAND => Some(Quat::from_rotation_z(twist)),
            RIGHT_HAND => Some(Quat::from_rotation_z(-twist)),
            _ => None,
        }
    }
}

impl InputSource for SimHost {
    fn subscribe_keys(&mut self) {
        log::info!("[host] key events connected");
    }

    fn unsubscribe_keys(&mut self) {
        log::info!("[host] key events disconnected");
    }

    fn hmd_active(&self) -> bool {
        self.hmd
    }
}

impl AudioSink for SimHost {
    fn play_sound(&mut self, url: &str, options: &PlayOptions) -> Option<InjectorId> {
        let id = self.next_id;
        self.next_id += 1;
        self.injectors.insert(id, self.now + SOUND_LENGTH);
        log::info!(
            "[host] play {url} vol={:.2} pitch={:.2}",
            options.volume,
            options.pitch
        );
        Some(InjectorId(id))
    }

    fn is_playing(&self, injector: InjectorId) -> bool {
        self.injectors
            .get(&injector.0)
            .is_some_and(|end| self.now < *end)
    }

    fn set_injector_options(&mut self, injector: InjectorId, _position: Vec3, volume: f32) {
        log::trace!("[host] injector {} volume {volume:.2}", injector.0);
    }

    fn stop_injector(&mut self, injector: InjectorId) {
        self.injectors.remove(&injector.0);
    }
}

impl AnimationSink for SimHost {
    fn frame_count(&self, url: &str) -> Option<u32> {
        match url {
            CLAPPING_ANIMATION_URL => Some(60),
            CHEERING_ANIMATION_URL => Some(90),
            _ => None,
        }
    }

    fn override_animation(&mut self, url: &str, fps: f32, _looped: bool, first: f32, last: f32) {
        log::debug!("[host] animate {url} fps={fps:.1} frames {first:.1}..{last}");
    }

    fn restore_animation(&mut self) {
        log::info!("[host] animation restored");
    }
}

impl EntitySink for SimHost {
    fn add_entity(&mut self, entity: &NewEntity) -> Option<EntityId> {
        let id = format!("{{sim-{:04}}}", self.next_id);
        self.next_id += 1;
        self.entities.insert(id.clone(), entity.clone());
        log::info!("[host] add entity {id}");
        Some(EntityId(id))
    }

    fn edit_entity(&mut self, id: &EntityId, edit: &EntityEdit) {
        match edit {
            EntityEdit::Marker(props) => log::trace!(
                "[host] marker {id} size={:.3} colour=({:.0},{:.0},{:.0})",
                props.dimensions.x,
                props.color.red,
                props.color.green,
                props.color.blue
            ),
            other => log::info!("[host] edit {id}: {other:?}"),
        }
    }

    fn delete_entity(&mut self, id: &EntityId) {
        self.entities.remove(&id.0);
        log::info!("[host] delete entity {id}");
    }
}

impl SettingsStore for SimHost {
    fn get_value(&self, key: &str) -> Option<String> {
        self.settings.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: String) {
        self.settings.values.insert(key.to_owned(), value);
        if let Err(e) = self.settings.save() {
            log::error!("[host] {e:#}");
        }
    }
}

impl UiSink for SimHost {
    fn send_ui(&mut self, event: &UiEvent) {
        match event {
            UiEvent::UpdateCurrentIntensity { current_intensity } => {
                log::trace!("[ui] intensity {current_intensity:.3}")
            }
            other => match other.to_json() {
                Ok(json) => log::info!("[ui] -> {json}"),
                Err(e) => log::error!("[ui] {e}"),
            },
        }
    }
}

fn run_wearable(host: &mut SimHost, entity: String, joint: String, marketplace: String) -> Result<()> {
    let mut converter = WearableConverter::default();
    let submission = serde_json::json!({
        "type": "submit",
        "entityID": entity,
        "joint": joint,
        "marketplaceID": marketplace,
    })
    .to_string();
    let start = Instant::now();
    converter.handle_web_event(host, Duration::ZERO, &submission)?;
    while converter.pending_relocks() > 0 {
        thread::sleep(STEP * 10);
        converter.advance_to(host, start.elapsed());
    }
    Ok(())
}

fn run_appreciate(host: SimHost, opts: &Options) -> Result<()> {
    let mut controller = AppreciateController::new(host, 42);
    controller.start(Duration::ZERO);
    controller.handle_ui_message(
        Duration::ZERO,
        r#"{"method":"appreciateSwitchClicked","appreciateEnabled":true}"#,
    )?;
    controller.handle_ui_message(
        Duration::ZERO,
        &format!(
            r#"{{"method":"neverWhistleCheckboxClicked","neverWhistle":{}}}"#,
            opts.never_whistle
        ),
    )?;

    let start = Instant::now();
    let end = opts.hold + TAIL;
    let mut next_key = Duration::ZERO;
    let mut released = false;
    let mut peak = 0.0f32;
    loop {
        let now = start.elapsed();
        if now >= end {
            break;
        }
        controller.host_mut().now = now;
        if !opts.vr {
            if now < opts.hold && now >= next_key {
                let event = if next_key.is_zero() {
                    KeyEvent::plain("z")
                } else {
                    KeyEvent::repeat("z")
                };
                controller.handle_key_press(now, &event);
                next_key += KEY_REPEAT;
            } else if now >= opts.hold && !released {
                controller.handle_key_release(now, &KeyEvent::plain("z"));
                released = true;
            }
        }
        controller.advance_to(now);
        peak = peak.max(controller.intensity());
        thread::sleep(STEP);
    }
    log::info!(
        "[sim] done: peak intensity {peak:.3}, final {:.3}",
        controller.intensity()
    );
    controller.shutdown(start.elapsed());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = parse_args()?;
    let settings = FileSettings::open(opts.settings.as_deref())?;
    let mut host = SimHost::new(opts.vr, settings);

    if let Some((entity, joint, marketplace)) = opts.wearable.clone() {
        return run_wearable(&mut host, entity, joint, marketplace);
    }
    run_appreciate(host, &opts)
}
