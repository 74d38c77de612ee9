//! User settings persisted through the host's key/value store.
//!
//! Values are stored JSON-encoded so booleans and the colour survive a round
//! trip through a string-only store. A malformed stored value falls back to
//! its default and is logged.

use crate::constants::*;
use crate::error::{AppreciateError, Result};
use crate::host::SettingsStore;
use appreciate_core::Rgb;
use fnv::FnvHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq)]
pub struct AppreciateSettings {
    pub enabled: bool,
    pub never_whistle: bool,
    pub first_run: bool,
    pub entity_color: Rgb,
}

impl Default for AppreciateSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            never_whistle: false,
            first_run: true,
            entity_color: Rgb::default(),
        }
    }
}

impl AppreciateSettings {
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let fallback = Self::default();
        Self {
            enabled: read_or(store, SETTING_ENABLED, fallback.enabled),
            never_whistle: read_or(store, SETTING_NEVER_WHISTLE, fallback.never_whistle),
            first_run: read_or(store, SETTING_FIRST_RUN, fallback.first_run),
            entity_color: read_or(store, SETTING_ENTITY_COLOR, fallback.entity_color),
        }
    }

    pub fn set_enabled<S: SettingsStore + ?Sized>(&mut self, store: &mut S, enabled: bool) {
        self.enabled = enabled;
        write_setting(store, SETTING_ENABLED, &enabled);
    }

    pub fn set_never_whistle<S: SettingsStore + ?Sized>(&mut self, store: &mut S, never: bool) {
        self.never_whistle = never;
        write_setting(store, SETTING_NEVER_WHISTLE, &never);
    }

    pub fn set_first_run<S: SettingsStore + ?Sized>(&mut self, store: &mut S, first_run: bool) {
        self.first_run = first_run;
        write_setting(store, SETTING_FIRST_RUN, &first_run);
    }

    pub fn set_entity_color<S: SettingsStore + ?Sized>(&mut self, store: &mut S, color: Rgb) {
        self.entity_color = color;
        write_setting(store, SETTING_ENTITY_COLOR, &color);
    }
}

/// Read and decode one key. `Ok(None)` when the key was never written.
pub fn read_setting<T, S>(store: &S, key: &'static str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: SettingsStore + ?Sized,
{
    let Some(raw) = store.get_value(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| AppreciateError::Setting { key, source })
}

fn read_or<T, S>(store: &S, key: &'static str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: SettingsStore + ?Sized,
{
    match read_setting(store, key) {
        Ok(value) => value.unwrap_or(fallback),
        Err(e) => {
            log::warn!("[settings] ignoring {e}");
            fallback
        }
    }
}

fn write_setting<T, S>(store: &mut S, key: &'static str, value: &T)
where
    T: Serialize,
    S: SettingsStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(raw) => store.set_value(key, raw),
        Err(e) => log::error!("[settings] could not encode {key}: {e}"),
    }
}

/// In-process store, used when the host keeps nothing between sessions.
#[derive(Clone, Debug, Default)]
pub struct MemorySettings {
    values: FnvHashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn values(&self) -> &FnvHashMap<String, String> {
        &self.values
    }
}

impl SettingsStore for MemorySettings {
    fn get_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }
}
