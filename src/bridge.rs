//! Messages exchanged with the app's HTML front-end.
//!
//! Both directions are JSON objects tagged by a `method` field.

use crate::error::{AppreciateError, Result};
use appreciate_core::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "method")]
pub enum UiRequest {
    #[serde(rename = "eventBridgeReady")]
    EventBridgeReady,
    #[serde(rename = "appreciateSwitchClicked")]
    AppreciateSwitchClicked {
        #[serde(rename = "appreciateEnabled")]
        appreciate_enabled: bool,
    },
    #[serde(rename = "neverWhistleCheckboxClicked")]
    NeverWhistleCheckboxClicked {
        #[serde(rename = "neverWhistle")]
        never_whistle: bool,
    },
    #[serde(rename = "setEntityColor")]
    SetEntityColor {
        #[serde(rename = "entityColor")]
        entity_color: Rgb,
    },
}

impl UiRequest {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(AppreciateError::Bridge)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "method")]
pub enum UiEvent {
    #[serde(rename = "updateUI")]
    UpdateUi {
        #[serde(rename = "appreciateEnabled")]
        appreciate_enabled: bool,
        #[serde(rename = "neverWhistleEnabled")]
        never_whistle_enabled: bool,
        #[serde(rename = "isFirstRun")]
        is_first_run: bool,
        #[serde(rename = "entityColor")]
        entity_color: Rgb,
    },
    #[serde(rename = "updateCurrentIntensityUI")]
    UpdateCurrentIntensity {
        #[serde(rename = "currentIntensity")]
        current_intensity: f32,
    },
}

impl UiEvent {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|source| AppreciateError::Encode {
            what: "UI event",
            source,
        })
    }
}
