//! Turns a worn entity into an attachable display copy.
//!
//! The entity is unlocked, stamped with attachment metadata and the remote
//! behaviour script, then re-locked once the host has had time to apply the
//! edit. Re-locks are tracked per entity in a timer table.

use crate::constants::{WEARABLE_RELOCK_DELAY, WEARABLE_SERVER_SCRIPT_URL};
use crate::error::{AppreciateError, Result};
use crate::host::{EntityEdit, EntityId, EntitySink};
use crate::scheduler::TimerTable;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttachmentOptions {
    pub translation: Translation,
    pub scale: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub action: String,
    pub joint: String,
    pub attached: bool,
    pub options: AttachmentOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrabbableKey {
    pub cloneable: bool,
    pub grabbable: bool,
}

/// The user-data blob the attachment server script reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WearableUserData {
    #[serde(rename = "Attachment")]
    pub attachment: Attachment,
    #[serde(rename = "grabbableKey")]
    pub grabbable_key: GrabbableKey,
    #[serde(rename = "marketplaceID")]
    pub marketplace_id: String,
}

impl WearableUserData {
    pub fn new(joint: &str, marketplace_id: &str) -> Self {
        Self {
            attachment: Attachment {
                action: "attach".to_owned(),
                joint: joint.to_owned(),
                attached: false,
                options: AttachmentOptions {
                    translation: Translation {
                        x: 0.0,
                        y: 0.0,
                        z: 0.0,
                    },
                    scale: 1.0,
                },
            },
            grabbable_key: GrabbableKey {
                cloneable: false,
                grabbable: true,
            },
            marketplace_id: marketplace_id.to_owned(),
        }
    }
}

/// A submission from the converter's web page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WearableSubmission {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "entityID", default)]
    pub entity_id: Option<EntityId>,
    #[serde(default)]
    pub joint: String,
    #[serde(rename = "marketplaceID", default)]
    pub marketplace_id: String,
}

#[derive(Clone, Debug)]
pub struct WearableConverter {
    server_script_url: String,
    relocks: TimerTable<EntityId>,
}

impl Default for WearableConverter {
    fn default() -> Self {
        Self::new(WEARABLE_SERVER_SCRIPT_URL)
    }
}

impl WearableConverter {
    pub fn new(server_script_url: &str) -> Self {
        Self {
            server_script_url: server_script_url.to_owned(),
            relocks: TimerTable::new(),
        }
    }

    pub fn pending_relocks(&self) -> usize {
        self.relocks.len()
    }

    /// Decode a web-page event and convert on `submit`. Other event types are ignored.
    pub fn handle_web_event<E: EntitySink>(
        &mut self,
        host: &mut E,
        now: Duration,
        raw: &str,
    ) -> Result<Option<EntityId>> {
        let submission: WearableSubmission =
            serde_json::from_str(raw).map_err(AppreciateError::Wearable)?;
        if submission.kind != "submit" {
            return Ok(None);
        }
        let Some(entity) = submission.entity_id else {
            log::warn!("[wearable] submit without an entity id");
            return Ok(None);
        };
        self.convert(host, now, &entity, &submission.joint, &submission.marketplace_id)?;
        Ok(Some(entity))
    }

    pub fn convert<E: EntitySink>(
        &mut self,
        host: &mut E,
        now: Duration,
        entity: &EntityId,
        joint: &str,
        marketplace_id: &str,
    ) -> Result<()> {
        let user_data = serde_json::to_string(&WearableUserData::new(joint, marketplace_id))
            .map_err(|source| AppreciateError::Encode {
                what: "wearable user data",
                source,
            })?;
        log::info!("[wearable] converting {entity} joint={joint} marketplace={marketplace_id}");
        host.edit_entity(entity, &EntityEdit::Locked(false));
        host.edit_entity(
            entity,
            &EntityEdit::UserData {
                user_data,
                server_scripts: self.server_script_url.clone(),
            },
        );
        self.relocks
            .arm_timeout(entity.clone(), now, WEARABLE_RELOCK_DELAY);
        Ok(())
    }

    /// Re-lock every entity whose delay has lapsed by `now`.
    pub fn advance_to<E: EntitySink>(&mut self, host: &mut E, now: Duration) {
        while let Some((entity, _)) = self.relocks.pop_due(now) {
            host.edit_entity(&entity, &EntityEdit::Locked(true));
            log::debug!("[wearable] re-locked {entity}");
        }
    }
}
