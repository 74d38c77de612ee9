//! Floating marker between the avatar's hands.
//!
//! The marker and its child material are created together on the first
//! positive-intensity update and deleted together once intensity is zero.

use crate::host::{
    halfway_between_hands, EntityEdit, EntityId, EntitySink, KinematicsSource, MarkerProperties,
    NewEntity,
};
use appreciate_core::{
    marker_angular_velocity, marker_color, marker_dimensions, random_spin_seed, Rgb,
};
use glam::Vec3;
use rand::Rng;
use serde_json::json;

#[derive(Clone, Debug, Default)]
pub struct MarkerChannel {
    entity: Option<EntityId>,
    material: Option<EntityId>,
    spin_seed: Vec3,
}

impl MarkerChannel {
    pub fn exists(&self) -> bool {
        self.entity.is_some()
    }

    pub fn entity(&self) -> Option<&EntityId> {
        self.entity.as_ref()
    }

    pub fn material(&self) -> Option<&EntityId> {
        self.material.as_ref()
    }

    pub fn spin_seed(&self) -> Vec3 {
        self.spin_seed
    }

    /// Bring the marker in line with `intensity`. Returns whether it exists afterwards.
    pub fn update<H, R>(&mut self, host: &mut H, rng: &mut R, intensity: f32, max_color: Rgb) -> bool
    where
        H: EntitySink + KinematicsSource,
        R: Rng,
    {
        if intensity <= 0.0 {
            self.destroy(host);
            return false;
        }
        if self.entity.is_none() {
            self.spin_seed = random_spin_seed(rng);
        }
        let color = marker_color(intensity, max_color);
        let props = MarkerProperties {
            position: halfway_between_hands(host).unwrap_or_default(),
            dimensions: marker_dimensions(intensity),
            angular_velocity: marker_angular_velocity(self.spin_seed, intensity),
            color,
        };
        match &self.entity {
            Some(id) => {
                if let Some(material) = &self.material {
                    host.edit_entity(material, &EntityEdit::MaterialData(material_data(color)));
                }
                host.edit_entity(id, &EntityEdit::Marker(props));
            }
            None => {
                let Some(id) = host.add_entity(&NewEntity::Marker(props)) else {
                    log::warn!("[marker] host refused to create the marker");
                    return false;
                };
                self.material = host.add_entity(&NewEntity::Material {
                    parent: id.clone(),
                    material_data: material_data(color),
                });
                log::debug!("[marker] created {id} spin seed {:?}", self.spin_seed);
                self.entity = Some(id);
            }
        }
        true
    }

    pub fn destroy<H: EntitySink>(&mut self, host: &mut H) {
        if let Some(material) = self.material.take() {
            host.delete_entity(&material);
        }
        if let Some(id) = self.entity.take() {
            host.delete_entity(&id);
            log::debug!("[marker] deleted {id}");
        }
    }
}

/// Material payload for the marker's child material entity.
pub fn material_data(color: Rgb) -> String {
    json!({
        "materialVersion": 1,
        "materials": [{ "roughness": 0.0, "albedo": color.albedo() }],
    })
    .to_string()
}
