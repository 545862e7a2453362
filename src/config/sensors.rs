//! Configuration for ground and clearance sensors.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::detection::QueryLayers;

/// Configuration for ground and clearance sensors.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Length of the downward ground sweep (units).
    pub ground_check_distance: f32,

    /// Layers considered walkable ground.
    pub ground_layers: QueryLayers,

    /// Radius of the standing clearance overlap (units).
    pub obstacle_check_radius: f32,

    /// Layers that can block standing up.
    pub obstacle_layers: QueryLayers,

    /// Required free space above the clearance marker (units).
    pub min_clearance: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ground_check_distance: 0.3,
            ground_layers: QueryLayers::ALL,
            obstacle_check_radius: 0.4,
            obstacle_layers: QueryLayers::ALL,
            min_clearance: 0.9,
        }
    }
}

impl SensorConfig {
    pub(crate) fn validated(self) -> Self {
        Self {
            ground_check_distance: self.ground_check_distance.max(0.0),
            obstacle_check_radius: self.obstacle_check_radius.max(0.0),
            min_clearance: self.min_clearance.max(0.0),
            ..self
        }
    }
}
