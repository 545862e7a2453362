//! Detection result structures.
//!
//! These structures hold the results of physics queries (sweeps and overlaps)
//! used for ground detection and standing clearance checks.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Bitmask selecting which collision layers a query considers.
///
/// A hit is reported only when the collider's membership shares at least one
/// bit with the mask. An empty mask never hits anything.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryLayers(pub u32);

impl QueryLayers {
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Matches nothing.
    pub const NONE: Self = Self(0);

    /// Create a mask from a single layer index (0..32).
    pub const fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    /// Whether a collider with the given memberships passes this mask.
    #[inline]
    pub fn matches(self, memberships: u32) -> bool {
        self.0 & memberships != 0
    }

    /// Whether the mask selects no layers at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for QueryLayers {
    fn default() -> Self {
        Self::ALL
    }
}

/// Information about a sweep (shape cast) result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorCast {
    /// Whether the sweep hit something.
    pub hit: bool,
    /// Distance travelled before the hit (if hit).
    pub distance: f32,
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
}

impl SensorCast {
    /// Create an empty (no hit) result.
    pub fn miss() -> Self {
        Self::default()
    }

    /// Create a hit result.
    pub fn hit(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            hit: true,
            distance,
            normal,
            point,
            entity,
        }
    }
}

/// A collider found by an overlap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapHit {
    /// Entity owning the collider.
    pub entity: Option<Entity>,
    /// Lowest world-space Y of the collider's bounds.
    pub lower_bound: f32,
    /// Whether the collider is a trigger (sensor) volume.
    pub is_trigger: bool,
    /// Whether the collider is the character itself or one of its children.
    pub belongs_to_character: bool,
}

impl OverlapHit {
    /// A solid collider that is not part of the character.
    pub fn solid(entity: Option<Entity>, lower_bound: f32) -> Self {
        Self {
            entity,
            lower_bound,
            is_trigger: false,
            belongs_to_character: false,
        }
    }

    /// Whether this hit can block the character at all.
    #[inline]
    pub fn is_blocking_candidate(&self) -> bool {
        !self.is_trigger && !self.belongs_to_character
    }
}
