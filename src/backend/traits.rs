//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the first-person controller. This allows swapping between
//! physics engines (Avian, Rapier, a custom kinematic world, ...).

use bevy::prelude::*;

use super::query::CapsuleDimensions;
use crate::detection::{OverlapHit, QueryLayers, SensorCast};

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the controller.
/// Every function receives the world and the character's body entity. The
/// controller calls these through [`BackendQuery`](super::BackendQuery), at
/// most one sweep and one overlap per tick.
///
/// The character origin is the bottom of the capsule (the feet).
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the character origin (bottom of the capsule) in world space.
    fn get_position(world: &World, entity: Entity) -> Vec3;

    /// Height of the body's `Transform` origin above the character origin.
    ///
    /// Camera offsets are measured from the feet. Engines that keep the body
    /// transform at the capsule center return the half height here.
    fn body_origin_height(_world: &World, _entity: Entity) -> f32 {
        0.0
    }

    /// Get the capsule dimensions of the character.
    ///
    /// Returns `None` if the entity has no usable capsule collider.
    fn get_capsule(world: &World, entity: Entity) -> Option<CapsuleDimensions>;

    /// Resize the capsule, keeping the origin (feet) in place.
    fn set_capsule_height(world: &mut World, entity: Entity, height: f32);

    /// Sweep a sphere straight down from `origin`.
    fn sweep_down(
        world: &World,
        entity: Entity,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layers: QueryLayers,
    ) -> Option<SensorCast>;

    /// Collect every collider overlapping a sphere.
    fn overlap_sphere(
        world: &World,
        entity: Entity,
        center: Vec3,
        radius: f32,
        layers: QueryLayers,
    ) -> Vec<OverlapHit>;

    /// Move the character by `displacement`, resolving collisions.
    ///
    /// Returns the displacement actually applied. Trigger volumes never
    /// block the move.
    fn move_body(world: &mut World, entity: Entity, displacement: Vec3) -> Vec3;

    /// The engine's own grounded flag, if it tracks one.
    ///
    /// Default implementation returns false (rely on the sweep alone).
    fn is_grounded_native(_world: &World, _entity: Entity) -> bool {
        false
    }
}
