//! Per-character physics collaborator.
//!
//! The controller core talks to physics only through [`PhysicsQuery`], which
//! is scoped to one character. [`BackendQuery`] adapts a world-level
//! [`CharacterPhysicsBackend`] to it for a single entity.

use std::marker::PhantomData;

use bevy::prelude::*;

use super::CharacterPhysicsBackend;
use crate::detection::{OverlapHit, QueryLayers, SensorCast};

/// Capsule size of a character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleDimensions {
    /// Radius of the capsule.
    pub radius: f32,
    /// Total height, caps included.
    pub height: f32,
}

impl CapsuleDimensions {
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }

    /// Whether the capsule can be simulated at all.
    pub fn is_valid(&self) -> bool {
        self.radius > 0.0 && self.height >= self.radius * 2.0 && self.height.is_finite()
    }
}

/// Physics services for one character.
pub trait PhysicsQuery {
    /// Character origin (bottom of the capsule) in world space.
    fn position(&self) -> Vec3;

    /// Capsule dimensions, `None` if the character has no capsule.
    fn capsule(&self) -> Option<CapsuleDimensions>;

    /// Sweep a sphere straight down.
    fn sweep_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layers: QueryLayers,
    ) -> Option<SensorCast>;

    /// Colliders overlapping a sphere.
    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: QueryLayers) -> Vec<OverlapHit>;

    /// Move the character, resolving collisions. Returns the displacement
    /// actually applied.
    fn move_body(&mut self, displacement: Vec3) -> Vec3;

    /// The collaborator's own grounded flag.
    fn is_grounded_native(&self) -> bool;

    /// Resize the capsule, ideally keeping the origin in place.
    fn set_capsule_height(&mut self, height: f32);
}

/// [`PhysicsQuery`] over a [`CharacterPhysicsBackend`] for one entity.
pub struct BackendQuery<'w, B: CharacterPhysicsBackend> {
    world: &'w mut World,
    entity: Entity,
    _marker: PhantomData<B>,
}

impl<'w, B: CharacterPhysicsBackend> BackendQuery<'w, B> {
    pub fn new(world: &'w mut World, entity: Entity) -> Self {
        Self {
            world,
            entity,
            _marker: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> PhysicsQuery for BackendQuery<'_, B> {
    fn position(&self) -> Vec3 {
        B::get_position(self.world, self.entity)
    }

    fn capsule(&self) -> Option<CapsuleDimensions> {
        B::get_capsule(self.world, self.entity)
    }

    fn sweep_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layers: QueryLayers,
    ) -> Option<SensorCast> {
        B::sweep_down(self.world, self.entity, origin, radius, max_distance, layers)
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: QueryLayers) -> Vec<OverlapHit> {
        B::overlap_sphere(self.world, self.entity, center, radius, layers)
    }

    fn move_body(&mut self, displacement: Vec3) -> Vec3 {
        B::move_body(self.world, self.entity, displacement)
    }

    fn is_grounded_native(&self) -> bool {
        B::is_grounded_native(self.world, self.entity)
    }

    fn set_capsule_height(&mut self, height: f32) {
        B::set_capsule_height(self.world, self.entity, height);
    }
}

/// Read-only [`PhysicsQuery`] view used for diagnostics.
///
/// Mutating calls are ignored, so it can be handed to code that only needs
/// queries (for example [`can_stand_up`](crate::sensors::can_stand_up)).
pub struct BackendView<'w, B: CharacterPhysicsBackend> {
    world: &'w World,
    entity: Entity,
    _marker: PhantomData<B>,
}

impl<'w, B: CharacterPhysicsBackend> BackendView<'w, B> {
    pub fn new(world: &'w World, entity: Entity) -> Self {
        Self {
            world,
            entity,
            _marker: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> PhysicsQuery for BackendView<'_, B> {
    fn position(&self) -> Vec3 {
        B::get_position(self.world, self.entity)
    }

    fn capsule(&self) -> Option<CapsuleDimensions> {
        B::get_capsule(self.world, self.entity)
    }

    fn sweep_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layers: QueryLayers,
    ) -> Option<SensorCast> {
        B::sweep_down(self.world, self.entity, origin, radius, max_distance, layers)
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: QueryLayers) -> Vec<OverlapHit> {
        B::overlap_sphere(self.world, self.entity, center, radius, layers)
    }

    fn move_body(&mut self, _displacement: Vec3) -> Vec3 {
        Vec3::ZERO
    }

    fn is_grounded_native(&self) -> bool {
        B::is_grounded_native(self.world, self.entity)
    }

    fn set_capsule_height(&mut self, _height: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capsule_validity() {
        assert!(CapsuleDimensions::new(0.5, 2.0).is_valid());
        assert!(CapsuleDimensions::new(0.5, 1.0).is_valid());
        assert!(!CapsuleDimensions::new(0.5, 0.8).is_valid());
        assert!(!CapsuleDimensions::new(0.0, 2.0).is_valid());
        assert!(!CapsuleDimensions::new(0.5, f32::INFINITY).is_valid());
    }
}
