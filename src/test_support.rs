//! In-crate physics stand-in for unit tests.

use std::cell::Cell;

use bevy::prelude::*;

use crate::backend::{CapsuleDimensions, PhysicsQuery};
use crate::detection::{OverlapHit, QueryLayers, SensorCast};

/// Axis-aligned box in the test world.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TestBox {
    pub min: Vec3,
    pub max: Vec3,
    pub is_trigger: bool,
    pub belongs_to_character: bool,
}

impl TestBox {
    pub fn solid(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            is_trigger: false,
            belongs_to_character: false,
        }
    }

    fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }
}

/// Infinite flat floor plus optional boxes. Boxes only matter for overlaps.
#[derive(Debug)]
pub(crate) struct FlatWorld {
    pub position: Vec3,
    pub ground_y: Option<f32>,
    pub capsule: Option<CapsuleDimensions>,
    pub boxes: Vec<TestBox>,
    pub native_grounded: bool,
    /// Resize about the capsule center instead of keeping the feet in place.
    pub center_anchored_resize: bool,
    pub moves: Vec<Vec3>,
    pub sweeps: Cell<usize>,
    pub overlaps: Cell<usize>,
}

impl FlatWorld {
    /// Character standing on a floor at y = 0.
    pub fn standing() -> Self {
        Self {
            position: Vec3::ZERO,
            ground_y: Some(0.0),
            capsule: Some(CapsuleDimensions::new(0.5, 2.0)),
            boxes: Vec::new(),
            native_grounded: false,
            center_anchored_resize: false,
            moves: Vec::new(),
            sweeps: Cell::new(0),
            overlaps: Cell::new(0),
        }
    }

    /// Character hovering `height` above the floor.
    pub fn hovering(height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, height, 0.0),
            ..Self::standing()
        }
    }

    /// Add a solid slab whose underside is at `bottom`, centered over the origin.
    pub fn with_ceiling(mut self, bottom: f32) -> Self {
        self.boxes.push(TestBox::solid(
            Vec3::new(-5.0, bottom, -5.0),
            Vec3::new(5.0, bottom + 1.0, 5.0),
        ));
        self
    }
}

impl PhysicsQuery for FlatWorld {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn capsule(&self) -> Option<CapsuleDimensions> {
        self.capsule
    }

    fn sweep_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layers: QueryLayers,
    ) -> Option<SensorCast> {
        self.sweeps.set(self.sweeps.get() + 1);
        if layers.is_empty() {
            return None;
        }
        let ground_y = self.ground_y?;
        let distance = (origin.y - radius - ground_y).max(0.0);
        (distance <= max_distance).then(|| {
            SensorCast::hit(
                distance,
                Vec3::Y,
                Vec3::new(origin.x, ground_y, origin.z),
                None,
            )
        })
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, layers: QueryLayers) -> Vec<OverlapHit> {
        self.overlaps.set(self.overlaps.get() + 1);
        if layers.is_empty() {
            return Vec::new();
        }
        self.boxes
            .iter()
            .filter(|b| b.intersects_sphere(center, radius))
            .map(|b| OverlapHit {
                entity: None,
                lower_bound: b.min.y,
                is_trigger: b.is_trigger,
                belongs_to_character: b.belongs_to_character,
            })
            .collect()
    }

    fn move_body(&mut self, displacement: Vec3) -> Vec3 {
        self.moves.push(displacement);
        let mut target = self.position + displacement;
        if let Some(ground_y) = self.ground_y {
            target.y = target.y.max(ground_y);
        }
        let applied = target - self.position;
        self.position = target;
        applied
    }

    fn is_grounded_native(&self) -> bool {
        self.native_grounded
    }

    fn set_capsule_height(&mut self, height: f32) {
        if let Some(capsule) = self.capsule.as_mut() {
            if self.center_anchored_resize {
                self.position.y -= (height - capsule.height) * 0.5;
            }
            capsule.height = height;
        }
    }
}
