//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D (`avian3d`).
//! Enable with the `avian3d` feature.
//!
//! The character body is a kinematic capsule whose `Position`/`Transform`
//! sit at the capsule center. Queries go through Avian's
//! [`SpatialQueryPipeline`], so they see the world as of the last physics step.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::backend::{CapsuleDimensions, CharacterPhysicsBackend};
use crate::controller::FpsController;
use crate::detection::{OverlapHit, QueryLayers, SensorCast};

/// Gap kept between the capsule and whatever it collides with.
pub const SKIN_WIDTH: f32 = 0.01;

/// Avian3D physics backend for the first-person controller.
///
/// Ground sweeps and clearance overlaps use the spatial query pipeline.
/// Moves are collide-and-stop: the capsule is cast along the displacement
/// and stops [`SKIN_WIDTH`] short of the first hit. [`Sensor`] colliders are
/// triggers and never stop a sweep or a move.
pub struct Avian3dBackend;

impl CharacterPhysicsBackend for Avian3dBackend {
    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        let half_height = Self::body_origin_height(world, entity);
        body_center(world, entity) - Vec3::Y * half_height
    }

    fn body_origin_height(world: &World, entity: Entity) -> f32 {
        Self::get_capsule(world, entity)
            .map(|capsule| capsule.height * 0.5)
            .unwrap_or(0.0)
    }

    fn get_capsule(world: &World, entity: Entity) -> Option<CapsuleDimensions> {
        world.get::<Collider>(entity).and_then(capsule_dimensions)
    }

    fn set_capsule_height(world: &mut World, entity: Entity, height: f32) {
        let Some(capsule) = Self::get_capsule(world, entity) else {
            return;
        };
        let height = height.max(capsule.radius * 2.0);
        let Ok(mut body) = world.get_entity_mut(entity) else {
            return;
        };
        body.insert(Collider::capsule(capsule.radius, height - capsule.radius * 2.0));

        // Keep the feet in place while the center moves.
        translate(world, entity, Vec3::Y * (height - capsule.height) * 0.5);
    }

    fn sweep_down(
        world: &World,
        entity: Entity,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layers: QueryLayers,
    ) -> Option<SensorCast> {
        if layers.is_empty() {
            return None;
        }
        let pipeline = world.get_resource::<SpatialQueryPipeline>()?;
        let filter = SpatialQueryFilter::from_mask(LayerMask(layers.0))
            .with_excluded_entities(own_colliders(world, entity));

        pipeline
            .cast_shape_predicate(
                &Collider::sphere(radius),
                origin,
                Quat::IDENTITY,
                Dir3::NEG_Y,
                &ShapeCastConfig::from_max_distance(max_distance),
                &filter,
                &|hit| is_solid(world, hit),
            )
            .map(|hit| SensorCast::hit(hit.distance, hit.normal1, hit.point1, Some(hit.entity)))
    }

    fn overlap_sphere(
        world: &World,
        entity: Entity,
        center: Vec3,
        radius: f32,
        layers: QueryLayers,
    ) -> Vec<OverlapHit> {
        if layers.is_empty() {
            return Vec::new();
        }
        let Some(pipeline) = world.get_resource::<SpatialQueryPipeline>() else {
            return Vec::new();
        };
        let filter = SpatialQueryFilter::from_mask(LayerMask(layers.0));

        pipeline
            .shape_intersections(&Collider::sphere(radius), center, Quat::IDENTITY, &filter)
            .into_iter()
            .map(|hit| OverlapHit {
                entity: Some(hit),
                // Unknown bounds count as blocking.
                lower_bound: world
                    .get::<ColliderAabb>(hit)
                    .map(|aabb| aabb.min.y)
                    .unwrap_or(f32::NEG_INFINITY),
                is_trigger: world.get::<Sensor>(hit).is_some(),
                belongs_to_character: belongs_to(world, hit, entity),
            })
            .collect()
    }

    fn move_body(world: &mut World, entity: Entity, displacement: Vec3) -> Vec3 {
        let distance = displacement.length();
        let Ok(direction) = Dir3::new(displacement) else {
            return Vec3::ZERO;
        };

        let hit_distance = world.get::<Collider>(entity).and_then(|collider| {
            let pipeline = world.get_resource::<SpatialQueryPipeline>()?;
            let filter =
                SpatialQueryFilter::default().with_excluded_entities(own_colliders(world, entity));
            pipeline
                .cast_shape_predicate(
                    collider,
                    body_center(world, entity),
                    Quat::IDENTITY,
                    direction,
                    &ShapeCastConfig::from_max_distance(distance + SKIN_WIDTH),
                    &filter,
                    &|hit| is_solid(world, hit),
                )
                .map(|hit| hit.distance)
        });

        let applied = match hit_distance {
            Some(hit) => direction * (hit - SKIN_WIDTH).clamp(0.0, distance),
            None => displacement,
        };
        translate(world, entity, applied);
        applied
    }
}

/// Plugin that sets up Avian3D-specific systems for the controller.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, make_character_bodies_kinematic);
    }
}

/// Give new characters a kinematic rigid body unless they already have one.
pub fn make_character_bodies_kinematic(
    mut commands: Commands,
    q_new: Query<Entity, (Added<FpsController>, Without<RigidBody>)>,
) {
    for entity in &q_new {
        commands.entity(entity).insert(RigidBody::Kinematic);
    }
}

/// Read capsule dimensions from a collider, `None` for other shapes.
pub fn capsule_dimensions(collider: &Collider) -> Option<CapsuleDimensions> {
    let capsule = collider.shape_scaled().as_capsule()?;
    let segment = capsule.segment;
    let length = (segment.a.y - segment.b.y).abs();
    Some(CapsuleDimensions::new(capsule.radius, length + capsule.radius * 2.0))
}

/// Capsule center: Avian's `Position` first, then `Transform`.
fn body_center(world: &World, entity: Entity) -> Vec3 {
    world
        .get::<Position>(entity)
        .map(|p| p.0)
        .or_else(|| world.get::<Transform>(entity).map(|t| t.translation))
        .unwrap_or(Vec3::ZERO)
}

fn translate(world: &mut World, entity: Entity, offset: Vec3) {
    if offset == Vec3::ZERO {
        return;
    }
    if let Some(mut position) = world.get_mut::<Position>(entity) {
        position.0 += offset;
    }
    if let Some(mut transform) = world.get_mut::<Transform>(entity) {
        transform.translation += offset;
    }
}

/// Whether a collider stops sweeps and moves. Sensors are triggers.
fn is_solid(world: &World, collider: Entity) -> bool {
    world.get::<Sensor>(collider).is_none()
}

/// The body and its direct children.
fn own_colliders(world: &World, entity: Entity) -> Vec<Entity> {
    let mut entities = vec![entity];
    if let Some(children) = world.get::<Children>(entity) {
        entities.extend_from_slice(children);
    }
    entities
}

fn belongs_to(world: &World, collider: Entity, body: Entity) -> bool {
    collider == body
        || world
            .get::<ChildOf>(collider)
            .is_some_and(|child_of| child_of.parent() == body)
}
