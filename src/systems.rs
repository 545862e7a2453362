//! Bevy systems that drive [`FpsController`] components.
//!
//! Both systems are exclusive: the physics backend works on `&mut World`, and
//! each controller is ticked with its own [`BackendQuery`].

use bevy::prelude::*;

use crate::backend::{BackendQuery, BackendView, CharacterPhysicsBackend};
use crate::camera::CameraPose;
use crate::config::ControllerConfig;
use crate::controller::{FpsController, RigSetup};
use crate::error::ControllerError;
use crate::intent::MovementIntent;

/// Initialize every controller that has not been initialized yet.
///
/// Reads the body capsule through the backend, the camera's local height and
/// perspective FOV, and the body yaw. Every pending controller is tried; the
/// ones missing a required collaborator stay uninitialized, and the first
/// such error is returned once the rest are done.
pub fn initialize_controllers<B: CharacterPhysicsBackend>(world: &mut World) -> Result {
    let mut query = world.query::<(Entity, &FpsController)>();
    let pending: Vec<(Entity, Entity)> = query
        .iter(world)
        .filter(|(_, controller)| !controller.is_initialized())
        .map(|(entity, controller)| (entity, controller.camera()))
        .collect();

    let mut first_error = None;
    for (entity, camera) in pending {
        if let Err(error) = initialize_controller::<B>(world, entity, camera) {
            warn!(%error, "controller initialization failed");
            if first_error.is_none() {
                first_error = Some(error);
            }
        }
    }

    match first_error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn initialize_controller<B: CharacterPhysicsBackend>(
    world: &mut World,
    entity: Entity,
    camera: Entity,
) -> Result<(), ControllerError> {
    let camera_height = world
        .get::<Transform>(camera)
        .map(|transform| transform.translation.y + B::body_origin_height(world, entity))
        .ok_or(ControllerError::MissingCamera {
            character: entity,
            camera,
        })?;
    let fov = match world.get::<Projection>(camera) {
        Some(Projection::Perspective(perspective)) => Some(perspective.fov),
        _ => None,
    };
    let yaw = world
        .get::<Transform>(entity)
        .map(|transform| transform.rotation.to_euler(EulerRot::YXZ).0)
        .unwrap_or(0.0);
    let config = world
        .get::<ControllerConfig>(entity)
        .copied()
        .unwrap_or_default();

    let Some(mut controller) = world.get::<FpsController>(entity).cloned() else {
        return Ok(());
    };
    let rig = RigSetup {
        yaw,
        camera_height,
        fov,
    };
    controller.initialize(entity, &BackendView::<B>::new(world, entity), rig, &config)?;

    write_pose::<B>(world, entity, camera, &controller.pose());
    if let Some(mut slot) = world.get_mut::<FpsController>(entity) {
        *slot = controller;
    }
    Ok(())
}

/// Tick every initialized controller once.
///
/// `dt` comes from the [`Time`] of the running schedule, so in `FixedUpdate`
/// this is the fixed timestep.
pub fn tick_controllers<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = world
        .get_resource::<Time>()
        .map(|time| time.delta_secs())
        .unwrap_or(0.0);
    // Leave intents untouched so a skipped tick does not drop a jump press.
    if dt <= 0.0 {
        return;
    }

    let mut query = world.query::<(Entity, &FpsController)>();
    let entities: Vec<Entity> = query
        .iter(world)
        .filter(|(_, controller)| controller.is_initialized())
        .map(|(entity, _)| entity)
        .collect();

    for entity in entities {
        let Some(input) = world
            .get_mut::<MovementIntent>(entity)
            .map(|mut intent| intent.take_tick_input())
        else {
            continue;
        };
        let Some(mut controller) = world.get::<FpsController>(entity).cloned() else {
            continue;
        };
        let config = world
            .get::<ControllerConfig>(entity)
            .copied()
            .unwrap_or_default();

        let report = {
            let mut physics = BackendQuery::<B>::new(world, entity);
            controller.tick(&input, &mut physics, &config, dt)
        };

        write_pose::<B>(world, entity, controller.camera(), &report.pose);
        if let Some(mut slot) = world.get_mut::<FpsController>(entity) {
            *slot = controller;
        }
    }
}

/// Whether the character `entity` has room to stand, queried without
/// touching any state. `None` if the entity has no controller.
pub fn character_can_stand_up<B: CharacterPhysicsBackend>(
    world: &World,
    entity: Entity,
) -> Option<bool> {
    let controller = world.get::<FpsController>(entity)?;
    let config = world
        .get::<ControllerConfig>(entity)
        .copied()
        .unwrap_or_default();
    Some(controller.can_stand_up(&BackendView::<B>::new(world, entity), &config))
}

/// Apply a camera pose to the body and camera entities.
///
/// The camera is a child of the body, so its offset is shifted from the feet
/// to the body's transform origin.
fn write_pose<B: CharacterPhysicsBackend>(
    world: &mut World,
    body: Entity,
    camera: Entity,
    pose: &CameraPose,
) {
    let origin_height = B::body_origin_height(world, body);
    if let Some(mut transform) = world.get_mut::<Transform>(body) {
        transform.rotation = pose.body_rotation;
    }
    if let Some(mut transform) = world.get_mut::<Transform>(camera) {
        transform.translation = pose.camera_offset - Vec3::Y * origin_height;
        transform.rotation = pose.camera_rotation;
    }
    if let Some(fov) = pose.fov {
        if let Some(mut projection) = world.get_mut::<Projection>(camera) {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.fov = fov;
            }
        }
    }
}
