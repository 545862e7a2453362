//! Per-tick orchestration of sensors, locomotion, movement and camera.
//!
//! [`FpsController`] owns all state for one character and runs every stage in
//! a fixed order each tick:
//!
//! 1. ground check
//! 2. crouch intent and capsule height target
//! 3. locomotion state
//! 4. horizontal then vertical movement
//! 5. capsule height and eye height
//! 6. look
//! 7. tilt
//! 8. field of view
//! 9. head bob
//!
//! State classification must see this tick's ground status, movement must see
//! this tick's speed, and the eye height must be settled before tilt and bob
//! read it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::backend::PhysicsQuery;
use crate::camera::{
    CameraPose, reconcile_rest_height, update_fov, update_head_bob, update_look, update_tilt,
};
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::intent::{MovementIntent, TickInput};
use crate::locomotion::{classify, smooth_height};
use crate::mover::{integrate, resize_capsule};
use crate::sensors::{can_stand_up, check_ground};
use crate::state::{CameraOrientation, CharacterKinematics, LocomotionState, StandingClearanceMarker};

/// Everything that carries over between ticks.
///
/// Serializable, so a run can be snapshotted and replayed tick for tick.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub kinematics: CharacterKinematics,
    pub camera: CameraOrientation,
    pub locomotion: LocomotionState,
    pub crouching: bool,
}

/// Initial values read from the scene when a controller starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigSetup {
    /// Body yaw (radians).
    pub yaw: f32,
    /// Standing eye height relative to the character origin.
    pub camera_height: f32,
    /// Camera vertical FOV, `None` if the camera has no perspective projection.
    pub fov: Option<f32>,
}

impl Default for RigSetup {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            camera_height: 1.6,
            fov: None,
        }
    }
}

/// Observable outcome of one tick.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Movement state for the tick.
    pub state: LocomotionState,
    /// Horizontal speed used for the tick.
    pub speed: f32,
    /// Whether the character wanted the crouched capsule.
    pub crouching: bool,
    /// Ground status after the tick (false right after a jump).
    pub grounded: bool,
    /// Whether the character touched down this tick.
    pub landed: bool,
    /// Whether a jump started this tick.
    pub jumped: bool,
    /// Total displacement applied to the body.
    pub displacement: Vec3,
    /// Camera pose after the tick.
    pub pose: CameraPose,
}

/// First-person controller for one character.
///
/// The body is the entity carrying this component. The camera entity is
/// injected at construction, and the optional clearance marker enables the
/// stand-up obstruction check.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use msg_fps_controller::prelude::*;
///
/// fn spawn_player(mut commands: Commands) {
///     let camera = commands
///         .spawn((Camera3d::default(), Transform::from_xyz(0.0, 1.6, 0.0)))
///         .id();
///     commands
///         .spawn((
///             FpsController::new(camera).with_clearance_marker(1.1),
///             ControllerConfig::player(),
///         ))
///         .add_child(camera);
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
#[require(MovementIntent, ControllerConfig, Transform)]
pub struct FpsController {
    camera: Entity,
    clearance_marker: Option<StandingClearanceMarker>,
    state: ControllerState,
    last_report: TickReport,
    initialized: bool,
}

impl FpsController {
    /// Create a controller that drives the given camera entity.
    pub fn new(camera: Entity) -> Self {
        Self {
            camera,
            clearance_marker: None,
            state: ControllerState::default(),
            last_report: TickReport::default(),
            initialized: false,
        }
    }

    /// Enable the stand-up obstruction check with a marker `offset` above the
    /// character origin. The offset never changes afterwards.
    pub fn with_clearance_marker(mut self, offset: f32) -> Self {
        self.clearance_marker = Some(StandingClearanceMarker::new(offset));
        self
    }

    /// The camera entity this controller drives.
    pub fn camera(&self) -> Entity {
        self.camera
    }

    /// The clearance marker, if the obstruction check is enabled.
    pub fn clearance_marker(&self) -> Option<&StandingClearanceMarker> {
        self.clearance_marker.as_ref()
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Full state snapshot.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Current movement state.
    pub fn locomotion(&self) -> LocomotionState {
        self.state.locomotion
    }

    /// Vertical motion and capsule sizing.
    pub fn kinematics(&self) -> &CharacterKinematics {
        &self.state.kinematics
    }

    /// Smoothed camera orientation and effects.
    pub fn camera_orientation(&self) -> &CameraOrientation {
        &self.state.camera
    }

    /// Camera pose for the current state.
    pub fn pose(&self) -> CameraPose {
        CameraPose::from(&self.state.camera)
    }

    /// Report of the most recent tick.
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// Replace the state with a snapshot, e.g. to replay from a checkpoint.
    pub fn restore(&mut self, state: ControllerState) {
        self.state = state;
        self.initialized = true;
    }

    /// Capture the capsule and camera setup. Must succeed before the first tick.
    pub fn initialize<P: PhysicsQuery + ?Sized>(
        &mut self,
        character: Entity,
        physics: &P,
        rig: RigSetup,
        config: &ControllerConfig,
    ) -> Result<(), ControllerError> {
        let capsule = physics
            .capsule()
            .ok_or(ControllerError::MissingCollider(character))?;
        if !capsule.is_valid() {
            return Err(ControllerError::InvalidCapsule {
                radius: capsule.radius,
                height: capsule.height,
            });
        }

        self.state = ControllerState {
            kinematics: CharacterKinematics::new(capsule.radius, capsule.height),
            camera: CameraOrientation::new(rig.yaw, rig.camera_height, rig.fov),
            ..default()
        };
        self.last_report = TickReport {
            pose: self.pose(),
            ..default()
        };
        self.initialized = true;

        if rig.fov.is_none() && config.fov.enabled {
            warn!(?character, "camera has no perspective projection, FOV changes disabled");
        }
        info!(
            ?character,
            radius = capsule.radius,
            height = capsule.height,
            clearance_check = self.clearance_marker.is_some(),
            "first-person controller initialized"
        );
        Ok(())
    }

    /// Whether the character has room to stand. Mutates nothing.
    pub fn can_stand_up<P: PhysicsQuery + ?Sized>(&self, physics: &P, config: &ControllerConfig) -> bool {
        can_stand_up(physics, self.clearance_marker.as_ref(), &config.validated())
    }

    /// Run one tick. Ticks with a non-positive or non-finite `dt` are skipped.
    pub fn tick<P: PhysicsQuery + ?Sized>(
        &mut self,
        input: &TickInput,
        physics: &mut P,
        config: &ControllerConfig,
        dt: f32,
    ) -> TickReport {
        if !self.initialized || !(dt > 0.0 && dt.is_finite()) {
            return self.last_report;
        }

        let config = config.validated();
        let deadzone = config.movement.input_deadzone;
        let state = &mut self.state;

        let ground = check_ground(physics, &mut state.kinematics, &config);

        let run_intent = input.wants_to_run(deadzone);
        // Only query clearance when the key alone would stand the character up.
        let can_stand = input.crouch_held
            || can_stand_up(physics, self.clearance_marker.as_ref(), &config);

        let update = classify(
            ground.grounded,
            input.crouch_held,
            can_stand,
            run_intent,
            state.kinematics.original_height,
            &config,
        );
        if let Some(height) = update.target_height {
            state.kinematics.target_height = height;
        }
        if update.state != state.locomotion {
            debug!(from = ?state.locomotion, to = ?update.state, "locomotion state changed");
        }
        state.locomotion = update.state;
        state.crouching = update.crouching;

        let moved = integrate(
            physics,
            &mut state.kinematics,
            state.camera.current_yaw,
            input,
            update.target_speed,
            update.crouching,
            &config,
            dt,
        );

        let resized = if smooth_height(&mut state.kinematics, &config, dt) != 0.0 {
            resize_capsule(
                physics,
                state.kinematics.current_height,
                state.kinematics.is_grounded,
            )
        } else {
            0.0
        };
        reconcile_rest_height(&mut state.camera, &state.kinematics);

        update_look(&mut state.camera, input.look, &config.look, dt);
        update_tilt(
            &mut state.camera,
            input.movement.x,
            state.locomotion,
            &config.tilt,
            dt,
        );
        update_fov(&mut state.camera, run_intent, &config.fov, dt);
        if config.head_bob.enabled {
            update_head_bob(
                &mut state.camera,
                state.kinematics.is_grounded,
                input.is_moving(deadzone),
                state.locomotion,
                &config.head_bob,
                dt,
            );
        } else {
            state.camera.bob_phase = 0.0;
            state.camera.camera_offset = Vec3::Y * state.camera.rest_height;
        }

        self.last_report = TickReport {
            state: state.locomotion,
            speed: update.target_speed,
            crouching: update.crouching,
            grounded: state.kinematics.is_grounded,
            landed: ground.landed,
            jumped: moved.jumped,
            displacement: moved.displacement() + Vec3::Y * resized,
            pose: CameraPose::from(&state.camera),
        };
        self.last_report
    }
}
