//! First-person locomotion and camera controller for Bevy.
//!
//! A character is a capsule body carrying an [`FpsController`], a
//! [`ControllerConfig`] and a [`MovementIntent`]. Every tick the controller
//! reads a [`TickInput`](intent::TickInput) snapshot of the intent, checks the
//! ground and standing clearance through a physics backend, picks a
//! locomotion state, moves the body kinematically and updates the camera
//! (look, tilt, field of view, head bob).
//!
//! Physics is abstracted behind [`CharacterPhysicsBackend`]. The `avian3d`
//! feature provides an Avian 3D backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use msg_fps_controller::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(PhysicsPlugins::default())
//!     .add_plugins(FpsControllerPlugin::<Avian3dBackend>::default())
//!     .add_plugins(KeyboardMouseInputPlugin)
//!     .run();
//! ```

use std::marker::PhantomData;

use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::prelude::*;

pub mod backend;
pub mod camera;
pub mod config;
pub mod controller;
pub mod detection;
pub mod error;
pub mod input;
pub mod intent;
pub mod locomotion;
pub mod math;
pub mod mover;
pub mod sensors;
pub mod state;
pub mod systems;

#[cfg(test)]
mod test_support;

#[cfg(feature = "avian3d")]
pub use backend::avian;

use backend::CharacterPhysicsBackend;
use camera::CameraPose;
use config::ControllerConfig;
use controller::{ControllerState, FpsController, TickReport};
use detection::QueryLayers;
use intent::{MovementIntent, TickInput};
use state::{CameraOrientation, CharacterKinematics, LocomotionState, StandingClearanceMarker};

pub mod prelude {
    pub use crate::backend::{
        BackendQuery, BackendView, CharacterPhysicsBackend, NoOpBackendPlugin, PhysicsQuery,
    };
    pub use crate::camera::CameraPose;
    pub use crate::config::{
        ControllerConfig, CrouchConfig, FovConfig, HeadBobConfig, LookConfig, MovementConfig,
        SensorConfig, TiltConfig,
    };
    pub use crate::controller::{ControllerState, FpsController, RigSetup, TickReport};
    pub use crate::detection::QueryLayers;
    pub use crate::error::ControllerError;
    pub use crate::input::{InputBindings, KeyboardMouseInputPlugin, PlayerInput};
    pub use crate::intent::{MovementIntent, TickInput};
    pub use crate::state::LocomotionState;
    pub use crate::systems::character_can_stand_up;
    pub use crate::{FpsControllerPlugin, FpsControllerSet};

    #[cfg(feature = "avian3d")]
    pub use crate::backend::Avian3dBackend;
}

/// System sets for the controller, chained in this order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FpsControllerSet {
    /// Systems that write [`MovementIntent`] from AI or scripted input.
    Input,
    /// Controller initialization and ticking.
    Simulation,
    /// Systems that read the pose written back to the body and camera.
    Presentation,
}

/// Main plugin for the first-person controller.
///
/// Generic over the physics backend. Runs in `FixedUpdate` unless another
/// schedule is given with [`FpsControllerPlugin::new`].
pub struct FpsControllerPlugin<B: CharacterPhysicsBackend> {
    schedule: InternedScheduleLabel,
    _marker: PhantomData<B>,
}

impl<B: CharacterPhysicsBackend> Default for FpsControllerPlugin<B> {
    fn default() -> Self {
        Self::new(FixedUpdate)
    }
}

impl<B: CharacterPhysicsBackend> FpsControllerPlugin<B> {
    /// Run the controller in `schedule`. The tick uses that schedule's [`Time`].
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
            _marker: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> Plugin for FpsControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<FpsController>()
            .register_type::<ControllerConfig>()
            .register_type::<MovementIntent>()
            .register_type::<TickInput>()
            .register_type::<LocomotionState>()
            .register_type::<ControllerState>()
            .register_type::<CharacterKinematics>()
            .register_type::<CameraOrientation>()
            .register_type::<StandingClearanceMarker>()
            .register_type::<TickReport>()
            .register_type::<CameraPose>()
            .register_type::<QueryLayers>();

        app.add_plugins(B::plugin());

        app.configure_sets(
            self.schedule,
            (
                FpsControllerSet::Input,
                FpsControllerSet::Simulation,
                FpsControllerSet::Presentation,
            )
                .chain(),
        );

        app.add_systems(
            self.schedule,
            (
                systems::initialize_controllers::<B>,
                systems::tick_controllers::<B>,
            )
                .chain()
                .in_set(FpsControllerSet::Simulation),
        );
    }
}
