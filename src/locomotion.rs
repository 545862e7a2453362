//! Locomotion state machine and crouch height smoothing.

use crate::config::ControllerConfig;
use crate::math::smooth;
use crate::state::{CharacterKinematics, LocomotionState};

/// Outcome of one state classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionUpdate {
    /// Movement state for this tick.
    pub state: LocomotionState,
    /// Horizontal speed for this tick (units/second).
    pub target_speed: f32,
    /// Whether the character wants the crouched capsule.
    pub crouching: bool,
    /// New capsule target height, `None` while airborne (target unchanged).
    pub target_height: Option<f32>,
}

/// Classify the movement state.
///
/// Crouching is forced when there is no room to stand, whatever the key says.
/// First match wins:
/// 1. airborne → [`Jumping`](LocomotionState::Jumping), crouch sizing untouched;
/// 2. crouching → [`Crouching`](LocomotionState::Crouching) at crouch speed,
///    even if running was requested;
/// 3. otherwise running or walking.
pub fn classify(
    grounded: bool,
    crouch_held: bool,
    can_stand_up: bool,
    run_intent: bool,
    original_height: f32,
    config: &ControllerConfig,
) -> LocomotionUpdate {
    let movement = &config.movement;
    let crouching = crouch_held || !can_stand_up;
    let free_speed = if run_intent {
        movement.run_speed
    } else {
        movement.walk_speed
    };

    if !grounded {
        return LocomotionUpdate {
            state: LocomotionState::Jumping,
            target_speed: free_speed,
            crouching,
            target_height: None,
        };
    }

    let crouch_height = config.crouch.crouch_height.min(original_height);
    if crouching {
        LocomotionUpdate {
            state: LocomotionState::Crouching,
            target_speed: movement.crouch_speed(),
            crouching,
            target_height: Some(crouch_height),
        }
    } else {
        LocomotionUpdate {
            state: if run_intent {
                LocomotionState::Running
            } else {
                LocomotionState::Walking
            },
            target_speed: free_speed,
            crouching,
            target_height: Some(original_height),
        }
    }
}

/// Advance the capsule height toward its target.
///
/// Returns the height change applied this tick. The result always stays
/// within `[crouch_height, original_height]`.
pub fn smooth_height(kinematics: &mut CharacterKinematics, config: &ControllerConfig, dt: f32) -> f32 {
    let max = kinematics.original_height;
    let min = config.crouch.crouch_height.min(max);
    let target = kinematics.target_height.clamp(min, max);
    let previous = kinematics.current_height;

    kinematics.target_height = target;
    kinematics.current_height = smooth(previous, target, dt, config.crouch.rate()).clamp(min, max);
    kinematics.current_height - previous
}
