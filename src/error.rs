//! Controller setup errors.
//!
//! The tick itself never fails; these errors only surface when a controller
//! is initialized without a collaborator it cannot work without.

use bevy::prelude::*;
use thiserror::Error;

/// Reasons a controller cannot be initialized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    /// The body has no capsule collider the backend can read.
    #[error("character {0} has no capsule collider")]
    MissingCollider(Entity),

    /// The capsule exists but cannot be simulated.
    #[error("character capsule is invalid (radius {radius}, height {height})")]
    InvalidCapsule { radius: f32, height: f32 },

    /// The camera entity does not exist or has no transform.
    #[error("camera {camera} of character {character} is missing or has no Transform")]
    MissingCamera { character: Entity, camera: Entity },
}
