use bevy::prelude::*;

/// Plugin for backends whose queries need no extra systems or resources.
///
/// Kinematic worlds that answer sweeps from their own data (test worlds,
/// heightfield-only levels) can return this from
/// [`CharacterPhysicsBackend::plugin`](super::CharacterPhysicsBackend::plugin).
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
