//! Ground detection.

use bevy::prelude::*;

use crate::backend::PhysicsQuery;
use crate::config::ControllerConfig;
use crate::state::CharacterKinematics;

/// Sweep sphere radius as a fraction of the capsule radius.
///
/// Slightly thinner than the capsule so walls touching the capsule's side do
/// not register as ground.
pub const GROUND_SWEEP_RADIUS_FACTOR: f32 = 0.8;

/// Result of a ground check.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundReport {
    /// Whether the character counts as grounded this tick.
    pub grounded: bool,
    /// Whether this tick is the first grounded tick after being airborne.
    pub landed: bool,
}

/// Classify the character as grounded or airborne.
///
/// Sweeps a sphere down from one capsule radius above the origin and ORs the
/// result with the collaborator's own grounded flag. When grounded while
/// moving down, the vertical velocity is pinned to
/// [`grounded_velocity`](crate::config::MovementConfig::grounded_velocity)
/// and the jump flag is cleared.
pub fn check_ground<P: PhysicsQuery + ?Sized>(
    physics: &P,
    kinematics: &mut CharacterKinematics,
    config: &ControllerConfig,
) -> GroundReport {
    let radius = kinematics.radius;
    let origin = physics.position() + Vec3::Y * radius;
    let cast = physics.sweep_down(
        origin,
        radius * GROUND_SWEEP_RADIUS_FACTOR,
        config.sensors.ground_check_distance,
        config.sensors.ground_layers,
    );

    let was_grounded = kinematics.is_grounded;
    let grounded = cast.is_some_and(|c| c.hit) || physics.is_grounded_native();

    if grounded && kinematics.vertical_velocity < 0.0 {
        kinematics.vertical_velocity = config.movement.grounded_velocity;
        kinematics.has_jumped = false;
    }
    kinematics.is_grounded = grounded;

    let landed = grounded && !was_grounded;
    if landed {
        debug!(distance = ?cast.map(|c| c.distance), "character landed");
    }

    GroundReport { grounded, landed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::QueryLayers;
    use crate::test_support::FlatWorld;

    fn kinematics() -> CharacterKinematics {
        CharacterKinematics::new(0.5, 2.0)
    }

    #[test]
    fn standing_on_floor_is_grounded() {
        let world = FlatWorld::standing();
        let mut k = kinematics();
        let report = check_ground(&world, &mut k, &ControllerConfig::default());

        assert!(report.grounded);
        assert!(k.is_grounded);
        assert_eq!(world.sweeps.get(), 1, "exactly one sweep per check");
    }

    #[test]
    fn high_above_floor_is_airborne() {
        let world = FlatWorld::hovering(2.0);
        let mut k = kinematics();
        k.is_grounded = true;
        let report = check_ground(&world, &mut k, &ControllerConfig::default());

        assert!(!report.grounded);
        assert!(!k.is_grounded);
        assert!(!report.landed);
    }

    #[test]
    fn native_flag_grounds_without_sweep_hit() {
        let mut world = FlatWorld::hovering(2.0);
        world.native_grounded = true;
        let mut k = kinematics();
        let report = check_ground(&world, &mut k, &ControllerConfig::default());
        assert!(report.grounded);
    }

    #[test]
    fn landing_pins_vertical_velocity_and_clears_jump() {
        let world = FlatWorld::standing();
        let mut k = kinematics();
        k.vertical_velocity = -30.0;
        k.has_jumped = true;

        let config = ControllerConfig::default();
        let report = check_ground(&world, &mut k, &config);

        assert!(report.landed);
        assert_eq!(k.vertical_velocity, config.movement.grounded_velocity);
        assert!(!k.has_jumped);
    }

    #[test]
    fn rising_velocity_is_left_alone_while_grounded() {
        let world = FlatWorld::standing();
        let mut k = kinematics();
        k.vertical_velocity = 7.0;
        k.has_jumped = true;
        check_ground(&world, &mut k, &ControllerConfig::default());

        assert_eq!(k.vertical_velocity, 7.0);
        assert!(k.has_jumped);
    }

    #[test]
    fn empty_ground_mask_yields_no_hits() {
        let world = FlatWorld::standing();
        let mut k = kinematics();
        let mut config = ControllerConfig::default();
        config.sensors.ground_layers = QueryLayers::NONE;

        let report = check_ground(&world, &mut k, &config);
        assert!(!report.grounded);
    }
}
