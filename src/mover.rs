//! Kinematic movement integration.

use bevy::prelude::*;

use crate::backend::PhysicsQuery;
use crate::config::ControllerConfig;
use crate::intent::TickInput;
use crate::state::CharacterKinematics;

/// What the mover did this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveReport {
    /// Horizontal displacement after collision resolution.
    pub horizontal: Vec3,
    /// Vertical displacement after collision resolution.
    pub vertical: Vec3,
    /// Whether a jump started this tick.
    pub jumped: bool,
}

impl MoveReport {
    /// Total displacement applied this tick.
    pub fn displacement(&self) -> Vec3 {
        self.horizontal + self.vertical
    }
}

/// Horizontal movement direction for the given yaw and input axes.
///
/// Diagonal input is clamped to unit length so it is never faster than
/// straight input.
pub fn horizontal_direction(yaw: f32, movement: Vec2) -> Vec3 {
    let rotation = Quat::from_rotation_y(yaw);
    let forward = rotation * Vec3::NEG_Z;
    let right = rotation * Vec3::X;
    (right * movement.x + forward * movement.y).clamp_length_max(1.0)
}

/// Integrate one tick of movement and apply it through the physics collaborator.
///
/// A jump starts only when requested while grounded and not crouching; the
/// character is marked airborne immediately. The horizontal and vertical parts
/// are applied as two separate moves, horizontal first.
#[allow(clippy::too_many_arguments)]
pub fn integrate<P: PhysicsQuery + ?Sized>(
    physics: &mut P,
    kinematics: &mut CharacterKinematics,
    yaw: f32,
    input: &TickInput,
    speed: f32,
    crouching: bool,
    config: &ControllerConfig,
    dt: f32,
) -> MoveReport {
    let movement = &config.movement;

    let jumped = input.jump_pressed && kinematics.is_grounded && !crouching;
    if jumped {
        kinematics.vertical_velocity = movement.jump_velocity();
        kinematics.is_grounded = false;
        kinematics.has_jumped = true;
        debug!(velocity = kinematics.vertical_velocity, "jump");
    }

    let direction = horizontal_direction(yaw, input.movement);
    let horizontal = physics.move_body(direction * speed * dt);

    kinematics.vertical_velocity += movement.gravity * dt;
    let vertical = physics.move_body(Vec3::Y * kinematics.vertical_velocity * dt);

    MoveReport {
        horizontal,
        vertical,
        jumped,
    }
}

/// Resize the capsule and, while grounded, lift the body by however far the
/// resize sank the feet. Returns the net vertical change of the feet.
///
/// A backend that keeps the feet in place needs no lift. One that grows the
/// capsule about its center sinks the feet by half the growth, which is
/// undone here so the capsule never ends up inside the floor.
pub fn resize_capsule<P: PhysicsQuery + ?Sized>(
    physics: &mut P,
    height: f32,
    grounded: bool,
) -> f32 {
    let feet_before = physics.position().y;
    physics.set_capsule_height(height);
    let sunk = feet_before - physics.position().y;
    if grounded && sunk > 0.0 {
        physics.move_body(Vec3::Y * sunk);
    }
    physics.position().y - feet_before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CapsuleDimensions;
    use crate::test_support::FlatWorld;

    const DT: f32 = 1.0 / 60.0;

    fn grounded() -> CharacterKinematics {
        CharacterKinematics {
            is_grounded: true,
            vertical_velocity: -5.0,
            ..CharacterKinematics::new(0.5, 2.0)
        }
    }

    #[test]
    fn forward_input_moves_along_negative_z_at_zero_yaw() {
        let dir = horizontal_direction(0.0, Vec2::new(0.0, 1.0));
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);

        let dir = horizontal_direction(0.0, Vec2::new(1.0, 0.0));
        assert!((dir - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn yaw_rotates_movement() {
        let dir = horizontal_direction(std::f32::consts::FRAC_PI_2, Vec2::new(0.0, 1.0));
        assert!((dir - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn diagonal_input_is_not_faster() {
        let dir = horizontal_direction(0.3, Vec2::new(1.0, 1.0));
        assert!((dir.length() - 1.0).abs() < 1e-5);

        let dir = horizontal_direction(0.0, Vec2::new(0.3, 0.4));
        assert!((dir.length() - 0.5).abs() < 1e-5, "small input is not scaled up");
    }

    #[test]
    fn moves_horizontally_then_vertically() {
        let mut world = FlatWorld::standing();
        let mut k = grounded();
        let input = TickInput {
            movement: Vec2::new(0.0, 1.0),
            ..default()
        };
        let report = integrate(&mut world, &mut k, 0.0, &input, 5.0, false, &ControllerConfig::default(), DT);

        assert_eq!(world.moves.len(), 2);
        assert!(world.moves[0].y == 0.0 && world.moves[0].z < 0.0);
        assert!(world.moves[1].x == 0.0 && world.moves[1].z == 0.0);
        assert!((report.horizontal.length() - 5.0 * DT).abs() < 1e-5);
        assert_eq!(world.position.y, 0.0, "floor stops the downward move");
    }

    #[test]
    fn jump_sets_ballistic_velocity_and_leaves_ground() {
        let mut world = FlatWorld::standing();
        let mut k = grounded();
        let mut config = ControllerConfig::default();
        config.movement.jump_height = 1.2;
        config.movement.gravity = -25.0;
        let input = TickInput {
            jump_pressed: true,
            ..default()
        };

        let report = integrate(&mut world, &mut k, 0.0, &input, 5.0, false, &config, DT);

        assert!(report.jumped);
        assert!(!k.is_grounded);
        assert!(k.has_jumped);
        let expected = 60f32.sqrt() - 25.0 * DT;
        assert!((k.vertical_velocity - expected).abs() < 1e-4);
        assert!(world.position.y > 0.0);
    }

    #[test]
    fn cannot_jump_while_crouching_or_airborne() {
        let input = TickInput {
            jump_pressed: true,
            ..default()
        };
        let config = ControllerConfig::default();

        let mut world = FlatWorld::standing();
        let mut k = grounded();
        let report = integrate(&mut world, &mut k, 0.0, &input, 2.5, true, &config, DT);
        assert!(!report.jumped);

        let mut world = FlatWorld::hovering(3.0);
        let mut k = CharacterKinematics::new(0.5, 2.0);
        let report = integrate(&mut world, &mut k, 0.0, &input, 5.0, false, &config, DT);
        assert!(!report.jumped);
    }

    #[test]
    fn gravity_accumulates_while_airborne() {
        let mut world = FlatWorld::hovering(10.0);
        let mut k = CharacterKinematics::new(0.5, 2.0);
        let config = ControllerConfig::default();
        for _ in 0..30 {
            integrate(&mut world, &mut k, 0.0, &TickInput::default(), 5.0, false, &config, DT);
        }
        assert!((k.vertical_velocity - config.movement.gravity * 0.5).abs() < 1e-3);
        assert!(world.position.y < 10.0);
    }

    #[test]
    fn feet_anchored_resize_needs_no_lift() {
        let mut world = FlatWorld::standing();
        assert_eq!(resize_capsule(&mut world, 1.6, true), 0.0);
        assert_eq!(resize_capsule(&mut world, 2.0, true), 0.0);
        assert!(world.moves.is_empty());
        assert_eq!(world.position.y, 0.0);
        assert_eq!(world.capsule.map(|c| c.height), Some(2.0));
    }

    #[test]
    fn center_anchored_growth_is_lifted_back_onto_the_floor() {
        let mut world = FlatWorld {
            center_anchored_resize: true,
            capsule: Some(CapsuleDimensions::new(0.5, 1.6)),
            ..FlatWorld::standing()
        };

        let net = resize_capsule(&mut world, 1.8, true);
        assert!(net.abs() < 1e-6, "net feet change {net}");
        assert!(world.position.y.abs() < 1e-6, "feet at {}", world.position.y);
        assert_eq!(world.moves.len(), 1);
        assert!((world.moves[0].y - 0.1).abs() < 1e-6);

        // Shrinking raises the feet; gravity brings them back down.
        let net = resize_capsule(&mut world, 1.6, true);
        assert!((net - 0.1).abs() < 1e-6);
        assert_eq!(world.moves.len(), 1);
    }

    #[test]
    fn center_anchored_growth_is_not_lifted_while_airborne() {
        let mut world = FlatWorld {
            center_anchored_resize: true,
            ..FlatWorld::hovering(3.0)
        };
        let net = resize_capsule(&mut world, 2.2, false);
        assert!((net + 0.1).abs() < 1e-6);
        assert!((world.position.y - 2.9).abs() < 1e-6);
        assert!(world.moves.is_empty());
    }
}
