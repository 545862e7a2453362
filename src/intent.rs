//! Movement intent components.
//!
//! Intents represent the desired movement from player input or AI. The
//! controller takes a [`TickInput`] snapshot of the intent once per tick and
//! never reads live input while updating.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Input snapshot consumed by one controller tick.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement axes: `x` strafes right, `y` moves forward. Each in [-1, 1].
    pub movement: Vec2,
    /// Look delta: `x` turns right, `y` looks up. Unscaled input units.
    pub look: Vec2,
    /// Jump was pressed since the previous tick.
    pub jump_pressed: bool,
    /// Run key is held.
    pub run_held: bool,
    /// Crouch key is held.
    pub crouch_held: bool,
}

impl TickInput {
    /// Whether the character wants to run this tick.
    ///
    /// Running needs the key held and forward/backward input beyond the
    /// deadzone. Both the locomotion state and the FOV read this predicate.
    #[inline]
    pub fn wants_to_run(&self, deadzone: f32) -> bool {
        self.run_held && self.movement.y.abs() > deadzone
    }

    /// Whether there is horizontal movement input beyond the deadzone.
    #[inline]
    pub fn is_moving(&self, deadzone: f32) -> bool {
        self.movement.length() > deadzone
    }
}

/// Movement intent written by input gathering or AI, read by the controller.
///
/// Look deltas accumulate until the next tick takes them, and jump presses are
/// edge-detected so holding the key only jumps once.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use msg_fps_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_movement(Vec2::new(0.0, 1.0));
/// intent.set_jump_pressed(true);
///
/// let input = intent.take_tick_input();
/// assert!(input.jump_pressed);
/// assert!(!intent.take_tick_input().jump_pressed);
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Movement axes (`x` strafe, `y` forward), each clamped to [-1, 1].
    pub movement: Vec2,
    /// Look delta accumulated since the last tick.
    pub look: Vec2,
    /// Whether the run key is held.
    pub run: bool,
    /// Whether the crouch key is held.
    pub crouch: bool,
    /// Whether the jump key is currently held.
    jump_held: bool,
    /// Rising edge of the jump key not yet consumed by a tick.
    jump_requested: bool,
}

impl MovementIntent {
    /// Create a new empty movement intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement axes.
    pub fn set_movement(&mut self, movement: Vec2) {
        self.movement = movement.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Add a look delta. Deltas accumulate until the next tick.
    pub fn add_look(&mut self, delta: Vec2) {
        self.look += delta;
    }

    /// Set whether the run key is held.
    pub fn set_run(&mut self, held: bool) {
        self.run = held;
    }

    /// Set whether the crouch key is held.
    pub fn set_crouch(&mut self, held: bool) {
        self.crouch = held;
    }

    /// Set the jump key state. A released-to-pressed transition requests a jump.
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        if pressed && !self.jump_held {
            self.jump_requested = true;
        }
        self.jump_held = pressed;
    }

    /// Whether a jump request is waiting for the next tick.
    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Clear movement, look and held keys.
    pub fn clear(&mut self) {
        self.movement = Vec2::ZERO;
        self.look = Vec2::ZERO;
        self.run = false;
        self.crouch = false;
        self.jump_requested = false;
    }

    /// Snapshot the intent for one tick, consuming look deltas and the jump edge.
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            movement: self.movement,
            look: self.look,
            jump_pressed: self.jump_requested,
            run_held: self.run,
            crouch_held: self.crouch,
        };
        self.look = Vec2::ZERO;
        self.jump_requested = false;
        input
    }
}
