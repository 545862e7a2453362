//! Keyboard and mouse input gathering.
//!
//! Optional: games with their own input layer can write [`MovementIntent`]
//! directly and skip this plugin.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::intent::MovementIntent;

/// Marks the character that receives keyboard and mouse input.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
#[require(MovementIntent)]
pub struct PlayerInput;

/// Key bindings for [`KeyboardMouseInputPlugin`].
#[derive(Resource, Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct InputBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub run: KeyCode,
    pub crouch: KeyCode,
    /// Multiplier applied to raw mouse motion before it reaches the intent.
    pub mouse_scale: f32,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            run: KeyCode::ShiftLeft,
            crouch: KeyCode::ControlLeft,
            mouse_scale: 1.0,
        }
    }
}

impl InputBindings {
    /// Movement axes from the held keys: `x` strafes right, `y` moves forward.
    pub fn movement_axes(&self, keys: &ButtonInput<KeyCode>) -> Vec2 {
        let axis = |positive: KeyCode, negative: KeyCode| {
            keys.pressed(positive) as i8 as f32 - keys.pressed(negative) as i8 as f32
        };
        Vec2::new(
            axis(self.right, self.left),
            axis(self.forward, self.backward),
        )
    }

    /// Look delta from raw mouse motion. Moving the mouse down looks down.
    pub fn look_delta(&self, motion: Vec2) -> Vec2 {
        Vec2::new(motion.x, -motion.y) * self.mouse_scale
    }
}

/// Plugin that writes keyboard and mouse state into the [`MovementIntent`] of
/// every [`PlayerInput`] entity each frame.
///
/// Runs in `PreUpdate`, so the controller (usually in `FixedUpdate`) sees the
/// frame's input. Look deltas accumulate across frames until a tick takes them.
pub struct KeyboardMouseInputPlugin;

impl Plugin for KeyboardMouseInputPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlayerInput>()
            .register_type::<InputBindings>()
            .init_resource::<InputBindings>()
            .add_systems(
                PreUpdate,
                gather_player_input.after(bevy::input::InputSystems),
            );
    }
}

/// Copy the current keyboard and mouse state into player intents.
pub fn gather_player_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<AccumulatedMouseMotion>>,
    bindings: Res<InputBindings>,
    mut intents: Query<&mut MovementIntent, With<PlayerInput>>,
) {
    let Some(keys) = keys else {
        return;
    };
    let look = mouse
        .map(|motion| bindings.look_delta(motion.delta))
        .unwrap_or(Vec2::ZERO);
    let movement = bindings.movement_axes(&keys);

    for mut intent in &mut intents {
        intent.set_movement(movement);
        intent.add_look(look);
        intent.set_run(keys.pressed(bindings.run));
        intent.set_crouch(keys.pressed(bindings.crouch));
        intent.set_jump_pressed(keys.pressed(bindings.jump));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::TickInput;

    #[test]
    fn opposite_keys_cancel() {
        let bindings = InputBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyD);
        assert_eq!(bindings.movement_axes(&keys), Vec2::new(1.0, 1.0));

        keys.press(KeyCode::KeyS);
        keys.press(KeyCode::KeyA);
        assert_eq!(bindings.movement_axes(&keys), Vec2::ZERO);
    }

    #[test]
    fn mouse_down_looks_down() {
        let bindings = InputBindings {
            mouse_scale: 2.0,
            ..default()
        };
        assert_eq!(bindings.look_delta(Vec2::new(3.0, 4.0)), Vec2::new(6.0, -8.0));
    }

    #[test]
    fn gather_writes_player_intents_only() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<AccumulatedMouseMotion>();
        app.init_resource::<InputBindings>();
        app.add_systems(Update, gather_player_input);

        let player = app.world_mut().spawn(PlayerInput).id();
        let npc = app.world_mut().spawn(MovementIntent::new()).id();

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::KeyW);
            keys.press(KeyCode::ShiftLeft);
            keys.press(KeyCode::Space);
        }
        app.world_mut().resource_mut::<AccumulatedMouseMotion>().delta = Vec2::new(5.0, 0.0);
        app.update();
        app.update();

        let mut intent = *app.world().get::<MovementIntent>(player).unwrap();
        let input = intent.take_tick_input();
        assert_eq!(input.movement, Vec2::new(0.0, 1.0));
        assert_eq!(input.look, Vec2::new(10.0, 0.0), "look accumulates across frames");
        assert!(input.run_held);
        assert!(input.jump_pressed);

        let mut npc_intent = *app.world().get::<MovementIntent>(npc).unwrap();
        assert_eq!(npc_intent.take_tick_input(), TickInput::default());
    }
}
