//! Seeded bot input: заменяет игрока в headless прогонах и тестах детерминизма.
//!
//! Только тестовый драйвер. Бот пишет `InputSnapshot` и подделывает
//! `PhysicsSnapshot` грубой моделью прыжка (гравитация, земля на y = 0), чтобы
//! headless прогон без физического движка доходил до jump. Пайплайн физику не
//! интегрирует: в игре `PhysicsSnapshot` пишет внешний слой, а `BotInput` на
//! персонажей не вешается.
//!
//! Всё случайное берётся из `DeterministicRng`, поэтому одинаковый seed даёт
//! одинаковую последовательность input'ов.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{ActionTrigger, InputSnapshot, PhysicsSnapshot};
use crate::DeterministicRng;

const JUMP_VELOCITY: f32 = 5.0;
const GRAVITY: f32 = 9.8;
const WALK_SPEED: f32 = 2.0;
const RUN_SPEED: f32 = 5.0;

/// Направления движения бота: (move vector, key code)
const STEERING: [(Vec2, Option<&str>); 5] = [
    (Vec2::ZERO, None),
    (Vec2::new(0.0, 1.0), Some("KeyW")),
    (Vec2::new(0.0, -1.0), Some("KeyS")),
    (Vec2::new(-1.0, 0.0), Some("KeyA")),
    (Vec2::new(1.0, 0.0), Some("KeyD")),
];

/// Entity, чей input генерирует бот
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BotInput {
    /// Шанс нажать боевой trigger за тик
    pub action_chance: f32,
    /// Шанс отпустить зажатый trigger за тик
    pub release_chance: f32,
    /// Шанс сменить направление/походку за тик
    pub steer_chance: f32,
    pub jump_chance: f32,
}

impl Default for BotInput {
    fn default() -> Self {
        Self {
            action_chance: 0.04,
            release_chance: 0.25,
            steer_chance: 0.02,
            jump_chance: 0.005,
        }
    }
}

/// System (test driver): случайный input + поддельная вертикальная скорость для snapshot'а
pub fn drive_bot_input(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut query: Query<(&BotInput, &mut InputSnapshot, &mut PhysicsSnapshot)>,
) {
    let delta = time.delta_secs();
    let rng = &mut rng.rng;

    for (bot, mut input, mut physics) in query.iter_mut() {
        for trigger in ActionTrigger::ALL {
            if input.is_held(trigger) && rng.gen::<f32>() < bot.release_chance {
                input.release(trigger);
            }
        }

        if rng.gen::<f32>() < bot.action_chance {
            let trigger = ActionTrigger::ALL[rng.gen_range(0..ActionTrigger::ALL.len())];
            input.press(trigger);
        }

        if rng.gen::<f32>() < bot.steer_chance {
            let (direction, key) = STEERING[rng.gen_range(0..STEERING.len())];
            input.move_vector = direction;
            input.held_keys.clear();
            if let Some(key) = key {
                input.press_key(key);
            }
            input.is_running = rng.gen_bool(0.3);
            input.wants_to_crouch = rng.gen_bool(0.15);
        }

        let speed = if input.is_running { RUN_SPEED } else { WALK_SPEED };
        let planar = input.move_vector * speed;

        let mut vertical = physics.velocity.y;
        if physics.grounded && rng.gen::<f32>() < bot.jump_chance {
            vertical = JUMP_VELOCITY;
            input.wants_to_jump = true;
        } else {
            vertical -= GRAVITY * delta;
            input.wants_to_jump = false;
        }

        // Земля на y = 0
        let grounded = vertical <= 0.0;
        if grounded {
            vertical = 0.0;
        }

        physics.velocity = Vec3::new(planar.x, vertical, -planar.y);
        physics.grounded = grounded;
    }
}
