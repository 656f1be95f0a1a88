//! Combat movement impulse (dodge рывок).
//!
//! Один импульс на экшен: после отправки ставим `movement_applied`,
//! сбрасывается он только при завершении экшена.

use bevy::prelude::*;

use crate::combat::{CombatImpulse, CombatRuntime, DirectionMode, MovementParams};
use crate::components::{Facing, InputSnapshot};
use crate::config::AnimationCatalogs;

/// Направление импульса (нормализованное, в плоскости XZ)
pub fn impulse_direction(movement: &MovementParams, input: Vec2, facing: Facing) -> Vec3 {
    if !movement.uses_input_direction || input == Vec2::ZERO {
        return facing.forward();
    }

    let direction = match movement.direction_mode {
        DirectionMode::InputRelative => Vec3::new(input.x, 0.0, -input.y),
        DirectionMode::CameraRelative => facing.right() * input.x + facing.forward() * input.y,
    };

    direction.normalize_or(facing.forward())
}

/// System: отправка импульса для только что начатых экшенов с движением
pub fn apply_combat_impulses(
    catalogs: Res<AnimationCatalogs>,
    mut query: Query<(Entity, &mut CombatRuntime, &InputSnapshot, Option<&Facing>)>,
    mut impulses: EventWriter<CombatImpulse>,
) {
    for (entity, mut runtime, input, facing) in query.iter_mut() {
        if runtime.movement_applied {
            continue;
        }

        let Some(action_id) = runtime.active_action.as_deref() else {
            continue;
        };
        let Some(movement) = catalogs
            .actions
            .get(action_id)
            .and_then(|action| action.movement)
        else {
            continue;
        };

        let facing = facing.copied().unwrap_or_default();
        let velocity = impulse_direction(&movement, input.move_vector, facing) * movement.speed;

        impulses.write(CombatImpulse {
            entity,
            action_id: action_id.to_string(),
            velocity,
        });
        runtime.movement_applied = true;
    }
}
