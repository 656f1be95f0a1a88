//! Combo systems.

use bevy::prelude::*;

use crate::combat::{CombatActionStarted, CombatRuntime};
use crate::combo::{combo_trigger, ComboRuntime};
use crate::components::{Equipment, InputSnapshot};
use crate::config::AnimationCatalogs;
use crate::logger;

/// Шаг комбо начал играть
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ComboStepStarted {
    pub entity: Entity,
    pub combo_id: String,
    pub step: u32,
    pub animation: String,
}

/// System: трекинг combo-цепочек (после combat arbitration, до state resolution)
pub fn arbitrate_combos(
    catalogs: Res<AnimationCatalogs>,
    time: Res<Time<Fixed>>,
    mut actions_started: EventReader<CombatActionStarted>,
    mut query: Query<(
        Entity,
        &mut ComboRuntime,
        &InputSnapshot,
        Option<&Equipment>,
        Option<&CombatRuntime>,
    )>,
    mut started: EventWriter<ComboStepStarted>,
) {
    let delta = time.delta_secs();
    // Экшены этого тика: комбо может лечь поверх свежей атаки
    let fresh: Vec<Entity> = actions_started.read().map(|event| event.entity).collect();

    for (entity, mut combo, input, equipment, combat) in query.iter_mut() {
        let busy = combat.is_some_and(|combat| {
            let fresh_attack = combat.is_attacking && fresh.contains(&entity);
            combat.is_action_active() && !fresh_attack
        }) && !combo.is_active();
        let trigger = if busy { None } else { combo_trigger(input) };
        let weapon = equipment.and_then(|equipment| equipment.weapon);

        let Some(progress) = combo.process_input(trigger, weapon, &catalogs.combos, delta) else {
            continue;
        };

        if progress.queued {
            logger::log(&format!(
                "🔗 {:?} queued combo '{}' step {}",
                entity, progress.combo_id, progress.step
            ));
            continue;
        }

        logger::log(&format!(
            "🔗 {:?} combo '{}' step {} → '{}'",
            entity, progress.combo_id, progress.step, progress.animation
        ));
        started.write(ComboStepStarted {
            entity,
            combo_id: progress.combo_id,
            step: progress.step,
            animation: progress.animation,
        });
    }
}
