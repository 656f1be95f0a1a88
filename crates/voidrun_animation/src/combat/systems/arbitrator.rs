//! Combat arbitrator: выбор максимум одного экшена за тик.
//!
//! Порядок внутри тика:
//! 1. cooldown'ы уменьшаются всегда (даже во время экшена/комбо)
//! 2. комбо, активное с прошлого тика, или активный экшен → новых экшенов нет
//! 3. скан экшенов в порядке объявления: trigger подан, cooldown истёк,
//!    экипировка подходит, состояние существует → активация, стоп

use bevy::prelude::*;

use crate::combat::{CombatActionCatalog, CombatActionStarted, CombatRuntime, TriggerActivation};
use crate::combo::ComboRuntime;
use crate::components::{ActionTrigger, Equipment, InputSnapshot};
use crate::config::AnimationCatalogs;
use crate::logger;
use crate::states::StateCatalog;

/// Результат успешной активации
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionActivation {
    pub action_id: String,
    pub state_id: String,
}

/// Один тик арбитража для одного entity (без ECS, для тестов и внешних хостов).
pub fn arbitrate_combat_action(
    runtime: &mut CombatRuntime,
    input: &mut InputSnapshot,
    equipment: Option<&Equipment>,
    combo_active: bool,
    actions: &CombatActionCatalog,
    states: &StateCatalog,
    delta: f32,
) -> Option<ActionActivation> {
    runtime.tick_cooldowns(delta);

    if combo_active || runtime.is_action_active() {
        return None;
    }

    // Idle: сбрасываем остатки прошлого экшена (parry держим, пока зажат)
    runtime.end_action(input.is_held(ActionTrigger::Parry));

    for action in actions.iter() {
        // Ineligible: обычный control flow, не ошибка
        if !action.is_triggered(input)
            || runtime.is_on_cooldown(&action.id)
            || !action.equipment_allows(equipment)
        {
            continue;
        }

        let Some(state) = states.get(&action.state) else {
            logger::log_warning(&format!(
                "⚠️ Combat action '{}' references missing state '{}', not started",
                action.id, action.state
            ));
            continue;
        };

        runtime.start_action(action, &state.animation);

        // Latch снимается только здесь (и при завершении клипа)
        if action.activation == TriggerActivation::Latched {
            input.consume(action.trigger);
        }

        return Some(ActionActivation {
            action_id: action.id.clone(),
            state_id: state.id.clone(),
        });
    }

    None
}

/// System: combat arbitration для всех персонажей
pub fn arbitrate_combat_actions(
    catalogs: Res<AnimationCatalogs>,
    time: Res<Time<Fixed>>,
    mut query: Query<(
        Entity,
        &mut CombatRuntime,
        &mut InputSnapshot,
        Option<&Equipment>,
        Option<&ComboRuntime>,
    )>,
    mut started: EventWriter<CombatActionStarted>,
) {
    let delta = time.delta_secs();

    for (entity, mut runtime, mut input, equipment, combo) in query.iter_mut() {
        let combo_active = combo.is_some_and(|combo| combo.is_active());

        let Some(activation) = arbitrate_combat_action(
            &mut runtime,
            &mut input,
            equipment,
            combo_active,
            &catalogs.actions,
            &catalogs.states,
            delta,
        ) else {
            continue;
        };

        logger::log(&format!(
            "⚔️ {:?} started '{}' → state '{}'",
            entity, activation.action_id, activation.state_id
        ));

        started.write(CombatActionStarted {
            entity,
            action_id: activation.action_id,
            state_id: activation.state_id,
        });
    }
}
