//! Per-tick выбор активного состояния.

use crate::conditions::{all_hold, ConditionContext};

use super::{StateCatalog, StateDescriptor, StateKind};

impl StateCatalog {
    /// Первое (по priority) состояние, все условия которого истинны.
    ///
    /// Combat-состояния дополнительно требуют активный combat action:
    /// остаточный `defense_type` после завершения не должен снова включать parry/dodge.
    /// Ничего не подошло → default state.
    pub fn determine_active_state(&self, ctx: &ConditionContext) -> &StateDescriptor {
        let has_active_action = ctx.has_active_action();

        self.iter()
            .find(|state| {
                if state.kind == StateKind::Combat && !has_active_action {
                    return false;
                }
                all_hold(&state.conditions, ctx)
            })
            .unwrap_or_else(|| self.default_state())
    }

    /// Разрешён ли переход `from → to` по `allowed_transitions`.
    ///
    /// Пустой список = разрешено всё. Default, combat и combo состояния
    /// достижимы всегда (иначе персонаж может застрять).
    pub fn is_transition_allowed(&self, from: &str, to: &str) -> bool {
        if from == to || self.is_default(to) {
            return true;
        }

        let Some(from_state) = self.get(from) else {
            return true;
        };
        if from_state.allowed_transitions.is_empty() {
            return true;
        }

        match self.get(to) {
            Some(target) if matches!(target.kind, StateKind::Combat | StateKind::Combo) => true,
            _ => from_state.allowed_transitions.iter().any(|id| id == to),
        }
    }
}
