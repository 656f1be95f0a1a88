//! Input snapshot: что игрок (или бот) хочет сделать в этом тике.
//!
//! Три слоя для боевых trigger'ов:
//! - `held`: кнопка зажата сейчас
//! - `pressed`: нажата в этом кадре (edge, сбрасывается `end_frame`)
//! - `latched`: нажатие dodge'а, живёт до `consume` арбитром или до конца кадра.
//!   Отклонённое (cooldown) нажатие не переживает кадр и само не сработает позже.

use std::collections::BTreeSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Боевой input trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect, Serialize, Deserialize)]
pub enum ActionTrigger {
    Attack,
    HeavyAttack,
    ChargedAttack,
    SpecialAttack,
    Parry,
    Dodge,
}

impl ActionTrigger {
    pub const ALL: [ActionTrigger; 6] = [
        ActionTrigger::Attack,
        ActionTrigger::HeavyAttack,
        ActionTrigger::ChargedAttack,
        ActionTrigger::SpecialAttack,
        ActionTrigger::Parry,
        ActionTrigger::Dodge,
    ];

    /// Порядок, в котором комбо-трекер выбирает один input из нескольких нажатых
    pub const COMBO_PRECEDENCE: [ActionTrigger; 4] = [
        ActionTrigger::HeavyAttack,
        ActionTrigger::ChargedAttack,
        ActionTrigger::SpecialAttack,
        ActionTrigger::Attack,
    ];

    /// Latch переживает отпускание кнопки в пределах кадра (остальные снимаются на key up)
    pub fn latches(self) -> bool {
        matches!(self, ActionTrigger::Dodge)
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub held: BTreeSet<ActionTrigger>,
    pub pressed: BTreeSet<ActionTrigger>,
    pub latched: BTreeSet<ActionTrigger>,

    pub wants_to_crouch: bool,
    pub is_running: bool,
    pub wants_to_jump: bool,

    /// x = strafe (+right), y = forward (+forward)
    pub move_vector: Vec2,

    /// Key codes в формате DOM (`KeyW`, `ArrowUp`, ...)
    pub held_keys: BTreeSet<String>,
}

impl InputSnapshot {
    /// Key down: held + pressed edge + latch (повтор при зажатой кнопке не считается)
    pub fn press(&mut self, trigger: ActionTrigger) {
        if self.held.insert(trigger) {
            self.pressed.insert(trigger);
            self.latched.insert(trigger);
        }
    }

    /// Key up. Latch dodge'а остаётся до consume или конца кадра.
    pub fn release(&mut self, trigger: ActionTrigger) {
        self.held.remove(&trigger);
        if !trigger.latches() {
            self.latched.remove(&trigger);
        }
    }

    pub fn is_held(&self, trigger: ActionTrigger) -> bool {
        self.held.contains(&trigger)
    }

    pub fn is_latched(&self, trigger: ActionTrigger) -> bool {
        self.latched.contains(&trigger)
    }

    /// "Хочет" выполнить: зажато или висит latch
    pub fn wants(&self, trigger: ActionTrigger) -> bool {
        self.is_held(trigger) || self.is_latched(trigger)
    }

    pub fn was_pressed(&self, trigger: ActionTrigger) -> bool {
        self.pressed.contains(&trigger)
    }

    pub fn consume(&mut self, trigger: ActionTrigger) {
        self.latched.remove(&trigger);
    }

    pub fn press_key(&mut self, code: impl Into<String>) {
        self.held_keys.insert(code.into());
    }

    pub fn release_key(&mut self, code: &str) {
        self.held_keys.remove(code);
    }

    pub fn has_movement(&self) -> bool {
        self.move_vector.x != 0.0 || self.move_vector.y != 0.0
    }

    /// Конец кадра: edge-нажатия больше не "свежие", несъеденный latch сгорает
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.latched.clear();
    }
}

/// System: сброс pressed-this-frame и latch'ей в конце тика
pub fn end_input_frame(mut query: Query<&mut InputSnapshot>) {
    for mut input in query.iter_mut() {
        if !input.pressed.is_empty() || !input.latched.is_empty() {
            input.end_frame();
        }
    }
}
