//! CombatRuntime: per-entity состояние боевого экшена.
//!
//! Инвариант: максимум один активный экшен. Снимается только при завершении
//! привязанного one-shot клипа (`end_action`), больше нигде.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::CombatActionDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AttackType {
    Light,
    Heavy,
    Charged,
    Special,
}

impl AttackType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "heavy" => Some(Self::Heavy),
            "charged" => Some(Self::Charged),
            "special" => Some(Self::Special),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum DefenseType {
    Parry,
    Dodge,
}

impl DefenseType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "parry" => Some(Self::Parry),
            "dodge" => Some(Self::Dodge),
            _ => None,
        }
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct CombatRuntime {
    pub active_action: Option<String>,
    pub attack_type: Option<AttackType>,
    pub defense_type: Option<DefenseType>,
    /// Клип привязанного состояния (скопирован при активации)
    pub combat_animation: Option<String>,
    pub is_attacking: bool,

    /// action id → оставшиеся секунды. Записи ≤ 0 удаляются.
    pub cooldowns: BTreeMap<String, f32>,

    /// Импульс движения уже применён для текущего экшена
    pub movement_applied: bool,
    /// Внутри i-frame окна текущего экшена
    pub invulnerable: bool,
}

impl CombatRuntime {
    pub fn is_action_active(&self) -> bool {
        self.active_action.is_some()
    }

    pub fn is_active(&self, action_id: &str) -> bool {
        self.active_action.as_deref() == Some(action_id)
    }

    pub fn cooldown_remaining(&self, action_id: &str) -> f32 {
        self.cooldowns.get(action_id).copied().unwrap_or(0.0)
    }

    pub fn is_on_cooldown(&self, action_id: &str) -> bool {
        self.cooldown_remaining(action_id) > 0.0
    }

    /// Уменьшает все cooldown'ы, истёкшие удаляет
    pub fn tick_cooldowns(&mut self, delta: f32) {
        for remaining in self.cooldowns.values_mut() {
            *remaining -= delta;
        }
        self.cooldowns.retain(|_, remaining| *remaining > 0.0);
    }

    pub fn start_action(&mut self, action: &CombatActionDescriptor, animation: &str) {
        self.active_action = Some(action.id.clone());
        self.attack_type = action.attack_type;
        self.defense_type = action.defense_type;
        self.is_attacking = action.attack_type.is_some();
        self.combat_animation = Some(animation.to_string());
        self.movement_applied = false;
        self.invulnerable = false;

        if action.cooldown_secs > 0.0 {
            self.cooldowns.insert(action.id.clone(), action.cooldown_secs);
        }
    }

    /// Завершение экшена (единственная точка очистки).
    ///
    /// `parry_held`: если parry всё ещё зажат, defense_type parry остаётся
    /// (combat-состояния всё равно требуют активный экшен).
    pub fn end_action(&mut self, parry_held: bool) {
        let keep_parry = parry_held && self.defense_type == Some(DefenseType::Parry);

        self.active_action = None;
        self.attack_type = None;
        self.defense_type = if keep_parry { Some(DefenseType::Parry) } else { None };
        self.combat_animation = None;
        self.is_attacking = false;
        self.movement_applied = false;
        self.invulnerable = false;
    }
}
