//! Экипировка в руках: только то, что нужно для gating экшенов и комбо.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Категория оружия
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect, Serialize, Deserialize)]
pub enum WeaponCategory {
    Sword,
    Axe,
    Hammer,
    Spear,
    Generic,
}

/// Оружие в руках (None = безоружен)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Equipment {
    pub weapon: Option<WeaponCategory>,
}

impl Equipment {
    pub fn armed(category: WeaponCategory) -> Self {
        Self { weapon: Some(category) }
    }

    pub fn unarmed() -> Self {
        Self { weapon: None }
    }

    pub fn has_weapon(&self) -> bool {
        self.weapon.is_some()
    }
}
