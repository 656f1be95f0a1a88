//! Combo chains: многоударные цепочки атак.
//!
//! Цепочка стартует с первого шага, если оружие подходит. Следующий шаг
//! засчитывается, если его input пришёл в пределах окна шага. Пока играет
//! клип текущего шага, продолжение ставится в очередь и подхватывается при
//! завершении клипа (`ComboRuntime::finish_step`).
//!
//! Трекер идёт после combat arbitration и может начать цепочку поверх экшена,
//! стартовавшего в этом же тике: клип комбо важнее клипа экшена. Дальше, пока
//! комбо активно, арбитр экшенов молчит.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{ActionTrigger, WeaponCategory};
use crate::errors::CatalogError;
use crate::AnimationPipeline;

pub mod defaults;
pub mod runtime;
pub mod systems;

#[cfg(test)]
mod combo_tests;

pub use runtime::*;
pub use systems::*;

/// Без input'а дольше окна × EXPIRY_MULTIPLIER → цепочка сбрасывается
pub const EXPIRY_MULTIPLIER: f32 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboStep {
    pub trigger: ActionTrigger,
    pub animation: String,
    /// Окно (секунды) от предыдущего шага, в которое надо попасть этим input'ом
    pub window_secs: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboChain {
    pub id: String,
    pub steps: Vec<ComboStep>,
    /// Чужой input сбрасывает цепочку даже посреди клипа
    #[serde(default)]
    pub cancelable: bool,
    /// Пусто = любое оружие. Без оружия комбо не стартуют.
    #[serde(default)]
    pub weapon_categories: Vec<WeaponCategory>,
}

impl ComboChain {
    pub fn allows_weapon(&self, weapon: Option<WeaponCategory>) -> bool {
        match weapon {
            None => false,
            Some(category) => {
                self.weapon_categories.is_empty() || self.weapon_categories.contains(&category)
            }
        }
    }

    pub fn step(&self, index: usize) -> Option<&ComboStep> {
        self.steps.get(index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComboCatalog {
    chains: Vec<ComboChain>,
}

impl ComboCatalog {
    pub fn build(chains: Vec<ComboChain>) -> Result<Self, CatalogError> {
        for (i, chain) in chains.iter().enumerate() {
            if chains[..i].iter().any(|other| other.id == chain.id) {
                return Err(CatalogError::DuplicateCombo(chain.id.clone()));
            }
            if chain.steps.is_empty() {
                return Err(CatalogError::EmptyCombo(chain.id.clone()));
            }
        }

        Ok(Self { chains })
    }

    pub fn get(&self, id: &str) -> Option<&ComboChain> {
        self.chains.iter().find(|chain| chain.id == id)
    }

    /// Первая цепочка (в порядке объявления), которую можно начать этим input'ом
    pub fn find_starter(
        &self,
        trigger: ActionTrigger,
        weapon: Option<WeaponCategory>,
    ) -> Option<&ComboChain> {
        self.chains.iter().find(|chain| {
            chain.allows_weapon(weapon) && chain.steps.first().is_some_and(|step| step.trigger == trigger)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComboChain> {
        self.chains.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// Combo Plugin: трекинг цепочек после combat arbitration
pub struct ComboPlugin;

impl Plugin for ComboPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ComboStepStarted>();

        app.add_systems(
            FixedUpdate,
            arbitrate_combos.in_set(AnimationPipeline::ComboInput),
        );
    }
}
