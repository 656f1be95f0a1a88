//! State catalog: priority-ordered декларативные состояния персонажа.
//!
//! Сборка (`StateCatalog::build`):
//! - stable sort по priority (desc), на равных побеждает порядок объявления
//! - conditions компилируются один раз
//! - дубликаты id и отсутствующий default state = ошибка конфигурации
//!
//! Per-tick (`determine_active_state`): первое состояние, все условия которого
//! истинны; иначе default (`idle`).

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::conditions::{compile, Condition, ConditionSpec};
use crate::errors::CatalogError;

pub mod defaults;
mod resolver;


/// Семантическая группа состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum StateKind {
    Idle,
    Movement,
    /// Активируется только пока идёт combat action
    Combat,
    Combo,
}

/// Клипы для направлений (forward > backward > left > right)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalVariants {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
}

/// Состояние как оно записано в конфиге
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
    pub id: String,
    pub priority: i32,
    pub kind: StateKind,
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,
    pub animation: String,
    #[serde(default)]
    pub one_shot: bool,
    #[serde(default)]
    pub prevent_interruption: bool,
    #[serde(default)]
    pub interrupt_on_input_release: bool,
    #[serde(default)]
    pub directional: Option<DirectionalVariants>,
    #[serde(default)]
    pub allowed_transitions: Vec<String>,
}

/// Скомпилированное состояние (immutable после сборки каталога)
#[derive(Debug, Clone, PartialEq)]
pub struct StateDescriptor {
    pub id: String,
    pub priority: i32,
    pub kind: StateKind,
    pub conditions: Vec<Condition>,
    pub animation: String,
    pub one_shot: bool,
    /// Имеет смысл только вместе с `one_shot`
    pub prevent_interruption: bool,
    pub interrupt_on_input_release: bool,
    pub directional: Option<DirectionalVariants>,
    pub allowed_transitions: Vec<String>,
}

impl StateDescriptor {
    fn compile(spec: StateSpec) -> Result<Self, CatalogError> {
        let conditions = spec
            .conditions
            .iter()
            .map(compile)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CatalogError::Condition {
                state: spec.id.clone(),
                source,
            })?;

        Ok(Self {
            id: spec.id,
            priority: spec.priority,
            kind: spec.kind,
            conditions,
            animation: spec.animation,
            one_shot: spec.one_shot,
            prevent_interruption: spec.prevent_interruption,
            interrupt_on_input_release: spec.interrupt_on_input_release,
            directional: spec.directional,
            allowed_transitions: spec.allowed_transitions,
        })
    }

    /// Protected one-shot: нельзя прервать до завершения клипа
    pub fn is_protected(&self) -> bool {
        self.one_shot && self.prevent_interruption
    }

    pub fn is_combat(&self) -> bool {
        self.kind == StateKind::Combat
    }

    /// Состояние держится на combat action или шаге комбо
    pub fn is_action_bound(&self) -> bool {
        matches!(self.kind, StateKind::Combat | StateKind::Combo)
    }
}

#[derive(Debug, Clone)]
pub struct StateCatalog {
    /// Отсортировано по priority desc (stable)
    states: Vec<StateDescriptor>,
    index: HashMap<String, usize>,
    default_index: usize,
}

impl StateCatalog {
    pub fn build(specs: Vec<StateSpec>, default_id: &str) -> Result<Self, CatalogError> {
        let mut states = Vec::with_capacity(specs.len());
        for spec in specs {
            if states.iter().any(|state: &StateDescriptor| state.id == spec.id) {
                return Err(CatalogError::DuplicateState(spec.id));
            }
            states.push(StateDescriptor::compile(spec)?);
        }

        // Vec::sort_by стабильный: на равном priority сохраняется порядок объявления
        states.sort_by(|a, b| b.priority.cmp(&a.priority));

        let index: HashMap<String, usize> = states
            .iter()
            .enumerate()
            .map(|(i, state)| (state.id.clone(), i))
            .collect();

        let default_index = *index
            .get(default_id)
            .ok_or_else(|| CatalogError::MissingDefaultState(default_id.to_string()))?;

        Ok(Self {
            states,
            index,
            default_index,
        })
    }

    pub fn get(&self, id: &str) -> Option<&StateDescriptor> {
        self.index.get(id).map(|&i| &self.states[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn default_state(&self) -> &StateDescriptor {
        &self.states[self.default_index]
    }

    pub fn is_default(&self, id: &str) -> bool {
        self.default_state().id == id
    }

    /// Состояния в порядке оценки (priority desc)
    pub fn iter(&self) -> impl Iterator<Item = &StateDescriptor> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
