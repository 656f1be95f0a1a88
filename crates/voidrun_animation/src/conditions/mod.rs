//! Declarative conditions для state catalog.
//!
//! Конфиг описывает условие как `ConditionSpec` (kind + property + operator + value).
//! При сборке каталога spec компилируется в `Condition` через dispatch table
//! по kind (`compile`). Неизвестный kind/operator/property = ошибка сборки,
//! а не молча выброшенное условие.
//!
//! Evaluation чистая и fail-closed: отсутствующее поле контекста → false.

use serde::{Deserialize, Serialize};

use crate::combat::{AttackType, CombatRuntime, DefenseType};
use crate::combo::ComboRuntime;
use crate::components::{InputSnapshot, PhysicsSnapshot};
use crate::errors::ConditionError;

mod compile;
mod evaluate;

pub use compile::compile;
pub use evaluate::{all_hold, compare};

#[cfg(test)]
mod conditions_tests;

// ============================================================================
// Raw spec (serde)
// ============================================================================

/// Значение для сравнения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Условие как оно записано в конфиге
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub kind: String,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub value: Option<ConditionValue>,
}

impl ConditionSpec {
    pub fn new(kind: &str, property: &str) -> Self {
        Self {
            kind: kind.to_string(),
            property: Some(property.to_string()),
            operator: None,
            value: None,
        }
    }

    pub fn with_operator(mut self, operator: &str) -> Self {
        self.operator = Some(operator.to_string());
        self
    }

    pub fn with_value(mut self, value: ConditionValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn input(property: &str, value: bool) -> Self {
        Self::new("input", property).with_value(ConditionValue::Bool(value))
    }

    pub fn physics(path: &str, operator: &str, value: f64) -> Self {
        Self::new("physics", path)
            .with_operator(operator)
            .with_value(ConditionValue::Number(value))
    }

    pub fn movement(property: &str) -> Self {
        Self::new("movement", property)
    }

    pub fn combo(property: &str) -> Self {
        Self::new("combo", property)
    }

    pub fn combat(property: &str, value: &str) -> Self {
        Self::new("combat", property).with_value(ConditionValue::Text(value.to_string()))
    }

    pub fn water(property: &str) -> Self {
        Self::new("water", property)
    }
}

// ============================================================================
// Compiled form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl CompareOp {
    pub fn parse(operator: &str) -> Option<Self> {
        let op = match operator {
            "equals" => Self::Equals,
            "notEquals" => Self::NotEquals,
            "greaterThan" => Self::GreaterThan,
            "lessThan" => Self::LessThan,
            "greaterThanOrEqual" => Self::GreaterThanOrEqual,
            "lessThanOrEqual" => Self::LessThanOrEqual,
            _ => return None,
        };
        Some(op)
    }
}

/// Input-поле, доступное условиям
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProperty {
    WantsToAttack,
    WantsToHeavyAttack,
    WantsToChargedAttack,
    WantsToSpecialAttack,
    WantsToParry,
    WantsToDodge,
    WantsToCrouch,
    IsRunning,
    WantsToJump,
    MoveX,
    MoveY,
}

impl InputProperty {
    pub fn parse(property: &str) -> Option<Self> {
        let prop = match property {
            "wants_to_attack" => Self::WantsToAttack,
            "wants_to_heavy_attack" => Self::WantsToHeavyAttack,
            "wants_to_charged_attack" => Self::WantsToChargedAttack,
            "wants_to_special_attack" => Self::WantsToSpecialAttack,
            "wants_to_parry" => Self::WantsToParry,
            "wants_to_dodge" => Self::WantsToDodge,
            "wants_to_crouch" => Self::WantsToCrouch,
            "is_running" => Self::IsRunning,
            "wants_to_jump" => Self::WantsToJump,
            "move_x" => Self::MoveX,
            "move_y" => Self::MoveY,
            _ => return None,
        };
        Some(prop)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComboPredicate {
    HasActiveCombo,
    ComboIdEquals(String),
    StepEquals(u32),
    AnimationEquals(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CombatPredicate {
    IsAttacking,
    AttackType(AttackType),
    DefenseType(DefenseType),
    CombatAnimation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Input {
        property: InputProperty,
        op: CompareOp,
        value: ConditionValue,
    },
    Physics {
        path: String,
        op: CompareOp,
        value: ConditionValue,
    },
    Movement {
        present: bool,
    },
    Combo(ComboPredicate),
    Combat(CombatPredicate),
    Water {
        submerged: bool,
    },
}

impl Condition {
    pub fn from_spec(spec: &ConditionSpec) -> Result<Self, ConditionError> {
        compile(spec)
    }
}

// ============================================================================
// Evaluation context
// ============================================================================

/// Read-only контекст одного тика для одного entity.
///
/// Любое поле может отсутствовать: условие над ним вернёт false.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionContext<'a> {
    pub input: Option<&'a InputSnapshot>,
    pub physics: Option<&'a PhysicsSnapshot>,
    pub combo: Option<&'a ComboRuntime>,
    pub combat: Option<&'a CombatRuntime>,
}

impl<'a> ConditionContext<'a> {
    pub fn has_active_action(&self) -> bool {
        self.combat.is_some_and(|combat| combat.is_action_active())
    }
}
