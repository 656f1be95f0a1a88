//! ConditionSpec → Condition. Dispatch table keyed on condition kind.

use crate::combat::{AttackType, DefenseType};
use crate::errors::ConditionError;

use super::{
    CombatPredicate, ComboPredicate, CompareOp, Condition, ConditionSpec, ConditionValue,
    InputProperty,
};

type Compiler = fn(&ConditionSpec) -> Result<Condition, ConditionError>;

const COMPILERS: &[(&str, Compiler)] = &[
    ("input", compile_input),
    ("physics", compile_physics),
    ("movement", compile_movement),
    ("combo", compile_combo),
    ("combat", compile_combat),
    ("water", compile_water),
];

pub fn compile(spec: &ConditionSpec) -> Result<Condition, ConditionError> {
    let compiler = COMPILERS
        .iter()
        .find(|(kind, _)| *kind == spec.kind)
        .map(|(_, compiler)| *compiler)
        .ok_or_else(|| ConditionError::UnknownKind(spec.kind.clone()))?;

    compiler(spec)
}

// ============================================================================
// Helpers
// ============================================================================

fn property(spec: &ConditionSpec) -> Result<&str, ConditionError> {
    spec.property
        .as_deref()
        .ok_or_else(|| ConditionError::MissingProperty { kind: spec.kind.clone() })
}

/// Operator не указан → equals
fn operator(spec: &ConditionSpec) -> Result<CompareOp, ConditionError> {
    match spec.operator.as_deref() {
        None => Ok(CompareOp::Equals),
        Some(raw) => CompareOp::parse(raw).ok_or_else(|| ConditionError::UnknownOperator {
            kind: spec.kind.clone(),
            operator: raw.to_string(),
        }),
    }
}

fn value(spec: &ConditionSpec, property: &str) -> Result<ConditionValue, ConditionError> {
    spec.value.clone().ok_or_else(|| ConditionError::MissingValue {
        kind: spec.kind.clone(),
        property: property.to_string(),
    })
}

fn unknown_property(spec: &ConditionSpec, property: &str) -> ConditionError {
    ConditionError::UnknownProperty {
        kind: spec.kind.clone(),
        property: property.to_string(),
    }
}

fn wrong_type(spec: &ConditionSpec, property: &str) -> ConditionError {
    ConditionError::ValueType {
        kind: spec.kind.clone(),
        property: property.to_string(),
    }
}

/// Predicate-style kinds (movement/combo/water) не принимают operator
fn reject_operator(spec: &ConditionSpec) -> Result<(), ConditionError> {
    match &spec.operator {
        Some(raw) => Err(ConditionError::UnknownOperator {
            kind: spec.kind.clone(),
            operator: raw.clone(),
        }),
        None => Ok(()),
    }
}

fn text_value(spec: &ConditionSpec, property: &str) -> Result<String, ConditionError> {
    match value(spec, property)? {
        ConditionValue::Text(text) => Ok(text),
        _ => Err(wrong_type(spec, property)),
    }
}

// ============================================================================
// Per-kind compilers
// ============================================================================

fn compile_input(spec: &ConditionSpec) -> Result<Condition, ConditionError> {
    let name = property(spec)?;
    let property = InputProperty::parse(name).ok_or_else(|| unknown_property(spec, name))?;
    let op = operator(spec)?;
    let value = value(spec, name)?;

    Ok(Condition::Input { property, op, value })
}

fn compile_physics(spec: &ConditionSpec) -> Result<Condition, ConditionError> {
    let path = property(spec)?;
    let op = operator(spec)?;
    let value = value(spec, path)?;

    Ok(Condition::Physics {
        path: path.to_string(),
        op,
        value,
    })
}

fn compile_movement(spec: &ConditionSpec) -> Result<Condition, ConditionError> {
    reject_operator(spec)?;
    let name = property(spec)?;
    let present = match name {
        "has_movement" => true,
        "no_movement" => false,
        other => return Err(unknown_property(spec, other)),
    };

    Ok(Condition::Movement { present })
}

fn compile_combo(spec: &ConditionSpec) -> Result<Condition, ConditionError> {
    reject_operator(spec)?;
    let name = property(spec)?;
    let predicate = match name {
        "has_active_combo" => ComboPredicate::HasActiveCombo,
        "combo_id" => ComboPredicate::ComboIdEquals(text_value(spec, name)?),
        "animation" => ComboPredicate::AnimationEquals(text_value(spec, name)?),
        "step" => match value(spec, name)? {
            ConditionValue::Number(step) if step >= 0.0 && step.fract() == 0.0 => {
                ComboPredicate::StepEquals(step as u32)
            }
            _ => return Err(wrong_type(spec, name)),
        },
        other => return Err(unknown_property(spec, other)),
    };

    Ok(Condition::Combo(predicate))
}

fn compile_combat(spec: &ConditionSpec) -> Result<Condition, ConditionError> {
    reject_operator(spec)?;
    let name = property(spec)?;
    let predicate = match name {
        "is_attacking" => CombatPredicate::IsAttacking,
        "attack_type" => {
            let raw = text_value(spec, name)?;
            let attack = AttackType::parse(&raw).ok_or_else(|| wrong_type(spec, name))?;
            CombatPredicate::AttackType(attack)
        }
        "defense_type" => {
            let raw = text_value(spec, name)?;
            let defense = DefenseType::parse(&raw).ok_or_else(|| wrong_type(spec, name))?;
            CombatPredicate::DefenseType(defense)
        }
        "combat_animation" => CombatPredicate::CombatAnimation(text_value(spec, name)?),
        other => return Err(unknown_property(spec, other)),
    };

    Ok(Condition::Combat(predicate))
}

fn compile_water(spec: &ConditionSpec) -> Result<Condition, ConditionError> {
    reject_operator(spec)?;
    let name = property(spec)?;
    let submerged = match name {
        "is_in_water" => true,
        "not_in_water" => false,
        other => return Err(unknown_property(spec, other)),
    };

    Ok(Condition::Water { submerged })
}
