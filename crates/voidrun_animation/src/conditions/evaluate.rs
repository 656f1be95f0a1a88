//! Evaluation скомпилированных условий.

use crate::components::{ActionTrigger, InputSnapshot};

use super::{
    CombatPredicate, ComboPredicate, CompareOp, Condition, ConditionContext, ConditionValue,
    InputProperty,
};

impl Condition {
    /// Чистый predicate. Нет нужного поля в контексте → false.
    pub fn evaluate(&self, ctx: &ConditionContext) -> bool {
        match self {
            Condition::Input { property, op, value } => ctx
                .input
                .and_then(|input| input_value(input, *property))
                .is_some_and(|actual| compare(&actual, *op, value)),

            Condition::Physics { path, op, value } => ctx
                .physics
                .and_then(|physics| {
                    physics
                        .number_at(path)
                        .map(ConditionValue::Number)
                        .or_else(|| physics.flag_at(path).map(ConditionValue::Bool))
                })
                .is_some_and(|actual| compare(&actual, *op, value)),

            Condition::Movement { present } => ctx
                .input
                .is_some_and(|input| input.has_movement() == *present),

            Condition::Combo(predicate) => ctx.combo.is_some_and(|combo| match predicate {
                ComboPredicate::HasActiveCombo => combo.is_active(),
                ComboPredicate::ComboIdEquals(id) => combo.active_combo.as_deref() == Some(id.as_str()),
                ComboPredicate::StepEquals(step) => combo.is_active() && combo.step == *step,
                ComboPredicate::AnimationEquals(clip) => {
                    combo.combo_animation.as_deref() == Some(clip.as_str())
                }
            }),

            Condition::Combat(predicate) => ctx.combat.is_some_and(|combat| match predicate {
                CombatPredicate::IsAttacking => combat.is_attacking,
                CombatPredicate::AttackType(attack) => combat.attack_type == Some(*attack),
                CombatPredicate::DefenseType(defense) => combat.defense_type == Some(*defense),
                CombatPredicate::CombatAnimation(clip) => {
                    combat.combat_animation.as_deref() == Some(clip.as_str())
                }
            }),

            Condition::Water { submerged } => ctx
                .physics
                .is_some_and(|physics| physics.submerged == *submerged),
        }
    }
}

/// AND с short-circuit. Пустой список = true.
pub fn all_hold(conditions: &[Condition], ctx: &ConditionContext) -> bool {
    conditions.iter().all(|condition| condition.evaluate(ctx))
}

fn input_value(input: &InputSnapshot, property: InputProperty) -> Option<ConditionValue> {
    let wants = |trigger| Some(ConditionValue::Bool(input.wants(trigger)));

    match property {
        InputProperty::WantsToAttack => wants(ActionTrigger::Attack),
        InputProperty::WantsToHeavyAttack => wants(ActionTrigger::HeavyAttack),
        InputProperty::WantsToChargedAttack => wants(ActionTrigger::ChargedAttack),
        InputProperty::WantsToSpecialAttack => wants(ActionTrigger::SpecialAttack),
        InputProperty::WantsToParry => wants(ActionTrigger::Parry),
        InputProperty::WantsToDodge => wants(ActionTrigger::Dodge),
        InputProperty::WantsToCrouch => Some(ConditionValue::Bool(input.wants_to_crouch)),
        InputProperty::IsRunning => Some(ConditionValue::Bool(input.is_running)),
        InputProperty::WantsToJump => Some(ConditionValue::Bool(input.wants_to_jump)),
        InputProperty::MoveX => Some(ConditionValue::Number(input.move_vector.x as f64)),
        InputProperty::MoveY => Some(ConditionValue::Number(input.move_vector.y as f64)),
    }
}

/// Сравнение actual (op) expected. Несовпадение типов → false.
/// Для bool/text осмысленны только equals/notEquals.
pub fn compare(actual: &ConditionValue, op: CompareOp, expected: &ConditionValue) -> bool {
    match (actual, expected) {
        (ConditionValue::Number(a), ConditionValue::Number(b)) => match op {
            CompareOp::Equals => a == b,
            CompareOp::NotEquals => a != b,
            CompareOp::GreaterThan => a > b,
            CompareOp::LessThan => a < b,
            CompareOp::GreaterThanOrEqual => a >= b,
            CompareOp::LessThanOrEqual => a <= b,
        },
        (ConditionValue::Bool(a), ConditionValue::Bool(b)) => match op {
            CompareOp::Equals => a == b,
            CompareOp::NotEquals => a != b,
            _ => false,
        },
        (ConditionValue::Text(a), ConditionValue::Text(b)) => match op {
            CompareOp::Equals => a == b,
            CompareOp::NotEquals => a != b,
            _ => false,
        },
        _ => false,
    }
}
