//! Встроенные боевые экшены (порядок = приоритет при одновременных trigger'ах).

use crate::combat::{
    AttackType, CombatActionDescriptor, DefenseType, DirectionMode, EquipmentConstraint,
    IFrameWindow, MovementParams, TriggerActivation,
};
use crate::components::{ActionTrigger, WeaponCategory};

/// Dodge cooldown (секунды)
pub const DODGE_COOLDOWN: f32 = 0.5;
/// Скорость рывка dodge (units/sec)
pub const DODGE_SPEED: f32 = 20.0;
pub const SPECIAL_ATTACK_COOLDOWN: f32 = 2.0;

fn action(id: &str, trigger: ActionTrigger, state: &str) -> CombatActionDescriptor {
    CombatActionDescriptor {
        id: id.to_string(),
        trigger,
        activation: TriggerActivation::Held,
        state: state.to_string(),
        cooldown_secs: 0.0,
        attack_type: None,
        defense_type: None,
        movement: None,
        iframes: None,
        requires: None,
    }
}

pub fn builtin_actions() -> Vec<CombatActionDescriptor> {
    vec![
        CombatActionDescriptor {
            activation: TriggerActivation::Latched,
            cooldown_secs: DODGE_COOLDOWN,
            defense_type: Some(DefenseType::Dodge),
            movement: Some(MovementParams {
                speed: DODGE_SPEED,
                direction_mode: DirectionMode::CameraRelative,
                uses_input_direction: true,
            }),
            iframes: Some(IFrameWindow { start: 0.0, end: 0.3 }),
            ..action("dodge", ActionTrigger::Dodge, "dodge")
        },
        CombatActionDescriptor {
            defense_type: Some(DefenseType::Parry),
            requires: Some(EquipmentConstraint::AnyWeapon),
            ..action("parry", ActionTrigger::Parry, "parry")
        },
        CombatActionDescriptor {
            cooldown_secs: SPECIAL_ATTACK_COOLDOWN,
            attack_type: Some(AttackType::Special),
            requires: Some(EquipmentConstraint::Only(vec![WeaponCategory::Sword])),
            ..action("specialAttack", ActionTrigger::SpecialAttack, "special_attack")
        },
        CombatActionDescriptor {
            attack_type: Some(AttackType::Heavy),
            ..action("heavyAttack", ActionTrigger::HeavyAttack, "heavy_attack")
        },
        CombatActionDescriptor {
            attack_type: Some(AttackType::Charged),
            ..action("chargedAttack", ActionTrigger::ChargedAttack, "charged_attack")
        },
        CombatActionDescriptor {
            attack_type: Some(AttackType::Light),
            ..action("lightAttack", ActionTrigger::Attack, "attack")
        },
    ]
}
