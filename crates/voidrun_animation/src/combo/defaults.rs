//! Встроенные combo-цепочки.

use crate::combo::{ComboChain, ComboStep};
use crate::components::{ActionTrigger, WeaponCategory};

fn step(trigger: ActionTrigger, animation: &str, window_secs: f32) -> ComboStep {
    ComboStep {
        trigger,
        animation: animation.to_string(),
        window_secs,
    }
}

pub fn builtin_combos() -> Vec<ComboChain> {
    vec![
        ComboChain {
            id: "basic_combo_3hit".to_string(),
            steps: vec![
                step(ActionTrigger::Attack, "left_slash", 0.5),
                step(ActionTrigger::Attack, "attack", 0.4),
                step(ActionTrigger::Attack, "double_blade_spin", 0.6),
            ],
            cancelable: false,
            weapon_categories: vec![WeaponCategory::Sword, WeaponCategory::Generic],
        },
        ComboChain {
            id: "basic_combo_2hit".to_string(),
            steps: vec![
                step(ActionTrigger::Attack, "left_slash", 0.5),
                step(ActionTrigger::Attack, "attack", 0.4),
            ],
            cancelable: false,
            weapon_categories: vec![WeaponCategory::Generic],
        },
        ComboChain {
            id: "heavy_combo_2hit".to_string(),
            steps: vec![
                step(ActionTrigger::HeavyAttack, "charged_slash", 0.8),
                step(ActionTrigger::HeavyAttack, "charged_upward_slash", 1.0),
            ],
            cancelable: true,
            weapon_categories: vec![WeaponCategory::Sword, WeaponCategory::Axe],
        },
    ]
}
