//! Встроенный каталог состояний персонажа.

use crate::conditions::ConditionSpec;

use super::{DirectionalVariants, StateKind, StateSpec};

pub const DEFAULT_STATE_ID: &str = "idle";

/// Вертикальная скорость для jump: мир Y-up (bevy). Z-up host переопределяет
/// условие jump в конфиге на `velocity.z`.
pub const JUMP_VELOCITY_PATH: &str = "velocity.y";
/// Порог вертикальной скорости, выше которого персонаж в прыжке
pub const JUMP_VELOCITY_THRESHOLD: f64 = 0.1;

fn state(id: &str, priority: i32, kind: StateKind, animation: &str) -> StateSpec {
    StateSpec {
        id: id.to_string(),
        priority,
        kind,
        conditions: Vec::new(),
        animation: animation.to_string(),
        one_shot: false,
        prevent_interruption: false,
        interrupt_on_input_release: false,
        directional: None,
        allowed_transitions: Vec::new(),
    }
}

impl StateSpec {
    fn when(mut self, condition: ConditionSpec) -> Self {
        self.conditions.push(condition);
        self
    }

    /// One-shot, который нельзя прервать до конца клипа
    fn protected_one_shot(mut self) -> Self {
        self.one_shot = true;
        self.prevent_interruption = true;
        self
    }

    fn released_on_input(mut self) -> Self {
        self.interrupt_on_input_release = true;
        self
    }

    fn directional(mut self, forward: &str, backward: &str, left: &str, right: &str) -> Self {
        self.directional = Some(DirectionalVariants {
            forward: forward.to_string(),
            backward: backward.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        });
        self
    }

    fn transitions(mut self, ids: &[&str]) -> Self {
        self.allowed_transitions = ids.iter().map(|id| id.to_string()).collect();
        self
    }
}

/// Полный набор состояний (порядок объявления = tie-break на равном priority)
pub fn builtin_states() -> Vec<StateSpec> {
    vec![
        // === Combo / combat (12..10) ===
        state("combo_attack", 12, StateKind::Combo, "attack")
            .when(ConditionSpec::combo("has_active_combo"))
            .protected_one_shot()
            .transitions(&["idle"]),
        state("parry", 12, StateKind::Combat, "sword_parry_backward")
            .when(ConditionSpec::combat("defense_type", "parry"))
            .protected_one_shot()
            .transitions(&["idle"]),
        state("dodge", 12, StateKind::Combat, "roll_dodge")
            .when(ConditionSpec::combat("defense_type", "dodge"))
            .protected_one_shot()
            .transitions(&["idle", "walk", "run"]),
        state("heavy_attack", 11, StateKind::Combat, "heavy_hammer_swing")
            .when(ConditionSpec::combat("attack_type", "heavy"))
            .protected_one_shot()
            .transitions(&["idle"]),
        state("charged_attack", 11, StateKind::Combat, "charged_axe_chop")
            .when(ConditionSpec::combat("attack_type", "charged"))
            .protected_one_shot()
            .transitions(&["idle"]),
        state("special_attack", 11, StateKind::Combat, "sword_judgment")
            .when(ConditionSpec::combat("attack_type", "special"))
            .protected_one_shot()
            .transitions(&["idle"]),
        state("attack", 10, StateKind::Combat, "attack")
            .when(ConditionSpec::combat("attack_type", "light"))
            .protected_one_shot()
            .transitions(&["idle"]),
        // === Locomotion ===
        {
            let mut jump = state("jump", 9, StateKind::Movement, "regular_jump")
                .when(ConditionSpec::physics(
                    JUMP_VELOCITY_PATH,
                    "greaterThan",
                    JUMP_VELOCITY_THRESHOLD,
                ))
                .transitions(&["idle", "walk", "run"]);
            // Прерываемый one-shot: в idle вернётся только после приземления клипа
            jump.one_shot = true;
            jump
        },
        state("swim", 8, StateKind::Movement, "swim_idle")
            .when(ConditionSpec::water("is_in_water"))
            .directional("swim_forward", "swim_idle", "swim_idle", "swim_idle")
            .transitions(&["idle", "walk", "run"]),
        state("crouch_walk", 7, StateKind::Movement, "crouch_walk_forward")
            .when(ConditionSpec::input("wants_to_crouch", true))
            .when(ConditionSpec::movement("has_movement"))
            .directional(
                "crouch_walk_forward",
                "crouch_walk_backward",
                "crouch_walk_left",
                "crouch_walk_right",
            )
            .released_on_input()
            .transitions(&["crouch_idle", "walk", "run", "idle"]),
        state("crouch_idle", 6, StateKind::Idle, "crouch_idle")
            .when(ConditionSpec::input("wants_to_crouch", true))
            .when(ConditionSpec::movement("no_movement"))
            .transitions(&["crouch_walk", "idle"]),
        state("run", 5, StateKind::Movement, "run")
            .when(ConditionSpec::input("is_running", true))
            .when(ConditionSpec::movement("has_movement"))
            .when(ConditionSpec::input("wants_to_crouch", false))
            .released_on_input()
            .transitions(&["idle", "walk", "attack", "crouch_walk"]),
        state("walk", 4, StateKind::Movement, "walk")
            .when(ConditionSpec::movement("has_movement"))
            .when(ConditionSpec::input("wants_to_crouch", false))
            .directional("walk_forward", "walk_backward", "walk_left", "walk_right")
            .released_on_input()
            .transitions(&["idle", "run", "attack", "crouch_walk"]),
        state(DEFAULT_STATE_ID, 1, StateKind::Idle, "combat_stance").transitions(&[
            "walk",
            "run",
            "attack",
            "jump",
            "swim",
            "crouch_walk",
            "crouch_idle",
        ]),
    ]
}
