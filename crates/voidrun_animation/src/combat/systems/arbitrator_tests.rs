//! Tests for combat arbitration.

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::combat::defaults::builtin_actions;
    use crate::combat::*;
    use crate::components::{ActionTrigger, Equipment, InputSnapshot, WeaponCategory};
    use crate::config::AnimationCatalogs;
    use crate::states::{defaults::builtin_states, StateCatalog};

    const TICK: f32 = 1.0 / 60.0;

    fn arbitrate(
        catalogs: &AnimationCatalogs,
        runtime: &mut CombatRuntime,
        input: &mut InputSnapshot,
        equipment: Option<&Equipment>,
        delta: f32,
    ) -> Option<ActionActivation> {
        arbitrate_combat_action(
            runtime,
            input,
            equipment,
            false,
            &catalogs.actions,
            &catalogs.states,
            delta,
        )
    }

    #[test]
    fn test_light_attack_activates_with_bound_animation() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Attack);

        let activation = arbitrate(&catalogs, &mut runtime, &mut input, None, TICK).unwrap();

        assert_eq!(activation.action_id, "lightAttack");
        assert_eq!(activation.state_id, "attack");
        assert_eq!(runtime.attack_type, Some(AttackType::Light));
        assert_eq!(runtime.combat_animation.as_deref(), Some("attack"));
        assert!(runtime.is_attacking);
    }

    #[test]
    fn test_active_action_blocks_new_actions() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Attack);
        arbitrate(&catalogs, &mut runtime, &mut input, None, TICK).unwrap();

        // Attack всё ещё зажат, плюс новый dodge
        input.press(ActionTrigger::Dodge);
        for _ in 0..10 {
            assert_eq!(arbitrate(&catalogs, &mut runtime, &mut input, None, TICK), None);
        }
        assert!(runtime.is_active("lightAttack"));
    }

    #[test]
    fn test_first_declared_action_wins() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Attack);
        input.press(ActionTrigger::HeavyAttack);
        input.press(ActionTrigger::Dodge);

        let activation = arbitrate(&catalogs, &mut runtime, &mut input, None, TICK).unwrap();

        // dodge объявлен первым
        assert_eq!(activation.action_id, "dodge");
        assert_eq!(runtime.defense_type, Some(DefenseType::Dodge));
        assert_eq!(runtime.attack_type, None);
    }

    #[test]
    fn test_dodge_latch_consumed_on_activation_only() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();

        // Нажали и отпустили до тика: latch держит намерение
        input.press(ActionTrigger::Dodge);
        input.release(ActionTrigger::Dodge);
        assert!(input.is_latched(ActionTrigger::Dodge));

        let activation = arbitrate(&catalogs, &mut runtime, &mut input, None, TICK).unwrap();
        assert_eq!(activation.action_id, "dodge");
        assert!(!input.is_latched(ActionTrigger::Dodge));

        // Held trigger'ы не трогаются
        let mut input = InputSnapshot::default();
        let mut runtime = CombatRuntime::default();
        input.press(ActionTrigger::Attack);
        arbitrate(&catalogs, &mut runtime, &mut input, None, TICK).unwrap();
        assert!(input.is_held(ActionTrigger::Attack));
    }

    #[test]
    fn test_dodge_cooldown_rejects_at_0_4_accepts_at_0_6() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();

        // t = 0
        input.press(ActionTrigger::Dodge);
        assert!(arbitrate(&catalogs, &mut runtime, &mut input, None, 0.0).is_some());
        runtime.end_action(false);

        input.release(ActionTrigger::Dodge);
        input.end_frame();

        // t = 0.4: cooldown 0.5 ещё не истёк
        input.press(ActionTrigger::Dodge);
        input.release(ActionTrigger::Dodge);
        assert_eq!(arbitrate(&catalogs, &mut runtime, &mut input, None, 0.4), None);
        assert!(runtime.is_on_cooldown("dodge"));
        input.end_frame();

        // t = 0.6: cooldown истёк, но отклонённое нажатие не повторяется само
        assert_eq!(arbitrate(&catalogs, &mut runtime, &mut input, None, 0.2), None);
        assert!(!runtime.is_on_cooldown("dodge"));

        input.press(ActionTrigger::Dodge);
        let activation = arbitrate(&catalogs, &mut runtime, &mut input, None, 0.0).unwrap();
        assert_eq!(activation.action_id, "dodge");
    }

    #[test]
    fn test_held_dodge_does_not_refire() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();

        input.press(ActionTrigger::Dodge);
        assert!(arbitrate(&catalogs, &mut runtime, &mut input, None, TICK).is_some());
        runtime.end_action(false);
        input.end_frame();

        // Кнопку не отпускали: после cooldown'а нового dodge нет
        for _ in 0..60 {
            input.press(ActionTrigger::Dodge);
            assert_eq!(arbitrate(&catalogs, &mut runtime, &mut input, None, TICK), None);
            input.end_frame();
        }
    }

    #[test]
    fn test_cooldowns_tick_during_active_action_and_combo() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        runtime.cooldowns.insert("specialAttack".to_string(), 1.0);
        runtime.active_action = Some("lightAttack".to_string());
        let mut input = InputSnapshot::default();

        arbitrate(&catalogs, &mut runtime, &mut input, None, 0.5);
        assert!((runtime.cooldown_remaining("specialAttack") - 0.5).abs() < 1e-6);

        runtime.active_action = None;
        arbitrate_combat_action(
            &mut runtime,
            &mut input,
            None,
            true,
            &catalogs.actions,
            &catalogs.states,
            0.6,
        );
        assert!(!runtime.is_on_cooldown("specialAttack"));
    }

    #[test]
    fn test_active_combo_suppresses_actions() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Attack);

        let result = arbitrate_combat_action(
            &mut runtime,
            &mut input,
            None,
            true,
            &catalogs.actions,
            &catalogs.states,
            TICK,
        );

        assert_eq!(result, None);
        assert!(!runtime.is_action_active());
    }

    #[test]
    fn test_equipment_gating() {
        let catalogs = AnimationCatalogs::builtin().unwrap();

        // Parry без оружия: не ошибка, просто не подходит
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Parry);
        assert_eq!(arbitrate(&catalogs, &mut runtime, &mut input, None, TICK), None);

        let axe = Equipment::armed(WeaponCategory::Axe);
        assert_eq!(
            arbitrate(&catalogs, &mut runtime, &mut input, Some(&axe), TICK)
                .map(|a| a.action_id),
            Some("parry".to_string())
        );

        // Special: только меч
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::SpecialAttack);
        assert_eq!(arbitrate(&catalogs, &mut runtime, &mut input, Some(&axe), TICK), None);

        let sword = Equipment::armed(WeaponCategory::Sword);
        let activation = arbitrate(&catalogs, &mut runtime, &mut input, Some(&sword), TICK).unwrap();
        assert_eq!(activation.action_id, "specialAttack");
        assert_eq!(runtime.combat_animation.as_deref(), Some("sword_judgment"));
    }

    #[test]
    fn test_missing_state_at_activation_is_not_started() {
        let full = AnimationCatalogs::builtin().unwrap();

        // Каталог без состояния `attack`
        let reduced_specs = builtin_states()
            .into_iter()
            .filter(|state| state.id != "attack")
            .collect();
        let reduced = StateCatalog::build(reduced_specs, "idle").unwrap();

        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Attack);

        let result = arbitrate_combat_action(
            &mut runtime,
            &mut input,
            None,
            false,
            &full.actions,
            &reduced,
            TICK,
        );

        assert_eq!(result, None);
        assert!(!runtime.is_action_active());
        assert!(!runtime.is_on_cooldown("lightAttack"));
    }

    #[test]
    fn test_catalog_rejects_unknown_state_ref() {
        let states = StateCatalog::build(builtin_states(), "idle").unwrap();
        let mut actions = builtin_actions();
        actions[0].state = "backflip".to_string();

        let result = CombatActionCatalog::build(actions, &states);
        assert!(matches!(
            result,
            Err(crate::errors::CatalogError::UnknownStateRef { .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicate_action() {
        let states = StateCatalog::build(builtin_states(), "idle").unwrap();
        let mut actions = builtin_actions();
        actions.push(actions[0].clone());

        assert!(matches!(
            CombatActionCatalog::build(actions, &states),
            Err(crate::errors::CatalogError::DuplicateAction(id)) if id == "dodge"
        ));
    }

    /// Random input, 2000 тиков: никогда больше одного нового экшена за тик,
    /// и никогда новый экшен поверх активного.
    #[test]
    fn test_at_most_one_action_per_tick_randomized() {
        let catalogs = AnimationCatalogs::builtin().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut runtime = CombatRuntime::default();
        let mut input = InputSnapshot::default();
        let sword = Equipment::armed(WeaponCategory::Sword);

        for _ in 0..2000 {
            for trigger in ActionTrigger::ALL {
                if rng.gen_bool(0.2) {
                    input.press(trigger);
                } else if rng.gen_bool(0.5) {
                    input.release(trigger);
                }
            }

            let was_active = runtime.is_action_active();
            let activation = arbitrate(&catalogs, &mut runtime, &mut input, Some(&sword), TICK);

            if was_active {
                assert!(activation.is_none());
            }
            if activation.is_some() {
                assert!(runtime.is_action_active());
            }

            // Иногда "клип закончился"
            if runtime.is_action_active() && rng.gen_bool(0.1) {
                runtime.end_action(input.is_held(ActionTrigger::Parry));
            }
            input.end_frame();
        }
    }
}
