//! Tests for combo tracking.

#[cfg(test)]
mod tests {
    use crate::combo::defaults::builtin_combos;
    use crate::combo::*;
    use crate::components::{ActionTrigger, InputSnapshot, WeaponCategory};
    use crate::errors::CatalogError;

    const TICK: f32 = 1.0 / 60.0;
    const SWORD: Option<WeaponCategory> = Some(WeaponCategory::Sword);

    fn catalog() -> ComboCatalog {
        ComboCatalog::build(builtin_combos()).unwrap()
    }

    #[test]
    fn test_first_attack_starts_compatible_chain() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();

        let progress = combo
            .process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK)
            .unwrap();

        assert_eq!(progress.combo_id, "basic_combo_3hit");
        assert_eq!(progress.step, 1);
        assert_eq!(progress.animation, "left_slash");
        assert!(!progress.queued);
        assert!(combo.is_active());
        assert_eq!(combo.combo_animation.as_deref(), Some("left_slash"));
    }

    #[test]
    fn test_weapon_filter() {
        let catalog = catalog();

        // Без оружия комбо нет
        let mut combo = ComboRuntime::default();
        assert_eq!(combo.process_input(Some(ActionTrigger::Attack), None, &catalog, TICK), None);

        // Generic: первая подходящая цепочка в порядке объявления
        let mut combo = ComboRuntime::default();
        let progress = combo
            .process_input(Some(ActionTrigger::Attack), Some(WeaponCategory::Generic), &catalog, TICK)
            .unwrap();
        assert_eq!(progress.combo_id, "basic_combo_3hit");

        // Hammer не подходит ни одной цепочке
        let mut combo = ComboRuntime::default();
        assert_eq!(
            combo.process_input(Some(ActionTrigger::HeavyAttack), Some(WeaponCategory::Hammer), &catalog, TICK),
            None
        );
    }

    #[test]
    fn test_input_during_clip_is_queued_and_promoted_on_finish() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();
        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK);

        // Второй удар через 0.2s, клип первого ещё играет
        let queued = combo
            .process_input(Some(ActionTrigger::Attack), SWORD, &catalog, 0.2)
            .unwrap();
        assert!(queued.queued);
        assert_eq!(queued.step, 2);
        assert_eq!(combo.step, 1);
        assert_eq!(combo.combo_animation.as_deref(), Some("left_slash"));

        // Клип закончился → шаг 2
        let promoted = combo.finish_step(&catalog).unwrap();
        assert_eq!(promoted.step, 2);
        assert_eq!(combo.combo_animation.as_deref(), Some("attack"));
        assert!(combo.is_active());
    }

    #[test]
    fn test_finish_without_pending_clears_combo_but_keeps_tracker() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();
        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK);

        assert_eq!(combo.finish_step(&catalog), None);
        assert!(!combo.is_active());
        assert_eq!(combo.combo_animation, None);
        assert_eq!(combo.chain.as_deref(), Some("basic_combo_3hit"));

        // Клип уже кончился, но окно ещё открыто → шаг 2 играет сразу
        let progress = combo
            .process_input(Some(ActionTrigger::Attack), SWORD, &catalog, 0.1)
            .unwrap();
        assert!(!progress.queued);
        assert_eq!(progress.step, 2);
    }

    #[test]
    fn test_full_three_hit_chain_completes() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();

        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK);
        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, 0.3);
        combo.finish_step(&catalog);
        let third = combo
            .process_input(Some(ActionTrigger::Attack), SWORD, &catalog, 0.3)
            .unwrap();
        combo.finish_step(&catalog);

        assert_eq!(third.step, 3);
        assert_eq!(combo.combo_animation.as_deref(), Some("double_blade_spin"));
        assert!(combo.is_complete);
        // Трекер ничего больше не ждёт
        assert_eq!(combo.chain, None);

        combo.finish_step(&catalog);
        assert!(!combo.is_active());
    }

    #[test]
    fn test_late_input_restarts_chain() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();
        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK);
        combo.finish_step(&catalog);

        // Окно шага 2 = 0.4s, ждём 0.45s (ещё не expiry 0.6s)
        let progress = combo
            .process_input(Some(ActionTrigger::Attack), SWORD, &catalog, 0.45)
            .unwrap();

        assert_eq!(progress.step, 1);
        assert_eq!(progress.animation, "left_slash");
    }

    #[test]
    fn test_tracker_expires_after_window_multiplier() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();
        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK);
        combo.finish_step(&catalog);

        // 0.4 * 1.5 = 0.6
        combo.process_input(None, SWORD, &catalog, 0.55);
        assert!(combo.chain.is_some());

        combo.process_input(None, SWORD, &catalog, 0.1);
        assert_eq!(combo.chain, None);
    }

    #[test]
    fn test_mismatched_input_on_non_cancelable_chain_is_ignored_mid_clip() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();
        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK);

        assert_eq!(
            combo.process_input(Some(ActionTrigger::HeavyAttack), SWORD, &catalog, TICK),
            None
        );
        assert_eq!(combo.chain.as_deref(), Some("basic_combo_3hit"));
        assert_eq!(combo.combo_animation.as_deref(), Some("left_slash"));
    }

    #[test]
    fn test_mismatched_input_cancels_cancelable_chain() {
        let catalog = catalog();
        let mut combo = ComboRuntime::default();
        combo.process_input(Some(ActionTrigger::HeavyAttack), SWORD, &catalog, TICK);
        combo.process_input(Some(ActionTrigger::HeavyAttack), SWORD, &catalog, 0.2);
        assert!(combo.pending.is_some());

        combo.process_input(Some(ActionTrigger::Attack), SWORD, &catalog, TICK);
        assert_eq!(combo.pending, None);
        assert_eq!(combo.chain, None);

        // Клип heavy доигрывает, продолжения нет
        assert_eq!(combo.finish_step(&catalog), None);
        assert!(!combo.is_active());
    }

    #[test]
    fn test_combo_trigger_precedence() {
        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Attack);
        input.press(ActionTrigger::SpecialAttack);
        assert_eq!(combo_trigger(&input), Some(ActionTrigger::SpecialAttack));

        input.press(ActionTrigger::HeavyAttack);
        assert_eq!(combo_trigger(&input), Some(ActionTrigger::HeavyAttack));

        // Только свежие нажатия
        input.end_frame();
        assert_eq!(combo_trigger(&input), None);
    }

    #[test]
    fn test_catalog_validation() {
        let mut chains = builtin_combos();
        chains[1].steps.clear();
        assert!(matches!(ComboCatalog::build(chains), Err(CatalogError::EmptyCombo(_))));

        let mut chains = builtin_combos();
        chains.push(chains[0].clone());
        assert!(matches!(ComboCatalog::build(chains), Err(CatalogError::DuplicateCombo(_))));
    }
}
