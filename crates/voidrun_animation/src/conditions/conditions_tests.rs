//! Tests for condition compilation and evaluation.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{AttackType, CombatRuntime, DefenseType};
    use crate::combo::ComboRuntime;
    use crate::components::{ActionTrigger, InputSnapshot, PhysicsSnapshot};
    use crate::conditions::*;
    use crate::errors::ConditionError;

    fn ctx<'a>(
        input: Option<&'a InputSnapshot>,
        physics: Option<&'a PhysicsSnapshot>,
    ) -> ConditionContext<'a> {
        ConditionContext {
            input,
            physics,
            combo: None,
            combat: None,
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let spec = ConditionSpec::new("telepathy", "anything");
        assert_eq!(
            compile(&spec),
            Err(ConditionError::UnknownKind("telepathy".to_string()))
        );
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let spec = ConditionSpec::physics("velocity.y", "approximately", 0.1);
        assert!(matches!(
            compile(&spec),
            Err(ConditionError::UnknownOperator { .. })
        ));

        // Predicate-style kinds вообще не принимают operator
        let spec = ConditionSpec::movement("has_movement").with_operator("equals");
        assert!(matches!(
            compile(&spec),
            Err(ConditionError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn test_unknown_input_property_rejected() {
        let spec = ConditionSpec::input("wants_to_fly", true);
        assert!(matches!(
            compile(&spec),
            Err(ConditionError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_missing_value_rejected() {
        let spec = ConditionSpec::new("input", "wants_to_attack");
        assert!(matches!(
            compile(&spec),
            Err(ConditionError::MissingValue { .. })
        ));
    }

    #[test]
    fn test_combat_attack_type_must_be_known() {
        let spec = ConditionSpec::combat("attack_type", "sneaky");
        assert!(matches!(compile(&spec), Err(ConditionError::ValueType { .. })));
    }

    #[test]
    fn test_input_flag_condition() {
        let condition = compile(&ConditionSpec::input("wants_to_crouch", true)).unwrap();

        let mut input = InputSnapshot::default();
        assert!(!condition.evaluate(&ctx(Some(&input), None)));

        input.wants_to_crouch = true;
        assert!(condition.evaluate(&ctx(Some(&input), None)));
    }

    #[test]
    fn test_input_condition_sees_latched_trigger() {
        let condition = compile(&ConditionSpec::input("wants_to_dodge", true)).unwrap();

        let mut input = InputSnapshot::default();
        input.press(ActionTrigger::Dodge);
        input.release(ActionTrigger::Dodge);

        assert!(condition.evaluate(&ctx(Some(&input), None)));
    }

    #[test]
    fn test_missing_context_fails_closed() {
        let empty = ConditionContext::default();
        let specs = [
            ConditionSpec::input("is_running", false),
            ConditionSpec::physics("velocity.y", "lessThan", 100.0),
            ConditionSpec::movement("no_movement"),
            ConditionSpec::combo("has_active_combo"),
            ConditionSpec::combat("attack_type", "light"),
            ConditionSpec::water("not_in_water"),
        ];

        for spec in specs {
            let condition = compile(&spec).unwrap();
            assert!(!condition.evaluate(&empty), "{:?} must be false on empty context", spec);
        }
    }

    #[test]
    fn test_physics_relational_operators() {
        let physics = PhysicsSnapshot {
            velocity: Vec3::new(0.0, 0.5, 0.0),
            ..default()
        };
        let context = ctx(None, Some(&physics));

        let cases = [
            ("greaterThan", 0.1, true),
            ("greaterThan", 0.5, false),
            ("greaterThanOrEqual", 0.5, true),
            ("lessThan", 0.5, false),
            ("lessThanOrEqual", 0.5, true),
            ("equals", 0.5, true),
            ("notEquals", 0.5, false),
        ];

        for (op, value, expected) in cases {
            let condition = compile(&ConditionSpec::physics("velocity.y", op, value)).unwrap();
            assert_eq!(condition.evaluate(&context), expected, "velocity.y {} {}", op, value);
        }
    }

    #[test]
    fn test_physics_axis_paths_resolve_independently() {
        let physics = PhysicsSnapshot {
            velocity: Vec3::new(1.0, 2.0, 3.0),
            ..default()
        };
        let context = ctx(None, Some(&physics));

        for (path, expected) in [("velocity.x", 1.0), ("velocity.y", 2.0), ("velocity.z", 3.0)] {
            let condition = compile(&ConditionSpec::physics(path, "equals", expected)).unwrap();
            assert!(condition.evaluate(&context), "{} == {}", path, expected);
        }

        let falling_z = compile(&ConditionSpec::physics("velocity.z", "lessThan", 0.0)).unwrap();
        assert!(!falling_z.evaluate(&context));
    }

    #[test]
    fn test_unresolvable_physics_path_is_false() {
        let physics = PhysicsSnapshot::default();
        let condition = compile(&ConditionSpec::physics("angular.y", "lessThan", 1.0)).unwrap();

        assert!(!condition.evaluate(&ctx(None, Some(&physics))));
    }

    #[test]
    fn test_movement_presence() {
        let has = compile(&ConditionSpec::movement("has_movement")).unwrap();
        let none = compile(&ConditionSpec::movement("no_movement")).unwrap();

        let mut input = InputSnapshot::default();
        assert!(!has.evaluate(&ctx(Some(&input), None)));
        assert!(none.evaluate(&ctx(Some(&input), None)));

        input.move_vector = Vec2::new(1.0, 0.0);
        assert!(has.evaluate(&ctx(Some(&input), None)));
        assert!(!none.evaluate(&ctx(Some(&input), None)));
    }

    #[test]
    fn test_combat_and_combo_predicates() {
        let combat = CombatRuntime {
            active_action: Some("parry".to_string()),
            defense_type: Some(DefenseType::Parry),
            combat_animation: Some("sword_parry_backward".to_string()),
            ..default()
        };
        let combo = ComboRuntime {
            active_combo: Some("basic_combo_3hit".to_string()),
            step: 2,
            combo_animation: Some("attack".to_string()),
            ..default()
        };
        let context = ConditionContext {
            combat: Some(&combat),
            combo: Some(&combo),
            ..default()
        };

        let holds = |spec: ConditionSpec| compile(&spec).unwrap().evaluate(&context);

        assert!(holds(ConditionSpec::combat("defense_type", "parry")));
        assert!(!holds(ConditionSpec::combat("defense_type", "dodge")));
        assert!(!holds(ConditionSpec::combat("attack_type", "light")));
        assert!(holds(ConditionSpec::combat("combat_animation", "sword_parry_backward")));

        assert!(holds(ConditionSpec::combo("has_active_combo")));
        assert!(holds(
            ConditionSpec::combo("combo_id").with_value(ConditionValue::Text("basic_combo_3hit".into()))
        ));
        assert!(holds(ConditionSpec::combo("step").with_value(ConditionValue::Number(2.0))));
        assert!(!holds(ConditionSpec::combo("step").with_value(ConditionValue::Number(3.0))));
        assert_eq!(AttackType::parse("light"), Some(AttackType::Light));
    }

    #[test]
    fn test_water_condition() {
        let in_water = compile(&ConditionSpec::water("is_in_water")).unwrap();
        let physics = PhysicsSnapshot {
            submerged: true,
            ..default()
        };

        assert!(in_water.evaluate(&ctx(None, Some(&physics))));
        assert!(!in_water.evaluate(&ctx(None, Some(&PhysicsSnapshot::default()))));
    }

    #[test]
    fn test_type_mismatch_compares_false() {
        assert!(!compare(
            &ConditionValue::Bool(true),
            CompareOp::Equals,
            &ConditionValue::Number(1.0)
        ));
        assert!(!compare(
            &ConditionValue::Text("a".into()),
            CompareOp::GreaterThan,
            &ConditionValue::Text("b".into())
        ));
    }

    #[test]
    fn test_empty_condition_list_holds() {
        assert!(all_hold(&[], &ConditionContext::default()));
    }
}
