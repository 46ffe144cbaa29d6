use formrel_model::{
    ActionSpec, Dependency, LogicSpec, PatternSpec, Relation, RelationError, RelationId,
};
use serde_json::json;

// ── Dependency ───────────────────────────────────────────────────

#[test]
fn equal_shorthand_sets_logic_and_value() {
    let dep = Dependency::equal("country", "US");
    assert_eq!(dep.id, "country");
    assert_eq!(dep.logic.name(), Some("equal"));
    assert_eq!(dep.value, json!("US"));
}

#[test]
fn child_name_is_accepted_as_id() {
    let dep: Dependency =
        serde_json::from_value(json!({"childName": "age", "logic": "equal", "value": 18}))
            .unwrap();
    assert_eq!(dep.id, "age");
    assert_eq!(dep.value, json!(18));
}

#[test]
fn params_default_to_empty() {
    let dep: Dependency = serde_json::from_value(json!({"id": "a", "logic": "equal"})).unwrap();
    assert!(dep.params.is_empty());
    assert!(dep.value.is_null());
}

#[test]
fn missing_logic_parses_as_unnamed() {
    let dep: Dependency = serde_json::from_value(json!({"id": "a", "value": "1"})).unwrap();
    assert_eq!(dep.logic.name(), Some(""));
}

#[test]
fn with_param_is_readable() {
    let dep = Dependency::new("age", "at_least").with_param("min", 18);
    assert_eq!(dep.param("min"), Some(&json!(18)));
    assert_eq!(dep.param("max"), None);
}

#[test]
fn inline_logic_dependency() {
    let dep = Dependency::new("a", LogicSpec::from_fn(|_, _| true));
    assert!(dep.logic.is_inline());
}

// ── Relation ─────────────────────────────────────────────────────

#[test]
fn builder_defaults_pattern_to_all() {
    let relation = Relation::new(vec![Dependency::equal("a", "1")])
        .target("b")
        .action("show");
    assert_eq!(relation.pattern.name(), Some("all"));
    assert_eq!(relation.targets, vec!["b".to_string()]);
    assert_eq!(relation.actions.len(), 1);
}

#[test]
fn single_target_and_action_strings_are_accepted() {
    let relation: Relation = serde_json::from_value(json!({
        "dependences": [{"id": "a", "logic": "equal", "value": "1"}],
        "targets": "b",
        "actions": "hide"
    }))
    .unwrap();
    assert_eq!(relation.targets, vec!["b".to_string()]);
    assert_eq!(relation.actions[0].name(), Some("hide"));
}

#[test]
fn missing_pattern_deserializes_as_all() {
    let relation: Relation = serde_json::from_value(json!({
        "dependences": [{"id": "a", "logic": "equal"}],
        "targets": ["b"],
        "actions": ["show"]
    }))
    .unwrap();
    assert_eq!(relation.pattern.name(), Some("all"));
}

#[test]
fn validate_accepts_complete_relation() {
    let relation = Relation::new(vec![Dependency::equal("a", "1")])
        .target("b")
        .action("show");
    assert!(relation.validate(RelationId::new(0)).is_ok());
}

#[test]
fn validate_rejects_empty_dependences() {
    let relation = Relation::new(Vec::new()).target("b").action("show");
    let err = relation.validate(RelationId::new(2)).unwrap_err();
    match err {
        RelationError::InvalidRelation { relation, reason } => {
            assert_eq!(relation, "#2");
            assert_eq!(reason, "no dependences declared");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn validate_rejects_missing_targets_and_actions() {
    let no_targets = Relation::new(vec![Dependency::equal("a", "1")]).action("show");
    assert!(no_targets.validate(RelationId::new(0)).is_err());

    let no_actions = Relation::new(vec![Dependency::equal("a", "1")]).target("b");
    assert!(no_actions.validate(RelationId::new(0)).is_err());
}

#[test]
fn label_prefers_name() {
    let relation = Relation::new(vec![Dependency::equal("a", "1")]).named("country-state");
    assert_eq!(relation.label(RelationId::new(4)), "'country-state'");
    let anonymous = Relation::new(vec![Dependency::equal("a", "1")]);
    assert_eq!(anonymous.label(RelationId::new(4)), "#4");
}

#[test]
fn inline_pattern_and_action_build() {
    let relation = Relation::new(vec![Dependency::equal("a", "1")])
        .pattern(PatternSpec::from_fn(|states| states.iter().filter(|s| **s).count() >= 2))
        .target("b")
        .action(ActionSpec::from_fn(|_, _| Ok(())));
    assert!(relation.pattern.is_inline());
    assert!(relation.actions[0].is_inline());
}
