//! End-to-end scenarios: rule parsing -> conversion -> compilation -> prediction.

use state_algebra::{Engine, Ternary};

fn engine_s123() -> Engine {
    let mut engine = Engine::new(vec![
        "x1".to_string(),
        "x2".to_string(),
        "x3".to_string(),
        "x4".to_string(),
    ])
    .unwrap();
    engine.add_rule("x1 = (x2 && x3)").unwrap();
    engine.add_rule("x2 <= (!x3 || !x4)").unwrap();
    engine.add_evidence(vec![("x4", false)]).unwrap();
    engine.compile();
    engine
}

#[test]
fn s1_compiles_with_both_consolidated_variables_undetermined() {
    let engine = engine_s123();
    assert_eq!(engine.get_variable_value("x1").unwrap(), Ternary::DontCare);
    assert_eq!(engine.get_variable_value("x2").unwrap(), Ternary::DontCare);
}

#[test]
fn s2_predict_forces_x3_false() {
    let engine = engine_s123();
    let result = engine.predict(vec![("x1", false), ("x2", true)]).unwrap();
    assert!(!result.is_empty());
    assert_eq!(result.get_value("x3").unwrap(), Ternary::False);
}

#[test]
fn s3_predict_forces_x2_false() {
    let engine = engine_s123();
    let result = engine.predict(vec![("x1", false), ("x3", true)]).unwrap();
    assert!(!result.is_empty());
    assert_eq!(result.get_value("x2").unwrap(), Ternary::False);
}

#[test]
fn s4_contradiction_yields_empty_valid_set() {
    let mut engine = Engine::new(vec!["a".to_string(), "b".to_string()]).unwrap();
    engine.add_rule("a = b").unwrap();
    engine.add_rule("a = !b").unwrap();
    engine.compile();
    assert!(engine.valid_set().unwrap().is_empty());
}

#[test]
fn s5_tautology_yields_single_all_dont_care_object() {
    let mut engine = Engine::new(vec!["a".to_string()]).unwrap();
    engine.add_rule("a || !a").unwrap();
    engine.compile();
    let valid_set = engine.valid_set().unwrap();
    assert_eq!(valid_set.len(), 1);
    assert_eq!(valid_set.get_value("a").unwrap(), Ternary::DontCare);
}

#[test]
fn s6_xor_expands_to_exactly_four_assignments() {
    let mut engine = Engine::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]).unwrap();
    engine.add_rule("a = (b ^^ c)").unwrap();
    engine.compile();

    let mut dicts = engine.valid_set_iter_dicts().unwrap();
    dicts.sort_by_key(|d| (d["a"], d["b"], d["c"]));

    let expected = {
        let mut v = vec![
            (false, false, false),
            (true, false, true),
            (true, true, false),
            (false, true, true),
        ];
        v.sort();
        v
    };

    assert_eq!(dicts.len(), 4);
    let actual: Vec<(bool, bool, bool)> = dicts.iter().map(|d| (d["a"], d["b"], d["c"])).collect();
    assert_eq!(actual, expected);
}

#[test]
fn add_rule_after_compile_requires_recompiling() {
    let mut engine = engine_s123();
    assert!(engine.is_compiled());
    engine.add_rule("x3 || !x3").unwrap();
    assert!(!engine.is_compiled());
    engine.compile();
    assert!(engine.is_compiled());
}

#[test]
fn unknown_variable_in_rule_is_rejected() {
    let mut engine = Engine::new(vec!["a".to_string()]).unwrap();
    assert!(engine.add_rule("a && z").is_err());
}

#[test]
fn malformed_rule_is_rejected() {
    let mut engine = Engine::new(vec!["a".to_string()]).unwrap();
    assert!(engine.add_rule("a &&").is_err());
}
