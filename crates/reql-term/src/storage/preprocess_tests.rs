use reql_core::{BacktraceId, BacktraceRegistry, Frame};
use serde_json::json;

use super::preprocess::preprocess_term_tree;
use super::*;

#[test]
fn canonicalizes_shorthand() {
    let mut term = json!([24, [1, {"a": "x"}, null]]);
    let mut reg = BacktraceRegistry::new();

    let visited = preprocess_term_tree(&mut term, &mut reg, BacktraceId::EMPTY).unwrap();

    assert_eq!(visited, 5);
    assert_eq!(
        term,
        json!([24, [
            [1, 1, 1],
            [3, [], {"a": [1, "x", 3]}, 2],
            [1, null, 4]
        ], {}, 0])
    );
    assert_eq!(reg.len(), 4);
}

#[test]
fn frames_follow_the_path() {
    let mut term = json!([39, [[15, ["users"]]], {"default": true}]);
    let mut reg = BacktraceRegistry::new();

    preprocess_term_tree(&mut term, &mut reg, BacktraceId::EMPTY).unwrap();

    let bt = |value: &serde_json::Value| BacktraceId::from_raw(value.as_u64().unwrap() as u32);
    let table = &term[1][0];
    let users = &table[1][0];
    let default = &term[2]["default"];
    assert_eq!(reg.frames(bt(&table[3])).unwrap(), [&Frame::Arg(0)]);
    assert_eq!(
        reg.frames(bt(&users[2])).unwrap(),
        [&Frame::Arg(0), &Frame::Arg(0)]
    );
    assert_eq!(
        reg.frames(bt(&default[2])).unwrap(),
        [&Frame::Opt("default".to_owned())]
    );
}

#[test]
fn client_position_ids_are_replaced() {
    let mut term = json!([24, [[1, 5, 77]], {}, 99]);
    let mut reg = BacktraceRegistry::new();

    preprocess_term_tree(&mut term, &mut reg, BacktraceId::EMPTY).unwrap();

    assert_eq!(term, json!([24, [[1, 5, 1]], {}, 0]));
}

#[test]
fn rejects_malformed_terms() {
    let mut reg = BacktraceRegistry::new();
    for mut term in [
        json!([]),
        json!([1]),
        json!([24, [], {}, 0, 0]),
        json!([24, {}]),
        json!([24, [], []]),
        json!([-3]),
    ] {
        let res = preprocess_term_tree(&mut term, &mut reg, BacktraceId::EMPTY);
        assert!(res.is_err(), "{term}");
    }
}

#[test]
fn result_reads_back_through_raw_term() {
    let mut term = json!({"n": [2, [1, 2]]});
    let mut reg = BacktraceRegistry::new();

    preprocess_term_tree(&mut term, &mut reg, BacktraceId::EMPTY).unwrap();

    let root = RawTerm::from_json(&term, "").unwrap();
    let n = root.optarg("n").unwrap().unwrap();
    assert_eq!(n.bt(), BacktraceId::from_raw(1));
    assert_eq!(n.arg(1).unwrap().bt(), BacktraceId::from_raw(3));
}
