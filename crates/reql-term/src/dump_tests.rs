use indoc::indoc;
use reql_core::{BacktraceId, Datum, TermType};

use super::*;

fn dump_json(input: &str) -> String {
    let doc: serde_json::Value = serde_json::from_str(input).unwrap();
    dump(RawTerm::from_json(&doc, "").unwrap()).unwrap()
}

#[test]
fn dump_add() {
    let res = dump_json("[24, [1, 2]]");

    insta::assert_snapshot!(res, @r"
    ADD
      DATUM = 1
      DATUM = 2
    ");
}

#[test]
fn dump_nested_with_bt() {
    let input = indoc! {r#"
        [39, [
            [15, [[14, [[1, "test", 3]], {}, 2], "users"], {"read_mode": "outdated"}, 1],
            [69, [[2, [1]], [17, [[31, [[10, [1]], "age"]], 21]]]]
        ], {"default": false}]
    "#};

    let res = dump_json(input);

    insta::assert_snapshot!(res, @r#"
    FILTER
      TABLE #1
        DB #2
          DATUM #3 = "test"
        DATUM = "users"
        read_mode: DATUM = "outdated"
      FUNC
        MAKE_ARRAY
          DATUM = 1
        EQ
          GET_FIELD
            VAR
              DATUM = 1
            DATUM = "age"
          DATUM = 21
      default: DATUM = false
    "#);
}

#[test]
fn dump_object_shorthand() {
    let res = dump_json(r#"{"name": "ada", "tags": [1, ["x", "y"]]}"#);

    insta::assert_snapshot!(res, @r#"
    MAKE_OBJ
      name: DATUM = "ada"
      tags: DATUM = ["x","y"]
    "#);
}

#[test]
fn dump_generated() {
    let table = GeneratedTerm::new(TermType::Table, BacktraceId::from_raw(2))
        .with_arg(GeneratedTerm::datum_term("users", BacktraceId::from_raw(3)));
    let blob = GeneratedTerm::datum_term(Datum::Binary(vec![0xde, 0xad]), BacktraceId::EMPTY);
    let root = GeneratedTerm::new(TermType::Insert, BacktraceId::from_raw(1))
        .with_arg(table)
        .with_arg(blob)
        .with_optarg("durability", GeneratedTerm::datum_term("soft", BacktraceId::EMPTY))
        .share();

    let res = dump(RawTerm::from_generated(&root)).unwrap();

    insta::assert_snapshot!(res, @r#"
    INSERT #1
      TABLE #2
        DATUM #3 = "users"
      DATUM = {"$reql_type$":"BINARY","data":"3q0="}
      durability: DATUM = "soft"
    "#);
}

#[test]
fn dump_reports_malformed_children() {
    let doc = serde_json::json!([24, [1, ["x"]]]);

    let err = dump(RawTerm::from_json(&doc, "").unwrap()).unwrap_err();

    assert!(matches!(err, TermError::Malformed(_)));
}
