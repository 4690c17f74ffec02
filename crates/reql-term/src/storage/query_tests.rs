use indoc::indoc;
use reql_core::{BacktraceId, Frame, QueryType, ReqlVersion, TermType};
use serde_json::Value;

use super::*;
use crate::{DiagnosticDatum, dump};

fn store(input: &str) -> QueryTermStore {
    QueryTermStore::parse(input.as_bytes().to_vec(), ReqlVersion::LATEST).unwrap()
}

#[test]
fn envelope_without_building_root() {
    // The root term is unknown garbage; only the envelope is inspected.
    let store = store(indoc! {r#"
        {
            "type": 1,
            "global_optargs": {"db": "test", "noreply": [1, true], "profile": "yes"},
            "query": ["not", "a", "term"]
        }
    "#});

    assert_eq!(store.query_type().unwrap(), QueryType::Start);
    assert!(store.static_optarg_as_bool("noreply", false).unwrap());
    assert!(!store.static_optarg_as_bool("profile", false).unwrap());
    assert!(store.static_optarg_as_bool("absent", true).unwrap());

    let global = store.global_optargs().unwrap();
    assert_eq!(global.names().collect::<Vec<_>>(), ["db", "noreply", "profile"]);
    let db = global.get("db").unwrap();
    assert_eq!(db.diagnostic_datum().unwrap(), Some("test".into()));

    assert!(matches!(store.root_term(), Err(TermError::Malformed(_))));
}

#[test]
fn array_envelope() {
    let store = store(r#"[1, [24, [1, 2]], {"noreply": true}]"#);

    assert_eq!(store.query_type().unwrap(), QueryType::Start);
    assert!(store.static_optarg_as_bool("noreply", false).unwrap());
    let root = store.root_term().unwrap();
    assert_eq!(root.term_type(), TermType::Add);
    assert_eq!(root.num_args(), 2);
}

#[test]
fn keyed_envelope_defaults_to_start() {
    let store = store(r#"{"query": [24, [1, 2]]}"#);

    assert_eq!(store.query_type().unwrap(), QueryType::Start);
    assert!(store.global_optargs().unwrap().is_empty());
    assert!(!store.static_optarg_as_bool("noreply", false).unwrap());
}

#[test]
fn query_types() {
    assert_eq!(store("[2]").query_type().unwrap(), QueryType::Continue);
    assert_eq!(store("[4]").query_type().unwrap(), QueryType::NoreplyWait);
    assert!(matches!(
        store("[42]").query_type(),
        Err(TermError::UnknownQueryType(42))
    ));
    assert!(matches!(
        store("[]").query_type(),
        Err(TermError::MissingNode("query type"))
    ));
    assert!(matches!(
        store(r#"["START"]"#).query_type(),
        Err(TermError::Malformed(_))
    ));
}

#[test]
fn missing_root_term() {
    let store = store("[3]");

    let err = store.root_term().unwrap_err();

    assert!(matches!(err, TermError::MissingNode("query term")));
    assert_eq!(err.to_string(), "missing query term");
}

#[test]
fn non_envelope_document() {
    let store = store("42");

    assert!(matches!(store.query_type(), Err(TermError::Malformed(_))));
    assert!(matches!(store.root_term(), Err(TermError::Malformed(_))));
}

#[test]
fn static_bool_only_reads_literals() {
    let store = store(r#"[1, [24, []], {"a": [1, false, 7], "b": [10, [1]], "c": [1, true, 1, 2]}]"#);

    assert!(!store.static_optarg_as_bool("a", true).unwrap());
    assert!(store.static_optarg_as_bool("b", true).unwrap());
    assert!(!store.static_optarg_as_bool("c", false).unwrap());
}

#[test]
fn invalid_json() {
    let err = QueryTermStore::parse(b"[1, ".to_vec(), ReqlVersion::LATEST).unwrap_err();

    assert!(matches!(err, TermError::Json(_)));
}

#[test]
fn keeps_original_bytes() {
    let input = r#"[1, [24, [1, 2]]]"#;
    let store = QueryTermStore::parse(input.as_bytes().to_vec(), ReqlVersion::V1_16).unwrap();

    assert_eq!(store.original_data(), input.as_bytes());
    assert_eq!(store.version(), ReqlVersion::V1_16);
}

#[test]
fn preprocess_assigns_position_ids() {
    let mut store = store(r#"[1, [24, [1, {"a": 2}]], {"db": "test"}]"#);

    store.preprocess().unwrap();

    let root = store.root_term().unwrap();
    insta::assert_snapshot!(dump(root).unwrap(), @r"
    ADD
      DATUM #1 = 1
      MAKE_OBJ #2
        a: DATUM #3 = 2
    ");

    let reg = store.backtrace_registry();
    let frames = reg.frames(root.arg(1).unwrap().optarg("a").unwrap().unwrap().bt());
    assert_eq!(
        frames.unwrap(),
        [&Frame::Arg(1), &Frame::Opt("a".to_owned())]
    );

    let db = store.global_optargs().unwrap();
    let db = db.get("db").unwrap();
    assert_eq!(reg.frames(db.bt()).unwrap(), [&Frame::Opt("db".to_owned())]);
}

#[test]
fn preprocess_is_idempotent() {
    let mut store = store(r#"[1, [24, [1, 2]]]"#);

    store.preprocess().unwrap();
    let first = dump(store.root_term().unwrap()).unwrap();
    let frames = store.backtrace_registry().len();
    store.preprocess().unwrap();

    assert!(store.is_preprocessed());
    assert_eq!(dump(store.root_term().unwrap()).unwrap(), first);
    assert_eq!(store.backtrace_registry().len(), frames);
}

#[test]
fn preprocess_rejects_malformed_trees() {
    let mut store = store(r#"[1, [24, [1, [9999]]]]"#);

    let err = store.preprocess().unwrap_err();

    assert!(matches!(err, TermError::UnknownTermType(9999)));
    assert!(!store.is_preprocessed());
}

#[test]
fn failed_preprocess_leaves_store_untouched() {
    let input = r#"[1, [24, ["a", [14, ["test"]]], {"db": [9999]}], {"db": [14]}]"#;
    let mut store = store(input);

    let err = store.preprocess().unwrap_err();

    assert!(matches!(err, TermError::UnknownTermType(9999)));
    let original: Value = serde_json::from_str(input).unwrap();
    assert_eq!(store.query_json, original);
    assert!(store.backtrace_registry().is_empty());
    assert!(!store.is_preprocessed());

    let root = store.root_term().unwrap();
    let table = root.args().nth(1).unwrap().unwrap();
    assert_eq!(table.term_type(), TermType::Db);
    assert_eq!(table.bt(), BacktraceId::EMPTY);
}

#[test]
fn global_optargs_are_owned() {
    let global = {
        let store = store(r#"[1, [24, []], {"db": [14, ["test"]], "array_limit": 5}]"#);
        store.global_optargs().unwrap()
    };

    let db = global.get("db").unwrap();
    assert_eq!(db.term_type(), TermType::Db);
    assert_eq!(db.optarg_name(), "db");
    assert_eq!(db.bt(), BacktraceId::EMPTY);
    assert_eq!(global.configured_limits().unwrap().array_size_limit, 5);
}

#[test]
fn global_optargs_use_store_version() {
    let input = r#"[1, [24, []], {"blob": [1, {"$reql_type$": "BINARY", "data": ""}]}]"#;
    let old = QueryTermStore::parse(input.as_bytes().to_vec(), ReqlVersion::V1_16).unwrap();
    let new = QueryTermStore::parse(input.as_bytes().to_vec(), ReqlVersion::V2_0).unwrap();

    assert!(matches!(old.global_optargs(), Err(TermError::Datum(_))));
    assert!(new.global_optargs().unwrap().contains("blob"));
}
