use serde_json::json;

use super::*;

fn parse(value: serde_json::Value) -> Result<Datum, DatumError> {
    Datum::from_json(&value, &ConfiguredLimits::default(), ReqlVersion::LATEST)
}

#[test]
fn scalars() {
    assert_eq!(parse(json!(null)), Ok(Datum::Null));
    assert_eq!(parse(json!(true)), Ok(Datum::Bool(true)));
    assert_eq!(parse(json!(2.5)), Ok(Datum::Number(2.5)));
    assert_eq!(parse(json!(7)), Ok(Datum::Number(7.0)));
    assert_eq!(parse(json!("x")), Ok(Datum::from("x")));
}

#[test]
fn nested_containers() {
    let datum = parse(json!({"b": [1, {"c": null}], "a": "z"})).unwrap();
    let Datum::Object(fields) = &datum else {
        panic!("expected object, got {datum:?}");
    };
    assert_eq!(fields.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(datum.to_string(), r#"{"a":"z","b":[1,{"c":null}]}"#);
}

#[test]
fn array_size_limit() {
    let limits = ConfiguredLimits::default().with_array_size_limit(2);
    let err = Datum::from_json(&json!([1, 2, 3]), &limits, ReqlVersion::LATEST).unwrap_err();
    assert_eq!(err, DatumError::ArrayTooLarge { size: 3, limit: 2 });

    let ok = Datum::from_json(&json!([1, 2]), &limits, ReqlVersion::LATEST);
    assert!(ok.is_ok());
}

#[test]
fn nesting_limit() {
    let limits = ConfiguredLimits::default().with_max_nesting_depth(2);
    let ok = Datum::from_json(&json!([[1]]), &limits, ReqlVersion::LATEST);
    assert!(ok.is_ok());

    let err = Datum::from_json(&json!([[[1]]]), &limits, ReqlVersion::LATEST).unwrap_err();
    assert_eq!(err, DatumError::NestingTooDeep { limit: 2 });
}

#[test]
fn unlimited_accepts_large_arrays() {
    let big = serde_json::Value::Array(vec![json!(0); DEFAULT_ARRAY_SIZE_LIMIT + 1]);
    assert!(Datum::from_json(&big, &ConfiguredLimits::unlimited(), ReqlVersion::LATEST).is_ok());
    assert!(parse(big).is_err());
}

#[test]
fn binary_pseudo_type() {
    let value = json!({"$reql_type$": "BINARY", "data": "aGk="});
    assert_eq!(parse(value.clone()), Ok(Datum::Binary(b"hi".to_vec())));
    assert_eq!(Datum::Binary(b"hi".to_vec()).to_json(), value);
}

#[test]
fn binary_uses_padded_standard_alphabet() {
    let bytes = vec![0xfb, 0xff, 0x00, 0x10];
    let value = json!({"$reql_type$": "BINARY", "data": "+/8AEA=="});
    assert_eq!(Datum::Binary(bytes.clone()).to_json(), value);
    assert_eq!(parse(value), Ok(Datum::Binary(bytes)));

    let url_safe = parse(json!({"$reql_type$": "BINARY", "data": "-_8AEA=="}));
    assert!(matches!(url_safe, Err(DatumError::InvalidPseudoType { name: "BINARY", .. })));
}

#[test]
fn binary_requires_2_0() {
    let value = json!({"$reql_type$": "BINARY", "data": "aGk="});
    let err = Datum::from_json(&value, &ConfiguredLimits::default(), ReqlVersion::V1_16);
    assert_eq!(
        err,
        Err(DatumError::PseudoTypeUnsupported {
            name: "BINARY".to_owned(),
            version: ReqlVersion::V1_16,
        })
    );
}

#[test]
fn malformed_binary() {
    let bad_data = parse(json!({"$reql_type$": "BINARY", "data": "***"}));
    assert!(matches!(bad_data, Err(DatumError::InvalidPseudoType { name: "BINARY", .. })));

    let extra = parse(json!({"$reql_type$": "BINARY", "data": "", "x": 1}));
    assert!(matches!(extra, Err(DatumError::InvalidPseudoType { .. })));
}

#[test]
fn time_stays_an_object() {
    let value = json!({"$reql_type$": "TIME", "epoch_time": 0, "timezone": "+00:00"});
    let datum = parse(value).unwrap();
    assert_eq!(datum.type_name(), "OBJECT");
}

#[test]
fn unknown_pseudo_type() {
    let err = parse(json!({"$reql_type$": "WIDGET"})).unwrap_err();
    assert_eq!(err, DatumError::UnknownPseudoType("WIDGET".to_owned()));

    let err = parse(json!({"$reql_type$": 3})).unwrap_err();
    assert!(matches!(err, DatumError::InvalidPseudoType { .. }));
}

#[test]
fn integral_rendering() {
    assert_eq!(Datum::Number(1.0).to_string(), "1");
    assert_eq!(Datum::Number(-0.5).to_string(), "-0.5");
    assert_eq!(Datum::Number(3.0).as_i64(), Some(3));
    assert_eq!(Datum::Number(3.5).as_i64(), None);
}

#[test]
fn limits_deserialize_with_defaults() {
    let limits: ConfiguredLimits = serde_json::from_str(r#"{"array_size_limit": 5}"#).unwrap();
    assert_eq!(limits.array_size_limit, 5);
    assert_eq!(limits.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
}
