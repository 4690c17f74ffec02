use super::*;

#[test]
fn empty_resolves_to_root() {
    let reg = BacktraceRegistry::new();
    assert!(reg.is_empty());
    assert_eq!(reg.frames(BacktraceId::EMPTY), Some(vec![]));
    assert_eq!(reg.parent(BacktraceId::EMPTY), None);
}

#[test]
fn frames_walk_back_to_root() {
    let mut reg = BacktraceRegistry::new();
    let table = reg.new_frame(BacktraceId::EMPTY, Frame::Arg(0)).unwrap();
    let db = reg.new_frame(table, Frame::Opt("db".to_owned())).unwrap();
    let name = reg.new_frame(db, Frame::Arg(1)).unwrap();

    assert_eq!(reg.len(), 3);
    assert_eq!(reg.parent(name), Some(db));
    assert_eq!(reg.frame(db), Some(&Frame::Opt("db".to_owned())));

    let path = reg.frames(name).unwrap();
    assert_eq!(
        path,
        vec![&Frame::Arg(0), &Frame::Opt("db".to_owned()), &Frame::Arg(1)]
    );
}

#[test]
fn siblings_get_distinct_ids() {
    let mut reg = BacktraceRegistry::new();
    let a = reg.new_frame(BacktraceId::EMPTY, Frame::Arg(0)).unwrap();
    let b = reg.new_frame(BacktraceId::EMPTY, Frame::Arg(1)).unwrap();
    assert_ne!(a, b);
    assert!(!a.is_empty());
    assert_eq!(reg.frames(b).unwrap(), vec![&Frame::Arg(1)]);
}

#[test]
fn unknown_id_does_not_resolve() {
    let reg = BacktraceRegistry::new();
    assert!(!reg.contains(BacktraceId::from_raw(7)));
    assert_eq!(reg.frames(BacktraceId::from_raw(7)), None);
}

#[test]
fn frame_display() {
    assert_eq!(Frame::Arg(2).to_string(), "arg 2");
    assert_eq!(Frame::Opt("index".to_owned()).to_string(), "optarg `index`");
}
