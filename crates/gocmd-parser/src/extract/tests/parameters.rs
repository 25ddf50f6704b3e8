use super::*;
use pretty_assertions::assert_eq;

#[test]
fn every_basic_kind_is_kept() {
    let functions = extract_source(SAMPLE);
    let flags = find_by_name(&functions, "Flags");
    let kinds: Vec<BasicKind> = flags.parameters.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BasicKind::Bool,
            BasicKind::Int,
            BasicKind::Int8,
            BasicKind::Int16,
            BasicKind::Int32,
            BasicKind::Int64,
            BasicKind::Uint,
            BasicKind::Uint8,
            BasicKind::Uint16,
            BasicKind::Uint32,
            BasicKind::Uint64,
            BasicKind::Uintptr,
            BasicKind::Float32,
            BasicKind::Float64,
            BasicKind::Complex64,
            BasicKind::Complex128,
            BasicKind::String,
            BasicKind::Uint8,
            BasicKind::Int32,
        ]
    );
    assert!(flags.parameters.iter().all(|p| !p.is_pointer));
}

#[test]
fn byte_and_rune_use_their_underlying_kinds() {
    let functions = extract_source(SAMPLE);
    let flags = find_by_name(&functions, "Flags");
    let by = flags.parameter("by").expect("byte parameter");
    let r = flags.parameter("r").expect("rune parameter");
    assert_eq!(by.kind, BasicKind::Uint8);
    assert_eq!(r.kind, BasicKind::Int32);
}

#[test]
fn non_basic_parameters_are_dropped() {
    let functions = extract_source(SAMPLE);
    let mixed = find_by_name(&functions, "Mixed");
    assert!(mixed.returns_error);
    assert_eq!(
        shapes(mixed),
        vec![
            ("name", BasicKind::String, false),
            ("count", BasicKind::Uint, true),
        ]
    );
}

#[test]
fn variadic_tail_is_dropped() {
    let functions = extract_source(SAMPLE);
    let variadic = find_by_name(&functions, "Variadic");
    assert_eq!(shapes(variadic), vec![("prefix", BasicKind::String, false)]);
}

#[test]
fn generic_functions_have_no_entry() {
    let functions = extract_source(
        "package p\n\
         func Each[T any](items []T, label string) {}\n\
         func Label(label string) {}\n",
    );
    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Label"]);
}

#[test]
fn named_basic_types_are_dropped() {
    let functions = extract_source(SAMPLE);
    let named = find_by_name(&functions, "Named");
    assert_eq!(shapes(named), vec![("m", BasicKind::Int, false)]);
}

#[test]
fn aliases_of_basic_types_are_kept() {
    let functions = extract_source(
        "package p\n\
         type Flag = bool\n\
         type Count = *int\n\
         func Toggle(f Flag, c Count, p *Flag) {}\n",
    );
    let toggle = find_by_name(&functions, "Toggle");
    assert_eq!(
        shapes(toggle),
        vec![
            ("f", BasicKind::Bool, false),
            ("c", BasicKind::Int, true),
            ("p", BasicKind::Bool, true),
        ]
    );
}

#[test]
fn double_pointers_are_dropped() {
    let functions = extract_source("package p\nfunc Deep(pp **string, s string) {}\n");
    let deep = find_by_name(&functions, "Deep");
    assert_eq!(shapes(deep), vec![("s", BasicKind::String, false)]);
}

#[test]
fn unnamed_parameters_contribute_nothing() {
    let functions = extract_source("package p\nfunc Anon(int, string) {}\n");
    let anon = find_by_name(&functions, "Anon");
    assert!(anon.parameters.is_empty(), "{:?}", anon.parameters);
}

#[test]
fn blank_names_are_kept() {
    let functions = extract_source("package p\nfunc Blank(_ int, name string) {}\n");
    let blank = find_by_name(&functions, "Blank");
    assert_eq!(
        shapes(blank),
        vec![("_", BasicKind::Int, false), ("name", BasicKind::String, false)]
    );
}
