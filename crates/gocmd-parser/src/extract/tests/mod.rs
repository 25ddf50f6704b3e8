use super::*;
use crate::filter::select;
use crate::package::Package;
use crate::typecheck::check;

mod docs;
mod parameters;

const SAMPLE: &str = include_str!("../../../tests/fixtures/sample.go");

fn extract_with(source: &str, options: ExtractOptions) -> (Vec<ExposedFunction>, Vec<Diagnostic>) {
    let package =
        Package::from_sources("tools", &[("tools.go", source)]).expect("package should load");
    let info = check(&package).expect("package should type-check");
    let candidates = select(&package, &info);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let functions = extract(
        &candidates,
        &info,
        package.comments(),
        &options,
        &mut diagnostics,
    );
    (functions, diagnostics)
}

fn extract_source(source: &str) -> Vec<ExposedFunction> {
    extract_with(source, ExtractOptions::default()).0
}

fn find_by_name<'a>(functions: &'a [ExposedFunction], name: &str) -> &'a ExposedFunction {
    functions
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("should find function named '{name}'"))
}

/// `(name, kind, is_pointer)` per parameter.
fn shapes(function: &ExposedFunction) -> Vec<(&str, BasicKind, bool)> {
    function
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.kind, p.is_pointer))
        .collect()
}
