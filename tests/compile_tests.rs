//! Type-level checks: each file under `tests/ui/pass` must compile.
//! Rejected combinations are covered by `compile_fail` doctests in relq-core.

#[cfg(feature = "rusqlite")]
#[test]
fn result_shapes_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass/*.rs");
}
