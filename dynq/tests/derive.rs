#[test]
fn derive_macros_expand() {
    let t = trybuild::TestCases::new();
    t.pass("tests/macro/*.rs");
}
