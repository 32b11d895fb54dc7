use nestview_core::catalog::descriptor::parse;

#[test]
fn unbalanced_angle_brackets_yield_empty() {
    assert!(parse("STRUCT<a STRUCT<b INT64>").is_empty());
    assert!(parse("ARRAY<STRUCT<a INT64>").is_empty());
    assert!(parse("STRUCT<a INT64>>").is_empty());
}

#[test]
fn unbalanced_parens_yield_empty() {
    assert!(parse("STRUCT<a NUMERIC(10, 2>").is_empty());
}

#[test]
fn empty_struct_yields_empty() {
    assert!(parse("STRUCT<>").is_empty());
    assert!(parse("").is_empty());
}

#[test]
fn bare_tokens_yield_empty() {
    // A field with no type definition has nothing to flatten.
    assert!(parse("garbage").is_empty());
    assert!(parse("STRUCT<abc>").is_empty());
    assert!(parse("ARRAY<INT64>").is_empty());
}

#[test]
fn malformed_input_never_panics() {
    for input in [
        "<<<>>>",
        "STRUCT<,,,>",
        "ARRAY<",
        ">",
        "STRUCT<a b c d STRUCT<",
        "STRUCT<ü ARRAY<>>",
    ] {
        // Fail-soft contract: any result is fine as long as nothing panics.
        let _ = parse(input);
    }
}
