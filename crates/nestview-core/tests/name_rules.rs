use indexmap::IndexSet;
use nestview_core::name::{
    canonical_path, canonicalize, resolve_collision, title_case, CONFLICT_SUFFIX,
};

#[test]
fn canonicalize_handles_common_shapes() {
    assert_eq!(canonicalize("DeliveryStartDate"), "delivery_start_date");
    assert_eq!(canonicalize("already_snake"), "already_snake");
    assert_eq!(canonicalize("my-field@home test"), "my_field_home_test");
    assert_eq!(canonicalize("_leading_and_trailing_"), "leading_and_trailing");
}

#[test]
fn canonicalize_is_idempotent() {
    for raw in ["DeliveryStartDate", "my-field@home test", "SKU", "a__b"] {
        let once = canonicalize(raw);
        assert_eq!(canonicalize(&once), once, "input: {raw}");
    }
}

#[test]
fn empty_and_symbol_only_inputs_get_stable_fallbacks() {
    let empty = canonicalize("");
    assert!(empty.starts_with("unnamed_"));
    assert_eq!(canonicalize(""), empty);
    assert_ne!(canonicalize("@@@"), canonicalize("###"));
}

#[test]
fn canonical_path_joins_with_double_underscore() {
    assert_eq!(
        canonical_path("Format.Period.EndDate"),
        "format__period__end_date"
    );
    assert_eq!(canonical_path("single"), "single");
}

#[test]
fn free_candidates_pass_through_unchanged() {
    let taken = IndexSet::new();
    let resolved = resolve_collision("amount", &taken).unwrap();
    assert_eq!(resolved.name, "amount");
    assert!(!resolved.renamed);
}

#[test]
fn taken_candidates_get_exactly_one_rename_attempt() {
    let mut taken = IndexSet::new();
    taken.insert("amount".to_string());

    let resolved = resolve_collision("amount", &taken).unwrap();
    assert_eq!(resolved.name, format!("amount{CONFLICT_SUFFIX}"));
    assert!(resolved.renamed);

    taken.insert(resolved.name);
    assert_eq!(resolve_collision("amount", &taken), None);
}

#[test]
fn resolution_is_deterministic() {
    let mut taken = IndexSet::new();
    taken.insert("x".to_string());
    assert_eq!(resolve_collision("x", &taken), resolve_collision("x", &taken));
}

#[test]
fn title_case_splits_on_underscores() {
    assert_eq!(title_case("delivery_start"), "Delivery Start");
    assert_eq!(title_case("sku"), "Sku");
    assert_eq!(title_case("a__b"), "A B");
}
