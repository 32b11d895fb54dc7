use nestview_core::view::FieldRole;
use nestview_core::{Column, ColumnSet, Decomposer, Hierarchy, NamingOptions};

fn column(path: &str, declared_type: &str) -> Column {
    let mut column = Column::new(path);
    column.declared_type = Some(declared_type.to_string());
    column
}

fn array_column(path: &str, declared_type: &str, inner: &[&str]) -> Column {
    let mut column = column(path, declared_type);
    column.inner_types = inner.iter().map(|s| s.to_string()).collect();
    column
}

fn order_columns() -> ColumnSet {
    let mut id = column("id", "INT64");
    id.is_primary_key = true;

    [
        id,
        column("items", "ARRAY<STRUCT<code STRING>>"),
        column("items.code", "STRING"),
        array_column("tags", "ARRAY<STRING>", &["STRING"]),
        column("info", "STRUCT<x STRING>"),
        column("info.x", "STRING"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn repeated_groups_split_into_nested_views() {
    let hierarchy = Hierarchy::build(&order_columns());
    let options = NamingOptions::new();
    let decomposition = Decomposer::new("orders", &options)
        .decompose(&hierarchy)
        .unwrap();

    assert_eq!(decomposition.root.name, "orders");
    assert!(decomposition.root.is_root);

    let id = decomposition.root.field("id").unwrap();
    assert_eq!(id.role, FieldRole::Dimension);
    assert!(id.is_primary_key);

    // The repeated group surfaces in the root view only as a hidden marker.
    let marker = decomposition.root.field("items").unwrap();
    assert_eq!(marker.role, FieldRole::RepeatedGroup);
    assert!(marker.hidden);
    assert!(decomposition.root.field("items__code").is_none());

    let nested = decomposition.nested_view("items").unwrap();
    assert_eq!(nested.name, "orders__items");
    assert!(!nested.is_root);

    let identity = nested.field("items").unwrap();
    assert_eq!(identity.role, FieldRole::GroupIdentity);
    assert!(identity.hidden);

    let code = nested.field("code").unwrap();
    assert_eq!(code.role, FieldRole::Dimension);
    assert_eq!(code.sql_path, "code");
}

#[test]
fn scalar_arrays_stay_in_the_containing_view() {
    let hierarchy = Hierarchy::build(&order_columns());
    let options = NamingOptions::new();
    let decomposition = Decomposer::new("orders", &options)
        .decompose(&hierarchy)
        .unwrap();

    let tags = decomposition.root.field("tags").unwrap();
    assert_eq!(tags.role, FieldRole::RepeatedScalar);
    assert!(tags.hidden);
    assert!(decomposition.nested_view("tags").is_none());
}

#[test]
fn struct_wrappers_are_excluded_but_their_leaves_surface() {
    let hierarchy = Hierarchy::build(&order_columns());
    let options = NamingOptions::new();
    let decomposition = Decomposer::new("orders", &options)
        .decompose(&hierarchy)
        .unwrap();

    assert_eq!(decomposition.excluded, vec!["info".to_string()]);

    let leaf = decomposition.root.field("info__x").unwrap();
    assert_eq!(leaf.role, FieldRole::Dimension);
    assert_eq!(leaf.sql_path, "info.x");
    assert_eq!(leaf.group_label.as_deref(), Some("Info"));
    assert_eq!(leaf.item_label.as_deref(), Some("X"));
}

#[test]
fn every_scalar_lands_in_exactly_one_view() {
    let columns = order_columns();
    let hierarchy = Hierarchy::build(&columns);
    let options = NamingOptions::new();
    let decomposition = Decomposer::new("orders", &options)
        .decompose(&hierarchy)
        .unwrap();

    for path in ["id", "items.code", "tags", "info.x"] {
        let views_holding: usize = decomposition
            .views()
            .filter(|view| view.fields.iter().any(|field| field.source_path == path))
            .count();
        assert_eq!(views_holding, 1, "path: {path}");
    }
}

#[test]
fn table_derived_naming_uses_the_relation_when_preferred() {
    let hierarchy = Hierarchy::build(&order_columns());

    let mut options = NamingOptions::new();
    options.use_table_name(true);
    let decomposition = Decomposer::new("orders", &options)
        .table_name("analytics.prod.Order_Items")
        .decompose(&hierarchy)
        .unwrap();
    assert_eq!(decomposition.root.name, "order_items");

    // Without the preference the relation name is ignored.
    let options = NamingOptions::new();
    let decomposition = Decomposer::new("orders", &options)
        .table_name("analytics.prod.Order_Items")
        .decompose(&hierarchy)
        .unwrap();
    assert_eq!(decomposition.root.name, "orders");
}

#[test]
fn column_metadata_overrides_derived_labels() {
    let mut leaf = column("info.x", "STRING");
    leaf.meta.group_label = Some("Custom Group".to_string());
    leaf.meta.label = Some("Custom Item".to_string());
    leaf.meta.hidden = Some(true);

    let columns: ColumnSet = [column("info", "STRUCT<x STRING>"), leaf].into_iter().collect();
    let hierarchy = Hierarchy::build(&columns);
    let options = NamingOptions::new();
    let decomposition = Decomposer::new("orders", &options)
        .decompose(&hierarchy)
        .unwrap();

    let field = decomposition.root.field("info__x").unwrap();
    assert_eq!(field.group_label.as_deref(), Some("Custom Group"));
    assert_eq!(field.item_label.as_deref(), Some("Custom Item"));
    assert!(field.hidden);
}
