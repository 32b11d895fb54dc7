use nestview_core::{join, Column, ColumnSet, Decomposer, Hierarchy, JoinSpec, NamingOptions};

fn column(path: &str, declared_type: &str) -> Column {
    let mut column = Column::new(path);
    column.declared_type = Some(declared_type.to_string());
    column
}

fn joins_for(columns: ColumnSet) -> Vec<JoinSpec> {
    let hierarchy = Hierarchy::build(&columns);
    let options = NamingOptions::new();
    let decomposition = Decomposer::new("root", &options)
        .decompose(&hierarchy)
        .unwrap();
    join::build(&decomposition, &hierarchy).unwrap()
}

#[test]
fn nested_groups_join_through_their_enclosing_group() {
    let joins = joins_for(
        [
            column("items", "ARRAY<STRUCT<code STRING>>"),
            column("items.code", "STRING"),
            column("items.details", "ARRAY<STRUCT<name STRING>>"),
            column("items.details.name", "STRING"),
        ]
        .into_iter()
        .collect(),
    );

    assert_eq!(
        joins,
        vec![
            JoinSpec {
                child_view: "root__items".to_string(),
                parent_view: "root".to_string(),
                unnest_path: "items".to_string(),
                depth: 0,
            },
            JoinSpec {
                child_view: "root__items__details".to_string(),
                parent_view: "root__items".to_string(),
                unnest_path: "details".to_string(),
                depth: 1,
            },
        ]
    );
}

#[test]
fn parents_always_precede_their_children() {
    let joins = joins_for(
        [
            column("a", "ARRAY<STRUCT<x STRING>>"),
            column("a.x", "STRING"),
            column("a.b", "ARRAY<STRUCT<y STRING>>"),
            column("a.b.y", "STRING"),
            column("a.b.c", "ARRAY<STRUCT<z STRING>>"),
            column("a.b.c.z", "STRING"),
            column("d", "ARRAY<STRUCT<w STRING>>"),
            column("d.w", "STRING"),
        ]
        .into_iter()
        .collect(),
    );

    for (i, join) in joins.iter().enumerate() {
        if join.parent_view != "root" {
            let parent_at = joins
                .iter()
                .position(|other| other.child_view == join.parent_view)
                .unwrap();
            assert!(parent_at < i, "parent of {} emitted late", join.child_view);
        }
    }

    let depths: Vec<usize> = joins.iter().map(|join| join.depth).collect();
    let mut sorted = depths.clone();
    sorted.sort_unstable();
    assert_eq!(depths, sorted);
}

#[test]
fn a_group_below_a_struct_gap_joins_its_nearest_group_ancestor() {
    // `a.b` is only a struct level, not a repeated group: `a.b.c` must
    // reach past it to `a` and carry the skipped segment in its unnest
    // path.
    let joins = joins_for(
        [
            column("a", "ARRAY<STRUCT<b STRUCT<c ARRAY<STRUCT<z STRING>>>>>"),
            column("a.b.c", "ARRAY<STRUCT<z STRING>>"),
            column("a.b.c.z", "STRING"),
        ]
        .into_iter()
        .collect(),
    );

    let deep = joins
        .iter()
        .find(|spec| spec.child_view == "root__a__b__c")
        .unwrap();
    assert_eq!(deep.parent_view, "root__a");
    assert_eq!(deep.unnest_path, "b__c");
    assert_eq!(deep.depth, 2);
}

#[test]
fn a_top_level_group_with_no_group_ancestor_joins_the_root() {
    let joins = joins_for(
        [
            column("info", "STRUCT<items ARRAY<STRUCT<x STRING>>>"),
            column("info.items", "ARRAY<STRUCT<x STRING>>"),
            column("info.items.x", "STRING"),
        ]
        .into_iter()
        .collect(),
    );

    assert_eq!(
        joins,
        vec![JoinSpec {
            child_view: "root__info__items".to_string(),
            parent_view: "root".to_string(),
            unnest_path: "info__items".to_string(),
            depth: 1,
        }]
    );
}
