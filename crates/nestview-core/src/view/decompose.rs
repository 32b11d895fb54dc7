use super::{Decomposition, FieldRole, FieldSpec, View};
use crate::bucket::{self, BucketGroup};
use crate::hierarchy::{Hierarchy, HierarchyNode, NodeKind};
use crate::name;
use crate::options::NamingOptions;
use crate::{Error, Result};

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// Walks the hierarchy and partitions it into the root view and one nested
/// view per repeated group.
#[derive(Debug)]
pub struct Decomposer<'a> {
    options: &'a NamingOptions,
    base_name: String,
}

/// Field data collected during the walk, before per-view collision
/// resolution assigns final names.
struct FieldDraft {
    name: String,
    source_path: String,
    sql_path: String,
    role: FieldRole,
    hidden: bool,
    group_label: Option<String>,
    item_label: Option<String>,
    description: Option<String>,
    is_primary_key: bool,
}

/// Per-view accumulation state.
#[derive(Default)]
struct Drafts {
    fields: Vec<FieldDraft>,
    buckets: Vec<BucketGroup>,
}

impl<'a> Decomposer<'a> {
    pub fn new(model_name: &str, options: &'a NamingOptions) -> Self {
        Self {
            options,
            base_name: name::canonicalize(model_name),
        }
    }

    /// Supplies the materialized relation name. Used as the base name when
    /// the options prefer table-derived naming; the last dot-segment is
    /// taken and backtick quoting is stripped.
    pub fn table_name(mut self, relation: &str) -> Self {
        if self.options.prefers_table_name() {
            let table = relation
                .rsplit('.')
                .next()
                .unwrap_or(relation)
                .trim_matches('`');
            self.base_name = name::canonicalize(table);
        }
        self
    }

    /// Decomposes the hierarchy into the root view and its nested views.
    ///
    /// Fails only on an unresolvable name collision; no partial output is
    /// returned in that case.
    pub fn decompose(&self, hierarchy: &Hierarchy) -> Result<Decomposition> {
        let group_paths: Vec<String> = hierarchy
            .repeated_groups()
            .iter()
            .map(|node| node.path.clone())
            .collect();

        let mut root_drafts = Drafts::default();
        let mut nested_drafts: IndexMap<String, Drafts> = group_paths
            .iter()
            .map(|path| (path.clone(), Drafts::default()))
            .collect();
        let mut excluded = vec![];

        for node in hierarchy.nodes() {
            let containing = containing_group(&group_paths, &node.path);
            let drafts = match containing {
                Some(group) => &mut nested_drafts[group],
                None => &mut root_drafts,
            };
            let relative = name::strip_group_prefix(node.display_path(), containing.unwrap_or(""));

            match node.kind {
                NodeKind::Struct => {
                    // A non-repeated struct with children is a pure
                    // organizational wrapper; its descendants surface
                    // directly in whichever view the ancestor chain places
                    // them.
                    debug!(path = node.path, "excluding struct wrapper");
                    excluded.push(node.path.clone());
                }
                NodeKind::ArrayOfStruct => {
                    drafts
                        .fields
                        .push(marker_draft(node, relative, FieldRole::RepeatedGroup));

                    // The group's own view opens with an identity field for
                    // the group itself.
                    let own = &mut nested_drafts[&node.path];
                    own.fields.push(identity_draft(node));
                }
                NodeKind::ArrayOfScalar => {
                    drafts
                        .fields
                        .push(marker_draft(node, relative, FieldRole::RepeatedScalar));
                }
                NodeKind::Scalar => match bucket::granularity_of(&node.column) {
                    Some(granularity) => {
                        drafts.buckets.push(BucketGroup::new(
                            name::time_group_base(relative),
                            node.path.clone(),
                            relative.to_string(),
                            granularity,
                            self.options.timeframes_for(granularity),
                            self.options.iso_fields_enabled(),
                            node.column.description.clone(),
                        ));
                    }
                    None => {
                        drafts.fields.push(scalar_draft(node, relative));
                    }
                },
            }
        }

        let root = finish_view(self.base_name.clone(), true, root_drafts)?;

        let mut nested = IndexMap::new();
        for (path, drafts) in nested_drafts {
            let group = hierarchy
                .get(&path)
                .ok_or_else(|| Error::internal(format!("repeated group `{path}` not in hierarchy")))?;
            let view_name = format!(
                "{}__{}",
                self.base_name,
                name::canonical_path(group.display_path())
            );
            nested.insert(path, finish_view(view_name, false, drafts)?);
        }

        Ok(Decomposition {
            root,
            nested,
            excluded,
        })
    }
}

/// The nearest strict-ancestor repeated group of a path, if any.
fn containing_group<'a>(group_paths: &'a [String], path: &str) -> Option<&'a str> {
    group_paths
        .iter()
        .filter(|group| {
            path.len() > group.len() + 1
                && path.starts_with(group.as_str())
                && path.as_bytes()[group.len()] == b'.'
        })
        .max_by_key(|group| group.len())
        .map(String::as_str)
}

fn marker_draft(node: &HierarchyNode, relative: &str, role: FieldRole) -> FieldDraft {
    FieldDraft {
        name: name::canonical_path(relative),
        source_path: node.path.clone(),
        sql_path: relative.to_string(),
        role,
        hidden: true,
        group_label: None,
        item_label: None,
        description: node.column.description.clone(),
        is_primary_key: false,
    }
}

fn identity_draft(node: &HierarchyNode) -> FieldDraft {
    let last = node.column.last_segment();
    FieldDraft {
        name: name::canonicalize(last),
        source_path: node.path.clone(),
        sql_path: last.to_string(),
        role: FieldRole::GroupIdentity,
        hidden: true,
        group_label: None,
        item_label: None,
        description: node.column.description.clone(),
        is_primary_key: false,
    }
}

fn scalar_draft(node: &HierarchyNode, relative: &str) -> FieldDraft {
    let segments: Vec<String> = relative.split('.').map(|s| name::canonicalize(s)).collect();
    let (group_label, item_label) = if segments.len() > 1 {
        let group = node.column.meta.group_label.clone().unwrap_or_else(|| {
            segments[..segments.len() - 1]
                .iter()
                .map(|segment| name::title_case(segment))
                .collect::<Vec<_>>()
                .join(" ")
        });
        let item = node
            .column
            .meta
            .label
            .clone()
            .unwrap_or_else(|| name::title_case(segments.last().unwrap()));
        (Some(group), Some(item))
    } else {
        (node.column.meta.group_label.clone(), node.column.meta.label.clone())
    };

    FieldDraft {
        name: segments.join(name::SEGMENT_SEPARATOR),
        source_path: node.path.clone(),
        sql_path: relative.to_string(),
        role: FieldRole::Dimension,
        hidden: node.column.meta.hidden.unwrap_or(false),
        group_label,
        item_label,
        description: node.column.description.clone(),
        is_primary_key: node.column.is_primary_key,
    }
}

/// Assigns final names within one view.
///
/// Bucket groups go first so their full generated-name sets are taken
/// before any scalar field is emitted; a colliding scalar is the one that
/// gets renamed, never the generated bucket field.
fn finish_view(view_name: String, is_root: bool, drafts: Drafts) -> Result<View> {
    let mut taken: IndexSet<String> = IndexSet::new();
    let mut view = View::new(view_name, is_root);

    for bucket in drafts.buckets {
        // Any member of the generated family can collide, not just the
        // base: two groups with distinct bases may still imply the same
        // generated field name.
        let overlaps =
            |group: &BucketGroup| group.generated_names.iter().any(|name| taken.contains(name));
        let bucket = if overlaps(&bucket) {
            let renamed = bucket.renamed(format!("{}{}", bucket.name, name::CONFLICT_SUFFIX));
            if overlaps(&renamed) {
                return Err(Error::name_collision(&view.name, &bucket.name));
            }
            renamed
        } else {
            bucket
        };
        for generated in &bucket.generated_names {
            taken.insert(generated.clone());
        }
        view.bucket_groups.push(bucket);
    }

    for draft in drafts.fields {
        let resolved = name::resolve_collision(&draft.name, &taken)
            .ok_or_else(|| Error::name_collision(&view.name, &draft.name))?;
        taken.insert(resolved.name.clone());

        view.fields.push(FieldSpec {
            hidden: draft.hidden || resolved.renamed,
            renamed_from: resolved.renamed.then(|| draft.name.clone()),
            name: resolved.name,
            source_path: draft.source_path,
            sql_path: draft.sql_path,
            role: draft.role,
            group_label: draft.group_label,
            item_label: draft.item_label,
            description: draft.description,
            is_primary_key: draft.is_primary_key,
        });
    }

    Ok(view)
}
