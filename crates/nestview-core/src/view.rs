mod decompose;
pub use decompose::Decomposer;

mod field;
pub use field::{FieldRole, FieldSpec};

use crate::bucket::BucketGroup;
use indexmap::IndexMap;

/// One flat, named view over a subset of the document's fields.
#[derive(Debug)]
pub struct View {
    pub name: String,
    pub is_root: bool,
    pub fields: Vec<FieldSpec>,
    pub bucket_groups: Vec<BucketGroup>,
}

impl View {
    pub(crate) fn new(name: String, is_root: bool) -> Self {
        Self {
            name,
            is_root,
            fields: vec![],
            bucket_groups: vec![],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn bucket_group(&self, name: &str) -> Option<&BucketGroup> {
        self.bucket_groups.iter().find(|group| group.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// The full decomposition of one document: the root view plus one nested
/// view per repeated group, keyed by the group's lowercased dotted path.
#[derive(Debug)]
pub struct Decomposition {
    pub root: View,
    pub nested: IndexMap<String, View>,

    /// Paths of non-repeated struct wrappers excluded from every view, kept
    /// for diagnostics.
    pub excluded: Vec<String>,
}

impl Decomposition {
    pub fn nested_view(&self, group_path: &str) -> Option<&View> {
        self.nested.get(&group_path.to_lowercase())
    }

    /// The root view followed by every nested view, in creation order.
    pub fn views(&self) -> impl Iterator<Item = &View> {
        core::iter::once(&self.root).chain(self.nested.values())
    }
}
