mod column;
pub use column::{Column, ColumnMeta};

pub mod descriptor;
pub use descriptor::{LeafType, TypeLeaf};

use indexmap::IndexMap;

/// The flat set of columns for one document, keyed by lowercased dotted
/// path.
///
/// Path uniqueness is case-insensitive and enforced by the keying itself:
/// inserting a column whose lowercased path is already present replaces the
/// previous value (last write wins, resolved at the merge boundary).
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: IndexMap<String, Column>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a column, returning the previously stored column when the
    /// path was already present.
    pub fn insert(&mut self, column: Column) -> Option<Column> {
        self.columns.insert(column.path.clone(), column)
    }

    pub fn get(&self, path: &str) -> Option<&Column> {
        self.columns.get(&path.to_lowercase())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.columns.contains_key(&path.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Repairs the set from a raw type descriptor for a column known only to
    /// the catalog document.
    ///
    /// Registers the column itself plus one column per flattened leaf of the
    /// descriptor, skipping paths the primary metadata source already
    /// declared. A descriptor that fails to parse contributes only the
    /// top-level column: an empty flattening means no additional structure,
    /// not an error.
    pub fn repair_from_descriptor(&mut self, path: &str, raw_descriptor: &str) {
        if !self.contains(path) {
            let mut column = Column::new(path);
            column.declared_type = Some(raw_descriptor.trim().to_string());
            if let Some(element) = descriptor::array_element(raw_descriptor) {
                column.inner_types = vec![element];
            }
            self.insert(column);
        }

        for leaf in descriptor::parse(raw_descriptor) {
            let full = format!("{path}.{}", leaf.path);
            if self.contains(&full) {
                continue;
            }
            let mut column = Column::new(&full);
            column.declared_type = Some(leaf.ty.to_string());
            if let LeafType::ScalarArray(element) = &leaf.ty {
                column.inner_types = vec![element.clone()];
            }
            self.insert(column);
        }
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        let mut set = Self::new();
        for column in iter {
            set.insert(column);
        }
        set
    }
}
