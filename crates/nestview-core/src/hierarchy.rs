//! Column hierarchy construction.
//!
//! The flat column set is grouped into a strict ownership tree keyed by path
//! segments. "Parent" is always a derived lookup (strip the last segment),
//! never a stored reference, so the structure cannot form cycles.

use crate::catalog::{Column, ColumnSet};
use indexmap::IndexMap;

/// Structural classification of a node, computed once after every column is
/// registered and matched exhaustively wherever a decision depends on shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Scalar,
    Struct,
    ArrayOfScalar,
    ArrayOfStruct,
}

#[derive(Debug, Clone)]
pub struct HierarchyNode {
    /// Full dotted path, lowercased. Empty for the virtual super-root.
    pub path: String,

    pub column: Column,

    pub kind: NodeKind,

    /// True when no column was registered at this path and the node exists
    /// only because deeper columns imply it.
    pub synthesized: bool,

    /// Children keyed by lowercased path segment, in registration order.
    pub children: IndexMap<String, HierarchyNode>,
}

/// The hierarchy for one document: a virtual super-root owning every
/// top-level node.
#[derive(Debug)]
pub struct Hierarchy {
    root: HierarchyNode,
}

impl Hierarchy {
    /// Builds the hierarchy from a flat column set.
    ///
    /// Every path prefix of every column gets a node; prefixes the metadata
    /// source never materialized as columns are synthesized with a sentinel
    /// column so downstream stages never special-case an absent column.
    pub fn build(columns: &ColumnSet) -> Self {
        let mut root = HierarchyNode::super_root();

        for column in columns.iter() {
            root.register(column);
        }
        root.assign_kinds();

        Self { root }
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.root
    }

    /// Looks a node up by dotted path, case-insensitively.
    pub fn get(&self, path: &str) -> Option<&HierarchyNode> {
        let path = path.to_lowercase();
        let mut node = &self.root;
        for segment in path.split('.') {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    /// All nodes in depth-first order, excluding the super-root.
    pub fn nodes(&self) -> Vec<&HierarchyNode> {
        let mut out = vec![];
        self.root.collect(&mut out);
        out
    }

    /// All repeated-group nodes (kind [`NodeKind::ArrayOfStruct`]) in
    /// depth-first order.
    pub fn repeated_groups(&self) -> Vec<&HierarchyNode> {
        self.nodes()
            .into_iter()
            .filter(|node| node.kind == NodeKind::ArrayOfStruct)
            .collect()
    }
}

impl HierarchyNode {
    fn super_root() -> Self {
        Self {
            path: String::new(),
            column: Column::default(),
            kind: NodeKind::Struct,
            synthesized: true,
            children: IndexMap::new(),
        }
    }

    fn register(&mut self, column: &Column) {
        let segments: Vec<&str> = column.path.split('.').collect();
        let mut node = self;

        for (i, segment) in segments.iter().enumerate() {
            let prefix = segments[..=i].join(".");
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| Self {
                    path: prefix,
                    column: Column::new(segments[..=i].join(".")),
                    kind: NodeKind::Scalar,
                    synthesized: true,
                    children: IndexMap::new(),
                });
        }

        // The full path gets the real column, replacing the sentinel if a
        // deeper column registered this prefix first.
        node.column = column.clone();
        node.synthesized = false;
    }

    fn assign_kinds(&mut self) {
        for child in self.children.values_mut() {
            child.assign_kinds();
        }
        if self.path.is_empty() {
            return;
        }
        self.kind = if self.column.is_array() {
            if self.column.is_single_value_array() {
                NodeKind::ArrayOfScalar
            } else {
                NodeKind::ArrayOfStruct
            }
        } else if self.children.is_empty() {
            NodeKind::Scalar
        } else {
            NodeKind::Struct
        };
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Self>) {
        for child in self.children.values() {
            out.push(child);
            child.collect(out);
        }
    }

    /// The path in source casing when the column recorded one.
    pub fn display_path(&self) -> &str {
        self.column.display_path()
    }

    pub fn last_segment(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    pub fn is_repeated_group(&self) -> bool {
        self.kind == NodeKind::ArrayOfStruct
    }

    /// Depth as the number of dots in the path. Top-level nodes have depth
    /// zero.
    pub fn depth(&self) -> usize {
        self.path.matches('.').count()
    }
}
