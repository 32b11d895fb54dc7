//! Unnesting join chain.
//!
//! Each nested view is connected back to the view containing its repeated
//! group: the root view for top-level groups, the nearest ancestor repeated
//! group's view for deeper ones. Emission is ordered shallow-first so a
//! parent join always precedes any join that depends on it.

use crate::hierarchy::Hierarchy;
use crate::name;
use crate::view::Decomposition;
use crate::{Error, Result};

use indexmap::IndexSet;
use tracing::debug;

/// One unnesting join connecting a nested view to its parent view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinSpec {
    pub child_view: String,

    /// The root view, or the nearest ancestor repeated-group view emitted
    /// earlier in the chain.
    pub parent_view: String,

    /// The repeated-group field path relative to the parent view's visible
    /// root, canonicalized and segment-joined.
    pub unnest_path: String,

    /// Nesting depth of the group (dot count of its path). Diagnostic only;
    /// correctness depends solely on emission order and the ancestor
    /// search.
    pub depth: usize,
}

/// Builds the ordered join chain for a decomposition.
///
/// Fails with an internal consistency error when a repeated-group node's
/// parent view exists but was not emitted earlier, which would mean the
/// hierarchy builder and this stage disagree about which nodes are repeated
/// groups.
pub fn build(decomposition: &Decomposition, hierarchy: &Hierarchy) -> Result<Vec<JoinSpec>> {
    let mut paths: Vec<&String> = decomposition.nested.keys().collect();
    paths.sort_by_key(|path| path.matches('.').count());

    let mut emitted: IndexSet<&str> = IndexSet::new();
    let mut specs = vec![];

    for path in paths {
        let child = &decomposition.nested[path.as_str()];
        let node = hierarchy
            .get(path)
            .ok_or_else(|| Error::internal(format!("repeated group `{path}` not in hierarchy")))?;

        // Longest strict ancestor that is itself a repeated group with a
        // built view.
        let segments: Vec<&str> = path.split('.').collect();
        let mut parent_path: Option<String> = None;
        for end in (1..segments.len()).rev() {
            let candidate = segments[..end].join(".");
            let is_group = hierarchy
                .get(&candidate)
                .is_some_and(|ancestor| ancestor.is_repeated_group());
            if is_group && decomposition.nested.contains_key(&candidate) {
                parent_path = Some(candidate);
                break;
            }
        }

        let (parent_view, relative) = match &parent_path {
            Some(parent) => {
                let view = &decomposition.nested[parent.as_str()];
                if !emitted.contains(view.name.as_str()) {
                    return Err(Error::internal(format!(
                        "parent view `{}` for group `{path}` was not emitted first",
                        view.name
                    )));
                }
                (
                    view.name.clone(),
                    name::strip_group_prefix(node.display_path(), parent),
                )
            }
            None => (decomposition.root.name.clone(), node.display_path()),
        };

        debug!(group = path.as_str(), parent = parent_view.as_str(), "joining repeated group");

        emitted.insert(child.name.as_str());
        specs.push(JoinSpec {
            child_view: child.name.clone(),
            parent_view,
            unnest_path: name::canonical_path(relative),
            depth: path.matches('.').count(),
        });
    }

    Ok(specs)
}
