//! Immutable edits of a query tree
//!
//! Every function here is pure. Subtrees an edit does not touch come back as
//! the same `Arc`, and an id that is not in the tree leaves the whole tree
//! untouched, so callers detect a no-op with `Arc::ptr_eq`.

use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

use crate::query::ast::{BoolOp, BooleanNode, Query, QueryNode};
use crate::query::id::NodeId;

/// Result of [`add_descendant_with_outcome`]
#[derive(Debug, Clone)]
pub struct Addition {
    pub tree: Query,
    /// Id of the group created when the target was a leaf
    pub promoted: Option<NodeId>,
}

/// Tree and selection after a removal or a move
#[derive(Debug, Clone)]
pub struct Edit {
    pub tree: Option<Query>,
    pub selection: Option<NodeId>,
}

/// Attach `new_node` under the node with id `target`
///
/// A group target gets `new_node` appended to its children. A leaf target is
/// promoted to a new `preferred` group holding a re-identified copy of the
/// leaf followed by `new_node`. Below the root, each level passes the
/// opposite of its own operator down as the preferred operator.
pub fn add_descendant(
    tree: Option<&Query>,
    target: &NodeId,
    new_node: Query,
    preferred: BoolOp,
) -> Query {
    add_descendant_with_outcome(tree, target, new_node, preferred).tree
}

/// [`add_descendant`], also reporting the id of a group created by promotion
pub fn add_descendant_with_outcome(
    tree: Option<&Query>,
    target: &NodeId,
    new_node: Query,
    preferred: BoolOp,
) -> Addition {
    let Some(root) = tree else {
        return Addition {
            tree: new_node,
            promoted: None,
        };
    };

    let mut promoted = None;
    let tree = insert(root, target, &new_node, preferred, &mut promoted);
    tracing::trace!(id = %target, promoted = ?promoted, "add_descendant");
    Addition { tree, promoted }
}

fn insert(
    node: &Query,
    target: &NodeId,
    new_node: &Query,
    preferred: BoolOp,
    promoted: &mut Option<NodeId>,
) -> Query {
    match node.as_ref() {
        QueryNode::Boolean(group) => {
            if &group.id == target {
                let mut children = group.children.to_vec();
                children.push(Arc::clone(new_node));
                return Arc::new(group.with_children(children).into());
            }

            let opposite = group.op.opposite();
            for (index, child) in group.children.iter().enumerate() {
                let updated = insert(child, target, new_node, opposite, promoted);
                if !Arc::ptr_eq(&updated, child) {
                    return Arc::new(group.with_child(index, updated).into());
                }
            }

            Arc::clone(node)
        }
        QueryNode::Value(leaf) if &leaf.id == target => {
            let copy: Query = Arc::new(node.with_id(NodeId::next()));
            let group = BooleanNode::new(preferred, vec![copy, Arc::clone(new_node)]);
            *promoted = Some(group.id.clone());
            Arc::new(group.into())
        }
        QueryNode::Value(_) => Arc::clone(node),
    }
}

/// Remove the node with id `target` together with its subtree
///
/// A group left with a single child collapses into that child. `selection`
/// is updated the way the editor expects:
/// - removing the root clears it;
/// - a collapse moves it to the surviving child when it pointed at the
///   removed node (or inside it) or at the discarded group;
/// - a group that keeps two or more children becomes the selection.
pub fn remove_descendant(tree: &Query, target: &NodeId, selection: Option<&NodeId>) -> Edit {
    let mut selection = selection.cloned();
    let tree = match detach(tree, target, &mut selection) {
        Detached::Unchanged => Some(Arc::clone(tree)),
        Detached::Replaced(node) => Some(node),
        Detached::Emptied => None,
    };
    tracing::trace!(id = %target, selection = ?selection, "remove_descendant");
    Edit { tree, selection }
}

enum Detached {
    Unchanged,
    Replaced(Query),
    Emptied,
}

fn detach(node: &Query, target: &NodeId, selection: &mut Option<NodeId>) -> Detached {
    if node.id() == target {
        if points_into(selection, node) {
            *selection = None;
        }
        return Detached::Emptied;
    }

    let QueryNode::Boolean(group) = node.as_ref() else {
        return Detached::Unchanged;
    };

    if let Some(index) = group.children.iter().position(|child| child.id() == target) {
        return drop_child(group, index, selection);
    }

    for (index, child) in group.children.iter().enumerate() {
        match detach(child, target, selection) {
            Detached::Unchanged => continue,
            Detached::Replaced(updated) => {
                return Detached::Replaced(Arc::new(group.with_child(index, updated).into()));
            }
            Detached::Emptied => return drop_child(group, index, selection),
        }
    }

    Detached::Unchanged
}

fn drop_child(group: &BooleanNode, index: usize, selection: &mut Option<NodeId>) -> Detached {
    let removed = &group.children[index];
    let selection_lost =
        selection.as_ref() == Some(&group.id) || points_into(selection, removed);

    let mut remaining: Vec<Query> = group
        .children
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, child)| Arc::clone(child))
        .collect();

    match remaining.len() {
        0 => {
            if selection_lost {
                *selection = None;
            }
            Detached::Emptied
        }
        1 => {
            let survivor = remaining.swap_remove(0);
            if selection_lost {
                *selection = Some(survivor.id().clone());
            }
            Detached::Replaced(survivor)
        }
        _ => {
            *selection = Some(group.id.clone());
            Detached::Replaced(Arc::new(group.with_children(remaining).into()))
        }
    }
}

fn points_into(selection: &Option<NodeId>, node: &QueryNode) -> bool {
    selection.as_ref().is_some_and(|id| node.contains_id(id))
}

/// Depth-first search by id
pub fn find_descendant<'a>(tree: &'a Query, target: &NodeId) -> Option<&'a Query> {
    let mut stack: SmallVec<[&'a Query; 16]> = smallvec![tree];
    while let Some(node) = stack.pop() {
        if node.id() == target {
            return Some(node);
        }
        stack.extend(node.children().iter().rev());
    }
    None
}

/// Relocate the node `source` under the node `target`
///
/// The source is copied under a fresh id, the copy is added at the target,
/// then the original is removed. The selection ends on the target, or on the
/// group created when the target leaf had to be promoted.
///
/// Moving a node onto itself or into its own subtree, or naming an id that
/// is not in the tree, changes nothing.
pub fn move_descendant(
    tree: &Query,
    source: &NodeId,
    target: &NodeId,
    preferred: BoolOp,
    selection: Option<&NodeId>,
) -> Edit {
    let unchanged = || Edit {
        tree: Some(Arc::clone(tree)),
        selection: selection.cloned(),
    };

    let Some(source_node) = find_descendant(tree, source) else {
        return unchanged();
    };
    if source_node.contains_id(target) {
        return unchanged();
    }

    let moved: Query = Arc::new(source_node.with_id(NodeId::next()));
    let addition = add_descendant_with_outcome(Some(tree), target, moved, preferred);
    if Arc::ptr_eq(&addition.tree, tree) {
        return unchanged();
    }

    let removal = remove_descendant(&addition.tree, source, selection);
    let wanted = addition.promoted.unwrap_or_else(|| target.clone());
    let selection = match &removal.tree {
        Some(root) if find_descendant(root, &wanted).is_some() => Some(wanted),
        _ => removal.selection,
    };

    Edit {
        tree: removal.tree,
        selection,
    }
}

/// Swap in `updated` for the node that carries the same id
pub fn replace_descendant(tree: &Query, updated: Query) -> Query {
    let target = updated.id().clone();
    rewrite(tree, &target, &|_| Some(Arc::clone(&updated)))
}

/// Set the operator of the group `target`
///
/// The group keeps its id and its children allocation. Leaves, missing ids
/// and groups that already use `op` are left as they are.
pub fn set_operator(tree: &Query, target: &NodeId, op: BoolOp) -> Query {
    rewrite(tree, target, &|node| match node.as_ref() {
        QueryNode::Boolean(group) if group.op != op => Some(Arc::new(group.with_op(op).into())),
        _ => None,
    })
}

/// Toggle the group `target` between AND and OR
pub fn flip_operator(tree: &Query, target: &NodeId) -> Query {
    rewrite(tree, target, &|node| match node.as_ref() {
        QueryNode::Boolean(group) => Some(Arc::new(group.with_op(group.op.opposite()).into())),
        QueryNode::Value(_) => None,
    })
}

/// Rebuild the path to `target`, replacing it with `f(node)` when that is `Some`
fn rewrite<F>(node: &Query, target: &NodeId, f: &F) -> Query
where
    F: Fn(&Query) -> Option<Query>,
{
    if node.id() == target {
        return f(node).unwrap_or_else(|| Arc::clone(node));
    }

    if let QueryNode::Boolean(group) = node.as_ref() {
        for (index, child) in group.children.iter().enumerate() {
            let updated = rewrite(child, target, f);
            if !Arc::ptr_eq(&updated, child) {
                return Arc::new(group.with_child(index, updated).into());
            }
        }
    }

    Arc::clone(node)
}
