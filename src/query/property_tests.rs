//! Property tests for query tree edits
//!
//! Property 1: Missing ids leave the tree untouched
//! Property 2: Edits keep ids unique and groups at two or more children
//! Property 3: Promotion alternates the operator
//! Property 4: Moves preserve the leaves
//! Property 5: Backend JSON round trip

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::query::{
    add_descendant, add_descendant_with_outcome, find_descendant, flip_operator, from_backend,
    from_json, move_descendant, remove_descendant, to_backend, to_json, BackendQuery, BoolOp,
    BooleanNode, ComparisonOp, NodeId, Query, QueryNode, ValueNode,
};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("genre".to_string()),
        Just("language".to_string()),
        Just("audience".to_string()),
        Just("author".to_string()),
        Just("title".to_string()),
    ]
}

fn operator_strategy() -> impl Strategy<Value = ComparisonOp> {
    prop::sample::select(ComparisonOp::ALL.to_vec())
}

fn backend_leaf_strategy() -> impl Strategy<Value = BackendQuery> {
    (field_strategy(), operator_strategy(), "[a-z]{1,8}")
        .prop_map(|(key, op, value)| BackendQuery::Value { key, op, value })
}

/// Backend queries up to four levels deep, every group with 2 to 4 children
fn backend_query_strategy() -> impl Strategy<Value = BackendQuery> {
    backend_leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..=4).prop_map(|and| BackendQuery::And { and }),
            prop::collection::vec(inner, 2..=4).prop_map(|or| BackendQuery::Or { or }),
        ]
    })
}

fn tree_strategy() -> impl Strategy<Value = Query> {
    backend_query_strategy().prop_map(|query| from_backend(&query).unwrap())
}

fn bool_op_strategy() -> impl Strategy<Value = BoolOp> {
    prop_oneof![Just(BoolOp::And), Just(BoolOp::Or)]
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn ids(tree: &Query) -> Vec<NodeId> {
    tree.nodes().map(|node| node.id().clone()).collect()
}

fn leaf_ids(tree: &Query) -> Vec<NodeId> {
    tree.leaves().map(|leaf| leaf.id.clone()).collect()
}

fn new_leaf(value: &str) -> Query {
    Arc::new(ValueNode::new("title", ComparisonOp::Contains, value).into())
}

fn parent_of<'a>(tree: &'a QueryNode, id: &NodeId) -> Option<&'a QueryNode> {
    tree.nodes()
        .find(|node| node.children().iter().any(|child| child.id() == id))
}

fn check_well_formed(tree: &Query) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for node in tree.nodes() {
        prop_assert!(seen.insert(node.id().clone()), "Duplicate id {}", node.id());
        if node.is_boolean() {
            prop_assert!(node.children().len() >= 2, "Group {} has < 2 children", node.id());
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property 1: Every edit with an unknown id returns the same tree
    #[test]
    fn prop_missing_id_is_noop(tree in tree_strategy(), preferred in bool_op_strategy()) {
        let missing = NodeId::from("missing");

        let added = add_descendant(Some(&tree), &missing, new_leaf("x"), preferred);
        prop_assert!(Arc::ptr_eq(&added, &tree));

        let removed = remove_descendant(&tree, &missing, None);
        prop_assert!(Arc::ptr_eq(removed.tree.as_ref().unwrap(), &tree));

        let first_leaf = leaf_ids(&tree)[0].clone();
        let moved = move_descendant(&tree, &first_leaf, &missing, preferred, None);
        prop_assert!(Arc::ptr_eq(moved.tree.as_ref().unwrap(), &tree));

        prop_assert!(Arc::ptr_eq(&flip_operator(&tree, &missing), &tree));
    }

    /// Property 2.1: Adding anywhere adds exactly one leaf and keeps the input intact
    #[test]
    fn prop_add_adds_one_leaf(
        tree in tree_strategy(),
        index in any::<prop::sample::Index>(),
        preferred in bool_op_strategy()
    ) {
        let before = to_backend(&tree);
        let target = index.get(&ids(&tree)).clone();
        let node = new_leaf("added");

        let result = add_descendant(Some(&tree), &target, node.clone(), preferred);

        check_well_formed(&result)?;
        prop_assert_eq!(result.leaf_count(), tree.leaf_count() + 1);
        prop_assert!(find_descendant(&result, node.id()).is_some());
        prop_assert_eq!(to_backend(&tree), before);
    }

    /// Property 2.2: Removing a leaf drops exactly that leaf and collapses single-child groups
    #[test]
    fn prop_remove_leaf(tree in tree_strategy(), index in any::<prop::sample::Index>()) {
        let leaves = leaf_ids(&tree);
        let target = index.get(&leaves).clone();

        let edit = remove_descendant(&tree, &target, None);

        match edit.tree {
            None => prop_assert_eq!(leaves.len(), 1),
            Some(result) => {
                check_well_formed(&result)?;
                prop_assert_eq!(result.leaf_count(), leaves.len() - 1);
                prop_assert!(find_descendant(&result, &target).is_none());
                let expected: Vec<NodeId> =
                    leaves.iter().filter(|id| **id != target).cloned().collect();
                prop_assert_eq!(leaf_ids(&result), expected);
                if let Some(selection) = &edit.selection {
                    prop_assert!(find_descendant(&result, selection).is_some());
                }
            }
        }
    }

    /// Property 2.3: A two-child root collapses to the survivor itself
    #[test]
    fn prop_two_child_group_collapses(
        first in tree_strategy(),
        second in tree_strategy(),
        op in bool_op_strategy()
    ) {
        let root: Query = Arc::new(BooleanNode::new(op, vec![first.clone(), second.clone()]).into());

        let edit = remove_descendant(&root, first.id(), Some(root.id()));

        prop_assert!(Arc::ptr_eq(edit.tree.as_ref().unwrap(), &second));
        prop_assert_eq!(edit.selection.as_ref(), Some(second.id()));
    }

    /// Property 3: A promoted leaf's group uses the opposite of its parent's operator
    #[test]
    fn prop_promotion_alternates_operator(
        tree in tree_strategy(),
        index in any::<prop::sample::Index>(),
        preferred in bool_op_strategy()
    ) {
        let target = index.get(&leaf_ids(&tree)).clone();

        let addition = add_descendant_with_outcome(Some(&tree), &target, new_leaf("added"), preferred);

        let promoted_id = addition.promoted.unwrap();
        let promoted = find_descendant(&addition.tree, &promoted_id).unwrap();
        let op = promoted.bool_op().unwrap();
        match parent_of(&addition.tree, &promoted_id) {
            None => prop_assert_eq!(op, preferred),
            Some(parent) => prop_assert_eq!(Some(op.opposite()), parent.bool_op()),
        }
        prop_assert_eq!(promoted.children().len(), 2);
        prop_assert!(find_descendant(&addition.tree, &target).is_none());
    }

    /// Property 4: A move keeps the leaf count and retires the source id
    #[test]
    fn prop_move_preserves_leaves(
        tree in tree_strategy(),
        source in any::<prop::sample::Index>(),
        target in any::<prop::sample::Index>(),
        preferred in bool_op_strategy()
    ) {
        let all = ids(&tree);
        let source = source.get(&all).clone();
        let target = target.get(&all).clone();
        let source_node = find_descendant(&tree, &source).unwrap();
        prop_assume!(!source_node.contains_id(&target));

        let edit = move_descendant(&tree, &source, &target, preferred, None);

        let result = edit.tree.unwrap();
        check_well_formed(&result)?;
        prop_assert_eq!(result.leaf_count(), tree.leaf_count());
        prop_assert!(find_descendant(&result, &source).is_none());
        let selection = edit.selection.unwrap();
        prop_assert!(find_descendant(&result, &selection).is_some());
    }

    /// Property 5: Backend JSON survives a round trip
    #[test]
    fn prop_backend_json_round_trip(query in backend_query_strategy()) {
        let tree = from_backend(&query).unwrap();
        check_well_formed(&tree)?;

        let json = to_json(&tree).unwrap();
        let parsed = from_json(&json).unwrap();
        prop_assert_eq!(to_backend(&parsed), query);
    }

    /// Flipping a group twice restores its operator
    #[test]
    fn prop_double_flip(tree in tree_strategy(), index in any::<prop::sample::Index>()) {
        let target = index.get(&ids(&tree)).clone();
        let flipped = flip_operator(&flip_operator(&tree, &target), &target);
        prop_assert_eq!(to_backend(&flipped), to_backend(&tree));
    }
}
