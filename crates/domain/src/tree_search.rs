//! Breadth-first search over a host UI tree.
//!
//! BFS returns the *shallowest* matching element, with ties broken by child
//! index order, so a target close to the root wins over deeply nested
//! controls that happen to share the capability.

use std::collections::VecDeque;

use crate::element::Element;

/// Return the first element, in breadth-first order, satisfying `predicate`.
///
/// A missing `root` (no active window) short-circuits to `None`. Child slots
/// the host reports as gone are skipped. The tree is never mutated.
pub fn find<E, P>(root: Option<E>, mut predicate: P) -> Option<E>
where
    E: Element,
    P: FnMut(&E) -> bool,
{
    let mut queue = VecDeque::from([root?]);

    while let Some(node) = queue.pop_front() {
        if predicate(&node) {
            return Some(node);
        }
        queue.extend((0..node.child_count()).filter_map(|index| node.child(index)));
    }

    None
}
