//! # Focus Reconciliation
//!
//! The focus stack holds the routes that are currently "entered", root to
//! leaf. Moving focus to a new route diffs that stack against the target's
//! ancestor chain:
//!
//! ```text
//! focus stack   [main, account, profile]
//! target chain  [main, help, faq]
//!                ─────
//!                shared prefix
//!
//! leaves  [profile, account]   innermost first
//! enters  [help, faq]          outermost first
//! ```
//!
//! Only the routes outside the shared prefix are touched, so a transition
//! costs the symmetric difference of the two paths.
//!
//! Hooks run synchronously and are not guarded. A panicking hook leaves the
//! stack partially transitioned: every route popped or pushed before it stays
//! that way.

use log::debug;

use crate::core::route::{RouteError, RouteId, RouteTree};

/// The outcome of diffing a focus stack against a target chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    pub focus_stack: Vec<RouteId>,
    /// Routes to leave, leaf to root.
    pub leaves: Vec<RouteId>,
    /// Routes to enter, root to leaf.
    pub enters: Vec<RouteId>,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.leaves.is_empty() && self.enters.is_empty()
    }
}

/// Length of the longest root-aligned prefix shared by both paths.
fn divergence_point(focus_stack: &[RouteId], target_chain: &[RouteId]) -> usize {
    focus_stack
        .iter()
        .zip(target_chain)
        .take_while(|(current, wanted)| current == wanted)
        .count()
}

/// Pure diff: what has to be left and entered to focus `target`.
pub fn reconcile<'a, F>(focus_stack: &[RouteId], target: RouteId, chain_of: F) -> Reconciliation
where
    F: FnOnce(RouteId) -> &'a [RouteId],
{
    let target_chain = chain_of(target);
    let shared = divergence_point(focus_stack, target_chain);

    Reconciliation {
        focus_stack: target_chain.to_vec(),
        leaves: focus_stack[shared..].iter().rev().copied().collect(),
        enters: target_chain[shared..].to_vec(),
    }
}

/// Owns the focus stack and applies reconciliations to it.
#[derive(Debug, Default)]
pub struct FocusReconciler {
    stack: Vec<RouteId>,
}

impl FocusReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes currently entered, root to leaf.
    pub fn stack(&self) -> &[RouteId] {
        &self.stack
    }

    /// The innermost entered route.
    pub fn focused(&self) -> Option<RouteId> {
        self.stack.last().copied()
    }

    /// Move focus to `target`, firing `on_leave` then `on_enter` hooks.
    pub fn transition<U>(
        &mut self,
        tree: &RouteTree<U>,
        target: RouteId,
    ) -> Result<Reconciliation, RouteError> {
        let chain = tree.ancestors_of(target)?;
        let plan = reconcile(&self.stack, target, |_| chain);

        for &id in &plan.leaves {
            let node = tree.node(id)?;
            self.stack.pop();
            debug!("leave {} ({})", node.name, id);
            node.leave();
        }
        for &id in &plan.enters {
            let node = tree.node(id)?;
            self.stack.push(id);
            debug!("enter {} ({})", node.name, id);
            node.enter();
        }

        debug_assert_eq!(self.stack, plan.focus_stack);
        Ok(plan)
    }

    /// Leave every entered route, innermost first.
    pub fn clear<U>(&mut self, tree: &RouteTree<U>) -> Result<Vec<RouteId>, RouteError> {
        let mut left = Vec::with_capacity(self.stack.len());
        while let Some(id) = self.stack.pop() {
            tree.node(id)?.leave();
            left.push(id);
        }
        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EventLog, sample_tree};

    fn id(tree: &RouteTree<&'static str>, name: &str) -> RouteId {
        tree.by_name(name).unwrap()
    }

    #[test]
    fn test_reconcile_from_empty_enters_whole_chain() {
        let a = RouteId(0);
        let b = RouteId(1);
        let t = RouteId(2);
        let chain = [a, b, t];
        let plan = reconcile(&[], t, |_| &chain[..]);
        assert_eq!(plan.enters, [a, b, t]);
        assert!(plan.leaves.is_empty());
        assert_eq!(plan.focus_stack, [a, b, t]);
    }

    #[test]
    fn test_reconcile_diverging_branches() {
        let [a, b, c, e, d] = [0, 1, 2, 3, 4].map(RouteId);
        let chain = [a, e, d];
        let plan = reconcile(&[a, b, c], d, |_| &chain[..]);
        assert_eq!(plan.leaves, [c, b]);
        assert_eq!(plan.enters, [e, d]);
        assert_eq!(plan.focus_stack, [a, e, d]);
    }

    #[test]
    fn test_reconcile_disjoint_roots_unwinds_everything() {
        let [a, b, x, y] = [0, 1, 2, 3].map(RouteId);
        let chain = [x, y];
        let plan = reconcile(&[a, b], y, |_| &chain[..]);
        assert_eq!(plan.leaves, [b, a]);
        assert_eq!(plan.enters, [x, y]);
    }

    #[test]
    fn test_reconcile_to_ancestor_only_leaves() {
        let [a, b, c] = [0, 1, 2].map(RouteId);
        let chain = [a, b];
        let plan = reconcile(&[a, b, c], b, |_| &chain[..]);
        assert_eq!(plan.leaves, [c]);
        assert!(plan.enters.is_empty());
    }

    #[test]
    fn test_reconcile_only_matches_aligned_prefix() {
        // `b` appears in both paths but not at the same depth.
        let [a, b, c] = [0, 1, 2].map(RouteId);
        let chain = [b, c];
        let plan = reconcile(&[a, b], c, |_| &chain[..]);
        assert_eq!(plan.leaves, [b, a]);
        assert_eq!(plan.enters, [b, c]);
    }

    #[test]
    fn test_transition_twice_is_noop() {
        let log = EventLog::default();
        let tree = sample_tree(&log);
        let mut focus = FocusReconciler::new();

        let first = focus.transition(&tree, id(&tree, "profile")).unwrap();
        assert_eq!(first.enters.len(), 3);

        log.take();
        let second = focus.transition(&tree, id(&tree, "profile")).unwrap();
        assert!(second.is_noop());
        assert!(log.take().is_empty());
    }

    #[test]
    fn test_transition_fires_hooks_in_nesting_order() {
        let log = EventLog::default();
        let tree = sample_tree(&log);
        let mut focus = FocusReconciler::new();

        focus.transition(&tree, id(&tree, "profile")).unwrap();
        assert_eq!(log.take(), ["enter main", "enter account", "enter profile"]);

        focus.transition(&tree, id(&tree, "faq")).unwrap();
        assert_eq!(
            log.take(),
            ["leave profile", "leave account", "enter help", "enter faq"]
        );
        assert_eq!(
            focus.stack(),
            [id(&tree, "main"), id(&tree, "help"), id(&tree, "faq")]
        );
        assert_eq!(focus.focused(), Some(id(&tree, "faq")));
    }

    #[test]
    fn test_transition_between_siblings_keeps_parent_entered() {
        let log = EventLog::default();
        let tree = sample_tree(&log);
        let mut focus = FocusReconciler::new();

        focus.transition(&tree, id(&tree, "profile")).unwrap();
        log.take();
        let plan = focus.transition(&tree, id(&tree, "billing")).unwrap();
        assert_eq!(plan.leaves, [id(&tree, "profile")]);
        assert_eq!(plan.enters, [id(&tree, "billing")]);
        assert_eq!(log.take(), ["leave profile", "enter billing"]);
    }

    #[test]
    fn test_transition_unknown_route_leaves_stack_untouched() {
        let log = EventLog::default();
        let tree = sample_tree(&log);
        let mut focus = FocusReconciler::new();
        focus.transition(&tree, id(&tree, "home")).unwrap();

        let err = focus.transition(&tree, RouteId(99)).unwrap_err();
        assert_eq!(err, RouteError::UnknownId(RouteId(99)));
        assert_eq!(focus.stack(), [id(&tree, "main"), id(&tree, "home")]);
    }

    #[test]
    fn test_clear_leaves_innermost_first() {
        let log = EventLog::default();
        let tree = sample_tree(&log);
        let mut focus = FocusReconciler::new();
        focus.transition(&tree, id(&tree, "billing")).unwrap();
        log.take();

        focus.clear(&tree).unwrap();
        assert!(focus.stack().is_empty());
        assert_eq!(log.take(), ["leave billing", "leave account", "leave main"]);
    }
}
