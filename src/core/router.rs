//! # Router
//!
//! Connects a `NavigationState` to the route tree. The outer store hands in
//! each new state; the router resolves its current location to a route,
//! raises the will-focus notification, reconciles the focus stack and keeps
//! the focused location around for the renderer.
//!
//! ```text
//! NavigationState ──navigate()──▶ Router ──resolve──▶ RouteTree
//!                                   │
//!                                   ├─ will_focus(next, previous)
//!                                   ├─ FocusReconciler (leave/enter hooks)
//!                                   └─ did_focus(location, handle)  ◀── renderer
//! ```

use std::fmt;

use log::{debug, info};

use crate::core::focus::{FocusReconciler, Reconciliation};
use crate::core::history::{Location, NavigationState};
use crate::core::route::{Resolved, RouteError, RouteId, RouteTree};

pub type WillFocusHook = Box<dyn FnMut(&Location, Option<&Location>)>;
pub type DidFocusHook = Box<dyn FnMut(&Location, &SceneHandle)>;

/// Identifies the unit a renderer mounted for one history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneHandle(String);

impl SceneHandle {
    pub fn for_location(location: &Location) -> Self {
        Self(format!("card_{}", location.key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct Router<U> {
    tree: RouteTree<U>,
    focus: FocusReconciler,
    focused: Option<Location>,
    awaiting_render: bool,
    will_focus: Option<WillFocusHook>,
    did_focus: Option<DidFocusHook>,
}

impl<U> Router<U> {
    pub fn new(tree: RouteTree<U>) -> Self {
        Self {
            tree,
            focus: FocusReconciler::new(),
            focused: None,
            awaiting_render: false,
            will_focus: None,
            did_focus: None,
        }
    }

    pub fn on_will_focus(
        mut self,
        hook: impl FnMut(&Location, Option<&Location>) + 'static,
    ) -> Self {
        self.will_focus = Some(Box::new(hook));
        self
    }

    pub fn on_did_focus(mut self, hook: impl FnMut(&Location, &SceneHandle) + 'static) -> Self {
        self.did_focus = Some(Box::new(hook));
        self
    }

    pub fn tree(&self) -> &RouteTree<U> {
        &self.tree
    }

    pub fn focus_stack(&self) -> &[RouteId] {
        self.focus.stack()
    }

    pub fn focused_location(&self) -> Option<&Location> {
        self.focused.as_ref()
    }

    /// A usable starting state.
    ///
    /// A state that already has entries is kept as is. Otherwise a fresh
    /// history starts at `initial_route`, or at the first declared leaf.
    pub fn initial_state(
        &self,
        state: NavigationState,
        initial_route: Option<&str>,
    ) -> Result<NavigationState, RouteError> {
        if !state.is_empty() {
            return Ok(state);
        }
        let name = match initial_route {
            Some(name) => {
                self.tree.by_name(name)?;
                name
            }
            None => self
                .tree
                .first_leaf_name()
                .ok_or_else(|| RouteError::NotFound("<initial route>".to_string()))?,
        };
        info!("Starting navigation at '{}'", name);
        Ok(NavigationState::create(Some(name)))
    }

    /// Every entry of `state` names a route in this tree, forward history
    /// included. The first one that does not is reported.
    pub fn check(&self, state: &NavigationState) -> Result<(), RouteError> {
        state
            .routes()
            .iter()
            .try_for_each(|location| self.tree.by_name(&location.name).map(|_| ()))
    }

    /// Bring the focus stack in line with the current entry of `state`.
    ///
    /// An empty state leaves every entered route.
    pub fn navigate(&mut self, state: &NavigationState) -> Result<Reconciliation, RouteError> {
        let Some(location) = state.current() else {
            let leaves = self.focus.clear(&self.tree)?;
            self.focused = None;
            self.awaiting_render = false;
            return Ok(Reconciliation {
                leaves,
                ..Reconciliation::default()
            });
        };

        let requested = self.tree.by_name(&location.name)?;
        let target = self.tree.focus_target(requested)?;
        let changed = self.focused.as_ref() != Some(location);

        if changed && let Some(hook) = self.will_focus.as_mut() {
            hook(location, self.focused.as_ref());
        }

        let plan = self.focus.transition(&self.tree, target)?;
        debug!(
            "navigate to '{}' ({}): {} left, {} entered",
            location.name,
            location.key,
            plan.leaves.len(),
            plan.enters.len()
        );

        if changed {
            self.focused = Some(location.clone());
            self.awaiting_render = true;
        }
        Ok(plan)
    }

    /// The focused location resolved to its renderable unit.
    pub fn focused(&self) -> Result<Option<Resolved<'_, U>>, RouteError> {
        let Some(location) = &self.focused else {
            return Ok(None);
        };
        let id = self.tree.by_name(&location.name)?;
        self.tree.resolve(id, &location.params).map(Some)
    }

    /// Called by the renderer once the focused unit is on screen.
    ///
    /// Raises did-focus once per focus change; later calls are ignored.
    pub fn did_render(&mut self, handle: &SceneHandle) {
        if !self.awaiting_render {
            return;
        }
        self.awaiting_render = false;
        if let (Some(hook), Some(location)) = (self.did_focus.as_mut(), self.focused.as_ref()) {
            hook(location, handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EventLog, sample_spec, sample_tree};
    use serde_json::json;

    fn router_with_notifications(log: &EventLog) -> Router<&'static str> {
        let will = log.clone();
        let did = log.clone();
        Router::new(RouteTree::build(sample_spec(None)).unwrap())
            .on_will_focus(move |next, previous| {
                will.push(format!(
                    "will {} from {}",
                    next.name,
                    previous.map_or("-", |p| p.name.as_str())
                ))
            })
            .on_did_focus(move |location, handle| {
                did.push(format!("did {} as {}", location.name, handle))
            })
    }

    #[test]
    fn test_initial_state_defaults_to_first_leaf() {
        let router = Router::new(RouteTree::build(sample_spec(None)).unwrap());
        let state = router.initial_state(NavigationState::default(), None).unwrap();
        assert_eq!(state.current().unwrap().name, "home");
        assert_eq!(state.index(), Some(0));
    }

    #[test]
    fn test_initial_state_keeps_existing_history() {
        let router = Router::new(RouteTree::build(sample_spec(None)).unwrap());
        let existing = NavigationState::create(Some("faq")).push("about", None);
        let state = router.initial_state(existing.clone(), Some("home")).unwrap();
        assert_eq!(state, existing);
    }

    #[test]
    fn test_initial_state_rejects_unknown_route() {
        let router = Router::new(RouteTree::build(sample_spec(None)).unwrap());
        let err = router
            .initial_state(NavigationState::default(), Some("nowhere"))
            .unwrap_err();
        assert_eq!(err, RouteError::NotFound("nowhere".to_string()));
    }

    #[test]
    fn test_navigate_enters_nested_routes() {
        let log = EventLog::default();
        let mut router = Router::new(sample_tree(&log));
        let state = NavigationState::create(Some("billing"));

        router.navigate(&state).unwrap();
        assert_eq!(log.take(), ["enter main", "enter account", "enter billing"]);

        let resolved = router.focused().unwrap().unwrap();
        assert_eq!(resolved.name, "billing");
        assert_eq!(*resolved.unit, "Billing");
    }

    #[test]
    fn test_check_covers_back_and_forward_entries() {
        let router = Router::new(RouteTree::build(sample_spec(None)).unwrap());
        let good = NavigationState::create(Some("home")).push("faq", None);
        assert_eq!(router.check(&good), Ok(()));

        let stale_back = NavigationState::create(Some("home"))
            .push("gone", None)
            .push("about", None);
        assert_eq!(router.check(&stale_back), Err(RouteError::NotFound("gone".to_string())));

        let stale_forward = NavigationState::create(Some("home"))
            .push("gone", None)
            .jump_to("home", None);
        assert_eq!(stale_forward.current().unwrap().name, "home");
        assert!(router.check(&stale_forward).is_err());
        assert_eq!(router.check(&NavigationState::default()), Ok(()));
    }

    #[test]
    fn test_navigate_unknown_name_fails_fast() {
        let log = EventLog::default();
        let mut router = Router::new(sample_tree(&log));
        let err = router
            .navigate(&NavigationState::create(Some("ghost")))
            .unwrap_err();
        assert_eq!(err, RouteError::NotFound("ghost".to_string()));
        assert!(log.take().is_empty());
        assert!(router.focus_stack().is_empty());
    }

    #[test]
    fn test_navigate_to_group_focuses_first_leaf() {
        let log = EventLog::default();
        let mut router = Router::new(sample_tree(&log));
        router.navigate(&NavigationState::create(Some("help"))).unwrap();
        assert_eq!(log.take(), ["enter main", "enter help", "enter faq"]);
        assert_eq!(router.focused().unwrap().unwrap().name, "faq");
    }

    #[test]
    fn test_navigate_empty_state_leaves_everything() {
        let log = EventLog::default();
        let mut router = Router::new(sample_tree(&log));
        router.navigate(&NavigationState::create(Some("home"))).unwrap();
        log.take();

        let plan = router.navigate(&NavigationState::default()).unwrap();
        assert_eq!(plan.leaves.len(), 2);
        assert_eq!(log.take(), ["leave home", "leave main"]);
        assert!(router.focused().unwrap().is_none());
    }

    #[test]
    fn test_focus_notifications_fire_once_per_change() {
        let log = EventLog::default();
        let mut router = router_with_notifications(&log);

        let home = NavigationState::create(Some("home"));
        router.navigate(&home).unwrap();
        let handle = SceneHandle::for_location(home.current().unwrap());
        assert_eq!(handle.as_str(), "card_route-0");
        router.did_render(&handle);
        router.did_render(&handle);
        assert_eq!(log.take(), ["will home from -", "did home as card_route-0"]);

        router.navigate(&home).unwrap();
        router.did_render(&handle);
        assert!(log.take().is_empty());

        let details = home.push("about", Some(json!({"tab": 1}).as_object().unwrap().clone()));
        router.navigate(&details).unwrap();
        assert_eq!(log.take(), ["will about from home"]);
        router.did_render(&SceneHandle::for_location(details.current().unwrap()));
        assert_eq!(log.take(), ["did about as card_route-1"]);
    }

    #[test]
    fn test_focused_binds_location_params() {
        let log = EventLog::default();
        let mut router = Router::new(sample_tree(&log));
        let state = NavigationState::create(Some("home"))
            .push("profile", Some(json!({"id": 42}).as_object().unwrap().clone()));
        router.navigate(&state).unwrap();
        let resolved = router.focused().unwrap().unwrap();
        assert_eq!(resolved.params.get("id"), Some(&json!(42)));
        assert_eq!(router.focused_location(), state.current());
    }
}
