//! # Navigation History
//!
//! Back-stack semantics over an immutable `NavigationState` value, like browser
//! history. Every operation borrows the current state and returns a new one:
//!
//! ```text
//! State + push("details")  →  New State
//! ```
//!
//! The old value is never touched, so observers can compare old against new
//! with `==` and an outer store decides what to keep.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters bound to a location. Compared structurally, key order ignored.
pub type Params = Map<String, Value>;

/// One entry in the navigation history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub params: Params,
}

impl Location {
    fn matches(&self, name: &str, params: &Params) -> bool {
        self.name == name && self.params == *params
    }
}

/// History entries plus a pointer to the current one.
///
/// `index` is `None` only while `routes` is empty. `next_key` feeds the
/// monotonically increasing entry keys and is not part of equality.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "RawNavigationState")]
pub struct NavigationState {
    index: Option<usize>,
    routes: Vec<Location>,
    next_key: u64,
}

/// Wire shape of `NavigationState`, checked before it becomes one.
#[derive(Deserialize)]
struct RawNavigationState {
    index: Option<usize>,
    routes: Vec<Location>,
    #[serde(default)]
    next_key: u64,
}

impl TryFrom<RawNavigationState> for NavigationState {
    type Error = String;

    fn try_from(raw: RawNavigationState) -> Result<Self, Self::Error> {
        // Keys already handed out must never be issued again.
        let next_key = raw
            .routes
            .iter()
            .filter_map(|loc| loc.key.strip_prefix("route-")?.parse::<u64>().ok())
            .map(|n| n + 1)
            .fold(raw.next_key, u64::max);
        let state = Self {
            index: raw.index,
            routes: raw.routes,
            next_key,
        };
        if state.is_consistent() {
            Ok(state)
        } else {
            Err(format!(
                "history index {:?} does not fit {} entries",
                state.index,
                state.routes.len()
            ))
        }
    }
}

impl PartialEq for NavigationState {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.routes == other.routes
    }
}

impl NavigationState {
    /// A new history, seeded with `initial_route` when given.
    pub fn create(initial_route: Option<&str>) -> Self {
        let empty = Self::default();
        match initial_route {
            Some(name) => empty.push(name, None),
            None => empty,
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn routes(&self) -> &[Location] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The focused entry.
    pub fn current(&self) -> Option<&Location> {
        self.index.and_then(|i| self.routes.get(i))
    }

    pub fn can_go_back(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    /// `index` points inside `routes`, or is absent exactly when it is empty.
    /// Always true for values built here; deserialization rejects the rest.
    pub fn is_consistent(&self) -> bool {
        match self.index {
            Some(i) => i < self.routes.len(),
            None => self.routes.is_empty(),
        }
    }

    /// Entries up to and including the current one; forward history dropped.
    fn up_to_current(&self) -> Vec<Location> {
        match self.index {
            Some(i) => self.routes[..=i].to_vec(),
            None => Vec::new(),
        }
    }

    /// Push a new entry after the current one.
    ///
    /// Re-pushing the current `(name, params)` returns the state unchanged.
    /// Forward history past `index` is discarded.
    pub fn push(&self, name: &str, params: Option<Params>) -> Self {
        let params = params.unwrap_or_default();
        if self.current().is_some_and(|loc| loc.matches(name, &params)) {
            debug!("push '{}' ignored: already current", name);
            return self.clone();
        }

        let mut routes = self.up_to_current();
        let key = format!("route-{}", self.next_key);
        debug!("push '{}' as {} (depth {})", name, key, routes.len() + 1);
        routes.push(Location {
            key,
            name: name.to_string(),
            params,
        });
        Self {
            index: Some(routes.len() - 1),
            routes,
            next_key: self.next_key + 1,
        }
    }

    /// Drop the current entry and step back one. A no-op at the first entry.
    pub fn pop(&self) -> Self {
        let Some(index) = self.index.filter(|&i| i > 0) else {
            debug!("pop ignored: nothing to go back to");
            return self.clone();
        };
        let mut routes = self.up_to_current();
        routes.pop();
        debug!("pop back to index {}", index - 1);
        Self {
            index: Some(index - 1),
            routes,
            next_key: self.next_key,
        }
    }

    /// Move to the most recent matching entry, or push one if none matches.
    pub fn jump_to(&self, name: &str, params: Option<Params>) -> Self {
        let params = params.unwrap_or_default();
        match self.routes.iter().rposition(|loc| loc.matches(name, &params)) {
            Some(position) => {
                debug!("jump to '{}' at index {}", name, position);
                Self {
                    index: Some(position),
                    routes: self.routes.clone(),
                    next_key: self.next_key,
                }
            }
            None => self.push(name, Some(params)),
        }
    }

    /// Discard the whole history and start again from a single entry.
    pub fn reset_to(&self, name: &str, params: Option<Params>) -> Self {
        debug!("reset history to '{}'", name);
        let cleared = Self {
            index: None,
            routes: Vec::new(),
            next_key: self.next_key,
        };
        cleared.push(name, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Option<Params> {
        match value {
            Value::Object(map) => Some(map),
            _ => panic!("params must be an object"),
        }
    }

    fn names(state: &NavigationState) -> Vec<&str> {
        state.routes().iter().map(|loc| loc.name.as_str()).collect()
    }

    #[test]
    fn test_create_without_initial_route_is_empty() {
        let state = NavigationState::create(None);
        assert!(state.is_empty());
        assert_eq!(state.index(), None);
        assert!(state.current().is_none());
    }

    #[test]
    fn test_create_with_initial_route() {
        let state = NavigationState::create(Some("home"));
        assert_eq!(state.index(), Some(0));
        assert_eq!(names(&state), ["home"]);
        assert!(state.routes()[0].params.is_empty());
    }

    #[test]
    fn test_push_same_location_is_idempotent() {
        let state =
            NavigationState::create(Some("home")).push("details", params(json!({"id": 42})));
        let again = state.push("details", params(json!({"id": 42})));
        assert_eq!(again, state);
        assert_eq!(again.routes().len(), 2);
    }

    #[test]
    fn test_push_same_name_different_params_appends() {
        let state = NavigationState::create(Some("details"));
        let next = state.push("details", params(json!({"id": 1})));
        assert_eq!(next.routes().len(), 2);
        assert_eq!(next.index(), Some(1));
    }

    #[test]
    fn test_params_equality_ignores_key_order() {
        let state = NavigationState::create(None)
            .push("search", params(json!({"q": "rust", "page": 2})));
        let again = state.push("search", params(json!({"page": 2, "q": "rust"})));
        assert_eq!(again.routes().len(), 1);
    }

    #[test]
    fn test_push_truncates_forward_history() {
        let state = NavigationState::create(Some("a"))
            .push("b", None)
            .push("c", None)
            .jump_to("a", None);
        assert_eq!(state.index(), Some(0));
        assert_eq!(state.routes().len(), 3);

        let pushed = state.push("d", None);
        assert_eq!(pushed.routes().len(), state.index().unwrap() + 2);
        assert_eq!(names(&pushed), ["a", "d"]);
        assert_eq!(pushed.index(), Some(1));
    }

    #[test]
    fn test_keys_stay_unique_after_pop() {
        let state = NavigationState::create(Some("a")).push("b", None);
        let popped = state.pop();
        let pushed = popped.push("c", None);
        assert_ne!(pushed.routes()[1].key, state.routes()[1].key);
        assert_eq!(pushed.routes()[0].key, "route-0");
        assert_eq!(pushed.routes()[1].key, "route-2");
    }

    #[test]
    fn test_pop_at_first_entry_is_noop() {
        let state = NavigationState::create(Some("home"));
        assert_eq!(state.pop(), state);
        let empty = NavigationState::create(None);
        assert_eq!(empty.pop(), empty);
    }

    #[test]
    fn test_pop_discards_forward_history() {
        let state = NavigationState::create(Some("a"))
            .push("b", None)
            .push("c", None)
            .jump_to("b", None);
        let popped = state.pop();
        assert_eq!(names(&popped), ["a"]);
        assert_eq!(popped.index(), Some(0));
    }

    #[test]
    fn test_jump_to_existing_entry_keeps_routes() {
        let state = NavigationState::create(Some("a")).push("b", None).push("c", None);
        let jumped = state.jump_to("a", None);
        assert_eq!(jumped.index(), Some(0));
        assert_eq!(jumped.routes(), state.routes());
    }

    #[test]
    fn test_jump_to_picks_most_recent_match() {
        let state = NavigationState::create(Some("a"))
            .push("b", None)
            .push("a", None)
            .push("c", None);
        assert_eq!(state.jump_to("a", None).index(), Some(2));
    }

    #[test]
    fn test_jump_to_missing_entry_pushes() {
        let state = NavigationState::create(Some("a")).push("b", None);
        let jumped = state.jump_to("z", params(json!({"x": true})));
        assert_eq!(jumped, state.push("z", params(json!({"x": true}))));
    }

    #[test]
    fn test_reset_to_leaves_single_entry() {
        let state = NavigationState::create(Some("a")).push("b", None).push("c", None);
        let reset = state.reset_to("done", None);
        assert_eq!(reset.routes().len(), 1);
        assert_eq!(reset.index(), Some(0));
        assert_eq!(reset.current().unwrap().name, "done");
        assert_eq!(reset.current().unwrap().key, "route-3");
    }

    #[test]
    fn test_push_then_pop_round_trip() {
        let home = NavigationState::create(Some("home"));
        let details = home.push("details", params(json!({"id": 42})));
        assert_eq!(details.index(), Some(1));
        assert_eq!(details.current().unwrap().params.get("id"), Some(&json!(42)));
        assert!(details.can_go_back());
        assert_eq!(details.pop(), home);
    }

    #[test]
    fn test_state_serializes_with_keys() {
        let state = NavigationState::create(Some("home")).push("details", None);
        let json = serde_json::to_string(&state).unwrap();
        let restored: NavigationState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.push("more", None).current().unwrap().key, "route-2");
    }

    #[test]
    fn test_deserialize_rejects_index_past_routes() {
        let err = serde_json::from_str::<NavigationState>(r#"{"index": 3, "routes": []}"#)
            .unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn test_deserialize_rejects_missing_index_with_routes() {
        let json = r#"{"index": null, "routes": [{"key": "route-0", "name": "home"}]}"#;
        assert!(serde_json::from_str::<NavigationState>(json).is_err());
    }

    #[test]
    fn test_deserialized_keys_are_not_reissued() {
        let json = r#"{"index": 0, "routes": [{"key": "route-7", "name": "home"}]}"#;
        let state: NavigationState = serde_json::from_str(json).unwrap();
        assert_eq!(state.push("next", None).current().unwrap().key, "route-8");
    }
}
