//! # Route Tree
//!
//! Routes are declared as a nested `RouteSpec` tree and flattened once, at
//! startup, into an arena of `RouteNode`s. Every relationship afterwards is an
//! explicit `RouteId` into that arena.
//!
//! ```text
//! RouteSpec (declarative)          RouteTree (flat)
//! ─────────────────────────        ──────────────────────────────────
//! main                             #0 main      parent: -
//! ├── home   → Home                #1 home      parent: #0   unit: Home
//! └── account                      #2 account   parent: #0
//!     └── profile → Profile        #3 profile   parent: #2   unit: Profile
//! ```
//!
//! A route is either a leaf bound to a renderable unit `U` or a group of
//! children, never both and never neither. The tree knows nothing about what
//! `U` is; the renderer decides.

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};
use serde_json::Value;

use crate::core::ancestry::AncestorIndex;
use crate::core::history::Params;

/// Zero-argument lifecycle callback fired by the focus reconciler.
pub type Hook = Box<dyn Fn()>;

/// Index of a route inside its `RouteTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub(crate) usize);

impl RouteId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A route declared both a unit and children, or neither.
    Malformed { name: String, reason: &'static str },
    /// No route carries the requested name.
    NotFound(String),
    /// The id does not belong to this tree.
    UnknownId(RouteId),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Malformed { name, reason } => {
                write!(f, "malformed route '{name}': {reason}")
            }
            RouteError::NotFound(name) => write!(f, "no route found for '{name}'"),
            RouteError::UnknownId(id) => write!(f, "route id {id} is not part of this tree"),
        }
    }
}

impl std::error::Error for RouteError {}

// ============================================================================
// Declarative input
// ============================================================================

/// One node of the declarative route description.
pub struct RouteSpec<U> {
    pub name: String,
    pub unit: Option<U>,
    pub children: Vec<RouteSpec<U>>,
    pub params_schema: Option<Value>,
    pub on_enter: Option<Hook>,
    pub on_leave: Option<Hook>,
}

impl<U> RouteSpec<U> {
    /// A route bound to a renderable unit.
    pub fn leaf(name: impl Into<String>, unit: U) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit),
            children: Vec::new(),
            params_schema: None,
            on_enter: None,
            on_leave: None,
        }
    }

    /// A route that only groups children.
    pub fn group(name: impl Into<String>, children: Vec<RouteSpec<U>>) -> Self {
        Self {
            name: name.into(),
            unit: None,
            children,
            params_schema: None,
            on_enter: None,
            on_leave: None,
        }
    }

    pub fn on_enter(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_leave(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_leave = Some(Box::new(hook));
        self
    }

    pub fn params_schema(mut self, schema: Value) -> Self {
        self.params_schema = Some(schema);
        self
    }
}

// ============================================================================
// Flattened tree
// ============================================================================

pub enum RouteBody<U> {
    Unit(U),
    Children(Vec<RouteId>),
}

pub struct RouteNode<U> {
    pub id: RouteId,
    pub parent: Option<RouteId>,
    pub name: String,
    pub params_schema: Option<Value>,
    pub body: RouteBody<U>,
    pub(crate) on_enter: Option<Hook>,
    pub(crate) on_leave: Option<Hook>,
}

impl<U> RouteNode<U> {
    pub fn is_leaf(&self) -> bool {
        matches!(self.body, RouteBody::Unit(_))
    }

    pub fn unit(&self) -> Option<&U> {
        match &self.body {
            RouteBody::Unit(unit) => Some(unit),
            RouteBody::Children(_) => None,
        }
    }

    pub fn children(&self) -> &[RouteId] {
        match &self.body {
            RouteBody::Unit(_) => &[],
            RouteBody::Children(children) => children,
        }
    }

    pub(crate) fn enter(&self) {
        if let Some(hook) = &self.on_enter {
            hook();
        }
    }

    pub(crate) fn leave(&self) {
        if let Some(hook) = &self.on_leave {
            hook();
        }
    }
}

impl<U> fmt::Debug for RouteNode<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("name", &self.name)
            .field("children", &self.children())
            .field("is_leaf", &self.is_leaf())
            .finish()
    }
}

/// What a renderer needs to materialize a focused route.
#[derive(Debug)]
pub struct Resolved<'a, U> {
    pub route: RouteId,
    pub name: &'a str,
    pub unit: &'a U,
    pub params: &'a Params,
}

pub struct RouteTree<U> {
    nodes: Vec<RouteNode<U>>,
    by_name: HashMap<String, RouteId>,
    roots: Vec<RouteId>,
    ancestry: AncestorIndex,
}

impl<U> RouteTree<U> {
    /// Flatten a single declarative tree.
    pub fn build(root: RouteSpec<U>) -> Result<Self, RouteError> {
        Self::build_forest(vec![root])
    }

    /// Flatten several sibling top-level routes, depth-first in declaration order.
    pub fn build_forest(roots: Vec<RouteSpec<U>>) -> Result<Self, RouteError> {
        let mut tree = Self {
            nodes: Vec::new(),
            by_name: HashMap::new(),
            roots: Vec::new(),
            ancestry: AncestorIndex::default(),
        };
        for spec in roots {
            let id = tree.insert(spec, None)?;
            tree.roots.push(id);
        }
        tree.ancestry = AncestorIndex::build(tree.nodes.iter().map(|n| n.parent));
        debug!(
            "Built route tree: {} routes, {} roots",
            tree.nodes.len(),
            tree.roots.len()
        );
        Ok(tree)
    }

    fn insert(
        &mut self,
        spec: RouteSpec<U>,
        parent: Option<RouteId>,
    ) -> Result<RouteId, RouteError> {
        let RouteSpec {
            name,
            unit,
            children,
            params_schema,
            on_enter,
            on_leave,
        } = spec;

        let has_children = !children.is_empty();
        if unit.is_some() && has_children {
            return Err(RouteError::Malformed {
                name,
                reason: "declares both a renderable unit and children",
            });
        }

        let body = match unit {
            Some(unit) => RouteBody::Unit(unit),
            None if has_children => RouteBody::Children(Vec::new()),
            None => {
                return Err(RouteError::Malformed {
                    name,
                    reason: "declares neither a renderable unit nor children",
                });
            }
        };

        // Children are pushed after the parent so ids follow depth-first order.
        let id = RouteId(self.nodes.len());
        match self.by_name.get(&name) {
            Some(existing) => warn!(
                "Route name '{}' declared again at {}; lookups keep {}",
                name, id, existing
            ),
            None => {
                self.by_name.insert(name.clone(), id);
            }
        }

        self.nodes.push(RouteNode {
            id,
            parent,
            name,
            params_schema,
            body,
            on_enter,
            on_leave,
        });

        let mut child_ids = Vec::with_capacity(children.len());
        for child in children {
            child_ids.push(self.insert(child, Some(id))?);
        }
        if let RouteBody::Children(slot) = &mut self.nodes[id.0].body {
            *slot = child_ids;
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[RouteId] {
        &self.roots
    }

    pub fn node(&self, id: RouteId) -> Result<&RouteNode<U>, RouteError> {
        self.nodes.get(id.0).ok_or(RouteError::UnknownId(id))
    }

    pub fn by_name(&self, name: &str) -> Result<RouteId, RouteError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RouteError::NotFound(name.to_string()))
    }

    /// Root-first ancestor chain of `id`, ending with `id` itself.
    pub fn ancestors_of(&self, id: RouteId) -> Result<&[RouteId], RouteError> {
        self.ancestry.chain(id).ok_or(RouteError::UnknownId(id))
    }

    /// Number of routes on the chain from the root down to `id`, inclusive.
    pub fn depth(&self, id: RouteId) -> Result<usize, RouteError> {
        self.ancestry.depth(id).ok_or(RouteError::UnknownId(id))
    }

    /// The leaf a focus request for `id` lands on: `id` itself for leaves,
    /// otherwise the first leaf below it in declaration order.
    pub fn focus_target(&self, id: RouteId) -> Result<RouteId, RouteError> {
        let mut current = self.node(id)?;
        while let Some(&first) = current.children().first() {
            current = self.node(first)?;
        }
        Ok(current.id)
    }

    pub fn resolve<'a>(
        &'a self,
        id: RouteId,
        params: &'a Params,
    ) -> Result<Resolved<'a, U>, RouteError> {
        let node = self.node(self.focus_target(id)?)?;
        let unit = node.unit().ok_or(RouteError::UnknownId(node.id))?;
        Ok(Resolved {
            route: node.id,
            name: &node.name,
            unit,
            params,
        })
    }

    /// All leaf routes, depth-first.
    pub fn leaves(&self) -> impl Iterator<Item = &RouteNode<U>> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    pub fn first_leaf_name(&self) -> Option<&str> {
        self.leaves().next().map(|node| node.name.as_str())
    }
}
