//! # Core Navigation Logic
//!
//! Routes, history and focus. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • RouteTree (routes)   │
//!                    │  • NavigationState      │
//!                    │  • FocusReconciler      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Pure.           │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Outer    │      │   Tests    │
//!     │  Renderer  │      │   Store    │      │            │
//!     │ (ratatui)  │      │ (persist)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: The route tree, flattened from a declarative `RouteSpec`
//! - [`ancestry`]: Root-first ancestor chains, one per route
//! - [`history`]: `NavigationState` and its push/pop/jump/reset operations
//! - [`focus`]: The focus stack and its leave/enter reconciliation
//! - [`router`]: Ties a history value to the tree and the focus stack
//! - [`state`]: The `App` struct that owns the current history value
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration, including declared routes
//! - [`persist`]: Saving and restoring history between runs

pub mod action;
pub mod ancestry;
pub mod config;
pub mod focus;
pub mod history;
pub mod persist;
pub mod route;
pub mod router;
pub mod state;

// Re-export commonly used types for convenience
pub use focus::{FocusReconciler, Reconciliation};
pub use history::{Location, NavigationState, Params};
pub use route::{RouteError, RouteId, RouteSpec, RouteTree};
pub use router::{Router, SceneHandle};
