//! # Actions
//!
//! Everything that can happen to navigation becomes an `Action`.
//! User picks a route? That's `Action::Push { .. }`.
//! User goes back? That's `Action::Pop`.
//!
//! The `update()` function takes the current state and an action, swaps in
//! the new `NavigationState` value and reports what the caller must do next.
//! No side effects here. Focus changes happen elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::history::Params;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Push { name: String, params: Option<Params> },
    Pop,
    JumpTo { name: String, params: Option<Params> },
    ResetTo { name: String, params: Option<Params> },
    Quit,
}

/// What the event loop has to do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The history changed; reconcile focus against it.
    Refocus,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    let next = match action {
        Action::Quit => return Effect::Quit,
        Action::Push { name, params } => app.history.push(&name, params),
        Action::Pop => app.history.pop(),
        Action::JumpTo { name, params } => app.history.jump_to(&name, params),
        Action::ResetTo { name, params } => app.history.reset_to(&name, params),
    };

    if next == app.history {
        app.status_message = String::from("Already there");
        return Effect::None;
    }

    app.history = next;
    app.transitions += 1;
    if let Some(location) = app.history.current() {
        app.status_message = format!("At {} ({})", location.name, location.key);
    }
    Effect::Refocus
}
