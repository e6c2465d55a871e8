//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::route::{RouteSpec, RouteTree};

/// Records lifecycle hook calls in the order they fire.
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    fn hook(&self, entry: String) -> impl Fn() + 'static {
        let log = self.clone();
        move || log.push(entry.clone())
    }
}

fn tracked(spec: RouteSpec<&'static str>, log: Option<&EventLog>) -> RouteSpec<&'static str> {
    match log {
        Some(log) => {
            let enter = log.hook(format!("enter {}", spec.name));
            let leave = log.hook(format!("leave {}", spec.name));
            spec.on_enter(enter).on_leave(leave)
        }
        None => spec,
    }
}

/// ```text
/// main
/// ├── home → Home
/// ├── account
/// │   ├── profile → Profile
/// │   └── billing → Billing
/// └── help
///     ├── faq → Faq
///     └── about → About
/// ```
pub fn sample_spec(log: Option<&EventLog>) -> RouteSpec<&'static str> {
    let leaf = |name: &'static str, unit: &'static str| tracked(RouteSpec::leaf(name, unit), log);
    let account = RouteSpec::group(
        "account",
        vec![leaf("profile", "Profile"), leaf("billing", "Billing")],
    );
    let help = RouteSpec::group("help", vec![leaf("faq", "Faq"), leaf("about", "About")]);
    let main = RouteSpec::group(
        "main",
        vec![leaf("home", "Home"), tracked(account, log), tracked(help, log)],
    );
    tracked(main, log)
}

/// The sample tree with every route reporting to `log`.
pub fn sample_tree(log: &EventLog) -> RouteTree<&'static str> {
    RouteTree::build(sample_spec(Some(log))).expect("sample tree is well formed")
}
