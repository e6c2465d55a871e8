//! Bounded feed of lifecycle events shown in the activity panel.
//!
//! Route hooks are plain `Fn()` closures, so they share the feed through an
//! `Rc<RefCell<..>>` handle. The TUI is single-threaded.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone)]
pub struct ActivityLog {
    entries: Rc<RefCell<VecDeque<String>>>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Rc::new(RefCell::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn record(&self, entry: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.borrow_mut();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry.into());
    }

    /// Oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.borrow().iter().cloned().collect()
    }
}
