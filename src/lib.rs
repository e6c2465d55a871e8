//! Wayfinder library exports: the navigation core and its terminal renderer.

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
