//! # TUI Components
//!
//! All UI components for the terminal renderer.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: Focus breadcrumb and status message
//! - `HistoryPanel`: The back-stack with the current entry marked
//! - `Scene`: One history entry's screen, faded per the transition
//! - `ActivityPanel`: Recent lifecycle events
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `RoutePicker`: Leaf route list that emits push/jump/reset requests
//!
//! Components receive external data as props, not by reaching into global
//! state, so each one can be rendered against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Top status bar)
//! ├── route_picker.rs   (Route list + key handling)
//! ├── history_panel.rs  (Back-stack view)
//! ├── scene.rs          (Focused screen)
//! └── activity_panel.rs (Lifecycle feed)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod activity_panel;
pub mod history_panel;
pub mod route_picker;
pub mod scene;
pub use activity_panel::ActivityPanel;
pub use history_panel::HistoryPanel;
pub use route_picker::{PickerEvent, RoutePicker, RoutePickerState};
pub use scene::Scene;
