//! # TUI Renderer
//!
//! The ratatui-specific layer. Plays the part of the external renderer and
//! the outer state container: it owns the `App` store, turns key presses into
//! `core::Action` values, hands each new history to the `Router` and draws
//! whatever route ends up focused.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Fading** (a transition is running): draws every ~16ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod activity;
mod component;
mod components;
mod event;
pub mod transition;
mod ui;

use log::{info, warn};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{RouteDecl, ResolvedConfig};
use crate::core::history::NavigationState;
use crate::core::persist;
use crate::core::route::{RouteError, RouteSpec, RouteTree};
use crate::core::router::Router;
use crate::core::state::App;
use crate::tui::activity::ActivityLog;
use crate::tui::component::EventHandler;
use crate::tui::components::{PickerEvent, RoutePickerState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::transition::FadeClock;

const ACTIVITY_CAPACITY: usize = 32;

/// TUI-specific presentation state (not part of core navigation logic)
pub struct TuiState {
    pub picker: RoutePickerState,
    pub activity: ActivityLog,
    pub fade: FadeClock,
    pub transition: Duration,
}

impl TuiState {
    pub fn new<U>(tree: &RouteTree<U>, activity: ActivityLog, transition: Duration) -> Self {
        let routes = tree
            .leaves()
            .map(|node| (node.name.clone(), tree.depth(node.id).unwrap_or(1)))
            .collect();
        Self {
            picker: RoutePickerState::new(routes),
            activity,
            fade: FadeClock::settled(0),
            transition,
        }
    }
}

/// Routes shown when the config declares none.
fn default_routes() -> Vec<RouteSpec<String>> {
    let screen = |name: &str, text: &str| RouteSpec::leaf(name, text.to_string());
    vec![RouteSpec::group(
        "main",
        vec![
            screen("home", "Welcome home. Pick a route on the left."),
            RouteSpec::group(
                "library",
                vec![
                    screen("books", "Your books, sorted by last opened."),
                    screen("music", "Your music, sorted by artist."),
                ],
            ),
            RouteSpec::group(
                "settings",
                vec![
                    screen("display", "Theme, font size and contrast."),
                    screen("account", "Profile, sign-in and devices."),
                ],
            ),
        ],
    )]
}

/// Attach lifecycle hooks that report into the activity feed.
fn instrument(mut spec: RouteSpec<String>, activity: &ActivityLog) -> RouteSpec<String> {
    spec.children = std::mem::take(&mut spec.children)
        .into_iter()
        .map(|child| instrument(child, activity))
        .collect();

    let enter = (activity.clone(), format!("enter {}", spec.name));
    let leave = (activity.clone(), format!("leave {}", spec.name));
    spec.on_enter(move || {
        info!("{}", enter.1);
        enter.0.record(enter.1.clone());
    })
    .on_leave(move || {
        info!("{}", leave.1);
        leave.0.record(leave.1.clone());
    })
}

/// Build the router from the declared routes (or the built-in demo tree).
pub fn build_router(
    routes: &[RouteDecl],
    activity: &ActivityLog,
) -> Result<Router<String>, RouteError> {
    let specs = if routes.is_empty() {
        default_routes()
    } else {
        routes.iter().cloned().map(RouteDecl::into_spec).collect()
    };
    let tree = RouteTree::build_forest(
        specs
            .into_iter()
            .map(|spec| instrument(spec, activity))
            .collect(),
    )?;
    info!("Route tree ready with {} routes", tree.len());

    let will = activity.clone();
    let did = activity.clone();
    Ok(Router::new(tree)
        .on_will_focus(move |next, previous| {
            will.record(match previous {
                Some(previous) => format!("will focus {} (from {})", next.name, previous.name),
                None => format!("will focus {}", next.name),
            })
        })
        .on_did_focus(move |location, handle| {
            did.record(format!("did focus {} as {}", location.name, handle))
        }))
}

/// Pick the history to start with and focus it.
///
/// Saved history that no longer matches the route tree is dropped in favour
/// of a fresh start; a bad `initial_route` is a configuration error.
fn startup_history(
    router: &mut Router<String>,
    restored: Option<NavigationState>,
    initial_route: Option<&str>,
) -> Result<NavigationState, RouteError> {
    if let Some(saved) = restored {
        let history = router.initial_state(saved, initial_route)?;
        match router.check(&history).and_then(|()| router.navigate(&history)) {
            Ok(_) => return Ok(history),
            Err(e) => warn!("Saved history does not fit the route tree ({}); starting fresh", e),
        }
    }
    let history = router.initial_state(NavigationState::default(), initial_route)?;
    router.navigate(&history)?;
    Ok(history)
}

fn restore_history(path: &Path) -> Option<NavigationState> {
    match persist::load_history(path) {
        Ok(state) => state,
        Err(e) => {
            warn!("Failed to read saved history {}: {}", path.display(), e);
            None
        }
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let activity = ActivityLog::new(ACTIVITY_CAPACITY);
    let mut router = build_router(&config.routes, &activity).map_err(io::Error::other)?;

    let history_file = if config.persist_history {
        persist::history_path()
    } else {
        None
    };
    let restored = history_file.as_deref().and_then(restore_history);
    let history = startup_history(&mut router, restored, config.initial_route.as_deref())
        .map_err(io::Error::other)?;

    let mut app = App::new(history);
    let mut tui = TuiState::new(
        router.tree(),
        activity,
        Duration::from_millis(config.transition_ms),
    );
    tui.fade = FadeClock::settled(app.history.index().unwrap_or(0));
    if let Some(name) = router.focused().ok().flatten().map(|r| r.name.to_string()) {
        tui.picker.select_name(&name);
    }

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &mut router, &mut tui);
    ratatui::restore();

    if let Some(path) = history_file.as_deref() {
        match router.check(&app.history) {
            Ok(()) => {
                if let Err(e) = persist::save_history(path, &app.history) {
                    warn!("Failed to save history to {}: {}", path.display(), e);
                }
            }
            Err(e) => warn!("Not saving history that does not fit the route tree ({})", e),
        }
    }
    info!("Wayfinder exiting after {} transitions", app.transitions);
    result
}

fn to_action(event: TuiEvent, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Back => Some(Action::Pop),
        TuiEvent::Resize => None,
        other => tui.picker.handle_event(&other).map(|picked| match picked {
            PickerEvent::Push(name) => Action::Push { name, params: None },
            PickerEvent::JumpTo(name) => Action::JumpTo { name, params: None },
            PickerEvent::ResetTo(name) => Action::ResetTo { name, params: None },
        }),
    }
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    router: &mut Router<String>,
    tui: &mut TuiState,
) -> io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();
        let fading = tui.fade.is_running(now);
        if fading {
            needs_redraw = true;
        }

        if needs_redraw {
            let mut mounted = None;
            terminal.draw(|f| mounted = ui::draw_ui(f, app, router, tui, now))?;
            if let Some(handle) = mounted {
                router.did_render(&handle);
            }
            needs_redraw = false;
        }

        let timeout = if fading {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = to_action(event, tui) else {
                continue;
            };
            let previous_index = app.history.index().unwrap_or(0);
            match update(app, action) {
                Effect::Quit => return Ok(()),
                Effect::None => {}
                Effect::Refocus => {
                    router.navigate(&app.history).map_err(io::Error::other)?;
                    let index = app.history.index().unwrap_or(0);
                    tui.fade =
                        FadeClock::start(previous_index, index, tui.transition, Instant::now());
                }
            }
        }
    }
}
