use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::router::{Router, SceneHandle};
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ActivityPanel, HistoryPanel, RoutePicker, Scene, TitleBar};
use crate::tui::transition::{Presentation, fade};

const HELP_TEXT: &str = "↑/↓ select  Enter push  g jump  r reset  ←/Backspace back  q quit";

/// Draw one frame. Returns the focused scene's handle once it is fully visible.
pub fn draw_ui(
    frame: &mut Frame,
    app: &App,
    router: &Router<String>,
    tui: &mut TuiState,
    now: Instant,
) -> Option<SceneHandle> {
    use Constraint::{Length, Min, Percentage};
    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [left_area, right_area] =
        Layout::horizontal([Percentage(35), Percentage(65)]).areas(body_area);
    let [picker_area, history_area] =
        Layout::vertical([Percentage(55), Percentage(45)]).areas(left_area);
    let [scene_area, activity_area] = Layout::vertical([Min(0), Length(8)]).areas(right_area);

    let breadcrumb = router
        .focus_stack()
        .iter()
        .filter_map(|&id| router.tree().node(id).ok())
        .map(|node| node.name.clone())
        .collect();
    TitleBar::new(breadcrumb, app.status_message.clone()).render(frame, title_area);

    let focused_leaf = router.focused().ok().flatten().map(|resolved| resolved.name);
    RoutePicker::new(&mut tui.picker, focused_leaf).render(frame, picker_area);

    HistoryPanel::new(app.history.routes(), app.history.index()).render(frame, history_area);

    let mounted = draw_scenes(frame, scene_area, app, router, tui, now);

    ActivityPanel {
        entries: tui.activity.snapshot(),
    }
    .render(frame, activity_area);

    frame.render_widget(
        Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        help_area,
    );

    mounted
}

/// Draw every visible history entry, faintest first so the most opaque one
/// ends up on top.
fn draw_scenes(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    router: &Router<String>,
    tui: &TuiState,
    now: Instant,
) -> Option<SceneHandle> {
    let Some(focused_index) = app.history.index() else {
        let empty = Paragraph::new("No history yet.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return None;
    };

    let position = tui.fade.position(now);
    let in_transition = tui.fade.is_running(now);
    let measured = area.width > 0 && area.height > 0;
    let present = |index: usize| fade(index, focused_index, position, measured, in_transition);

    let mut visible: Vec<(usize, Presentation)> = (0..app.history.routes().len())
        .map(|index| (index, present(index)))
        .filter(|(_, p)| !p.offscreen && p.opacity > 0.0)
        .collect();
    visible.sort_by(|a, b| a.1.opacity.total_cmp(&b.1.opacity));

    let tree = router.tree();
    for (index, presentation) in visible {
        let location = &app.history.routes()[index];
        let Ok(resolved) = tree
            .by_name(&location.name)
            .and_then(|id| tree.resolve(id, &location.params))
        else {
            continue;
        };
        Scene {
            title: resolved.name,
            body: resolved.unit,
            params: resolved.params,
            presentation,
        }
        .render(frame, area);
    }

    let focused = app.history.current()?;
    (present(focused_index).opacity >= 1.0).then(|| SceneHandle::for_location(focused))
}
