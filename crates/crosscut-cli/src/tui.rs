//! Interactive terminal canvas.
//!
//! Press the left mouse button to start a cut and release it to commit.
//! The canvas maps its inner area onto a fixed world rectangle; there is
//! no zoom or pan.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
};

use crosscut::{Cycle, CycleError, CycleLimits, IntersectionId, Point, Session};

use crate::cli::common::padded_bounds;
use crate::cli::cycles::format_cycle;
use crate::cli::script::DragScript;

/// World rectangle shown when nothing is preloaded.
const DEFAULT_VIEW: (f64, f64, f64, f64) = (0.0, 0.0, 100.0, 100.0);

/// Application state
struct App {
    session: Session,
    /// Sticky snap toggle (`s`); Shift also snaps a single drag
    sticky_snap: bool,
    /// Whether Shift was held on the last mouse event
    shift_held: bool,
    /// Cursor position while the button is held
    drag_current: Option<Point>,
    /// Intersection the next `c` searches from
    last_intersection: Option<IntersectionId>,
    /// Loops from the last search, highlighted on the canvas
    cycles: Vec<Cycle>,
    /// One-line status message
    status: String,
    /// World bounds (min_x, min_y, max_x, max_y)
    view: (f64, f64, f64, f64),
    /// Inner canvas area from the last draw, for mouse mapping
    canvas_area: Rect,
    title: String,
    should_quit: bool,
}

impl App {
    fn new(script_path: Option<&str>) -> Result<Self, String> {
        let (session, view, title) = match script_path {
            Some(path) => {
                let script = DragScript::load(path)?;
                let mut session = script.session();
                let outcome = script.replay(&mut session, false);
                if outcome.rejected > 0 {
                    tracing::warn!("{} drags in {} were refused", outcome.rejected, path);
                }
                let view = padded_bounds(&session.snapshot());
                (session, view, path.to_string())
            }
            None => (Session::new(), DEFAULT_VIEW, "untitled".to_string()),
        };

        let last_intersection = session.arrangement().intersections().last().map(|ix| ix.id);

        Ok(App {
            session,
            sticky_snap: false,
            shift_held: false,
            drag_current: None,
            last_intersection,
            cycles: Vec::new(),
            status: "Drag with the left mouse button to cut".to_string(),
            view,
            canvas_area: Rect::default(),
            title,
            should_quit: false,
        })
    }

    fn snapping(&self) -> bool {
        self.sticky_snap || self.shift_held
    }

    /// Map a terminal cell to world coordinates, if it lies on the canvas.
    fn cell_to_world(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.canvas_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if column < area.x || column >= area.x + area.width {
            return None;
        }
        if row < area.y || row >= area.y + area.height {
            return None;
        }

        let (min_x, min_y, max_x, max_y) = self.view;
        let fx = (column - area.x) as f64 + 0.5;
        let fy = (row - area.y) as f64 + 0.5;

        // Canvas y grows upward
        Some(Point::new(
            min_x + fx / area.width as f64 * (max_x - min_x),
            max_y - fy / area.height as f64 * (max_y - min_y),
        ))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.shift_held = mouse.modifiers.contains(KeyModifiers::SHIFT);
        let point = self.cell_to_world(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(p) = point {
                    self.session.begin_drag(p);
                    self.drag_current = Some(p);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if point.is_some() {
                    self.drag_current = point;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                // Releasing off-canvas commits at the last on-canvas position
                let end = point.or(self.drag_current);
                self.drag_current = None;
                let Some(end) = end else {
                    self.session.cancel_drag();
                    return;
                };
                self.finish_drag(end);
            }
            _ => {}
        }
    }

    fn finish_drag(&mut self, end: Point) {
        match self.session.end_drag(end, self.snapping()) {
            Ok(report) => {
                if let Some(id) = report.intersection_ids().last() {
                    self.last_intersection = Some(id);
                }
                self.cycles.clear();
                self.status = format!(
                    "{}: {} new crossings",
                    report.segment,
                    report.crossing_count()
                );
            }
            Err(e) => {
                self.status = format!("Refused: {}", e);
            }
        }
    }

    fn search_cycles(&mut self) {
        let Some(start) = self.last_intersection else {
            self.status = "No intersection to search from".to_string();
            return;
        };

        match self.session.find_cycles(start, &CycleLimits::default()) {
            Ok(cycles) => {
                self.status = format!("{} cycles through {}", cycles.len(), start);
                self.cycles = cycles;
            }
            Err(CycleError::Truncated { partial, limit }) => {
                self.status = format!("{} cycles through {} (stopped: {})", partial.len(), start, limit);
                self.cycles = partial;
            }
            Err(e) => {
                self.status = e.to_string();
                self.cycles.clear();
            }
        }
    }
}

pub fn run_tui(script_path: Option<&str>) -> Result<(), String> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(script_path)?;

    // Initialize terminal
    enable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(EnterAlternateScreen).map_err(|e| e.to_string())?;
    stdout().execute(EnableMouseCapture).map_err(|e| e.to_string())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| e.to_string())?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    stdout().execute(DisableMouseCapture).map_err(|e| e.to_string())?;
    disable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(LeaveAlternateScreen).map_err(|e| e.to_string())?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<(), String> {
    loop {
        terminal.draw(|frame| ui(frame, app)).map_err(|_| "Draw error".to_string())?;

        if event::poll(Duration::from_millis(50)).map_err(|e| e.to_string())? {
            match event::read().map_err(|e| e.to_string())? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => {
                        app.should_quit = true;
                    }
                    KeyCode::Esc => {
                        if app.session.pending_start().is_some() {
                            app.session.cancel_drag();
                            app.drag_current = None;
                            app.status = "Drag cancelled".to_string();
                        } else {
                            app.should_quit = true;
                        }
                    }
                    KeyCode::Char('s') => {
                        app.sticky_snap = !app.sticky_snap;
                    }
                    KeyCode::Char('g') => {
                        app.session.toggle_debug();
                    }
                    KeyCode::Char('c') => {
                        app.search_cycles();
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let top_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),
            Constraint::Length(30),
        ])
        .split(main_layout[0]);

    let border_color = if app.snapping() { Color::Yellow } else { Color::Green };
    let canvas_block = Block::default()
        .title(format!(" {} ", app.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    app.canvas_area = canvas_block.inner(top_layout[0]);

    let (min_x, min_y, max_x, max_y) = app.view;
    let app_ref: &App = app;

    let canvas = Canvas::default()
        .block(canvas_block)
        .marker(Marker::Braille)
        .x_bounds([min_x, max_x])
        .y_bounds([min_y, max_y])
        .paint(|ctx| {
            let arrangement = app_ref.session.arrangement();

            for seg in arrangement.segments() {
                ctx.draw(&CanvasLine {
                    x1: seg.start.x,
                    y1: seg.start.y,
                    x2: seg.end.x,
                    y2: seg.end.y,
                    color: Color::White,
                });
            }

            let at = |id: IntersectionId| arrangement.intersection(id).map(|ix| ix.point);

            if let Some(overlays) = app_ref.session.overlays() {
                for edge in overlays.graph {
                    if let (Some(a), Some(b)) = (at(edge.from), at(edge.to)) {
                        ctx.draw(&CanvasLine { x1: a.x, y1: a.y, x2: b.x, y2: b.y, color: Color::Cyan });
                    }
                }
                let coords: Vec<(f64, f64)> = overlays
                    .intersections
                    .iter()
                    .map(|ix| (ix.point.x, ix.point.y))
                    .collect();
                ctx.draw(&Points { coords: &coords, color: Color::Red });
            }

            for cycle in &app_ref.cycles {
                for pair in cycle.nodes().windows(2) {
                    if let (Some(a), Some(b)) = (at(pair[0]), at(pair[1])) {
                        ctx.draw(&CanvasLine { x1: a.x, y1: a.y, x2: b.x, y2: b.y, color: Color::Magenta });
                    }
                }
            }

            // Rubber band for the drag in progress
            if let Some(current) = app_ref.drag_current {
                if let (Some(start), Some(end)) = (
                    app_ref.session.pending_start(),
                    app_ref.session.preview_end(current, app_ref.snapping()),
                ) {
                    ctx.draw(&CanvasLine { x1: start.x, y1: start.y, x2: end.x, y2: end.y, color: Color::Yellow });
                }
            }
        });

    frame.render_widget(canvas, top_layout[0]);

    // Stats panel
    let arrangement = app.session.arrangement();
    let mut stats_text = format!(
        "Segments: {}\nIntersections: {}\nEdges: {}\nSnap: {}\nDebug: {}\n\n{}\n",
        arrangement.segments().len(),
        arrangement.intersections().len(),
        arrangement.graph().len(),
        format!(
            "{} 1:{}",
            if app.sticky_snap { "sticky" } else { "shift" },
            app.session.snap_config().ratio
        ),
        if app.session.debug() { "on" } else { "off" },
        app.status,
    );
    for cycle in app.cycles.iter().take(8) {
        stats_text.push_str(&format!("\n{}", format_cycle(cycle)));
    }

    let stats = Paragraph::new(stats_text)
        .block(Block::default()
            .title(" Arrangement ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)))
        .style(Style::default().fg(Color::White))
        .wrap(ratatui::widgets::Wrap { trim: true });

    frame.render_widget(stats, top_layout[1]);

    // Help
    let help = Paragraph::new("drag cut  shift/s snap  g debug  c cycles  esc cancel  q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, main_layout[1]);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_area() -> App {
        let mut app = App::new(None).unwrap();
        app.canvas_area = Rect::new(1, 1, 100, 50);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers }
    }

    #[test]
    fn cells_map_into_view() {
        let app = app_with_area();
        let p = app.cell_to_world(1, 1).unwrap();
        assert!((p.x - 0.5).abs() < 1e-9);
        assert!((p.y - 99.0).abs() < 1e-9);
        assert!(app.cell_to_world(0, 0).is_none());
        assert!(app.cell_to_world(101, 10).is_none());
    }

    #[test]
    fn drag_commits_one_cut() {
        let mut app = app_with_area();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 25, KeyModifiers::NONE));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 30, KeyModifiers::NONE));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 90, 40, KeyModifiers::NONE));

        assert_eq!(app.session.arrangement().segments().len(), 1);
        assert!(app.drag_current.is_none());
    }

    #[test]
    fn shift_snaps_the_drag() {
        let mut app = app_with_area();
        // One world unit per row, two per column
        app.view = (0.0, 0.0, 200.0, 50.0);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 25, KeyModifiers::NONE));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 90, 26, KeyModifiers::SHIFT));

        let seg = app.session.arrangement().segments()[0];
        assert_eq!(seg.start.y, seg.end.y);
    }

    #[test]
    fn cycles_key_without_intersections() {
        let mut app = app_with_area();
        app.search_cycles();
        assert!(app.cycles.is_empty());
        assert_eq!(app.status, "No intersection to search from");
    }
}
