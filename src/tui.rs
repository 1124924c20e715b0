use std::cell::Cell;
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use miette::IntoDiagnostic;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use crate::app::{App, Command, Outcome, Progress, ProgressEvent, ProgressSink};
use crate::cache::CacheReport;
use crate::ddragon::DataDragonClient;
use crate::display::{DetailView, Grid};
use crate::error::PickerError;

const EVENTS_MAX: usize = 6;
const LOGS_MAX: usize = 200;
const MIN_TILE_WIDTH: u16 = 6;
const ICON_MARK: &str = "■ ";
const STATUS_STARTUP_ABORTED: &str = "Startup stopped unexpectedly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Picker,
    Logs,
    Help,
}

#[derive(Debug, Clone)]
enum Popup {
    Detail(DetailView),
    Notice { title: String, message: String },
}

#[derive(Debug, Clone, Copy, Default)]
struct Gate {
    ready: bool,
    controls_open: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct GridGeometry {
    area: Rect,
    tile_width: u16,
}

#[derive(Debug, Clone, Default)]
struct CacheSummary {
    version: Option<String>,
    files: usize,
    bytes: u64,
}

#[derive(Debug)]
struct AppState {
    status: String,
    progress: Option<Progress>,
    total: Option<usize>,
    events: VecDeque<String>,
    logs: VecDeque<String>,
    started: Instant,
    active: bool,
    fatal: bool,
}

type StartupResult<C> = (App<C>, Result<CacheReport, PickerError>);

enum Action {
    None,
    Quit,
    Dispatch(Command),
}

pub struct Tui {
    state: Arc<Mutex<AppState>>,
    view: View,
    gate: Gate,
    input: String,
    grid: Option<Grid>,
    cursor: usize,
    scroll: usize,
    popup: Option<Popup>,
    geometry: Cell<GridGeometry>,
    log_scroll: u16,
    locale: String,
    summary: CacheSummary,
}

struct TuiProgress {
    state: Arc<Mutex<AppState>>,
}

impl ProgressSink for TuiProgress {
    fn event(&self, event: ProgressEvent) {
        if let Ok(mut state) = self.state.lock() {
            let message = event.message.trim().to_string();
            match event.progress {
                Some(progress) => {
                    state.progress = Some(progress);
                    state.total = Some(progress.total);
                    if progress.current > 0 {
                        state.status =
                            format!("Caching icons: {}/{}", progress.current, progress.total);
                    }
                }
                None => state.status = message.clone(),
            }

            push_event(&mut state.events, message.clone());
            push_log(&mut state.logs, format!("[{}] {message}", timestamp()));
        }
    }
}

impl Tui {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState {
                status: "Initializing...".to_string(),
                progress: None,
                total: None,
                events: VecDeque::new(),
                logs: VecDeque::new(),
                started: Instant::now(),
                active: false,
                fatal: false,
            })),
            view: View::Picker,
            gate: Gate::default(),
            input: String::new(),
            grid: None,
            cursor: 0,
            scroll: 0,
            popup: None,
            geometry: Cell::new(GridGeometry::default()),
            log_scroll: 0,
            locale: locale.into(),
            summary: CacheSummary::default(),
        }
    }

    pub fn run<C: DataDragonClient + 'static>(&mut self, app: App<C>) -> miette::Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().into_diagnostic()?;
        stdout.execute(EnterAlternateScreen).into_diagnostic()?;
        stdout.execute(EnableMouseCapture).into_diagnostic()?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).into_diagnostic()?;
        terminal.clear().into_diagnostic()?;

        let result = self.event_loop(&mut terminal, app);

        disable_raw_mode().into_diagnostic()?;
        let mut stdout = io::stdout();
        stdout.execute(DisableMouseCapture).into_diagnostic()?;
        stdout.execute(LeaveAlternateScreen).into_diagnostic()?;
        result
    }

    fn event_loop<C: DataDragonClient + 'static>(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        app: App<C>,
    ) -> miette::Result<()> {
        let (tx, rx) = mpsc::channel();
        let sink = TuiProgress {
            state: self.state.clone(),
        };
        self.set_active(true);
        let mut worker = Some(thread::spawn(move || {
            let mut app = app;
            let result = app.startup(&sink);
            let _ = tx.send((app, result));
        }));

        let mut app: Option<App<C>> = None;
        let mut tick = 0usize;
        loop {
            if app.is_none() {
                app = self.poll_startup(&rx, &mut worker);
            }

            if let Ok(state) = self.state.lock() {
                terminal
                    .draw(|frame| draw_ui(frame, self, &state, tick))
                    .into_diagnostic()?;
            }

            if event::poll(Duration::from_millis(120)).into_diagnostic()? {
                let action = match event::read().into_diagnostic()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => Action::None,
                };
                match action {
                    Action::Quit => break,
                    Action::Dispatch(command) => {
                        if let Some(app) = app.as_mut() {
                            let outcome = app.dispatch(command);
                            self.gate.controls_open = app.controls_open();
                            self.apply(outcome);
                        }
                    }
                    Action::None => {}
                }
            }

            tick = tick.wrapping_add(1);
        }
        Ok(())
    }

    fn finish_startup<C: DataDragonClient>(
        &mut self,
        app: &App<C>,
        result: Result<CacheReport, PickerError>,
    ) {
        self.set_active(false);
        if let Some(version) = app.version() {
            let dir = app.store().icon_dir(version);
            let (files, bytes) = dir_stats(dir.as_std_path());
            self.summary = CacheSummary {
                version: Some(version.to_string()),
                files,
                bytes,
            };
        }

        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.status = app.status().to_string();
        match result {
            Ok(report) => {
                self.gate.ready = app.icons_ready();
                let line = format!(
                    "cache pass done: {} cached, {} downloaded, {} failed",
                    report.hits,
                    report.downloaded,
                    report.failed.len()
                );
                push_event(&mut state.events, line.clone());
                push_log(&mut state.logs, format!("[{}] {line}", timestamp()));
            }
            Err(err) => {
                state.fatal = true;
                push_log(&mut state.logs, format!("[{}] error: {err}", timestamp()));
            }
        }
    }

    fn poll_startup<C: DataDragonClient>(
        &mut self,
        rx: &mpsc::Receiver<StartupResult<C>>,
        worker: &mut Option<JoinHandle<()>>,
    ) -> Option<App<C>> {
        worker.as_ref()?;
        match rx.try_recv() {
            Ok((app, result)) => {
                self.finish_startup(&app, result);
                if let Some(handle) = worker.take() {
                    handle.join().ok();
                }
                Some(app)
            }
            Err(TryRecvError::Disconnected) => {
                if let Some(handle) = worker.take() {
                    handle.join().ok();
                }
                self.abort_startup();
                None
            }
            Err(TryRecvError::Empty) => None,
        }
    }

    fn abort_startup(&mut self) {
        self.state.clear_poison();
        self.set_active(false);
        if let Ok(mut state) = self.state.lock() {
            state.fatal = true;
            state.status = STATUS_STARTUP_ABORTED.to_string();
            push_log(
                &mut state.logs,
                format!("[{}] error: startup worker exited without a result", timestamp()),
            );
        }
        tracing::warn!("startup worker exited without a result");
    }

    fn apply(&mut self, outcome: Result<Outcome, PickerError>) {
        match outcome {
            Ok(Outcome::ControlsOpened) => self.log("controls opened"),
            Ok(Outcome::Render(grid)) => {
                self.log(&format!("showing {} champions", grid.len()));
                self.grid = Some(grid);
                self.cursor = 0;
                self.scroll = 0;
            }
            Ok(Outcome::Detail(detail)) => self.popup = Some(Popup::Detail(detail)),
            Err(PickerError::InvalidArgument(message)) => {
                self.popup = Some(Popup::Notice {
                    title: "Invalid count".to_string(),
                    message,
                });
            }
            Err(err) => {
                self.log(&format!("error: {err}"));
                self.popup = Some(Popup::Notice {
                    title: "Error".to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if self.popup.is_some() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ')
            ) {
                self.popup = None;
            }
            return Action::None;
        }

        match key.code {
            KeyCode::F(1) | KeyCode::Char('?') => {
                self.view = View::Help;
                return Action::None;
            }
            KeyCode::F(4) => {
                self.view = View::Logs;
                return Action::None;
            }
            KeyCode::Esc if self.view != View::Picker => {
                self.view = View::Picker;
                return Action::None;
            }
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }

        if self.view == View::Logs {
            match key.code {
                KeyCode::PageUp | KeyCode::Up => self.scroll_logs(-5),
                KeyCode::PageDown | KeyCode::Down => self.scroll_logs(5),
                _ => {}
            }
            return Action::None;
        }
        if self.view != View::Picker || !self.gate.ready {
            return Action::None;
        }

        if !self.gate.controls_open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('s') => Action::Dispatch(Command::Start),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if self.input.len() < 4 {
                    self.input.push(ch);
                }
                Action::None
            }
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Enter => Action::Dispatch(Command::SelectRandom {
                input: self.input.clone(),
            }),
            KeyCode::Char('a') => Action::Dispatch(Command::ShowAll),
            KeyCode::Char('i') | KeyCode::Char(' ') => self.detail_at(self.cursor),
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-(self.columns() as isize)),
            KeyCode::Down => self.move_cursor(self.columns() as isize),
            _ => Action::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if self.popup.is_some() || self.view != View::Picker {
            return Action::None;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.index_at(mouse.column, mouse.row) else {
                    return Action::None;
                };
                self.cursor = index;
                self.detail_at(index)
            }
            MouseEventKind::ScrollDown => {
                self.scroll_grid(1);
                Action::None
            }
            MouseEventKind::ScrollUp => {
                self.scroll_grid(-1);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn detail_at(&self, index: usize) -> Action {
        self.grid
            .as_ref()
            .and_then(|grid| grid.slot_at(index))
            .map(|tile| Action::Dispatch(Command::Detail(tile.id.clone())))
            .unwrap_or(Action::None)
    }

    fn index_at(&self, column: u16, row: u16) -> Option<usize> {
        let grid = self.grid.as_ref()?;
        let geometry = self.geometry.get();
        let area = geometry.area;
        if geometry.tile_width == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        let col = ((column - area.x) / geometry.tile_width) as usize;
        let grid_row = (row - area.y) as usize + self.scroll;
        if col >= grid.columns() {
            return None;
        }
        let index = grid_row * grid.columns() + col;
        (index < grid.len()).then_some(index)
    }

    fn columns(&self) -> usize {
        self.grid.as_ref().map(Grid::columns).unwrap_or(1)
    }

    fn move_cursor(&mut self, delta: isize) -> Action {
        let Some(grid) = self.grid.as_ref() else {
            return Action::None;
        };
        if grid.is_empty() {
            return Action::None;
        }
        let next = self.cursor as isize + delta;
        if next >= 0 && (next as usize) < grid.len() {
            self.cursor = next as usize;
        }
        let (row, _) = grid.position(self.cursor);
        let visible = self.geometry.get().area.height.max(1) as usize;
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + visible {
            self.scroll = row + 1 - visible;
        }
        Action::None
    }

    fn scroll_grid(&mut self, delta: isize) {
        let rows = self.grid.as_ref().map(Grid::rows).unwrap_or(0);
        let max = rows.saturating_sub(1) as isize;
        self.scroll = (self.scroll as isize + delta).clamp(0, max.max(0)) as usize;
    }

    fn scroll_logs(&mut self, delta: i16) {
        let max = self.state.lock().map(|state| state.logs.len()).unwrap_or(0);
        let max_scroll = max.saturating_sub(1) as i16;
        let next = (self.log_scroll as i16 + delta).clamp(0, max_scroll.max(0));
        self.log_scroll = next as u16;
    }

    fn set_active(&self, active: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.active = active;
            if active {
                state.started = Instant::now();
            }
        }
    }

    fn log(&self, line: &str) {
        if let Ok(mut state) = self.state.lock() {
            push_log(&mut state.logs, format!("[{}] {line}", timestamp()));
        }
    }
}

fn draw_ui(frame: &mut ratatui::Frame, tui: &Tui, state: &AppState, tick: usize) {
    match tui.view {
        View::Picker => draw_picker(frame, tui, state, tick),
        View::Logs => draw_logs(frame, tui, state, tick),
        View::Help => draw_help(frame),
    }
    if let Some(popup) = &tui.popup {
        draw_popup(frame, popup);
    }
}

fn draw_picker(frame: &mut ratatui::Frame, tui: &Tui, state: &AppState, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(5),
        ])
        .split(frame.area());

    frame.render_widget(draw_header(tui, state, tick), chunks[0]);
    draw_status_panel(frame, state, chunks[1]);
    frame.render_widget(draw_controls(tui, state), chunks[2]);
    draw_grid(frame, tui, chunks[3]);
}

fn draw_header(tui: &Tui, state: &AppState, tick: usize) -> Paragraph<'static> {
    let hb = if state.active && tick % 2 == 0 { "*" } else { " " };
    let version = tui
        .summary
        .version
        .clone()
        .unwrap_or_else(|| "--".to_string());
    let header_line = Line::from(vec![
        Span::styled(
            "CHAMP-PICKER",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(env!("CARGO_PKG_VERSION"), Style::default().fg(Color::Gray)),
        Span::raw("   Data: "),
        Span::styled(version, Style::default().fg(Color::Cyan)),
        Span::raw(format!("   Locale: {}   ", tui.locale)),
        Span::styled(hb, Style::default().fg(Color::Green)),
    ]);
    let cache_line = Line::from(Span::styled(
        format!(
            "Icon cache: {} files · {}   F1 help · F4 logs · q quit",
            tui.summary.files,
            bytes_to_human(tui.summary.bytes)
        ),
        Style::default().fg(Color::Gray),
    ));
    Paragraph::new(vec![header_line, cache_line])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::BOTTOM))
}

fn draw_status_panel(frame: &mut ratatui::Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let status_color = if state.fatal {
        Color::Red
    } else if state.active {
        Color::Cyan
    } else {
        Color::Green
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::styled(state.status.clone(), Style::default().fg(status_color)),
    ]));
    frame.render_widget(status, rows[0]);

    let (ratio, label) = match state.progress {
        Some(Progress { current, total }) if total > 0 => (
            current as f64 / total as f64,
            format!("{current}/{total}"),
        ),
        _ => (0.0, "--".to_string()),
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, rows[1]);

    let total = state
        .total
        .map(|total| total.to_string())
        .unwrap_or_else(|| "0".to_string());
    let elapsed = state.started.elapsed().as_secs();
    let count = Paragraph::new(Line::from(vec![
        Span::styled("Total champions: ", Style::default().fg(Color::Gray)),
        Span::raw(total),
        Span::styled("   Elapsed: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{elapsed}s")),
    ]));
    frame.render_widget(count, rows[2]);

    let last = state.events.back().cloned().unwrap_or_default();
    let event = Paragraph::new(Line::from(Span::styled(
        last,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(event, rows[3]);
}

fn draw_controls(tui: &Tui, state: &AppState) -> Paragraph<'static> {
    let line = if state.fatal {
        Line::from(Span::styled(
            "Startup failed. Restart champ-picker to try again.",
            Style::default().fg(Color::Red),
        ))
    } else if !tui.gate.ready {
        Line::from(Span::styled(
            "Caching icons. Controls unlock when the pass completes.",
            Style::default().fg(Color::Yellow),
        ))
    } else if !tui.gate.controls_open {
        Line::from(vec![
            Span::styled(
                "[Enter] ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Start picking"),
        ])
    } else {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("Count: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}_", tui.input),
                Style::default().fg(Color::White),
            ),
            Span::styled("   [Enter] ", key),
            Span::raw("random"),
            Span::styled("  [a] ", key),
            Span::raw("show all"),
            Span::styled("  [arrows] ", key),
            Span::raw("move"),
            Span::styled("  [i]/click ", key),
            Span::raw("details"),
        ])
    };
    Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM))
}

fn draw_grid(frame: &mut ratatui::Frame, tui: &Tui, area: Rect) {
    let title = match &tui.grid {
        Some(grid) => format!(" Champions ({}) ", grid.len()),
        None => " Champions ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(grid) = tui.grid.as_ref() else {
        tui.geometry.set(GridGeometry {
            area: inner,
            tile_width: 0,
        });
        return;
    };

    let tile_width = (inner.width / grid.columns().max(1) as u16).max(MIN_TILE_WIDTH);
    tui.geometry.set(GridGeometry {
        area: inner,
        tile_width,
    });

    let visible = inner.height as usize;
    let mut lines = Vec::with_capacity(visible);
    for row in tui.scroll..grid.rows().min(tui.scroll + visible) {
        let mut spans = Vec::with_capacity(grid.columns());
        for (col, slot) in grid.row(row).iter().enumerate() {
            let index = row * grid.columns() + col;
            let text = match slot {
                Some(tile) => fit(&format!("{ICON_MARK}{}", tile.name), tile_width as usize),
                None => " ".repeat(tile_width as usize),
            };
            let style = if index == tui.cursor && slot.is_some() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(frame: &mut ratatui::Frame, tui: &Tui, state: &AppState, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(frame.area());

    frame.render_widget(draw_header(tui, state, tick), chunks[0]);

    let total = state.logs.len();
    let visible = chunks[1].height.saturating_sub(1) as usize;
    let start = total.saturating_sub(tui.log_scroll as usize + visible);
    let mut lines = Vec::with_capacity(visible + 1);
    lines.push(Line::from(Span::styled(
        "LOGS (PgUp/PgDown to scroll, Esc to return)",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    for line in state.logs.iter().skip(start).take(visible) {
        lines.push(Line::from(line.clone()));
    }
    let view = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(view, chunks[1]);
}

fn draw_help(frame: &mut ratatui::Frame) {
    let block = Block::default().borders(Borders::ALL).title("Help");
    let lines = vec![
        Line::from("F1/? Help   F4 Logs   Esc back / quit   q quit"),
        Line::from("Enter  start picking, then draw a random selection"),
        Line::from("0-9    type how many champions to draw"),
        Line::from("a      show every champion"),
        Line::from("arrows move the cursor, i or click opens details"),
        Line::from("Icons are cached per data version under the cache directory."),
    ];
    let view = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(view, frame.area());
}

fn draw_popup(frame: &mut ratatui::Frame, popup: &Popup) {
    let area = centered(frame.area(), 60, 40);
    frame.render_widget(Clear, area);

    let (title, lines) = match popup {
        Popup::Detail(detail) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    detail.title.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::ITALIC),
                )),
                Line::from(""),
                Line::from(detail.description.clone()),
            ];
            if !detail.tags.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Tags: ", Style::default().fg(Color::Gray)),
                    Span::raw(detail.tags.join(", ")),
                ]));
            }
            (format!(" {} ", detail.name), lines)
        }
        Popup::Notice { title, message } => (
            format!(" {title} "),
            vec![
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from("Press Enter or Esc to dismiss."),
            ],
        ),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let view = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(view, area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn fit(text: &str, width: usize) -> String {
    let budget = width.saturating_sub(1);
    let mut out = text.chars().take(budget).collect::<String>();
    let used = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

fn push_event(buffer: &mut VecDeque<String>, item: String) {
    buffer.push_back(item);
    while buffer.len() > EVENTS_MAX {
        buffer.pop_front();
    }
}

fn push_log(buffer: &mut VecDeque<String>, item: String) {
    buffer.push_back(item);
    while buffer.len() > LOGS_MAX {
        buffer.pop_front();
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn dir_stats(path: &std::path::Path) -> (usize, u64) {
    let Ok(entries) = std::fs::read_dir(path) else {
        return (0, 0);
    };
    entries
        .flatten()
        .filter_map(|entry| entry.metadata().ok())
        .filter(|meta| meta.is_file())
        .fold((0, 0), |(files, bytes), meta| {
            (files + 1, bytes.saturating_add(meta.len()))
        })
}

fn bytes_to_human(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let value = bytes as f64;
    if value >= GB {
        format!("{:.1} GB", value / GB)
    } else if value >= MB {
        format!("{:.1} MB", value / MB)
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChampionId, Locale, Version};
    use crate::roster::Roster;

    struct Unreachable;

    impl DataDragonClient for Unreachable {
        fn fetch_latest_version(&self) -> Result<Version, PickerError> {
            Err(PickerError::Network("offline".to_string()))
        }

        fn fetch_roster(&self, _: &Version, _: &Locale) -> Result<Roster, PickerError> {
            Err(PickerError::Network("offline".to_string()))
        }

        fn fetch_icon_bytes(&self, _: &ChampionId, _: &Version) -> Result<Vec<u8>, PickerError> {
            Err(PickerError::Network("offline".to_string()))
        }
    }

    #[test]
    fn worker_exit_without_result_marks_startup_fatal() {
        let mut tui = Tui::new("en_US");
        let (tx, rx) = mpsc::channel::<StartupResult<Unreachable>>();
        let mut worker = Some(thread::spawn(move || drop(tx)));

        let mut app = None;
        for _ in 0..100 {
            app = tui.poll_startup(&rx, &mut worker);
            if worker.is_none() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        assert!(app.is_none());
        assert!(worker.is_none());
        assert!(!tui.gate.ready);
        let state = tui.state.lock().unwrap();
        assert!(state.fatal);
        assert!(!state.active);
        assert_eq!(state.status, STATUS_STARTUP_ABORTED);
    }

    #[test]
    fn pending_worker_keeps_waiting() {
        let mut tui = Tui::new("en_US");
        let (tx, rx) = mpsc::channel::<StartupResult<Unreachable>>();
        let mut worker = Some(thread::spawn(|| {}));

        assert!(tui.poll_startup(&rx, &mut worker).is_none());
        assert!(worker.is_some());
        assert!(!tui.state.lock().unwrap().fatal);
        drop(tx);
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("Ahri", 8), "Ahri    ");
        assert_eq!(fit("Nunu & Willump", 8), "Nunu &  ");
        assert_eq!(fit("Nunu & Willump", 8).chars().count(), 8);
        assert_eq!(fit("Ahri", 8).chars().count(), 8);
        assert_eq!(fit("", 3), "   ");
    }

    #[test]
    fn human_sizes() {
        assert_eq!(bytes_to_human(512), "512 B");
        assert_eq!(bytes_to_human(2048), "2.0 KB");
        assert_eq!(bytes_to_human(3 * 1024 * 1024), "3.0 MB");
    }
}
