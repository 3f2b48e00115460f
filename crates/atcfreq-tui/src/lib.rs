// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use atcfreq_app::{
    AppCommand, AppEvent, AppState, DisplayPayload, EditCommand, FrequencyRecord, QueryTicket,
    RequestId, TabKind, sanitize_untrusted,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const POLL_INTERVAL: Duration = Duration::from_millis(120);
const KEY_HINTS: &str = "enter submit | tab/shift+tab F1/F2 | ctrl+u clear | esc ctrl+q";

/// Host-side collaborator for work the pure state cannot do itself.
pub trait AppRuntime {
    fn lookup_frequencies(&mut self, icao: &str) -> Result<Vec<FrequencyRecord>>;

    /// Starts a lookup whose result arrives later as [`InternalEvent::Lookup`].
    ///
    /// The default answers synchronously on the calling thread; runtimes that
    /// own a worker override it.
    fn spawn_lookup(
        &mut self,
        request_id: RequestId,
        icao: &str,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self
            .lookup_frequencies(icao)
            .map_err(|error| format!("{error:#}"));
        tx.send(InternalEvent::Lookup(LookupEvent { request_id, result }))
            .map_err(|_| anyhow!("lookup event channel closed"))?;
        Ok(())
    }

    fn cancel_lookup(&mut self, _request_id: RequestId) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupEvent {
    pub request_id: RequestId,
    pub result: Result<Vec<FrequencyRecord>, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    Lookup(LookupEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ViewData {
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    let result = event_loop(
        &mut terminal,
        state,
        runtime,
        &mut view_data,
        &internal_tx,
        &internal_rx,
    );

    if let Some(in_flight) = state.frequencies.query.in_flight()
        && let Err(error) = runtime.cancel_lookup(in_flight.request_id)
    {
        debug!(%error, "cancel on exit failed");
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<R: AppRuntime>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    internal_rx: &Receiver<InternalEvent>,
) -> Result<()> {
    loop {
        process_internal_events(state, view_data, internal_rx);

        terminal
            .draw(|frame| render(frame, state))
            .context("draw frame")?;

        if !event::poll(POLL_INTERVAL).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(state, runtime, view_data, internal_tx, key) {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Lookup(LookupEvent { request_id, result }) => {
                state.dispatch(AppCommand::LookupResolved { request_id, result });
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    if key.code == KeyCode::Esc {
        return true;
    }

    let Some(command) = command_for_key(key) else {
        return false;
    };
    dispatch_command(state, runtime, view_data, internal_tx, command);
    false
}

fn command_for_key(key: KeyEvent) -> Option<AppCommand> {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let command = match key.code {
        KeyCode::Tab => AppCommand::NextTab,
        KeyCode::BackTab => AppCommand::PrevTab,
        KeyCode::F(1) => AppCommand::SelectTab(TabKind::Frequencies),
        KeyCode::F(2) => AppCommand::SelectTab(TabKind::Weather),
        KeyCode::Enter => AppCommand::Submit,
        KeyCode::Char('u') if control => AppCommand::Edit(EditCommand::Clear),
        KeyCode::Char(ch) if !control && !alt => AppCommand::Edit(EditCommand::Insert(ch)),
        KeyCode::Backspace => AppCommand::Edit(EditCommand::Backspace),
        KeyCode::Delete => AppCommand::Edit(EditCommand::Delete),
        KeyCode::Left => AppCommand::Edit(EditCommand::Left),
        KeyCode::Right => AppCommand::Edit(EditCommand::Right),
        KeyCode::Home => AppCommand::Edit(EditCommand::Home),
        KeyCode::End => AppCommand::Edit(EditCommand::End),
        _ => return None,
    };
    Some(command)
}

fn dispatch_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    for event in state.dispatch(command) {
        match event {
            AppEvent::LookupRequested(ticket) => {
                start_lookup(state, runtime, view_data, internal_tx, ticket);
            }
            AppEvent::UnknownTab(id) => {
                warn!(tab = %id, "ignoring unknown tab id");
                emit_status(state, view_data, internal_tx, format!("unknown tab {id:?}"));
            }
            _ => {}
        }
    }
}

fn start_lookup<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    ticket: QueryTicket,
) {
    if let Some(superseded) = ticket.superseded {
        if let Err(error) = runtime.cancel_lookup(superseded) {
            debug!(request_id = %superseded, %error, "cancel of superseded lookup failed");
        }
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("lookup {superseded} superseded"),
        );
    }

    if let Err(error) = runtime.spawn_lookup(ticket.request_id, &ticket.code, internal_tx.clone())
    {
        state.dispatch(AppCommand::LookupNotIssued {
            request_id: ticket.request_id,
            error: format!("{error:#}"),
        });
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let titles = TabKind::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| format!("F{} {}", index + 1, tab.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(titles)
        .block(Block::default().title("atcfreq").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_input(frame, layout[1], state);
    render_payload(
        frame,
        layout[2],
        results_title(state.active_tab),
        state.display(state.active_tab),
    );

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);
}

fn render_input(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState) {
    let tab = state.active_tab;
    let input = state.input(tab);
    let block = Block::default().title(input_title(tab)).borders(Borders::ALL);

    let field = if input.is_empty() {
        Paragraph::new(input_placeholder(tab)).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(input.text())
    };
    frame.render_widget(field.block(block), area);

    let inner_width = area.width.saturating_sub(2);
    let offset = u16::try_from(input.cursor())
        .unwrap_or(u16::MAX)
        .min(inner_width.saturating_sub(1));
    frame.set_cursor_position(Position::new(area.x + 1 + offset, area.y + 1));
}

fn render_payload(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    payload: &DisplayPayload,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    match payload {
        DisplayPayload::Message(text) => {
            let body = Paragraph::new(sanitize_untrusted_lines(text))
                .block(block)
                .wrap(Wrap { trim: false });
            frame.render_widget(body, area);
        }
        DisplayPayload::Table { columns, rows } => {
            let header = Row::new(columns.iter().map(|column| Cell::from(*column)))
                .style(Style::default().add_modifier(Modifier::BOLD));
            let body = rows
                .iter()
                .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))));
            let table = Table::new(
                body,
                [
                    Constraint::Length(12),
                    Constraint::Length(9),
                    Constraint::Min(10),
                ],
            )
            .header(header)
            .block(block);
            frame.render_widget(table, area);
        }
    }
}

// Messages may carry service error text; newlines are layout, everything else
// is untrusted.
fn sanitize_untrusted_lines(text: &str) -> String {
    text.split('\n')
        .map(sanitize_untrusted)
        .collect::<Vec<_>>()
        .join("\n")
}

fn input_title(tab: TabKind) -> &'static str {
    match tab {
        TabKind::Frequencies => "ICAO",
        TabKind::Weather => "Waypoints",
    }
}

fn input_placeholder(tab: TabKind) -> &'static str {
    match tab {
        TabKind::Frequencies => "Enter ICAO code (e.g. EDDB)",
        TabKind::Weather => "Enter waypoints separated by commas",
    }
}

fn results_title(tab: TabKind) -> &'static str {
    match tab {
        TabKind::Frequencies => "Frequencies",
        TabKind::Weather => "Weather",
    }
}

fn status_text(state: &AppState) -> String {
    let pending = state
        .frequencies
        .query
        .in_flight()
        .map(|in_flight| format!("fetching {} | ", in_flight.code))
        .unwrap_or_default();
    match &state.status_line {
        Some(status) => format!("{pending}{status} | {KEY_HINTS}"),
        None => format!("{pending}{KEY_HINTS}"),
    }
}
