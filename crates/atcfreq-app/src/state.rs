// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    DisplayPayload, EditCommand, FREQUENCIES_PLACEHOLDER, FrequencyRecord, NormalizedInput,
    QueryController, QueryOutcome, QueryTicket, RequestId, Resolution, TabKind,
    WEATHER_PLACEHOLDER, fetching_payload, normalize_waypoints, render_outcome, weather_payload,
};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyPanel {
    pub input: NormalizedInput,
    pub query: QueryController,
    pub display: DisplayPayload,
}

impl Default for FrequencyPanel {
    fn default() -> Self {
        Self {
            input: NormalizedInput::default(),
            query: QueryController::default(),
            display: DisplayPayload::message(FREQUENCIES_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPanel {
    pub input: NormalizedInput,
    pub display: DisplayPayload,
}

impl Default for WeatherPanel {
    fn default() -> Self {
        Self {
            input: NormalizedInput::default(),
            display: DisplayPayload::message(WEATHER_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub active_tab: TabKind,
    pub frequencies: FrequencyPanel,
    pub weather: WeatherPanel,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_tab(TabKind::first())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(TabKind),
    SelectTabId(String),
    Edit(EditCommand),
    Submit,
    LookupResolved {
        request_id: RequestId,
        result: Result<Vec<FrequencyRecord>, String>,
    },
    LookupNotIssued {
        request_id: RequestId,
        error: String,
    },
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    TabChanged(TabKind),
    UnknownTab(String),
    InputChanged { tab: TabKind, value: String },
    LookupRequested(QueryTicket),
    LookupCompleted {
        request_id: RequestId,
        outcome: QueryOutcome,
    },
    StaleLookupIgnored(RequestId),
    WeatherRequested(Vec<String>),
    DisplayReplaced(TabKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_tab(active_tab: TabKind) -> Self {
        Self {
            active_tab,
            frequencies: FrequencyPanel::default(),
            weather: WeatherPanel::default(),
            status_line: None,
        }
    }

    /// Exactly one entry is `true`.
    pub fn panel_visibility(&self) -> [(TabKind, bool); TabKind::ALL.len()] {
        TabKind::ALL.map(|tab| (tab, tab == self.active_tab))
    }

    pub fn input(&self, tab: TabKind) -> &NormalizedInput {
        match tab {
            TabKind::Frequencies => &self.frequencies.input,
            TabKind::Weather => &self.weather.input,
        }
    }

    pub fn display(&self, tab: TabKind) -> &DisplayPayload {
        match tab {
            TabKind::Frequencies => &self.frequencies.display,
            TabKind::Weather => &self.weather.display,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(tab) => self.select_tab(tab),
            AppCommand::SelectTabId(id) => match TabKind::parse(&id) {
                Some(tab) => self.select_tab(tab),
                None => vec![AppEvent::UnknownTab(id)],
            },
            AppCommand::Edit(edit) => self.edit_active_input(edit),
            AppCommand::Submit => match self.active_tab {
                TabKind::Frequencies => self.submit_frequencies(),
                TabKind::Weather => self.submit_weather(),
            },
            AppCommand::LookupResolved { request_id, result } => {
                self.resolve_lookup(request_id, result)
            }
            AppCommand::LookupNotIssued { request_id, error } => {
                self.resolve_lookup(request_id, Err(error))
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn select_tab(&mut self, tab: TabKind) -> Vec<AppEvent> {
        if self.active_tab == tab {
            return Vec::new();
        }
        self.active_tab = tab;
        vec![AppEvent::TabChanged(tab)]
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_tab(tabs[next])
    }

    fn edit_active_input(&mut self, edit: EditCommand) -> Vec<AppEvent> {
        let tab = self.active_tab;
        let input = match tab {
            TabKind::Frequencies => &mut self.frequencies.input,
            TabKind::Weather => &mut self.weather.input,
        };
        if !input.apply(edit) {
            return Vec::new();
        }
        vec![AppEvent::InputChanged {
            tab,
            value: input.text().to_owned(),
        }]
    }

    fn submit_frequencies(&mut self) -> Vec<AppEvent> {
        let panel = &mut self.frequencies;
        let code = panel.input.current_value().to_owned();
        let Some(ticket) = panel.query.begin(&code) else {
            return Vec::new();
        };

        panel.display = fetching_payload(&ticket.code);
        vec![
            AppEvent::DisplayReplaced(TabKind::Frequencies),
            AppEvent::LookupRequested(ticket),
        ]
    }

    fn submit_weather(&mut self) -> Vec<AppEvent> {
        let raw = self.weather.input.current_value();
        if raw.is_empty() {
            return Vec::new();
        }

        let waypoints = normalize_waypoints(raw);
        info!(?waypoints, "weather requested");
        self.weather.display = weather_payload(&waypoints);
        vec![
            AppEvent::WeatherRequested(waypoints),
            AppEvent::DisplayReplaced(TabKind::Weather),
        ]
    }

    fn resolve_lookup(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<FrequencyRecord>, String>,
    ) -> Vec<AppEvent> {
        match self.frequencies.query.resolve(request_id, result) {
            Resolution::Accepted(outcome) => {
                self.frequencies.display = render_outcome(&outcome);
                vec![
                    AppEvent::LookupCompleted {
                        request_id,
                        outcome,
                    },
                    AppEvent::DisplayReplaced(TabKind::Frequencies),
                ]
            }
            Resolution::Stale => vec![AppEvent::StaleLookupIgnored(request_id)],
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
