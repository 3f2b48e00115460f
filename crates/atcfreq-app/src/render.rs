// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FrequencyRecord, QueryOutcome};

pub const FREQUENCY_COLUMNS: [&str; 3] = ["Type", "MHz", "Name"];
pub const NO_FREQUENCIES_MESSAGE: &str = "No frequencies found or error occurred.";
pub const FREQUENCIES_PLACEHOLDER: &str = "Results will appear here";
pub const WEATHER_PLACEHOLDER: &str = "Weather will appear here";

/// What a panel's results area shows. Always replaced whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayPayload {
    Table {
        columns: [&'static str; 3],
        rows: Vec<[String; 3]>,
    },
    Message(String),
}

impl DisplayPayload {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(text) => Some(text),
            Self::Table { .. } => None,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Table { rows, .. } => rows.len(),
            Self::Message(_) => 0,
        }
    }
}

pub fn render_outcome(outcome: &QueryOutcome) -> DisplayPayload {
    match outcome {
        QueryOutcome::Success(records) => DisplayPayload::Table {
            columns: FREQUENCY_COLUMNS,
            rows: records.iter().map(frequency_row).collect(),
        },
        QueryOutcome::Empty => DisplayPayload::message(NO_FREQUENCIES_MESSAGE),
        QueryOutcome::Failure(message) => DisplayPayload::Message(format!("Error: {message}")),
    }
}

pub fn fetching_payload(code: &str) -> DisplayPayload {
    DisplayPayload::Message(format!("Fetching frequencies for {code}..."))
}

pub fn format_megahertz(value: f64) -> String {
    format!("{value:.3}")
}

/// Replaces control characters so remote text cannot drive the terminal.
pub fn sanitize_untrusted(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_control() { '\u{FFFD}' } else { ch })
        .collect()
}

fn frequency_row(record: &FrequencyRecord) -> [String; 3] {
    [
        sanitize_untrusted(&record.kind),
        format_megahertz(record.megahertz),
        sanitize_untrusted(&record.label),
    ]
}
