// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};

/// One radio frequency entry as returned by the lookup service.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRecord {
    pub kind: String,
    pub megahertz: f64,
    pub label: String,
}

impl FrequencyRecord {
    pub fn new(kind: impl Into<String>, megahertz: f64, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            megahertz,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Success(Vec<FrequencyRecord>),
    Empty,
    Failure(String),
}

impl QueryOutcome {
    pub fn from_lookup(result: Result<Vec<FrequencyRecord>, String>) -> Self {
        match result {
            Ok(records) if records.is_empty() => Self::Empty,
            Ok(records) => Self::Success(records),
            Err(message) => Self::Failure(message),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Empty => "empty",
            Self::Failure(_) => "failure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabKind {
    Frequencies,
    Weather,
}

impl TabKind {
    pub const ALL: [Self; 2] = [Self::Frequencies, Self::Weather];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Frequencies => "frequencies",
            Self::Weather => "weather",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Frequencies => "Frequencies",
            Self::Weather => "Weather",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == value)
    }

    pub fn from_id(value: &str) -> Result<Self> {
        Self::parse(value.trim()).ok_or_else(|| {
            let known = Self::ALL
                .iter()
                .map(|tab| tab.id())
                .collect::<Vec<_>>()
                .join(", ");
            anyhow!("unknown tab {value:?}; expected one of: {known}")
        })
    }

    pub const fn first() -> Self {
        Self::ALL[0]
    }
}

#[cfg(test)]
mod tests {
    use super::{FrequencyRecord, QueryOutcome, TabKind};

    #[test]
    fn lookup_result_maps_to_outcome() {
        let tower = FrequencyRecord::new("Tower", 118.1, "Berlin Tower");
        assert_eq!(
            QueryOutcome::from_lookup(Ok(vec![tower.clone()])),
            QueryOutcome::Success(vec![tower])
        );
        assert_eq!(QueryOutcome::from_lookup(Ok(Vec::new())), QueryOutcome::Empty);
        assert_eq!(
            QueryOutcome::from_lookup(Err("timeout".to_owned())),
            QueryOutcome::Failure("timeout".to_owned())
        );
    }

    #[test]
    fn tab_ids_round_trip_and_reject_unknown() {
        for tab in TabKind::ALL {
            assert_eq!(TabKind::parse(tab.id()), Some(tab));
        }
        assert_eq!(TabKind::parse("radar"), None);
        assert_eq!(TabKind::first(), TabKind::Frequencies);

        let error = TabKind::from_id("radar").expect_err("unknown tab should fail");
        assert!(error.to_string().contains("frequencies, weather"));
    }
}
