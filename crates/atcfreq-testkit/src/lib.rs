// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use atcfreq_app::FrequencyRecord;
use atcfreq_lookup::FrequencyLookup;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

pub fn berlin_tower() -> FrequencyRecord {
    FrequencyRecord::new("Tower", 118.1, "Berlin Tower")
}

pub fn berlin_records() -> Vec<FrequencyRecord> {
    vec![
        FrequencyRecord::new("ATIS", 123.805, "Brandenburg ATIS"),
        FrequencyRecord::new("Ground", 121.755, "Berlin Ground"),
        berlin_tower(),
    ]
}

#[derive(Debug, Clone)]
enum Scripted {
    Records(Vec<FrequencyRecord>),
    Failure(String),
}

/// Lookup double with per-code canned answers that records every call.
///
/// Codes without a script answer with an empty list.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    scripts: BTreeMap<String, Scripted>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, icao: &str, records: Vec<FrequencyRecord>) -> Self {
        self.scripts
            .insert(icao.to_owned(), Scripted::Records(records));
        self
    }

    pub fn with_failure(mut self, icao: &str, message: &str) -> Self {
        self.scripts
            .insert(icao.to_owned(), Scripted::Failure(message.to_owned()));
        self
    }

    /// Every call sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FrequencyLookup for ScriptedLookup {
    fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(icao.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(icao.to_owned()),
        }

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        match self.scripts.get(icao) {
            Some(Scripted::Records(records)) => Ok(records.clone()),
            Some(Scripted::Failure(message)) => Err(anyhow!("{message}")),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ScriptedLookup, berlin_records, berlin_tower};
    use anyhow::Result;
    use atcfreq_lookup::FrequencyLookup;

    #[test]
    fn scripted_lookup_answers_and_records_calls() -> Result<()> {
        let lookup = ScriptedLookup::new()
            .with_records("EDDB", berlin_records())
            .with_failure("UUMI", "timeout");

        assert_eq!(lookup.lookup_frequencies("EDDB")?.last(), Some(&berlin_tower()));
        let error = lookup
            .lookup_frequencies("UUMI")
            .expect_err("scripted failure");
        assert_eq!(error.to_string(), "timeout");
        assert!(lookup.lookup_frequencies("ZZZZ")?.is_empty());
        assert_eq!(lookup.calls(), vec!["EDDB", "UUMI", "ZZZZ"]);
        Ok(())
    }
}
