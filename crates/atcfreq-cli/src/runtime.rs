// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use atcfreq_app::{FrequencyRecord, RequestId};
use atcfreq_lookup::FrequencyLookup;
use atcfreq_tui::{AppRuntime, InternalEvent, LookupEvent};
use std::collections::BTreeSet;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use tracing::debug;

/// Runs each lookup on its own worker thread and reports back over the UI channel.
pub struct LookupRuntime {
    service: Arc<dyn FrequencyLookup>,
    cancelled: Arc<Mutex<BTreeSet<RequestId>>>,
}

impl LookupRuntime {
    pub fn new(service: impl FrequencyLookup + 'static) -> Self {
        Self {
            service: Arc::new(service),
            cancelled: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }
}

fn lock(cancelled: &Mutex<BTreeSet<RequestId>>) -> MutexGuard<'_, BTreeSet<RequestId>> {
    match cancelled.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl AppRuntime for LookupRuntime {
    fn lookup_frequencies(&mut self, icao: &str) -> Result<Vec<FrequencyRecord>> {
        self.service.lookup_frequencies(icao)
    }

    fn spawn_lookup(
        &mut self,
        request_id: RequestId,
        icao: &str,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let service = Arc::clone(&self.service);
        let cancelled = Arc::clone(&self.cancelled);
        let icao = icao.to_owned();

        thread::Builder::new()
            .name(format!("lookup-{}", request_id.get()))
            .spawn(move || {
                let result = service
                    .lookup_frequencies(&icao)
                    .map_err(|error| format!("{error:#}"));

                if lock(&cancelled).remove(&request_id) {
                    debug!(%request_id, %icao, "dropping result of cancelled lookup");
                    return;
                }
                if tx
                    .send(InternalEvent::Lookup(LookupEvent { request_id, result }))
                    .is_err()
                {
                    debug!(%request_id, "lookup finished after the UI exited");
                }
            })
            .context("spawn lookup worker")?;
        Ok(())
    }

    fn cancel_lookup(&mut self, request_id: RequestId) -> Result<()> {
        lock(&self.cancelled).insert(request_id);
        Ok(())
    }
}
