// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod catalog;
mod client;
mod codes;
mod service;

pub use catalog::Catalog;
pub use client::Client;
pub use codes::{frequency_kind_label, hz_to_mhz};
pub use service::Service;

use anyhow::Result;
use atcfreq_app::FrequencyRecord;
use std::sync::Arc;

/// Resolves an ICAO code to the airport's frequencies, in service order.
pub trait FrequencyLookup: Send + Sync {
    fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>>;
}

impl<T: FrequencyLookup + ?Sized> FrequencyLookup for Arc<T> {
    fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>> {
        (**self).lookup_frequencies(icao)
    }
}

impl<T: FrequencyLookup + ?Sized> FrequencyLookup for Box<T> {
    fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>> {
        (**self).lookup_frequencies(icao)
    }
}
