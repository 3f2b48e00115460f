// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FrequencyLookup, frequency_kind_label, hz_to_mhz};
use anyhow::Result;
use atcfreq_app::FrequencyRecord;
use std::collections::BTreeMap;

// (type code, Hz, station name)
const EDDB: [(i32, i64, &str); 6] = [
    (1, 123_805_000, "Brandenburg ATIS"),
    (7, 121_605_000, "Berlin Delivery"),
    (5, 121_755_000, "Berlin Ground"),
    (6, 118_100_000, "Berlin Tower"),
    (8, 119_625_000, "Berlin Director"),
    (9, 120_625_000, "Berlin Departure"),
];

const UUMI: [(i32, i64, &str); 4] = [
    (1, 128_400_000, "UUMI ATIS"),
    (5, 121_900_000, "UUMI Ground"),
    (6, 124_000_000, "UUMI Tower"),
    (8, 127_100_000, "UUMI Approach"),
];

/// In-memory frequency source. Unknown airports yield no records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    airports: BTreeMap<String, Vec<FrequencyRecord>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn demo() -> Self {
        let mut catalog = Self::new();
        catalog.insert_facility("EDDB", &EDDB);
        catalog.insert_facility("UUMI", &UUMI);
        catalog
    }

    pub fn insert(&mut self, icao: &str, records: Vec<FrequencyRecord>) {
        self.airports.insert(icao.to_uppercase(), records);
    }

    pub fn airports(&self) -> impl Iterator<Item = &str> {
        self.airports.keys().map(String::as_str)
    }

    fn insert_facility(&mut self, icao: &str, entries: &[(i32, i64, &str)]) {
        let records = entries
            .iter()
            .map(|(code, hz, name)| {
                FrequencyRecord::new(frequency_kind_label(*code), hz_to_mhz(*hz), *name)
            })
            .collect();
        self.insert(icao, records);
    }
}

impl FrequencyLookup for Catalog {
    fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>> {
        Ok(self.airports.get(icao).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::FrequencyLookup;
    use anyhow::Result;
    use atcfreq_app::FrequencyRecord;

    #[test]
    fn demo_catalog_keeps_facility_order() -> Result<()> {
        let catalog = Catalog::demo();
        assert_eq!(catalog.airports().collect::<Vec<_>>(), vec!["EDDB", "UUMI"]);

        let records = catalog.lookup_frequencies("EDDB")?;
        let kinds = records
            .iter()
            .map(|record| record.kind.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec!["ATIS", "CLEARANCE", "GROUND", "TOWER", "APPROACH", "DEPARTURE"]
        );
        assert_eq!(
            records[3],
            FrequencyRecord::new("TOWER", 118.1, "Berlin Tower")
        );
        Ok(())
    }

    #[test]
    fn unknown_airport_is_empty_not_an_error() -> Result<()> {
        assert!(Catalog::demo().lookup_frequencies("ZZZZ")?.is_empty());
        Ok(())
    }
}
