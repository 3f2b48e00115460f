// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

const FREQUENCY_KINDS: [&str; 16] = [
    "NONE",
    "ATIS",
    "MULTICOM",
    "UNICOM",
    "CTAF",
    "GROUND",
    "TOWER",
    "CLEARANCE",
    "APPROACH",
    "DEPARTURE",
    "CENTER",
    "FSS",
    "AWOS",
    "ASOS",
    "CPT",
    "GCO",
];

/// Maps a facility frequency type code to its display label.
pub fn frequency_kind_label(code: i32) -> String {
    usize::try_from(code)
        .ok()
        .and_then(|index| FREQUENCY_KINDS.get(index))
        .map(|label| (*label).to_owned())
        .unwrap_or_else(|| format!("UNKNOWN_{code}"))
}

pub fn hz_to_mhz(hz: i64) -> f64 {
    hz as f64 / 1_000_000.0
}
