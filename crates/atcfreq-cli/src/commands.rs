// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use atcfreq_app::{normalize_waypoints, placeholder_weather, sanitize_untrusted};
use atcfreq_lookup::FrequencyLookup;
use std::io::Write;

pub fn print_frequencies(
    lookup: &dyn FrequencyLookup,
    icao: &str,
    out: &mut impl Write,
) -> Result<()> {
    let code = icao.trim().to_uppercase();
    let records = lookup.lookup_frequencies(&code)?;

    if records.is_empty() {
        writeln!(out, "No frequencies found for {code}")?;
        return Ok(());
    }

    writeln!(out, "Frequencies for {code}:")?;
    for record in &records {
        writeln!(
            out,
            "  {:<10} {:>8.3} MHz  {}",
            sanitize_untrusted(&record.kind),
            record.megahertz,
            sanitize_untrusted(&record.label)
        )?;
    }
    Ok(())
}

pub fn print_weather(raw: &str, out: &mut impl Write) -> Result<()> {
    let waypoints = normalize_waypoints(raw);
    if waypoints.is_empty() {
        bail!("no valid waypoints provided; pass a comma-separated list such as EDDB,UUMI");
    }

    writeln!(out, "Weather information:")?;
    for (waypoint, report) in placeholder_weather(&waypoints) {
        writeln!(out, "  {waypoint}: {report}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{print_frequencies, print_weather};
    use anyhow::Result;
    use atcfreq_lookup::Service;
    use atcfreq_testkit::{ScriptedLookup, berlin_records};

    #[test]
    fn frequencies_print_as_aligned_rows() -> Result<()> {
        let lookup = ScriptedLookup::new().with_records("EDDB", berlin_records());
        let mut out = Vec::new();

        print_frequencies(&lookup, " eddb ", &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "Frequencies for EDDB:\n  ATIS        123.805 MHz  Brandenburg ATIS\n  Ground      121.755 MHz  Berlin Ground\n  Tower       118.100 MHz  Berlin Tower\n"
        );
        Ok(())
    }

    #[test]
    fn empty_result_prints_not_found_line() -> Result<()> {
        let lookup = ScriptedLookup::new();
        let mut out = Vec::new();

        print_frequencies(&lookup, "zzzz", &mut out)?;
        assert_eq!(String::from_utf8(out)?, "No frequencies found for ZZZZ\n");
        assert_eq!(lookup.calls(), vec!["ZZZZ"]);
        Ok(())
    }

    #[test]
    fn lookup_failure_is_returned_with_context() {
        let service = Service::new(ScriptedLookup::new().with_failure("UUMI", "timeout"));
        let mut out = Vec::new();

        let error = print_frequencies(&service, "uumi", &mut out).expect_err("lookup should fail");
        assert_eq!(
            format!("{error:#}"),
            "failed to get frequencies for UUMI: timeout"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn weather_prints_one_line_per_waypoint() -> Result<()> {
        let mut out = Vec::new();
        print_weather("eddb, uumi,,kjfk", &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "Weather information:\n  EDDB: (weather data not yet implemented)\n  UUMI: (weather data not yet implemented)\n  KJFK: (weather data not yet implemented)\n"
        );
        Ok(())
    }

    #[test]
    fn weather_without_waypoints_fails() {
        let mut out = Vec::new();
        let error = print_weather(" , ", &mut out).expect_err("blank list should fail");
        assert!(error.to_string().contains("no valid waypoints provided"));
    }
}
