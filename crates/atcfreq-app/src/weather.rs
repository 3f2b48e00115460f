// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::DisplayPayload;

pub const WEATHER_NOT_IMPLEMENTED: &str = "(weather data not yet implemented)";
pub const NO_WAYPOINTS_MESSAGE: &str = "No valid waypoints provided.";

/// Splits a comma-separated waypoint list, dropping blanks.
pub fn normalize_waypoints(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|waypoint| waypoint.trim().to_uppercase())
        .filter(|waypoint| !waypoint.is_empty())
        .collect()
}

pub fn placeholder_weather(waypoints: &[String]) -> Vec<(String, String)> {
    waypoints
        .iter()
        .map(|waypoint| (waypoint.clone(), WEATHER_NOT_IMPLEMENTED.to_owned()))
        .collect()
}

pub fn weather_payload(waypoints: &[String]) -> DisplayPayload {
    if waypoints.is_empty() {
        return DisplayPayload::message(NO_WAYPOINTS_MESSAGE);
    }

    let lines = placeholder_weather(waypoints)
        .into_iter()
        .map(|(waypoint, report)| format!("{waypoint}: {report}"))
        .collect::<Vec<_>>();
    DisplayPayload::Message(lines.join("\n"))
}
