// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FrequencyLookup, frequency_kind_label, hz_to_mhz};
use anyhow::{Context, Result, anyhow, bail};
use atcfreq_app::FrequencyRecord;
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Blocking HTTP client for a facility-data frequency service.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("lookup.base_url must not be empty");
        }

        let base_url =
            Url::parse(trimmed).with_context(|| format!("parse lookup.base_url {trimmed:?}"))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            bail!("lookup.base_url {trimmed:?} must be an http:// or https:// URL");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn frequencies_url(&self, icao: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("lookup.base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(["airports", icao, "frequencies"]);
        Ok(url)
    }
}

impl FrequencyLookup for Client {
    fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>> {
        let url = self.frequencies_url(icao)?;
        debug!(%url, "requesting frequencies");

        let response = self
            .http
            .get(url)
            .send()
            .map_err(|error| connection_error(self.base_url(), error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: FrequenciesResponse = response.json().context("decode frequency list")?;
        Ok(parsed
            .frequencies
            .into_iter()
            .map(WireFrequency::into_record)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct FrequenciesResponse {
    #[serde(default)]
    frequencies: Vec<WireFrequency>,
}

#[derive(Debug, Deserialize)]
struct WireFrequency {
    #[serde(rename = "type")]
    type_code: i32,
    hz: i64,
    #[serde(default)]
    name: String,
}

impl WireFrequency {
    fn into_record(self) -> FrequencyRecord {
        FrequencyRecord::new(
            frequency_kind_label(self.type_code),
            hz_to_mhz(self.hz),
            self.name,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("timed out waiting for {base_url}");
    }
    anyhow!("cannot reach {base_url} ({error})")
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), error);
    }

    let body = body.trim();
    if !body.is_empty() && body.len() < 100 && !body.contains('{') {
        return anyhow!("server error ({}): {}", status.as_u16(), body);
    }

    anyhow!("server returned {}", status.as_u16())
}
