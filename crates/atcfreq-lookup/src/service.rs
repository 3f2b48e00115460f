// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::FrequencyLookup;
use anyhow::{Result, bail};
use atcfreq_app::FrequencyRecord;
use tracing::debug;

/// Normalizes codes before they reach the backend and labels its failures.
pub struct Service {
    backend: Box<dyn FrequencyLookup>,
}

impl Service {
    pub fn new(backend: impl FrequencyLookup + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }
}

impl FrequencyLookup for Service {
    fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>> {
        let icao = icao.trim().to_uppercase();
        if icao.is_empty() {
            bail!("ICAO code cannot be empty");
        }

        debug!(%icao, "looking up frequencies");
        self.backend
            .lookup_frequencies(&icao)
            .map_err(|error| error.context(format!("failed to get frequencies for {icao}")))
    }
}

#[cfg(test)]
mod tests {
    use super::Service;
    use crate::FrequencyLookup;
    use anyhow::{Result, bail};
    use atcfreq_app::FrequencyRecord;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl FrequencyLookup for Recorder {
        fn lookup_frequencies(&self, icao: &str) -> Result<Vec<FrequencyRecord>> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(icao.to_owned());
            }
            if icao == "FAIL" {
                bail!("timeout waiting for facility data end");
            }
            Ok(Vec::new())
        }
    }

    #[test]
    fn codes_are_trimmed_and_upper_cased() -> Result<()> {
        let recorder = std::sync::Arc::new(Recorder::default());
        let service = Service::new(recorder.clone());
        service.lookup_frequencies("  eddb ")?;
        let seen = recorder.seen.lock().expect("recorder lock").clone();
        assert_eq!(seen, vec!["EDDB".to_owned()]);
        Ok(())
    }

    #[test]
    fn empty_code_is_rejected_before_the_backend() {
        let service = Service::new(Recorder::default());
        let error = service
            .lookup_frequencies("   ")
            .expect_err("blank code should fail");
        assert_eq!(error.to_string(), "ICAO code cannot be empty");
    }

    #[test]
    fn backend_failures_name_the_airport() {
        let service = Service::new(Recorder::default());
        let error = service
            .lookup_frequencies("fail")
            .expect_err("backend failure should surface");
        assert_eq!(
            format!("{error:#}"),
            "failed to get frequencies for FAIL: timeout waiting for facility data end"
        );
    }
}
