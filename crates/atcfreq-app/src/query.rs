// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FrequencyRecord, QueryOutcome, RequestId};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightQuery {
    pub request_id: RequestId,
    pub code: String,
}

/// Issued by [`QueryController::begin`]; the host hands it to the lookup runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub request_id: RequestId,
    pub code: String,
    pub superseded: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Accepted(QueryOutcome),
    Stale,
}

/// Tracks the lookup the view is waiting on.
///
/// Only the most recently issued request may resolve into the display. A
/// result carrying any other id is reported as [`Resolution::Stale`], whatever
/// order the results arrive in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryController {
    last_issued: Option<RequestId>,
    in_flight: Option<InFlightQuery>,
}

impl QueryController {
    pub fn in_flight(&self) -> Option<&InFlightQuery> {
        self.in_flight.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_issued(&self) -> Option<RequestId> {
        self.last_issued
    }

    /// Returns `None` without touching any state when `code` is empty.
    pub fn begin(&mut self, code: &str) -> Option<QueryTicket> {
        if code.is_empty() {
            return None;
        }

        let request_id = self
            .last_issued
            .map(RequestId::next)
            .unwrap_or(RequestId::FIRST);
        let superseded = self
            .in_flight
            .replace(InFlightQuery {
                request_id,
                code: code.to_owned(),
            })
            .map(|previous| previous.request_id);
        self.last_issued = Some(request_id);

        debug!(%request_id, code, ?superseded, "frequency lookup issued");
        Some(QueryTicket {
            request_id,
            code: code.to_owned(),
            superseded,
        })
    }

    pub fn resolve(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<FrequencyRecord>, String>,
    ) -> Resolution {
        let Some(in_flight) = self.in_flight.take_if(|query| query.request_id == request_id)
        else {
            debug!(%request_id, "dropping result of superseded frequency lookup");
            return Resolution::Stale;
        };

        let outcome = QueryOutcome::from_lookup(result);
        match &outcome {
            QueryOutcome::Success(records) => {
                info!(
                    %request_id,
                    code = %in_flight.code,
                    rows = records.len(),
                    "frequency lookup succeeded"
                );
            }
            QueryOutcome::Empty => {
                warn!(%request_id, code = %in_flight.code, "frequency lookup returned no records");
            }
            QueryOutcome::Failure(message) => {
                error!(
                    %request_id,
                    code = %in_flight.code,
                    error = %message,
                    "frequency lookup failed"
                );
            }
        }
        Resolution::Accepted(outcome)
    }
}
