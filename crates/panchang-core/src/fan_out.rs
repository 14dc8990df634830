//! Aggregate-first provider orchestration.
//!
//! The aggregate `complete-panchang` endpoint is tried first. When it fails,
//! or answers with nothing usable, every registered endpoint is called
//! concurrently through a semaphore-bounded worker pool and all calls are
//! awaited before returning. Individual failures are reported, never raised.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::client::{FetchError, ProviderClient};
use crate::decode::decode_aggregate;
use crate::domain::PartialRecord;
use crate::endpoints::{EndpointRegistry, EndpointSpec, COMPLETE_ENDPOINT};
use crate::PanchangRequest;

/// Settled result of one fan-out call.
#[derive(Debug, Clone)]
pub struct EndpointOutcome {
    pub endpoint: EndpointSpec,
    pub result: Result<Value, FetchError>,
}

impl EndpointOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every fan-out call, in registry order.
#[derive(Debug, Clone)]
pub struct FanOutReport {
    pub outcomes: Vec<EndpointOutcome>,
    pub latency_ms: u64,
}

impl FanOutReport {
    /// Successful calls whose payload feeds the record.
    pub fn consumed_successes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.endpoint.is_consumed() && outcome.is_success())
            .count()
    }

    /// Successful calls that are fetched but not merged.
    pub fn informational_successes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.endpoint.is_consumed() && outcome.is_success())
            .count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_success())
            .count()
    }
}

/// Why the aggregate endpoint could not be used.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompleteUnavailable {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("aggregate response carried no usable fields")]
    Empty,
}

/// The provider tier could not produce anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregationFailure {
    #[error("fan-out worker failed: {message}")]
    Join { message: String },

    #[error("none of the {attempted} consumed endpoints answered")]
    NoConsumedData { attempted: usize },
}

/// Data gathered from the provider tier.
#[derive(Debug, Clone)]
pub enum Aggregation {
    /// Decoded from the aggregate endpoint alone.
    Complete(PartialRecord),
    /// Collected from the per-field endpoints.
    FanOut(FanOutReport),
}

pub struct FanOutOrchestrator {
    client: Arc<ProviderClient>,
    registry: EndpointRegistry,
}

impl FanOutOrchestrator {
    pub fn new(client: ProviderClient, registry: EndpointRegistry) -> Self {
        Self {
            client: Arc::new(client),
            registry,
        }
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Aggregate endpoint first, then the full fan-out.
    pub async fn aggregate(
        &self,
        request: &PanchangRequest,
    ) -> Result<Aggregation, AggregationFailure> {
        match self.fetch_complete(request).await {
            Ok(partial) => return Ok(Aggregation::Complete(partial)),
            Err(error) => warn!(error = %error, "aggregate endpoint unavailable, fanning out"),
        }

        self.fan_out(request).await.map(Aggregation::FanOut)
    }

    pub async fn fetch_complete(
        &self,
        request: &PanchangRequest,
    ) -> Result<PartialRecord, CompleteUnavailable> {
        let response = self.client.fetch(COMPLETE_ENDPOINT.path, request).await?;
        let (partial, missing) = decode_aggregate(&response);

        for (slot, error) in &missing {
            debug!(slot = %slot, error = %error, "aggregate response lacks slot");
        }

        if partial.is_empty() {
            return Err(CompleteUnavailable::Empty);
        }
        Ok(partial)
    }

    /// Calls every registered endpoint and waits for all of them to settle.
    pub async fn fan_out(
        &self,
        request: &PanchangRequest,
    ) -> Result<FanOutReport, AggregationFailure> {
        let started = Instant::now();
        let permits = Arc::new(Semaphore::new(self.client.config().max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, endpoint) in self.registry.iter().copied().enumerate() {
            let client = Arc::clone(&self.client);
            let permits = Arc::clone(&permits);
            let payload = request.clone();

            tasks.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => client.fetch(endpoint.path, &payload).await,
                    Err(_) => Err(FetchError::Transport(String::from("worker pool closed"))),
                };
                (index, EndpointOutcome { endpoint, result })
            });
        }

        let mut settled = Vec::with_capacity(self.registry.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => settled.push(entry),
                Err(error) => {
                    tasks.abort_all();
                    return Err(AggregationFailure::Join {
                        message: error.to_string(),
                    });
                }
            }
        }
        settled.sort_by_key(|(index, _)| *index);

        let report = FanOutReport {
            outcomes: settled.into_iter().map(|(_, outcome)| outcome).collect(),
            latency_ms: elapsed_ms(started),
        };

        for outcome in &report.outcomes {
            if let Err(error) = &outcome.result {
                debug!(
                    endpoint = outcome.endpoint.name,
                    code = error.code(),
                    error = %error,
                    "fan-out call failed"
                );
            }
        }

        debug!(
            consumed = report.consumed_successes(),
            informational = report.informational_successes(),
            failed = report.failures(),
            latency_ms = report.latency_ms,
            "fan-out settled"
        );

        if report.consumed_successes() == 0 {
            return Err(AggregationFailure::NoConsumedData {
                attempted: self.registry.consumed().count(),
            });
        }
        Ok(report)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
