//! The tier ladder: aggregate endpoint, fan-out with static defaults, then
//! the offline calculator. [`PanchangService::resolve`] always returns a
//! complete record.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::ProviderClient;
use crate::config::ProviderConfig;
use crate::domain::AlmanacRecord;
use crate::endpoints::EndpointRegistry;
use crate::fallback;
use crate::fan_out::{Aggregation, FanOutOrchestrator};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::merge::{fill_defaults, ResponseMerger};
use crate::PanchangRequest;

/// Which tier produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Complete,
    FanOut,
    Fallback,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::FanOut => "fan_out",
            Self::Fallback => "fallback",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record plus the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub record: AlmanacRecord,
    pub tier: Tier,
}

pub struct PanchangService {
    orchestrator: FanOutOrchestrator,
}

impl PanchangService {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ProviderConfig) -> Self {
        Self::with_registry(http_client, config, EndpointRegistry::standard())
    }

    pub fn with_registry(
        http_client: Arc<dyn HttpClient>,
        config: ProviderConfig,
        registry: EndpointRegistry,
    ) -> Self {
        let client = ProviderClient::new(http_client, config);
        Self {
            orchestrator: FanOutOrchestrator::new(client, registry),
        }
    }

    /// Service backed by reqwest and configured from the environment.
    pub fn from_env() -> Self {
        let config = ProviderConfig::from_env();
        if config.uses_placeholder_key() {
            warn!("no provider API key configured, upstream calls will likely be rejected");
        }
        Self::new(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn orchestrator(&self) -> &FanOutOrchestrator {
        &self.orchestrator
    }

    pub async fn resolve(&self, request: &PanchangRequest) -> Resolved {
        let resolved = match self.orchestrator.aggregate(request).await {
            Ok(Aggregation::Complete(partial)) => Resolved {
                record: fill_defaults(partial),
                tier: Tier::Complete,
            },
            Ok(Aggregation::FanOut(report)) => {
                let mut merger = ResponseMerger::new();
                for outcome in &report.outcomes {
                    if let (Some(target), Ok(response)) =
                        (outcome.endpoint.target, &outcome.result)
                    {
                        merger.absorb(target, response);
                    }
                }

                if merger.partial().is_empty() {
                    warn!(
                        rejected = merger.rejected().len(),
                        "no fan-out payload was usable, using offline approximation"
                    );
                    self.fallback_only(request)
                } else {
                    Resolved {
                        record: merger.finish(),
                        tier: Tier::FanOut,
                    }
                }
            }
            Err(failure) => {
                warn!(error = %failure, "provider tier failed, using offline approximation");
                self.fallback_only(request)
            }
        };

        info!(
            tier = %resolved.tier,
            date = %request.civil_date(),
            "panchang resolved"
        );
        resolved
    }

    /// Offline calculator only; never touches the network.
    pub fn fallback_only(&self, request: &PanchangRequest) -> Resolved {
        Resolved {
            record: fallback::approximate(request),
            tier: Tier::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;

    use crate::http_client::{HttpError, HttpRequest, HttpResponse};

    struct RefusingClient;

    impl HttpClient for RefusingClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            Box::pin(async { Err(HttpError::new("connection refused")) })
        }
    }

    #[test]
    fn tier_display_matches_its_wire_name() {
        for tier in [Tier::Complete, Tier::FanOut, Tier::Fallback] {
            assert_eq!(
                serde_json::to_value(tier).expect("tier serializes"),
                serde_json::Value::String(tier.to_string())
            );
        }
        assert_eq!(Tier::FanOut.to_string(), "fan_out");
    }

    #[test]
    fn fallback_only_is_tagged_with_the_fallback_tier() {
        let service = PanchangService::new(Arc::new(RefusingClient), ProviderConfig::default());
        let request = PanchangRequest::new(2024, 4, 15, 28.6, 77.2).expect("valid request");

        let resolved = service.fallback_only(&request);

        assert_eq!(resolved.tier, Tier::Fallback);
        assert_eq!(resolved.record, fallback::approximate(&request));
    }
}
