//! # Panchang Core
//!
//! Aggregation, merging and offline fallback for the Hindu almanac.
//!
//! ## Overview
//!
//! Given a date, time and location this crate produces a fully populated
//! [`AlmanacRecord`]:
//!
//! - **Aggregate call** to the provider's `complete-panchang` endpoint
//! - **Fan-out** over the specialized endpoints when the aggregate call fails
//! - **Response merging** with static defaults for fields nobody delivered
//! - **Offline approximation** when the provider tier yields nothing
//!
//! Every field of the record carries a [`Confidence`] tag saying which of
//! these produced it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Single-endpoint provider client |
//! | [`config`] | Provider configuration from the environment |
//! | [`decode`] | Lenient provider payload decoding |
//! | [`domain`] | Almanac record types and name tables |
//! | [`endpoints`] | Endpoint registry and merge targets |
//! | [`error`] | Core error types |
//! | [`fallback`] | Offline calculator |
//! | [`fan_out`] | Concurrent aggregate-first orchestration |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`merge`] | Response merger and static defaults |
//! | [`request`] | Validated request and upstream payload |
//! | [`service`] | Tier ladder |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use panchang_core::{PanchangRequest, PanchangService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = PanchangService::from_env();
//!     let request = PanchangRequest::new(2024, 4, 15, 28.6139, 77.2090)?;
//!
//!     let resolved = service.resolve(&request).await;
//!     println!("{} via {}", resolved.record.tithi.name, resolved.tier);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ PanchangService │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ FanOut          │────▶│ ProviderClient   │
//! │ Orchestrator    │     │ (HttpClient)     │
//! └────────┬────────┘     └──────────────────┘
//!          │ outcomes
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ResponseMerger  │     │ fallback         │
//! │ (static gaps)   │     │ (offline, pure)  │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Security
//!
//! - The provider API key is read from the environment and never logged

pub mod client;
pub mod config;
pub mod decode;
pub mod domain;
pub mod endpoints;
pub mod error;
pub mod fallback;
pub mod fan_out;
pub mod http_client;
pub mod merge;
pub mod request;
pub mod service;

// Provider client
pub use client::{FetchError, ProviderClient};

// Configuration
pub use config::ProviderConfig;

// Domain models
pub use domain::{
    AlmanacRecord, Confidence, LunarMonthInfo, NakshatraInfo, Paksha, PartialRecord,
    PeriodEntry, PeriodTable, Provenance, RecordField, RituInfo, TithiInfo, WeekdayInfo,
    YearInfo,
};

// Endpoints
pub use endpoints::{EndpointRegistry, EndpointSpec, MergeTarget};

// Error types
pub use error::{CoreError, ValidationError};

// Orchestration
pub use fan_out::{
    Aggregation, AggregationFailure, CompleteUnavailable, EndpointOutcome, FanOutOrchestrator,
    FanOutReport,
};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};

// Merging
pub use merge::{fill_defaults, ResponseMerger};

// Requests
pub use request::{ObservationConfig, PanchangRequest};

// Service
pub use service::{PanchangService, Resolved, Tier};
