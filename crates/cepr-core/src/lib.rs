//! Core contracts for cepr.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - Provider/source identifiers
//! - Response envelope and structured errors
//! - Address source adapters and the race coordinator

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod race;
pub mod source;

pub use adapters::{BrasilApiAdapter, ViaCepAdapter};
pub use data_source::{AddressSource, LookupRequest, SourceError, SourceErrorKind, SourceOutcome};
pub use domain::{Address, PostalCode};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use race::{RaceConfig, RaceOutcome, RaceReport, SourceRace};
pub use source::ProviderId;
