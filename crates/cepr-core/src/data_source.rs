//! Source adapter contract and request/outcome types.
//!
//! Every provider implements [`AddressSource`]: one lookup per invocation,
//! returning a normalized [`Address`] or a classified [`SourceError`]. The
//! race coordinator treats sources uniformly through this trait.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Address, PostalCode, ProviderId};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Network-level failure reaching the provider.
    Transport,
    /// The provider did not answer within the imposed deadline.
    Timeout,
    /// The provider answered with a non-OK HTTP status.
    Status,
    /// The response body did not parse as the provider's schema.
    Decode,
    /// The provider answered OK but reported the postal code as unknown.
    NotFound,
    Internal,
}

/// Structured source error kept per provider for race diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Timeout,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn status(provider: ProviderId, status: u16) -> Self {
        Self {
            kind: SourceErrorKind::Status,
            message: format!("{provider} returned status {status}"),
            retryable: status >= 500,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Decode,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_found(provider: ProviderId, postal_code: &PostalCode) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: format!("{provider} has no address for postal code {postal_code}"),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Timeout => "source.timeout",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::Decode => "source.decode",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for one adapter lookup.
///
/// `timeout_ms` is the deadline the coordinator imposes on the call; the
/// adapter applies it to its network request so an abandoned lookup aborts
/// on its own rather than running past the race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub postal_code: PostalCode,
    pub timeout_ms: u64,
}

impl LookupRequest {
    pub fn new(postal_code: PostalCode, timeout_ms: u64) -> Self {
        Self {
            postal_code,
            timeout_ms,
        }
    }
}

/// Tagged result of one adapter invocation, produced exactly once per source
/// per race and consumed exactly once by the coordinator.
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub source: ProviderId,
    pub result: Result<Address, SourceError>,
}

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`: the coordinator runs each lookup
/// on its own task.
pub trait AddressSource: Send + Sync {
    /// Returns the unique provider identifier.
    fn id(&self) -> ProviderId;

    /// Performs one lookup: build the provider request, execute it, and
    /// normalize the response into the canonical [`Address`].
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failure, deadline expiry,
    /// non-OK status, or an undecodable body. No retries are attempted.
    fn lookup<'a>(
        &'a self,
        req: LookupRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Address, SourceError>> + Send + 'a>>;
}
