//! Fetch outcomes that keep failures visible instead of raising them.

use super::error::TvMazeError;

/// Failure class of a degraded fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network unreachable, DNS, timeout, or exhausted 429 retries.
    Transport,
    /// Non-2xx response.
    UpstreamStatus(u16),
    /// Response body did not decode.
    Decode,
}

impl FailureKind {
    /// Classifies an error by its `TvMazeError` root, if any.
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<TvMazeError>() {
            Some(TvMazeError::Status { status, .. }) => Self::UpstreamStatus(*status),
            Some(TvMazeError::Decode { .. }) => Self::Decode,
            Some(TvMazeError::Transport { .. } | TvMazeError::RateLimited { .. }) | None => {
                Self::Transport
            }
        }
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::UpstreamStatus(_) => "status",
            Self::Decode => "decode",
        }
    }
}

/// Why a fetch produced no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Failure class.
    pub kind: FailureKind,
    /// Full error chain, for display.
    pub message: String,
}

impl FetchFailure {
    /// Builds a failure from an error, keeping the whole context chain.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            kind: FailureKind::classify(err),
            message: format!("{err:#}"),
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of a single detail fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The request succeeded (possibly with zero items).
    Loaded(Vec<T>),
    /// The request failed; the caller decides how to present it.
    Failed(FetchFailure),
}

impl<T> FetchOutcome<T> {
    /// Converts a request result, logging the failure at WARN.
    ///
    /// `what` names the resource for the log line (e.g. "seasons").
    pub fn from_result(result: anyhow::Result<Vec<T>>, what: &'static str) -> Self {
        match result {
            Ok(items) => Self::Loaded(items),
            Err(err) => {
                let failure = FetchFailure::from_error(&err);
                tracing::warn!(
                    resource = what,
                    kind = failure.kind.label(),
                    "Failed to fetch {what}: {failure}"
                );
                #[cfg(feature = "otel")]
                record_failure(what, failure.kind);
                Self::Failed(failure)
            }
        }
    }

    /// Returns the items, or an empty list when the fetch failed.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Loaded(items) => items,
            Self::Failed(_) => Vec::new(),
        }
    }

    /// Returns the items loaded so far (empty on failure).
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(items) => items,
            Self::Failed(_) => &[],
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// Returns `true` if the fetch failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Counts degraded fetches on the global OpenTelemetry meter.
#[cfg(feature = "otel")]
fn record_failure(what: &'static str, kind: FailureKind) {
    use opentelemetry::KeyValue;

    let counter = opentelemetry::global::meter("showcat-api")
        .u64_counter("tvmaze.fetch.failures")
        .build();
    counter.add(
        1,
        &[
            KeyValue::new("resource", what),
            KeyValue::new("kind", kind.label()),
        ],
    );
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::Context;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn status_error(status: u16) -> anyhow::Error {
        let result: anyhow::Result<()> = Err(TvMazeError::Status {
            path: String::from("shows/1/seasons"),
            status,
        }
        .into());
        result.context("seasons request failed").unwrap_err()
    }

    #[test]
    fn test_classify_status_through_context() {
        // Arrange
        let err = status_error(502);

        // Act
        let kind = FailureKind::classify(&err);

        // Assert
        assert_eq!(kind, FailureKind::UpstreamStatus(502));
    }

    #[test]
    fn test_classify_untyped_error_as_transport() {
        // Arrange
        let err = anyhow::anyhow!("connection reset");

        // Act & Assert
        assert_eq!(FailureKind::classify(&err), FailureKind::Transport);
    }

    #[test]
    fn test_failure_message_keeps_chain() {
        // Arrange
        let err = status_error(500);

        // Act
        let failure = FetchFailure::from_error(&err);

        // Assert
        assert!(failure.message.starts_with("seasons request failed"));
        assert!(failure.message.contains("HTTP 500"));
    }

    #[test]
    fn test_loaded_empty_is_not_failed() {
        // Arrange & Act
        let outcome: FetchOutcome<u32> = FetchOutcome::from_result(Ok(Vec::new()), "cast");

        // Assert
        assert!(!outcome.is_failed());
        assert!(outcome.items().is_empty());
        assert!(outcome.failure().is_none());
    }

    #[test]
    fn test_failed_outcome_collapses_to_empty() {
        // Arrange
        let outcome: FetchOutcome<u32> =
            FetchOutcome::Failed(FetchFailure::from_error(&status_error(503)));

        // Act
        let items = outcome.into_items();

        // Assert
        assert!(items.is_empty());
    }

    #[test]
    fn test_failure_is_logged_at_warn() {
        // Arrange
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();

        // Act
        let outcome: FetchOutcome<u32> = with_default(subscriber, || {
            FetchOutcome::from_result(Err(status_error(503)), "seasons")
        });

        // Assert
        handle.assert_finished();
        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(FailureKind::UpstreamStatus(503))
        );
    }

    #[test]
    fn test_success_is_not_logged() {
        // Arrange
        let (subscriber, handle) = subscriber::mock().only().run_with_handle();

        // Act
        let outcome = with_default(subscriber, || {
            FetchOutcome::from_result(Ok(vec![1_u32, 2]), "crew")
        });

        // Assert
        handle.assert_finished();
        assert_eq!(outcome.items(), &[1, 2]);
    }
}
