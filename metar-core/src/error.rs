use thiserror::Error;

/// Errors from the fetch/decode path.
///
/// The core never retries, prints, or swallows these; they propagate to the
/// caller as distinct values. No partial observation exists after any of
/// them.
#[derive(Debug, Error)]
pub enum MetarError {
    /// The HTTP request could not be completed or returned a bad status.
    #[error("failed to fetch observation data")]
    FetchFailed(#[from] reqwest::Error),

    /// The API answered with a well-formed but empty result set.
    #[error("no observation found for station {station}")]
    NoObservationFound { station: String },

    /// A field could not be decoded as either of its permitted shapes.
    #[error("malformed observation payload")]
    MalformedField(#[from] serde_json::Error),
}
