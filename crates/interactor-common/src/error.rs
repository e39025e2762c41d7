use thiserror::Error;

/// Failures reported by a beacon transport.
///
/// These never reach the host page; the lifecycle controller only logs them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The user agent refused to queue the payload (e.g. over the beacon quota).
    #[error("Beacon rejected by user agent")]
    Rejected,

    /// The delivery primitive could not be reached at all.
    #[error("Beacon transport unavailable: {0}")]
    Unavailable(String),
}
