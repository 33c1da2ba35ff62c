//=========================================================================
// Remote Errors
//=========================================================================

use thiserror::Error;

/// Failure of a remote call. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The service could not be reached.
    #[error("service unavailable")]
    Offline,

    /// The transport dropped the reply without answering.
    #[error("request was dropped before completing")]
    Dropped,

    /// The call needs a logged-in account.
    #[error("not logged in")]
    NotLoggedIn,

    /// The service refused the call.
    #[error("{0}")]
    Rejected(String),

    /// The service answered with a reply of the wrong kind.
    #[error("unexpected response to {0}")]
    UnexpectedResponse(&'static str),
}
