//=========================================================================
// Remote Protocol
//=========================================================================
//
// Request and response shapes exchanged with the identity/leaderboard
// service. Wire encoding belongs to the transport.
//
//=========================================================================

//=== Identity ============================================================

/// The player as known to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Locally generated login token (UUID v4).
    pub local_id: String,

    /// Service-assigned account id.
    pub player_id: String,

    /// Public leaderboard name, once chosen.
    pub display_name: Option<String>,
}

//=== Leaderboard =========================================================

/// One leaderboard row, in the order the service returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub display_name: Option<String>,
    pub value: u64,
}

/// A single statistic to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub statistic: String,
    pub value: u64,
}

impl ScoreEntry {
    pub fn new(statistic: impl Into<String>, value: u64) -> Self {
        Self {
            statistic: statistic.into(),
            value,
        }
    }
}

//=== Requests ============================================================

/// A call handed to a [`RemoteTransport`](super::RemoteTransport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    /// Logs in with the local token, creating the account when `is_new`.
    Login { local_id: String, is_new: bool },

    UpdateDisplayName { name: String },

    GetLeaderboard { board: String, start: u32, count: u32 },

    /// Records several statistics in one call.
    SubmitEntries { entries: Vec<ScoreEntry> },
}

impl RemoteRequest {
    /// Short operation name for logs.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::UpdateDisplayName { .. } => "update_display_name",
            Self::GetLeaderboard { .. } => "get_leaderboard",
            Self::SubmitEntries { .. } => "submit_entries",
        }
    }
}

//=== Responses ===========================================================

/// Successful reply to a [`RemoteRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResponse {
    LoggedIn {
        player_id: String,
        display_name: Option<String>,
    },
    DisplayNameUpdated { name: String },
    Leaderboard(Vec<LeaderboardEntry>),
    Submitted,
}
