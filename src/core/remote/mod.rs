//=========================================================================
// Remote Services
//=========================================================================
//
// Identity and leaderboard integration.
//
// Components:
// - `client`: RemoteClient, the only type scenes talk to
// - `transport`: the RemoteTransport seam plus offline/in-memory services
// - `identity`: login token persistence
// - `protocol`: request/response shapes
//
//=========================================================================

//=== Module Declarations =================================================

mod client;
mod error;
mod identity;
mod protocol;
mod transport;

//=== Public API ==========================================================

pub use client::{RemoteClient, RemoteEvent};
pub use error::RemoteError;
pub use identity::{IdentityBook, LOGIN_KEY};
pub use protocol::{Identity, LeaderboardEntry, RemoteRequest, RemoteResponse, ScoreEntry};
pub use transport::{Aggregation, MemoryTransport, OfflineTransport, RemoteTransport, ReplySlot, RequestId};
