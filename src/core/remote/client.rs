//=========================================================================
// Remote Client
//=========================================================================
//
// Asynchronous identity and leaderboard calls with exactly-once
// completion and epoch-based delivery.
//
// Flow:
//   login()/fetch_leaderboard()/... ──> transport.send(request, slot)
//   slot.complete(result)           ──> completion channel
//   poll()                          ──> apply identity effects
//                                   ──> deliver RemoteEvent (current epoch only)
//
// A scene switch calls `begin_epoch()`. Completions of calls made before
// that still update the identity, but are not delivered to any scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::error::RemoteError;
use super::identity::IdentityBook;
use super::protocol::{Identity, LeaderboardEntry, RemoteRequest, RemoteResponse, ScoreEntry};
use super::transport::{Completion, RemoteTransport, ReplySlot, RequestId};
use crate::core::storage::KeyValueStore;

//=== RemoteEvent =========================================================

/// A completed remote call, delivered by [`RemoteClient::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    Login(Result<Identity, RemoteError>),
    DisplayName(Result<String, RemoteError>),
    Leaderboard(Result<Vec<LeaderboardEntry>, RemoteError>),
    Submit(Result<(), RemoteError>),
}

//=== Pending Calls =======================================================

#[derive(Debug)]
enum Operation {
    Login { local_id: String },
    DisplayName,
    Leaderboard,
    Submit,
}

#[derive(Debug)]
struct Pending {
    operation: Operation,
    epoch: u64,
}

//=== RemoteClient ========================================================

/// Client for the identity and leaderboard service.
pub struct RemoteClient {
    transport: Box<dyn RemoteTransport>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    in_flight: HashMap<RequestId, Pending>,
    identity: IdentityBook,
    next_id: u64,
    epoch: u64,
}

impl RemoteClient {
    //--- Construction -----------------------------------------------------

    pub fn new(transport: Box<dyn RemoteTransport>, store: Box<dyn KeyValueStore>) -> Self {
        let (sender, receiver) = unbounded();

        Self {
            transport,
            sender,
            receiver,
            in_flight: HashMap::new(),
            identity: IdentityBook::new(store),
            next_id: 0,
            epoch: 0,
        }
    }

    //--- Operations -------------------------------------------------------

    /// Logs in with an explicit token.
    pub fn login(&mut self, local_id: &str, is_new: bool) -> RequestId {
        info!(
            target: "remote",
            "{} with local token",
            if is_new { "Registering" } else { "Logging in" }
        );

        self.dispatch(
            RemoteRequest::Login {
                local_id: local_id.to_string(),
                is_new,
            },
            Operation::Login {
                local_id: local_id.to_string(),
            },
        )
    }

    /// Logs in with the stored token, generating one when absent.
    ///
    /// Returns true in the second value when a new account is registered.
    pub fn login_stored(&mut self) -> (RequestId, bool) {
        let (local_id, is_new) = self.identity.local_token();
        (self.login(&local_id, is_new), is_new)
    }

    pub fn update_display_name(&mut self, name: &str) -> RequestId {
        self.dispatch(
            RemoteRequest::UpdateDisplayName {
                name: name.to_string(),
            },
            Operation::DisplayName,
        )
    }

    pub fn fetch_leaderboard(&mut self, board: &str, start: u32, count: u32) -> RequestId {
        self.dispatch(
            RemoteRequest::GetLeaderboard {
                board: board.to_string(),
                start,
                count,
            },
            Operation::Leaderboard,
        )
    }

    pub fn submit_score(&mut self, board: &str, value: u64) -> RequestId {
        self.submit_scores(vec![ScoreEntry::new(board, value)])
    }

    /// Submits several statistics in one call.
    pub fn submit_scores(&mut self, entries: Vec<ScoreEntry>) -> RequestId {
        self.dispatch(RemoteRequest::SubmitEntries { entries }, Operation::Submit)
    }

    fn dispatch(&mut self, request: RemoteRequest, operation: Operation) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;

        debug!(target: "remote", "Sending {} as {:?}", request.operation(), id);
        self.in_flight.insert(
            id,
            Pending {
                operation,
                epoch: self.epoch,
            },
        );
        self.transport.send(request, ReplySlot::new(id, self.sender.clone()));
        id
    }

    //--- Delivery ---------------------------------------------------------

    /// Forgets the continuations of every call made so far.
    pub fn begin_epoch(&mut self) {
        self.epoch += 1;
        debug!(target: "remote", "Remote epoch {} ({} calls in flight)", self.epoch, self.in_flight.len());
    }

    /// Applies and returns every completion that arrived since the last poll.
    pub fn poll(&mut self) -> Vec<RemoteEvent> {
        let mut events = Vec::new();

        while let Ok((id, result)) = self.receiver.try_recv() {
            let Some(pending) = self.in_flight.remove(&id) else {
                warn!(target: "remote", "Completion for unknown request {:?}", id);
                continue;
            };

            let event = self.apply(pending.operation, result);

            if pending.epoch == self.epoch {
                events.push(event);
            } else {
                debug!(target: "remote", "Discarding stale completion {:?}", id);
            }
        }

        events
    }

    fn apply(&mut self, operation: Operation, result: Result<RemoteResponse, RemoteError>) -> RemoteEvent {
        match operation {
            Operation::Login { local_id } => {
                let outcome = result.and_then(|response| match response {
                    RemoteResponse::LoggedIn { player_id, display_name } => Ok(Identity {
                        local_id,
                        player_id,
                        display_name,
                    }),
                    _ => Err(RemoteError::UnexpectedResponse("login")),
                });

                match &outcome {
                    Ok(identity) => {
                        info!(target: "remote", "Logged in as {}", identity.player_id);
                        self.identity.confirm(identity.clone());
                    }
                    Err(err) => warn!(target: "remote", "Login failed: {}", err),
                }
                RemoteEvent::Login(outcome)
            }
            Operation::DisplayName => {
                let outcome = result.and_then(|response| match response {
                    RemoteResponse::DisplayNameUpdated { name } => Ok(name),
                    _ => Err(RemoteError::UnexpectedResponse("update_display_name")),
                });

                match &outcome {
                    Ok(name) => self.identity.rename(name),
                    Err(err) => warn!(target: "remote", "Display name update failed: {}", err),
                }
                RemoteEvent::DisplayName(outcome)
            }
            Operation::Leaderboard => {
                let outcome = result.and_then(|response| match response {
                    RemoteResponse::Leaderboard(rows) => Ok(rows),
                    _ => Err(RemoteError::UnexpectedResponse("get_leaderboard")),
                });
                if let Err(err) = &outcome {
                    warn!(target: "remote", "Leaderboard fetch failed: {}", err);
                }
                RemoteEvent::Leaderboard(outcome)
            }
            Operation::Submit => {
                let outcome = result.and_then(|response| match response {
                    RemoteResponse::Submitted => Ok(()),
                    _ => Err(RemoteError::UnexpectedResponse("submit_entries")),
                });
                if let Err(err) = &outcome {
                    warn!(target: "remote", "Score submission failed: {}", err);
                }
                RemoteEvent::Submit(outcome)
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.identity()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.identity.display_name()
    }

    /// Calls sent but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
