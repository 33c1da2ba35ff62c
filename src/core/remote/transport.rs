//=========================================================================
// Remote Transport
//=========================================================================
//
// The seam between the client and whatever actually talks to the
// service.
//
//   RemoteClient ──send(request, slot)──> RemoteTransport
//        ▲                                      │
//        └──── Receiver<Completion> ◄── slot.complete(result)
//
// A `ReplySlot` completes exactly once: either explicitly, or with
// `RemoteError::Dropped` when the transport lets it go unanswered.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crossbeam_channel::Sender;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::error::RemoteError;
use super::protocol::{LeaderboardEntry, RemoteRequest, RemoteResponse, ScoreEntry};

//=== Completion ==========================================================

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub(crate) u64);

pub(crate) type Completion = (RequestId, Result<RemoteResponse, RemoteError>);

//=== ReplySlot ===========================================================

/// One-shot reply handle for a single request.
pub struct ReplySlot {
    id: RequestId,
    sender: Option<Sender<Completion>>,
}

impl ReplySlot {
    pub(crate) fn new(id: RequestId, sender: Sender<Completion>) -> Self {
        Self {
            id,
            sender: Some(sender),
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Delivers the result. Consumes the slot, so it cannot complete twice.
    pub fn complete(mut self, result: Result<RemoteResponse, RemoteError>) {
        self.deliver(result);
    }

    fn deliver(&mut self, result: Result<RemoteResponse, RemoteError>) {
        if let Some(sender) = self.sender.take() {
            // A closed channel means the client is gone; nobody is waiting.
            if sender.send((self.id, result)).is_err() {
                debug!(target: "remote", "Reply for {:?} arrived after client shutdown", self.id);
            }
        }
    }
}

impl Drop for ReplySlot {
    fn drop(&mut self) {
        if self.sender.is_some() {
            warn!(target: "remote", "Reply slot {:?} dropped without completing", self.id);
            self.deliver(Err(RemoteError::Dropped));
        }
    }
}

//=== RemoteTransport =====================================================

/// Carries requests to the remote service.
///
/// Implementations may answer synchronously inside `send` or hand the slot
/// to another thread. Either way the client only sees the result on its
/// next poll.
pub trait RemoteTransport: Send {
    fn send(&mut self, request: RemoteRequest, reply: ReplySlot);
}

//=== OfflineTransport ====================================================

/// Transport with no connectivity: every call fails with
/// [`RemoteError::Offline`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl RemoteTransport for OfflineTransport {
    fn send(&mut self, request: RemoteRequest, reply: ReplySlot) {
        debug!(target: "remote", "Offline: failing {}", request.operation());
        reply.complete(Err(RemoteError::Offline));
    }
}

//=== MemoryTransport =====================================================

/// How repeated submissions of one statistic combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Keep the highest value.
    #[default]
    Max,

    /// Add every submission.
    Sum,

    /// Keep the latest value.
    Last,
}

#[derive(Debug, Default)]
struct Account {
    player_id: String,
    display_name: Option<String>,
}

#[derive(Debug, Default)]
struct ServiceState {
    accounts: HashMap<String, Account>,
    names: HashMap<String, Option<String>>,
    statistics: HashMap<String, Vec<(String, u64)>>,
    aggregation: HashMap<String, Aggregation>,
    session: Option<String>,
    next_player: u64,
    offline: bool,
}

/// In-process leaderboard service.
///
/// Clones share the same service state, so a test can keep one handle to
/// inspect or seed the service while the client owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<ServiceState>>,
}

impl MemoryTransport {
    /// Shortest display name the service accepts.
    pub const MIN_NAME_LEN: usize = 3;

    /// Longest display name the service accepts.
    pub const MAX_NAME_LEN: usize = 25;

    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how submissions to `statistic` combine.
    pub fn with_aggregation(self, statistic: &str, aggregation: Aggregation) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.aggregation.insert(statistic.to_string(), aggregation);
        }
        self
    }

    /// Adds a score by some other player.
    pub fn seed(&self, statistic: &str, display_name: &str, value: u64) {
        if let Ok(mut state) = self.state.lock() {
            let player_id = state.allocate_player();
            state.names.insert(player_id.clone(), Some(display_name.to_string()));
            state
                .statistics
                .entry(statistic.to_string())
                .or_default()
                .push((player_id, value));
        }
    }

    /// Makes every following call fail with [`RemoteError::Offline`].
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    /// Current value of `statistic` for the logged-in player.
    pub fn statistic(&self, statistic: &str) -> Option<u64> {
        let state = self.state.lock().ok()?;
        let player = state.session.as_ref()?;
        state
            .statistics
            .get(statistic)?
            .iter()
            .find(|(id, _)| id == player)
            .map(|(_, value)| *value)
    }

    fn handle(&self, request: RemoteRequest) -> Result<RemoteResponse, RemoteError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| RemoteError::Rejected("service state poisoned".to_string()))?;

        if state.offline {
            return Err(RemoteError::Offline);
        }

        match request {
            RemoteRequest::Login { local_id, is_new } => state.login(local_id, is_new),
            RemoteRequest::UpdateDisplayName { name } => state.rename(name),
            RemoteRequest::GetLeaderboard { board, start, count } => {
                Ok(RemoteResponse::Leaderboard(state.leaderboard(&board, start, count)))
            }
            RemoteRequest::SubmitEntries { entries } => state.submit(entries),
        }
    }
}

impl RemoteTransport for MemoryTransport {
    fn send(&mut self, request: RemoteRequest, reply: ReplySlot) {
        let operation = request.operation();
        let result = self.handle(request);
        if let Err(err) = &result {
            debug!(target: "remote", "Memory service refused {}: {}", operation, err);
        }
        reply.complete(result);
    }
}

impl ServiceState {
    fn allocate_player(&mut self) -> String {
        self.next_player += 1;
        format!("P{:08X}", self.next_player)
    }

    fn current_player(&self) -> Result<String, RemoteError> {
        self.session.clone().ok_or(RemoteError::NotLoggedIn)
    }

    fn login(&mut self, local_id: String, is_new: bool) -> Result<RemoteResponse, RemoteError> {
        if !self.accounts.contains_key(&local_id) {
            if !is_new {
                return Err(RemoteError::Rejected("User not found".to_string()));
            }
            let player_id = self.allocate_player();
            self.names.insert(player_id.clone(), None);
            self.accounts.insert(
                local_id.clone(),
                Account {
                    player_id,
                    display_name: None,
                },
            );
        }

        let account = self
            .accounts
            .get(&local_id)
            .ok_or_else(|| RemoteError::Rejected("User not found".to_string()))?;
        let response = RemoteResponse::LoggedIn {
            player_id: account.player_id.clone(),
            display_name: account.display_name.clone(),
        };
        self.session = Some(account.player_id.clone());
        Ok(response)
    }

    fn rename(&mut self, name: String) -> Result<RemoteResponse, RemoteError> {
        let player = self.current_player()?;
        let length = name.chars().count();

        if !(MemoryTransport::MIN_NAME_LEN..=MemoryTransport::MAX_NAME_LEN).contains(&length) {
            return Err(RemoteError::Rejected("Invalid display name".to_string()));
        }

        let taken = self
            .names
            .iter()
            .any(|(id, existing)| *id != player && existing.as_deref() == Some(name.as_str()));
        if taken {
            return Err(RemoteError::Rejected("Name not available".to_string()));
        }

        self.names.insert(player.clone(), Some(name.clone()));
        if let Some(account) = self.accounts.values_mut().find(|a| a.player_id == player) {
            account.display_name = Some(name.clone());
        }

        Ok(RemoteResponse::DisplayNameUpdated { name })
    }

    fn submit(&mut self, entries: Vec<ScoreEntry>) -> Result<RemoteResponse, RemoteError> {
        let player = self.current_player()?;

        for entry in entries {
            let aggregation = self.aggregation.get(&entry.statistic).copied().unwrap_or_default();
            let rows = self.statistics.entry(entry.statistic).or_default();

            match rows.iter_mut().find(|(id, _)| *id == player) {
                Some((_, value)) => {
                    *value = match aggregation {
                        Aggregation::Max => (*value).max(entry.value),
                        Aggregation::Sum => value.saturating_add(entry.value),
                        Aggregation::Last => entry.value,
                    };
                }
                None => rows.push((player.clone(), entry.value)),
            }
        }

        Ok(RemoteResponse::Submitted)
    }

    fn leaderboard(&self, board: &str, start: u32, count: u32) -> Vec<LeaderboardEntry> {
        let Some(rows) = self.statistics.get(board) else {
            return Vec::new();
        };

        let mut sorted: Vec<&(String, u64)> = rows.iter().collect();
        // Stable sort keeps first-submitted ahead on ties.
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        sorted
            .into_iter()
            .enumerate()
            .skip(start as usize)
            .take(count as usize)
            .map(|(i, (player, value))| LeaderboardEntry {
                rank: i as u32 + 1,
                display_name: self.names.get(player).cloned().flatten(),
                value: *value,
            })
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn call(
        transport: &mut dyn RemoteTransport,
        request: RemoteRequest,
    ) -> Result<RemoteResponse, RemoteError> {
        let (tx, rx) = unbounded();
        transport.send(request, ReplySlot::new(RequestId(1), tx));
        let (id, result) = rx.try_recv().unwrap();
        assert_eq!(id, RequestId(1));
        assert!(rx.try_recv().is_err(), "slot completed more than once");
        result
    }

    fn login(transport: &mut MemoryTransport, id: &str) {
        call(
            transport,
            RemoteRequest::Login {
                local_id: id.to_string(),
                is_new: true,
            },
        )
        .unwrap();
    }

    //=====================================================================
    // ReplySlot
    //=====================================================================

    #[test]
    fn dropped_slot_completes_as_failure_once() {
        let (tx, rx) = unbounded();
        drop(ReplySlot::new(RequestId(7), tx));

        assert_eq!(rx.try_recv().unwrap(), (RequestId(7), Err(RemoteError::Dropped)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn completed_slot_does_not_report_drop() {
        let (tx, rx) = unbounded();
        ReplySlot::new(RequestId(2), tx).complete(Ok(RemoteResponse::Submitted));

        assert_eq!(rx.try_recv().unwrap(), (RequestId(2), Ok(RemoteResponse::Submitted)));
        assert!(rx.try_recv().is_err());
    }

    //=====================================================================
    // OfflineTransport
    //=====================================================================

    #[test]
    fn offline_fails_every_call() {
        let result = call(
            &mut OfflineTransport,
            RemoteRequest::GetLeaderboard {
                board: "Highscore".into(),
                start: 0,
                count: 10,
            },
        );
        assert_eq!(result, Err(RemoteError::Offline));
    }

    //=====================================================================
    // MemoryTransport
    //=====================================================================

    #[test]
    fn unknown_account_needs_registration() {
        let mut transport = MemoryTransport::new();
        let result = call(
            &mut transport,
            RemoteRequest::Login {
                local_id: "abc".into(),
                is_new: false,
            },
        );
        assert_eq!(result, Err(RemoteError::Rejected("User not found".into())));
    }

    #[test]
    fn login_returns_the_same_account_twice() {
        let mut transport = MemoryTransport::new();
        let first = call(
            &mut transport,
            RemoteRequest::Login { local_id: "abc".into(), is_new: true },
        );
        let second = call(
            &mut transport,
            RemoteRequest::Login { local_id: "abc".into(), is_new: false },
        );
        assert_eq!(first, second);
    }

    #[test]
    fn rename_requires_login_and_valid_unique_name() {
        let mut transport = MemoryTransport::new();
        transport.seed("Highscore", "Taken", 5);

        let rename = |name: &str| RemoteRequest::UpdateDisplayName { name: name.into() };

        assert_eq!(call(&mut transport, rename("Alice")), Err(RemoteError::NotLoggedIn));

        login(&mut transport, "abc");
        assert_eq!(
            call(&mut transport, rename("Al")),
            Err(RemoteError::Rejected("Invalid display name".into()))
        );
        assert_eq!(
            call(&mut transport, rename("Taken")),
            Err(RemoteError::Rejected("Name not available".into()))
        );
        assert_eq!(
            call(&mut transport, rename("Alice")),
            Ok(RemoteResponse::DisplayNameUpdated { name: "Alice".into() })
        );
    }

    #[test]
    fn leaderboard_orders_by_value_with_ranks() {
        let mut transport = MemoryTransport::new();
        transport.seed("Highscore", "low", 10);
        transport.seed("Highscore", "high", 1_000);
        login(&mut transport, "me");
        call(
            &mut transport,
            RemoteRequest::SubmitEntries {
                entries: vec![ScoreEntry::new("Highscore", 500)],
            },
        )
        .unwrap();

        let board = call(
            &mut transport,
            RemoteRequest::GetLeaderboard { board: "Highscore".into(), start: 0, count: 100 },
        );

        let Ok(RemoteResponse::Leaderboard(rows)) = board else {
            panic!("expected leaderboard, got {:?}", board);
        };
        let values: Vec<(u32, u64)> = rows.iter().map(|r| (r.rank, r.value)).collect();
        assert_eq!(values, vec![(1, 1_000), (2, 500), (3, 10)]);
        assert_eq!(rows[1].display_name, None);
    }

    #[test]
    fn aggregation_combines_submissions() {
        let mut transport = MemoryTransport::new().with_aggregation("Attempts", Aggregation::Sum);
        login(&mut transport, "me");

        for score in [300, 100] {
            call(
                &mut transport,
                RemoteRequest::SubmitEntries {
                    entries: vec![ScoreEntry::new("Highscore", score), ScoreEntry::new("Attempts", 1)],
                },
            )
            .unwrap();
        }

        assert_eq!(transport.statistic("Highscore"), Some(300));
        assert_eq!(transport.statistic("Attempts"), Some(2));
    }

    #[test]
    fn offline_switch_fails_calls() {
        let mut transport = MemoryTransport::new();
        transport.set_offline(true);
        assert_eq!(
            call(&mut transport, RemoteRequest::Login { local_id: "x".into(), is_new: true }),
            Err(RemoteError::Offline)
        );
    }
}
