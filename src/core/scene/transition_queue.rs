//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene switch requests.
//
// Scenes push requests here during updates. The state machine applies
// them at the tick boundary; when several arrive in one frame only the
// last one takes effect.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneKind;

//=== Transition Queue ====================================================

/// Scene switch requests made during the current frame.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneKind>,
}

impl TransitionQueue {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Requests a switch to `kind` at the next tick boundary.
    pub fn request(&mut self, kind: SceneKind) {
        self.queue.push(kind);
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes the request that wins this frame, leaving the queue empty.
    pub fn take_last(&mut self) -> Option<SceneKind> {
        let last = self.queue.last().copied();
        self.queue.clear();
        last
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
