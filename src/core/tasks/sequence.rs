//=========================================================================
// Staged Sequence
//=========================================================================
//
// Ordered list of items revealed one at a time.
//
//   step 0: fire item 0
//   ...wait delays[0]...  fire item 1
//   ...wait delays[1]...  fire item 2
//
// Time spent past a delay is not carried over, and at most one item fires
// per step, so two consecutive items are always at least their delay
// apart even on a long frame.
//
//=========================================================================

use super::task::{StepOutcome, TaskFault, TaskResult};

//=== StagedSequence ======================================================

/// Restartable ordered reveal with an individual delay per item.
pub struct StagedSequence<T> {
    delays: Vec<f32>,
    cursor: usize,
    waited: f32,
    on_item: Box<dyn FnMut(&mut T, usize) -> TaskResult + Send>,
}

impl<T> StagedSequence<T> {
    //--- Construction -----------------------------------------------------

    /// Creates a sequence of `delays.len()` items.
    ///
    /// `delays[i]` is the wait between item `i` firing and item `i + 1`
    /// becoming eligible.
    pub fn new<F>(delays: Vec<f32>, mut on_item: F) -> Self
    where
        F: FnMut(&mut T, usize) + Send + 'static,
    {
        Self {
            delays,
            cursor: 0,
            waited: 0.0,
            on_item: Box::new(move |target, index| {
                on_item(target, index);
                Ok(())
            }),
        }
    }

    /// Creates a sequence of `count` items separated by the same delay.
    pub fn uniform<F>(count: usize, delay: f32, on_item: F) -> Self
    where
        F: FnMut(&mut T, usize) + Send + 'static,
    {
        Self::new(vec![delay; count], on_item)
    }

    //--- Queries ----------------------------------------------------------

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// True if the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Number of items fired so far.
    pub fn fired(&self) -> usize {
        self.cursor
    }

    /// True once every item has fired.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.delays.len()
    }

    //--- Progression ------------------------------------------------------

    /// Rewinds to the first item.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.waited = 0.0;
    }

    pub(crate) fn step(&mut self, dt: f32, target: &mut T) -> Result<StepOutcome, TaskFault> {
        if self.is_finished() {
            return Ok(StepOutcome::Complete);
        }

        if self.cursor > 0 {
            self.waited += dt.max(0.0);
            if self.waited < self.delays[self.cursor - 1] {
                return Ok(StepOutcome::Running);
            }
        }

        (self.on_item)(target, self.cursor)?;
        self.cursor += 1;
        self.waited = 0.0;

        if self.is_finished() {
            Ok(StepOutcome::Complete)
        } else {
            Ok(StepOutcome::Running)
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
