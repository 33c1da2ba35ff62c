//=========================================================================
// Animation Task
//=========================================================================
//
// A single timed unit of work advanced by the scheduler once per frame.
//
// Shapes:
//   linear        x: 0 → 1 over `duration`, removed after x == 1
//   linear_repeat x wraps in [0, 1) forever
//   after         callback runs once, when the delay has elapsed
//   staged        ordered items, each gated by its own delay
//
// Callbacks receive the scheduler's target by `&mut` plus the normalized
// progress. They never capture the state they animate.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::sequence::StagedSequence;

//=== TaskFault ===========================================================

/// Failure raised by a task callback.
///
/// A fault is fatal to the task that raised it and to nothing else: the
/// scheduler logs it and drops the task during the same step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskFault {
    /// The element or row the task animates no longer exists.
    #[error("task target missing: {0}")]
    MissingTarget(String),

    /// Any other callback failure.
    #[error("task failed: {0}")]
    Failed(String),
}

/// Result type returned by fallible task callbacks.
pub type TaskResult = Result<(), TaskFault>;

pub(crate) type ProgressFn<T> = Box<dyn FnMut(&mut T, f32) -> TaskResult + Send>;

//=== StepOutcome =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    Running,
    Complete,
}

//=== Task ================================================================

/// A schedulable animation or staged sequence over a target of type `T`.
///
/// # Example
///
/// ```
/// use deep_debt::core::tasks::{Task, TaskScheduler};
///
/// let mut scale = 1.0_f32;
/// let mut tasks = TaskScheduler::new();
/// tasks.start(Task::linear(0.3, |scale: &mut f32, x| *scale = 1.0 + x / 4.0));
///
/// tasks.step_all(0.3, &mut scale);
/// assert_eq!(scale, 1.25);
/// assert!(tasks.is_empty());
/// ```
pub struct Task<T> {
    kind: TaskKind<T>,
}

enum TaskKind<T> {
    Linear(LinearTask<T>),
    Staged(StagedSequence<T>),
}

struct LinearTask<T> {
    duration: f32,
    elapsed: f32,
    repeat: bool,
    callback: ProgressFn<T>,
}

impl<T> Task<T> {
    //--- Construction -----------------------------------------------------

    /// Runs `callback` every frame with progress in `[0, 1]`, then completes.
    ///
    /// A non-positive duration completes on the first step with `x == 1`.
    pub fn linear<F>(duration: f32, mut callback: F) -> Self
    where
        F: FnMut(&mut T, f32) + Send + 'static,
    {
        Self::fallible(duration, move |target, x| {
            callback(target, x);
            Ok(())
        })
    }

    /// Like [`Task::linear`], but the callback may fault.
    pub fn fallible<F>(duration: f32, callback: F) -> Self
    where
        F: FnMut(&mut T, f32) -> TaskResult + Send + 'static,
    {
        Self {
            kind: TaskKind::Linear(LinearTask {
                duration,
                elapsed: 0.0,
                repeat: false,
                callback: Box::new(callback),
            }),
        }
    }

    /// Runs `callback` forever with progress wrapping in `[0, 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `duration <= 0.0`.
    pub fn linear_repeat<F>(duration: f32, mut callback: F) -> Self
    where
        F: FnMut(&mut T, f32) + Send + 'static,
    {
        assert!(duration > 0.0, "Repeating task duration must be positive, got {}", duration);

        Self {
            kind: TaskKind::Linear(LinearTask {
                duration,
                elapsed: 0.0,
                repeat: true,
                callback: Box::new(move |target, x| {
                    callback(target, x);
                    Ok(())
                }),
            }),
        }
    }

    /// Runs `callback` exactly once, on the first step where `delay` has elapsed.
    pub fn after<F>(delay: f32, callback: F) -> Self
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let mut pending = Some(callback);
        Self::linear(delay, move |target, x| {
            if x >= 1.0 {
                if let Some(callback) = pending.take() {
                    callback(target);
                }
            }
        })
    }

    /// Wraps a staged sequence so it can be scheduled.
    pub fn staged(sequence: StagedSequence<T>) -> Self {
        Self {
            kind: TaskKind::Staged(sequence),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Whether this task repeats forever.
    pub fn is_repeating(&self) -> bool {
        matches!(&self.kind, TaskKind::Linear(linear) if linear.repeat)
    }

    //--- Stepping ---------------------------------------------------------

    /// Rewinds the task to its initial state.
    pub(crate) fn restart(&mut self) {
        match &mut self.kind {
            TaskKind::Linear(linear) => linear.elapsed = 0.0,
            TaskKind::Staged(sequence) => sequence.restart(),
        }
    }

    pub(crate) fn step(&mut self, dt: f32, target: &mut T) -> Result<StepOutcome, TaskFault> {
        match &mut self.kind {
            TaskKind::Linear(linear) => linear.step(dt, target),
            TaskKind::Staged(sequence) => sequence.step(dt, target),
        }
    }
}

impl<T> LinearTask<T> {
    fn step(&mut self, dt: f32, target: &mut T) -> Result<StepOutcome, TaskFault> {
        self.elapsed += dt.max(0.0);

        if self.repeat {
            if self.elapsed >= self.duration {
                self.elapsed %= self.duration;
            }
            let mut x = self.elapsed / self.duration;
            if x >= 1.0 {
                x = 0.0;
            }
            (self.callback)(target, x)?;
            return Ok(StepOutcome::Running);
        }

        let x = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };

        (self.callback)(target, x)?;

        if x >= 1.0 {
            Ok(StepOutcome::Complete)
        } else {
            Ok(StepOutcome::Running)
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
